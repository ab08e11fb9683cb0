//! Núcleo do fluxo de revisão de roteiros: máquina de estados, guardas de
//! transição, votação com quórum e registro de clientes.

pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod registry;
pub mod store;
pub mod ui;
pub mod workflow;

pub use error::{DeniedReason, FlowError};
pub use flow::{ScriptFlow, Submission};
