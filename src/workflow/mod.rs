mod entities;
mod script;
mod status;
pub mod voting;

pub use entities::{Client, Role, User, Vote};
pub use script::Script;
pub use status::Status;
