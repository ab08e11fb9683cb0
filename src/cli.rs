//! Interface de linha de comando baseada em clap.
//!
//! Cada subcomando de [`Command`] corresponde a uma operação do fluxo de
//! revisão; a CLI só traduz argumentos, toda regra de negócio vive na
//! biblioteca.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::workflow::Status;

/// Fluxo de análise, revisão e aprovação de roteiros.
#[derive(Debug, Parser)]
#[command(name = "roteiro", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Filtro de status aceito pela CLI, mapeado para [`Status`] internamente.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    AguardandoAnalise,
    EmAnalise,
    AguardandoRevisao,
    EmRevisao,
    AguardandoAprovacao,
    EmAprovacao,
    Aprovado,
    Rejeitado,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::AguardandoAnalise => Status::AwaitingAnalysis,
            StatusArg::EmAnalise => Status::InAnalysis,
            StatusArg::AguardandoRevisao => Status::AwaitingRevision,
            StatusArg::EmRevisao => Status::InRevision,
            StatusArg::AguardandoAprovacao => Status::AwaitingApproval,
            StatusArg::EmAprovacao => Status::InApproval,
            StatusArg::Aprovado => Status::Approved,
            StatusArg::Rejeitado => Status::Rejected,
        }
    }
}

/// Veredito da análise.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VerdictArg {
    /// Roteiro apto, segue para revisão.
    Apto,
    /// Roteiro inapto, rejeitado.
    Inapto,
}

/// Decisão de um voto de aprovação.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DecisionArg {
    Aprovar,
    Rejeitar,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Envia um novo roteiro para análise.
    Submit {
        /// Título do roteiro.
        title: String,
        /// Texto do roteiro.
        body: String,
        /// Nome do cliente remetente.
        #[arg(long)]
        client_name: String,
        /// Email do cliente (chave de identidade).
        #[arg(long)]
        client_email: String,
        /// Telefone do cliente.
        #[arg(long)]
        client_phone: String,
    },

    /// Analista assume a análise de um roteiro.
    ClaimAnalysis { script_id: Uuid, user_id: Uuid },

    /// Analista responsável registra o veredito da análise.
    Analyze {
        script_id: Uuid,
        user_id: Uuid,
        verdict: VerdictArg,
        justification: String,
    },

    /// Revisor assume a revisão de um roteiro.
    ClaimRevision { script_id: Uuid, user_id: Uuid },

    /// Revisor responsável registra a revisão.
    Revise {
        script_id: Uuid,
        user_id: Uuid,
        notes: String,
    },

    /// Aprovador registra seu voto único sobre o roteiro.
    Vote {
        script_id: Uuid,
        user_id: Uuid,
        decision: DecisionArg,
        justification: String,
    },

    /// Lista roteiros, com filtros opcionais combinados por E lógico.
    List {
        /// Filtra pelo status atual.
        #[arg(long)]
        status: Option<StatusArg>,
        /// Filtra pelo email do usuário responsável.
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Mostra um roteiro pelo identificador.
    Get { script_id: Uuid },

    /// Mostra um cliente e seus roteiros pelo email.
    Client { email: String },

    /// Lista os usuários internos cadastrados.
    Users,

    /// Cadastra os usuários de demonstração (um por papel).
    Seed,
}
