use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roteiro::cli::{Cli, Command, DecisionArg, VerdictArg};
use roteiro::config::FlowConfig;
use roteiro::flow::{ScriptFlow, Submission};
use roteiro::store::{EntityStore, MemoryStore};
use roteiro::ui::Render;
use roteiro::workflow::{Role, User};

// Hash bcrypt de demonstração; a emissão de credenciais fica fora deste núcleo.
const DEMO_HASH: &str = "$2a$10$9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "roteiro=debug"
    } else {
        "roteiro=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = FlowConfig::load()?;
    let store = MemoryStore::open(&config.storage_path)?;
    let flow = ScriptFlow::new(store, config.approval_quorum, config.max_conflict_retries);
    let render = Render::new();

    match cli.command {
        Command::Submit {
            title,
            body,
            client_name,
            client_email,
            client_phone,
        } => {
            let script = flow.submit(&Submission {
                title,
                body,
                client_name,
                client_email,
                client_phone,
            })?;
            render.script(&script);
        }

        Command::ClaimAnalysis { script_id, user_id } => {
            render.script(&flow.claim_for_analysis(script_id, user_id)?);
        }

        Command::Analyze {
            script_id,
            user_id,
            verdict,
            justification,
        } => {
            let fit = matches!(verdict, VerdictArg::Apto);
            render.script(&flow.analyze(script_id, user_id, fit, &justification)?);
        }

        Command::ClaimRevision { script_id, user_id } => {
            render.script(&flow.claim_for_revision(script_id, user_id)?);
        }

        Command::Revise {
            script_id,
            user_id,
            notes,
        } => {
            render.script(&flow.revise(script_id, user_id, &notes)?);
        }

        Command::Vote {
            script_id,
            user_id,
            decision,
            justification,
        } => {
            let approve = matches!(decision, DecisionArg::Aprovar);
            render.script(&flow.vote(script_id, user_id, approve, &justification)?);
        }

        Command::List { status, assignee } => {
            for script in flow.list(status.map(Into::into), assignee.as_deref())? {
                render.script_row(&script);
            }
        }

        Command::Get { script_id } => {
            render.script(&flow.get(script_id)?);
        }

        Command::Client { email } => {
            render.client(&flow.get_client_by_email(&email)?);
        }

        Command::Users => {
            for user in flow.store().users()? {
                render.user(&user);
            }
        }

        Command::Seed => {
            for (name, email, role) in [
                ("Aldo Analista", "analista@coop.com", Role::Analyst),
                ("Rita Revisora", "revisor@coop.com", Role::Reviewer),
                ("Alba Aprovadora", "aprovador1@coop.com", Role::Approver),
                ("Beto Aprovador", "aprovador2@coop.com", Role::Approver),
                ("Caio Aprovador", "aprovador3@coop.com", Role::Approver),
            ] {
                let user = flow.store().insert_user(User::new(
                    name.into(),
                    email.into(),
                    DEMO_HASH.into(),
                    role,
                ))?;
                render.user(&user);
            }
        }
    }

    Ok(())
}
