//! Client registry: the originator identity behind each submission.
//!
//! Clients are keyed by email. An email seen before resolves to the existing
//! client and the incoming name/phone are ignored — identity stability wins
//! over freshness.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::FlowError;
use crate::store::EntityStore;
use crate::workflow::{Client, Status};

/// A client together with its scripts reduced to headline fields.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub scripts: Vec<ScriptSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptSummary {
    pub id: Uuid,
    pub title: String,
    pub status: Status,
    pub submitted_at: DateTime<Utc>,
}

/// Resolve the client for an email, creating it on first sight.
pub fn find_or_create<S: EntityStore>(
    store: &S,
    name: &str,
    email: &str,
    phone: &str,
) -> Result<Client, FlowError> {
    if let Some(client) = store.client_by_email(email)? {
        return Ok(client);
    }
    store.insert_client(Client::new(name.into(), email.into(), phone.into()))
}

/// Look up a client by email and summarize it with its scripts.
pub fn get_by_email<S: EntityStore>(store: &S, email: &str) -> Result<ClientSummary, FlowError> {
    let client = store
        .client_by_email(email)?
        .ok_or_else(|| FlowError::ClientNotFound(email.into()))?;
    let scripts = store
        .scripts_for_client(client.id)?
        .into_iter()
        .map(|s| ScriptSummary {
            id: s.id,
            title: s.title,
            status: s.status,
            submitted_at: s.submitted_at,
        })
        .collect();
    Ok(ClientSummary {
        id: client.id,
        name: client.name,
        email: client.email,
        phone: client.phone,
        scripts,
    })
}
