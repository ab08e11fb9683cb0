use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An internal actor's role. Each role gates exactly one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Analyst,
    Reviewer,
    Approver,
}

impl Role {
    /// The fixed permission labels granted by this role.
    ///
    /// Every role additionally carries the base `ROLE_USER` label.
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::Analyst => &["ROLE_ANALISTA", "ROLE_USER"],
            Role::Reviewer => &["ROLE_REVISOR", "ROLE_USER"],
            Role::Approver => &["ROLE_APROVADOR", "ROLE_USER"],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Analyst => write!(f, "analista"),
            Role::Reviewer => write!(f, "revisor"),
            Role::Approver => write!(f, "aprovador"),
        }
    }
}

/// An internal user: analyst, reviewer or approver.
///
/// The credential hash is opaque here; issuing and checking credentials is
/// the authentication layer's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
        }
    }
}

/// The originator of one or more scripts, keyed by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Client {
    pub fn new(name: String, email: String, phone: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
        }
    }
}

/// One approver's immutable decision on one script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub script_id: Uuid,
    pub approver_id: Uuid,
    pub approved: bool,
    pub justification: String,
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(script_id: Uuid, approver_id: Uuid, approved: bool, justification: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            script_id,
            approver_id,
            approved,
            justification,
            cast_at: Utc::now(),
        }
    }
}
