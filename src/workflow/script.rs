use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DeniedReason;

use super::entities::{Role, User, Vote};
use super::status::Status;

/// The workflow subject: a submitted script moving through review.
///
/// All mutations happen through the flow engine; the guard methods here are
/// pure predicates over `(Script, User)` evaluated against freshly loaded
/// state on every call. `version` is bumped by the store on each successful
/// save and backs the optimistic-concurrency check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub status: Status,
    pub submitted_at: DateTime<Utc>,
    pub analysis_notes: Option<String>,
    pub revision_notes: Option<String>,
    /// Responsible user for the claimed stage. Advisory once the script
    /// moves on; it is never cleared.
    pub assignee_id: Option<Uuid>,
    pub client_id: Uuid,
    pub version: u64,
}

impl Script {
    pub fn new(title: String, body: String, client_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            status: Status::AwaitingAnalysis,
            submitted_at: Utc::now(),
            analysis_notes: None,
            revision_notes: None,
            assignee_id: None,
            client_id,
            version: 0,
        }
    }

    /// An analyst may claim a script that is waiting for analysis.
    pub fn can_claim_analysis(&self, user: &User) -> Result<(), DeniedReason> {
        if self.status != Status::AwaitingAnalysis {
            return Err(DeniedReason::WrongStage);
        }
        if user.role != Role::Analyst {
            return Err(DeniedReason::WrongRole);
        }
        Ok(())
    }

    /// Only the analyst who claimed the script may deliver the analysis.
    pub fn can_analyze(&self, user: &User) -> Result<(), DeniedReason> {
        if self.status != Status::InAnalysis {
            return Err(DeniedReason::WrongStage);
        }
        if user.role != Role::Analyst {
            return Err(DeniedReason::WrongRole);
        }
        if self.assignee_id != Some(user.id) {
            return Err(DeniedReason::NotAssignee);
        }
        Ok(())
    }

    /// A reviewer may claim a script that passed analysis.
    pub fn can_claim_revision(&self, user: &User) -> Result<(), DeniedReason> {
        if self.status != Status::AwaitingRevision {
            return Err(DeniedReason::WrongStage);
        }
        if user.role != Role::Reviewer {
            return Err(DeniedReason::WrongRole);
        }
        Ok(())
    }

    /// Only the reviewer who claimed the script may deliver the revision.
    pub fn can_revise(&self, user: &User) -> Result<(), DeniedReason> {
        if self.status != Status::InRevision {
            return Err(DeniedReason::WrongStage);
        }
        if user.role != Role::Reviewer {
            return Err(DeniedReason::WrongRole);
        }
        if self.assignee_id != Some(user.id) {
            return Err(DeniedReason::NotAssignee);
        }
        Ok(())
    }

    /// An approver may vote while the script is in the approval stage and
    /// has not voted on it before. `votes` is the persisted vote set for
    /// this script.
    pub fn can_receive_vote(&self, user: &User, votes: &[Vote]) -> Result<(), DeniedReason> {
        if !matches!(self.status, Status::AwaitingApproval | Status::InApproval) {
            return Err(DeniedReason::WrongStage);
        }
        if user.role != Role::Approver {
            return Err(DeniedReason::WrongRole);
        }
        if votes.iter().any(|v| v.approver_id == user.id) {
            return Err(DeniedReason::AlreadyVoted);
        }
        Ok(())
    }
}
