use tracing::{debug, info};
use uuid::Uuid;

use crate::error::FlowError;
use crate::registry::{self, ClientSummary};
use crate::store::EntityStore;
use crate::workflow::{voting, Script, Status, Vote};

/// Everything needed to open a script's review pipeline.
#[derive(Debug, Clone)]
pub struct Submission {
    pub title: String,
    pub body: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
}

/// Drives scripts through the review pipeline.
///
/// Every state-mutating operation is one read-guard-mutate-save unit against
/// the store. A stale save (someone else moved the script first) is retried
/// from a fresh read up to `max_conflict_retries` times; guards are always
/// re-evaluated on the re-read, so a retried operation can still end in a
/// denial.
pub struct ScriptFlow<S> {
    store: S,
    approval_quorum: usize,
    max_conflict_retries: u32,
}

impl<S: EntityStore> ScriptFlow<S> {
    pub fn new(store: S, approval_quorum: usize, max_conflict_retries: u32) -> Self {
        Self {
            store,
            approval_quorum,
            max_conflict_retries,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open the pipeline for a new script. Public operation, no guard; the
    /// client identity is resolved or created from the email.
    pub fn submit(&self, submission: &Submission) -> Result<Script, FlowError> {
        let client = registry::find_or_create(
            &self.store,
            &submission.client_name,
            &submission.client_email,
            &submission.client_phone,
        )?;
        let script = self.store.insert_script(Script::new(
            submission.title.clone(),
            submission.body.clone(),
            client.id,
        ))?;
        info!(script = %script.id, client = %client.id, "script submitted for analysis");
        Ok(script)
    }

    /// An analyst takes responsibility for a waiting script.
    pub fn claim_for_analysis(&self, script_id: Uuid, user_id: Uuid) -> Result<Script, FlowError> {
        self.with_retry(|| {
            let mut script = self.store.script(script_id)?;
            let user = self.store.user(user_id)?;
            script.can_claim_analysis(&user)?;

            script.assignee_id = Some(user.id);
            script.status = Status::InAnalysis;
            let saved = self.store.save_script(script)?;
            info!(script = %script_id, analyst = %user_id, "script claimed for analysis");
            Ok(saved)
        })
    }

    /// The claiming analyst delivers the verdict: fit scripts move on to
    /// revision, unfit ones are rejected outright.
    pub fn analyze(
        &self,
        script_id: Uuid,
        user_id: Uuid,
        fit: bool,
        justification: &str,
    ) -> Result<Script, FlowError> {
        self.with_retry(|| {
            let mut script = self.store.script(script_id)?;
            let user = self.store.user(user_id)?;
            script.can_analyze(&user)?;

            script.analysis_notes = Some(justification.to_string());
            script.status = if fit {
                Status::AwaitingRevision
            } else {
                Status::Rejected
            };
            let saved = self.store.save_script(script)?;
            if fit {
                info!(script = %script_id, "script cleared for revision");
            } else {
                info!(script = %script_id, "script rejected at analysis");
            }
            Ok(saved)
        })
    }

    /// A reviewer takes responsibility for a script that passed analysis.
    pub fn claim_for_revision(&self, script_id: Uuid, user_id: Uuid) -> Result<Script, FlowError> {
        self.with_retry(|| {
            let mut script = self.store.script(script_id)?;
            let user = self.store.user(user_id)?;
            script.can_claim_revision(&user)?;

            script.assignee_id = Some(user.id);
            script.status = Status::InRevision;
            let saved = self.store.save_script(script)?;
            info!(script = %script_id, reviewer = %user_id, "script claimed for revision");
            Ok(saved)
        })
    }

    /// The claiming reviewer records the revision and sends the script to
    /// the approval stage.
    pub fn revise(&self, script_id: Uuid, user_id: Uuid, notes: &str) -> Result<Script, FlowError> {
        self.with_retry(|| {
            let mut script = self.store.script(script_id)?;
            let user = self.store.user(user_id)?;
            script.can_revise(&user)?;

            script.revision_notes = Some(notes.to_string());
            script.status = Status::AwaitingApproval;
            let saved = self.store.save_script(script)?;
            info!(script = %script_id, "script revised, awaiting approval");
            Ok(saved)
        })
    }

    /// An approver casts their single vote. The vote and the resulting
    /// status land in one atomic store commit; the tally is recomputed from
    /// the full persisted vote set.
    pub fn vote(
        &self,
        script_id: Uuid,
        user_id: Uuid,
        approve: bool,
        justification: &str,
    ) -> Result<Script, FlowError> {
        self.with_retry(|| {
            let mut script = self.store.script(script_id)?;
            let user = self.store.user(user_id)?;
            let mut votes = self.store.votes_for(script_id)?;
            script.can_receive_vote(&user, &votes)?;

            let vote = Vote::new(script_id, user.id, approve, justification.to_string());
            votes.push(vote.clone());
            // settle never yields a waiting status, so the first vote also
            // moves AGUARDANDO_APROVACAO into EM_APROVACAO.
            script.status = voting::settle(&voting::tally(&votes), self.approval_quorum);
            let saved = self.store.save_script_with_vote(script, vote)?;

            match saved.status {
                Status::Approved => info!(script = %script_id, "script approved by vote"),
                Status::Rejected => info!(script = %script_id, "script rejected by vote"),
                _ => info!(script = %script_id, approver = %user_id, "vote recorded, approval pending"),
            }
            Ok(saved)
        })
    }

    /// All scripts matching the present filters, AND semantics.
    pub fn list(
        &self,
        status: Option<Status>,
        assignee_email: Option<&str>,
    ) -> Result<Vec<Script>, FlowError> {
        let mut out = Vec::new();
        for script in self.store.scripts()? {
            if let Some(want) = status
                && script.status != want
            {
                continue;
            }
            if let Some(email) = assignee_email {
                let assigned = script
                    .assignee_id
                    .is_some_and(|id| self.store.user(id).is_ok_and(|u| u.email == email));
                if !assigned {
                    continue;
                }
            }
            out.push(script);
        }
        Ok(out)
    }

    pub fn get(&self, script_id: Uuid) -> Result<Script, FlowError> {
        self.store.script(script_id)
    }

    pub fn get_client_by_email(&self, email: &str) -> Result<ClientSummary, FlowError> {
        registry::get_by_email(&self.store, email)
    }

    fn with_retry(
        &self,
        op: impl Fn() -> Result<Script, FlowError>,
    ) -> Result<Script, FlowError> {
        let mut attempt = 0;
        loop {
            match op() {
                Err(err) if err.is_retryable() && attempt < self.max_conflict_retries => {
                    attempt += 1;
                    debug!(attempt, "conflicting update, retrying from a fresh read");
                }
                other => return other,
            }
        }
    }
}
