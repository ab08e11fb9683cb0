//! Entity storage behind the flow engine.
//!
//! [`EntityStore`] is the seam a real database adapter would implement.
//! [`MemoryStore`] is the shipped implementation: in-memory tables with an
//! optional JSON snapshot on disk, so the CLI keeps state across runs.
//!
//! Writes use optimistic concurrency: a script save carries the version it
//! was loaded at, and a stale save fails with [`FlowError::Conflict`] instead
//! of clobbering a concurrent transition. A vote and its script update commit
//! as one unit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FlowError;
use crate::workflow::{Client, Script, User, Vote};

pub trait EntityStore {
    fn script(&self, id: Uuid) -> Result<Script, FlowError>;
    fn scripts(&self) -> Result<Vec<Script>, FlowError>;
    fn scripts_for_client(&self, client_id: Uuid) -> Result<Vec<Script>, FlowError>;
    fn insert_script(&self, script: Script) -> Result<Script, FlowError>;

    /// Persist a mutated script. Fails with [`FlowError::Conflict`] when the
    /// stored version no longer matches the one the script was loaded at.
    fn save_script(&self, script: Script) -> Result<Script, FlowError>;

    /// Persist a mutated script together with a newly cast vote, atomically.
    /// Same version check as [`EntityStore::save_script`].
    fn save_script_with_vote(&self, script: Script, vote: Vote) -> Result<Script, FlowError>;

    fn votes_for(&self, script_id: Uuid) -> Result<Vec<Vote>, FlowError>;

    fn user(&self, id: Uuid) -> Result<User, FlowError>;
    fn users(&self) -> Result<Vec<User>, FlowError>;
    /// Insert a user; if the email is already taken, returns the stored user.
    fn insert_user(&self, user: User) -> Result<User, FlowError>;

    fn client_by_email(&self, email: &str) -> Result<Option<Client>, FlowError>;
    /// Insert a client; if the email is already taken, returns the stored
    /// client so racing submissions converge on one identity.
    fn insert_client(&self, client: Client) -> Result<Client, FlowError>;
}

/// The persisted tables, serialized as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    clients: HashMap<Uuid, Client>,
    users: HashMap<Uuid, User>,
    scripts: HashMap<Uuid, Script>,
    votes: Vec<Vote>,
}

pub struct MemoryStore {
    inner: Mutex<Tables>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    /// Purely in-memory store, nothing written to disk.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Tables::default()),
            snapshot: None,
        }
    }

    /// Open a store backed by a JSON snapshot file, loading it if present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Tables::default()
        };
        Ok(Self {
            inner: Mutex::new(tables),
            snapshot: Some(path),
        })
    }

    /// Apply a mutation to a working copy of the tables, write the snapshot,
    /// then swap the copy in. A failed snapshot write leaves the previous
    /// state untouched, so a commit is all-or-nothing.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut Tables) -> Result<T, FlowError>,
    ) -> Result<T, FlowError> {
        let mut guard = self.inner.lock().expect("store lock poisoned");
        let mut next = guard.clone();
        let out = mutate(&mut next)?;
        if let Some(path) = &self.snapshot {
            let json = serde_json::to_string_pretty(&next)?;
            std::fs::write(path, json)?;
        }
        *guard = next;
        Ok(out)
    }

    fn read<T>(&self, view: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.inner.lock().expect("store lock poisoned");
        view(&guard)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_save(tables: &mut Tables, mut script: Script) -> Result<Script, FlowError> {
    let stored = tables
        .scripts
        .get(&script.id)
        .ok_or(FlowError::ScriptNotFound(script.id))?;
    if stored.version != script.version {
        return Err(FlowError::Conflict(script.id));
    }
    script.version += 1;
    tables.scripts.insert(script.id, script.clone());
    Ok(script)
}

impl EntityStore for MemoryStore {
    fn script(&self, id: Uuid) -> Result<Script, FlowError> {
        self.read(|t| t.scripts.get(&id).cloned())
            .ok_or(FlowError::ScriptNotFound(id))
    }

    fn scripts(&self) -> Result<Vec<Script>, FlowError> {
        let mut scripts = self.read(|t| t.scripts.values().cloned().collect::<Vec<_>>());
        scripts.sort_by_key(|s| s.submitted_at);
        Ok(scripts)
    }

    fn scripts_for_client(&self, client_id: Uuid) -> Result<Vec<Script>, FlowError> {
        let mut scripts = self.read(|t| {
            t.scripts
                .values()
                .filter(|s| s.client_id == client_id)
                .cloned()
                .collect::<Vec<_>>()
        });
        scripts.sort_by_key(|s| s.submitted_at);
        Ok(scripts)
    }

    fn insert_script(&self, script: Script) -> Result<Script, FlowError> {
        self.commit(|t| {
            t.scripts.insert(script.id, script.clone());
            Ok(script)
        })
    }

    fn save_script(&self, script: Script) -> Result<Script, FlowError> {
        self.commit(|t| checked_save(t, script))
    }

    fn save_script_with_vote(&self, script: Script, vote: Vote) -> Result<Script, FlowError> {
        self.commit(|t| {
            let saved = checked_save(t, script)?;
            t.votes.push(vote);
            Ok(saved)
        })
    }

    fn votes_for(&self, script_id: Uuid) -> Result<Vec<Vote>, FlowError> {
        Ok(self.read(|t| {
            t.votes
                .iter()
                .filter(|v| v.script_id == script_id)
                .cloned()
                .collect()
        }))
    }

    fn user(&self, id: Uuid) -> Result<User, FlowError> {
        self.read(|t| t.users.get(&id).cloned())
            .ok_or(FlowError::UserNotFound(id))
    }

    fn users(&self) -> Result<Vec<User>, FlowError> {
        let mut users = self.read(|t| t.users.values().cloned().collect::<Vec<_>>());
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    fn insert_user(&self, user: User) -> Result<User, FlowError> {
        self.commit(|t| {
            if let Some(existing) = t.users.values().find(|u| u.email == user.email) {
                return Ok(existing.clone());
            }
            t.users.insert(user.id, user.clone());
            Ok(user)
        })
    }

    fn client_by_email(&self, email: &str) -> Result<Option<Client>, FlowError> {
        Ok(self.read(|t| t.clients.values().find(|c| c.email == email).cloned()))
    }

    fn insert_client(&self, client: Client) -> Result<Client, FlowError> {
        self.commit(|t| {
            if let Some(existing) = t.clients.values().find(|c| c.email == client.email) {
                return Ok(existing.clone());
            }
            t.clients.insert(client.id, client.clone());
            Ok(client)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{Role, Status};

    fn seeded_script(store: &MemoryStore) -> Script {
        let client = store
            .insert_client(Client::new("Ana".into(), "ana@x.com".into(), "555".into()))
            .unwrap();
        store
            .insert_script(Script::new("Piloto".into(), "0123456789".into(), client.id))
            .unwrap()
    }

    #[test]
    fn missing_script_is_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.script(id),
            Err(FlowError::ScriptNotFound(found)) if found == id
        ));
    }

    #[test]
    fn save_bumps_version() {
        let store = MemoryStore::new();
        let mut script = seeded_script(&store);
        script.status = Status::InAnalysis;
        let saved = store.save_script(script).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(store.script(saved.id).unwrap().status, Status::InAnalysis);
    }

    #[test]
    fn stale_save_conflicts() {
        let store = MemoryStore::new();
        let script = seeded_script(&store);

        let first = script.clone();
        let second = script;
        store.save_script(first).unwrap();

        // `second` still carries version 0; the stored row is at 1.
        assert!(matches!(
            store.save_script(second),
            Err(FlowError::Conflict(_))
        ));
    }

    #[test]
    fn conflicting_vote_save_records_nothing() {
        let store = MemoryStore::new();
        let script = seeded_script(&store);
        let stale = script.clone();
        store.save_script(script.clone()).unwrap();

        let vote = Vote::new(script.id, Uuid::new_v4(), true, "bom".into());
        assert!(matches!(
            store.save_script_with_vote(stale, vote),
            Err(FlowError::Conflict(_))
        ));
        assert!(store.votes_for(script.id).unwrap().is_empty());
    }

    #[test]
    fn vote_and_script_commit_together() {
        let store = MemoryStore::new();
        let mut script = seeded_script(&store);
        script.status = Status::InApproval;
        let vote = Vote::new(script.id, Uuid::new_v4(), true, "bom".into());

        let saved = store.save_script_with_vote(script, vote).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(store.votes_for(saved.id).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_client_email_returns_existing() {
        let store = MemoryStore::new();
        let first = store
            .insert_client(Client::new("Ana".into(), "ana@x.com".into(), "555".into()))
            .unwrap();
        let second = store
            .insert_client(Client::new("Outra".into(), "ana@x.com".into(), "999".into()))
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Ana");
        assert_eq!(second.phone, "555");
    }

    #[test]
    fn duplicate_user_email_returns_existing() {
        let store = MemoryStore::new();
        let first = store
            .insert_user(User::new(
                "Rui".into(),
                "rui@coop.com".into(),
                "hash".into(),
                Role::Analyst,
            ))
            .unwrap();
        let second = store
            .insert_user(User::new(
                "Rui B".into(),
                "rui@coop.com".into(),
                "hash2".into(),
                Role::Reviewer,
            ))
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.role, Role::Analyst);
    }

    #[test]
    fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roteiro.json");

        let script_id = {
            let store = MemoryStore::open(&path).unwrap();
            seeded_script(&store).id
        };

        let reopened = MemoryStore::open(&path).unwrap();
        let script = reopened.script(script_id).unwrap();
        assert_eq!(script.title, "Piloto");
        assert_eq!(script.status, Status::AwaitingAnalysis);
        assert!(
            reopened
                .client_by_email("ana@x.com")
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn open_without_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::open(dir.path().join("nada.json")).unwrap();
        assert!(store.scripts().unwrap().is_empty());
    }
}
