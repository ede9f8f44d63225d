//! # Session Store
//!
//! A session exists only after a successful credential verification and
//! lives in memory for the lifetime of the process. It tracks the verified
//! provider handle, the currently selected exploration mode, and the
//! documents uploaded within the session, at most one per persona. Nothing
//! is persisted; all sessions die with the process.

use duolens::providers::ai::AiProvider;
use duolens::{ExploreMode, Persona};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Per-session state.
#[derive(Clone, Debug)]
pub struct Session {
    /// The provider built from the session's verified credential.
    pub provider: Box<dyn AiProvider>,
    /// The currently selected exploration mode.
    pub mode: ExploreMode,
    /// Documents uploaded in this session, by persona.
    pub uploads: HashMap<Persona, PathBuf>,
}

impl Session {
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self {
            provider,
            mode: ExploreMode::Home,
            uploads: HashMap::new(),
        }
    }
}

/// Shared, in-memory session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new session and returns its freshly generated id.
    pub fn insert(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(id, session);
        id
    }

    /// Returns a clone of the session, if it exists.
    pub fn get(&self, id: &Uuid) -> Option<Session> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(id)
            .cloned()
    }

    /// Applies `update` to the session and returns the updated clone.
    pub fn update<F>(&self, id: &Uuid, update: F) -> Option<Session>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        let session = sessions.get_mut(id)?;
        update(session);
        Some(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use duolens::errors::PromptError;

    #[derive(Clone, Debug)]
    struct NoopProvider;

    #[async_trait]
    impl AiProvider for NoopProvider {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, PromptError> {
            Ok(String::new())
        }

        async fn verify_credential(&self) -> Result<(), PromptError> {
            Ok(())
        }
    }

    #[test]
    fn sessions_start_in_home_mode() {
        let store = SessionStore::new();
        let id = store.insert(Session::new(Box::new(NoopProvider)));
        let session = store.get(&id).expect("session should exist");
        assert_eq!(session.mode, ExploreMode::Home);
        assert!(session.uploads.is_empty());
    }

    #[test]
    fn unknown_ids_resolve_to_nothing() {
        let store = SessionStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
        assert!(store.update(&Uuid::new_v4(), |_| {}).is_none());
    }

    #[test]
    fn updates_are_visible_to_later_reads() {
        let store = SessionStore::new();
        let id = store.insert(Session::new(Box::new(NoopProvider)));

        let updated = store
            .update(&id, |s| s.mode = s.mode.navigate(ExploreMode::Opinion))
            .expect("session should exist");
        assert_eq!(updated.mode, ExploreMode::Opinion);
        assert_eq!(store.get(&id).unwrap().mode, ExploreMode::Opinion);
    }
}
