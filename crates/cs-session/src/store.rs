// store.rs — SessionStore: persistence for GameSession records.
//
// Each session is stored as a JSON file: `<sessions_dir>/<session_id>.json`.
// Sessions are small and few per day, so a file per record keeps the store
// easy to inspect manually.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::SessionError;
use crate::session::GameSession;

/// Persistent store for GameSession records.
pub struct SessionStore {
    sessions_dir: PathBuf,
}

impl SessionStore {
    /// Create a new store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(sessions_dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let sessions_dir = sessions_dir.as_ref().to_path_buf();
        fs::create_dir_all(&sessions_dir).map_err(|source| SessionError::IoError {
            path: sessions_dir.display().to_string(),
            source,
        })?;
        Ok(Self { sessions_dir })
    }

    /// Save a session to disk (creates or overwrites).
    pub fn save(&self, session: &GameSession) -> Result<(), SessionError> {
        let path = self.session_file(session.session_id);
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&path, json).map_err(|source| SessionError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Get a specific session by ID.
    pub fn get(&self, session_id: Uuid) -> Result<Option<GameSession>, SessionError> {
        let path = self.session_file(session_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| SessionError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let session: GameSession = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    /// List all sessions, newest first.
    pub fn list(&self) -> Result<Vec<GameSession>, SessionError> {
        let mut sessions = Vec::new();

        let entries = fs::read_dir(&self.sessions_dir).map_err(|source| SessionError::IoError {
            path: self.sessions_dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| SessionError::IoError {
                path: self.sessions_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| SessionError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                if let Ok(session) = serde_json::from_str::<GameSession>(&json) {
                    sessions.push(session);
                }
            }
        }

        sessions.sort_by(|a, b| b.opened_at.cmp(&a.opened_at));
        Ok(sessions)
    }

    /// Close a session and persist the change.
    pub fn close(&self, session_id: Uuid) -> Result<GameSession, SessionError> {
        let mut session = self
            .get(session_id)?
            .ok_or(SessionError::NotFound(session_id))?;
        session.close()?;
        self.save(&session)?;
        Ok(session)
    }

    /// Path to the JSON file for a given session.
    fn session_file(&self, session_id: Uuid) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", session_id))
    }
}
