use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use campusdesk_core::SessionState;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session persistence error: {0}")]
    Persistence(String),
}

/// Durable storage for the session record. No expiry checking happens here;
/// an expired token is only discovered when the backend rejects it.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<SessionState, SessionStoreError>;
    fn save(&self, session: &SessionState) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Single JSON document on disk. Writes go through a temp file and rename so
/// a crash mid-write never leaves a half-written session behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_owned();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<SessionState, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Ok(SessionState::empty());
            }
            Err(error) => {
                return Err(SessionStoreError::Persistence(format!(
                    "failed to read session file '{}': {error}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(session),
            Err(error) => {
                // A corrupt session file should not block startup.
                warn!(
                    path = %self.path.display(),
                    error = %error,
                    "session file is unreadable; starting with an empty session"
                );
                Ok(SessionState::empty())
            }
        }
    }

    fn save(&self, session: &SessionState) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|error| {
                    SessionStoreError::Persistence(format!(
                        "failed to create session directory '{}': {error}",
                        parent.display()
                    ))
                })?;
            }
        }

        let encoded = serde_json::to_string_pretty(session).map_err(|error| {
            SessionStoreError::Persistence(format!("failed to encode session: {error}"))
        })?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, encoded).map_err(|error| {
            SessionStoreError::Persistence(format!(
                "failed to write session file '{}': {error}",
                temp_path.display()
            ))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|error| {
            SessionStoreError::Persistence(format!(
                "failed to replace session file '{}': {error}",
                self.path.display()
            ))
        })
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionStoreError::Persistence(format!(
                "failed to remove session file '{}': {error}",
                self.path.display()
            ))),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<SessionState, SessionStoreError> {
        Ok(self.inner.lock().expect("session store lock").clone())
    }

    fn save(&self, session: &SessionState) -> Result<(), SessionStoreError> {
        *self.inner.lock().expect("session store lock") = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.inner.lock().expect("session store lock") = SessionState::empty();
        Ok(())
    }
}
