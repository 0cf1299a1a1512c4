//! The draft session file.
//!
//! The in-memory draft the original kept in UI session state lives here as
//! a TOML file between commands: each command loads it, applies exactly one
//! mutation, recomputes totals and writes it back. Nothing else owns the
//! draft while a command runs.

use std::path::{Path, PathBuf};

use quote_core::QuoteDraft;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("draft file is not valid: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("draft cannot be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no draft at {}; run `draft new` first", .0.display())]
    Missing(PathBuf),
}

/// Handle to one draft session file.
pub struct DraftSession {
    path: PathBuf,
}

impl DraftSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Starts a fresh draft, replacing any existing session file.
    pub fn create(&self) -> Result<QuoteDraft, SessionError> {
        let draft = QuoteDraft::new();
        self.save(&draft)?;
        Ok(draft)
    }

    pub fn load(&self) -> Result<QuoteDraft, SessionError> {
        if !self.path.exists() {
            return Err(SessionError::Missing(self.path.clone()));
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(
        &self,
        draft: &QuoteDraft,
    ) -> Result<(), SessionError> {
        let text = toml::to_string_pretty(draft)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    /// The reducer cycle: load, apply one mutation, persist, and hand the
    /// updated draft back so the caller can re-render its summary.
    pub fn update<E, F>(
        &self,
        mutate: F,
    ) -> Result<QuoteDraft, SessionUpdateError<E>>
    where
        F: FnOnce(&mut QuoteDraft) -> Result<(), E>,
    {
        let mut draft = self.load().map_err(SessionUpdateError::Session)?;
        mutate(&mut draft).map_err(SessionUpdateError::Action)?;
        self.save(&draft).map_err(SessionUpdateError::Session)?;
        Ok(draft)
    }
}

/// Either the session file failed, or the mutation itself was rejected.
#[derive(Debug, Error)]
pub enum SessionUpdateError<E> {
    #[error(transparent)]
    Session(SessionError),

    #[error("{0}")]
    Action(E),
}
