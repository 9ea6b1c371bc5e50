//! The shared, lock-guarded sequence of recorded thoughts.
//!
//! A [`Notebook`] is created empty at process start and lives until exit.
//! Cloning the handle shares the same sequence, so one notebook can be
//! handed to every MCP session the process serves.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::models::{Acknowledgement, Entry};

/// Errors reported by notebook operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotebookError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No thoughts recorded. Use the think tool to record a thought first.")]
    EmptyState,
}

pub type Result<T> = std::result::Result<T, NotebookError>;

#[derive(Debug, Clone, Default)]
pub struct Notebook {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section either completes a single Vec operation or
    // touches nothing, so a panicking holder cannot leave a torn sequence.
    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a thought to the end of the notebook.
    ///
    /// Content that is empty or only whitespace is rejected without touching
    /// the notebook. Accepted content is stored verbatim.
    pub fn append(&self, content: impl Into<String>) -> Result<Acknowledgement> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(NotebookError::InvalidInput(
                "no thoughts provided".to_string(),
            ));
        }

        let ack = Acknowledgement::for_content(&content);
        self.lock().push(Entry::new(content));
        Ok(ack)
    }

    /// Snapshot of every entry in insertion order.
    ///
    /// Fails with [`NotebookError::EmptyState`] when nothing has been recorded,
    /// nudging callers to think before they review.
    pub fn list_all(&self) -> Result<Vec<Entry>> {
        let entries = self.lock();
        if entries.is_empty() {
            return Err(NotebookError::EmptyState);
        }
        Ok(entries.clone())
    }

    /// Drop every entry. Clearing an empty notebook is a no-op.
    pub fn clear_all(&self) {
        *self.lock() = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
