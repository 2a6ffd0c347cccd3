//! The addressable location of the current query.
//!
//! The carousel mirrors its committed query text into an address store as a
//! side effect of every query change, and seeds the initial query from it
//! on launch. In a terminal application the address is a small state file
//! holding the last query text; the trait keeps the seam so tests record
//! pushes in memory instead.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Error type for address store failures.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Failed to create the directory holding the address file.
    #[error("failed to create address directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the address file.
    #[error("failed to write address file at {path:?}: {source}")]
    Write {
        /// The file path that failed to be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Where the committed query text is mirrored.
///
/// Pushing is a side effect of a query change, independent of whether the
/// fetch for that query succeeds.
pub trait AddressSink {
    /// Mirror `text` as the current query.
    fn push_query(&mut self, text: &str) -> Result<(), AddressError>;
}

/// File-backed address store.
///
/// Holds exactly the last committed query text; a relaunch resumes it
/// unless the command line overrides.
#[derive(Debug)]
pub struct FileAddress {
    path: PathBuf,
}

impl FileAddress {
    /// Address store at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The query text persisted by the previous session, if any.
    pub fn initial_query(&self) -> Option<String> {
        let text = fs::read_to_string(&self.path).ok()?;
        let text = text.trim_end_matches('\n').to_string();
        debug!(query = %text, "seeded query from address file");
        Some(text)
    }
}

impl AddressSink for FileAddress {
    fn push_query(&mut self, text: &str) -> Result<(), AddressError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| AddressError::DirectoryCreation {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| AddressError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory sink recording every push, for tests.
#[derive(Debug, Default)]
pub struct RecordingAddress {
    /// Pushed query texts, oldest first.
    pub pushed: Vec<String>,
}

impl AddressSink for RecordingAddress {
    fn push_query(&mut self, text: &str) -> Result<(), AddressError> {
        self.pushed.push(text.to_string());
        Ok(())
    }
}
