//! Directory client contract.

use crate::error::DirectoryError;
use crate::record::{Candidate, Repo};

/// Remote directory with two operations and no observable internal state.
///
/// Implementations are called from background task threads, so they must be
/// `Send + Sync`. Both calls block; the runtime keeps the update loop
/// responsive by running them off-thread and delivering results as messages.
pub trait DirectoryClient: Send + Sync {
    /// Search the directory for candidates matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure or a non-success
    /// status. Callers never see partial results.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, DirectoryError>;

    /// List the dependent repository records for one candidate.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure or a non-success
    /// status.
    fn list_repos(&self, login: &str) -> Result<Vec<Repo>, DirectoryError>;
}
