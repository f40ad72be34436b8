//! Host-facing change notifications.
//!
//! The model never calls back into the host; it queues [`SearchEvent`]
//! values that the host drains after each update round. Every asynchronous
//! failure is converted into one of these — nothing is thrown across the
//! component boundary.

use hubscope_core::Candidate;

use crate::dispatcher::RepoLoad;

/// One observable state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Candidate list, loading flag, error text, or focus index changed.
    SearchStateChanged {
        /// Current candidate list (replaced wholesale per result set).
        candidates: Vec<Candidate>,
        /// Whether a search is in flight.
        loading: bool,
        /// Search-scoped error message, if the last search failed.
        error: Option<String>,
        /// Roving focus index.
        focus: Option<usize>,
    },
    /// A candidate was committed (click or Enter).
    SelectionCommitted(Candidate),
    /// The dependent load moved through its lifecycle.
    RepoLoadChanged(RepoLoad),
}
