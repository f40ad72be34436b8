#![forbid(unsafe_code)]

//! Incremental search controller.
//!
//! Turns raw keystrokes into throttled directory queries, reconciles
//! out-of-order asynchronous responses, and exposes a keyboard-navigable
//! selection model over the result set.
//!
//! The moving parts, composed by [`SearchModel`]:
//!
//! - [`debounce::DebounceScheduler`] coalesces rapid query edits into a
//!   single deferred trigger.
//! - [`sequencer::QuerySequencer`] tags each in-flight search with a
//!   monotonically minted token; only the response carrying the latest
//!   token may touch visible state.
//! - [`selection::SelectionModel`] holds the candidate list and the roving
//!   focus index, with wrap-around keyboard navigation.
//! - [`dispatcher::SelectionDispatcher`] commits a candidate and guards
//!   against redundant dependent loads of the same one.
//!
//! All state lives on the update-loop thread; network calls run as
//! `Cmd::task` effects whose only output is a message. There is no request
//! cancellation — superseded requests complete and are discarded on arrival.

pub mod debounce;
pub mod dispatcher;
pub mod event;
pub mod model;
pub mod selection;
pub mod sequencer;

pub use dispatcher::{CommitOutcome, LoadStatus, LoadToken, RepoLoad, SelectionDispatcher};
pub use event::SearchEvent;
pub use model::{SearchModel, SearchMsg};
pub use selection::SelectionModel;
pub use sequencer::{QuerySequencer, RequestToken};
