//! The search controller model.
//!
//! [`SearchModel`] composes the debounce scheduler, query sequencer,
//! selection model, and selection dispatcher into one [`Model`] driven by
//! [`SearchMsg`] values. The host maps its input events (keystrokes,
//! clicks) onto messages, runs them through `update`, executes the returned
//! commands, and drains [`SearchEvent`]s to refresh its view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use hubscope_core::{Candidate, DirectoryClient, DirectoryError, Repo, SearchConfig};
use hubscope_runtime::{Cmd, Model, TickEvent};

use crate::debounce::DebounceScheduler;
use crate::dispatcher::{CommitOutcome, LoadToken, RepoLoad, SelectionDispatcher};
use crate::event::SearchEvent;
use crate::selection::SelectionModel;
use crate::sequencer::{QuerySequencer, RequestToken};

/// Wakeup interval while a debounce window is open.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Search-scoped failure message shown inline.
const SEARCH_ERROR: &str = "Error searching users. Please try again.";

/// Messages consumed by [`SearchModel`].
#[derive(Debug)]
pub enum SearchMsg {
    /// Scheduled wakeup; polls the debounce window and settles focus.
    Tick,
    /// The query text changed to this value.
    QueryEdited(String),
    /// Escape: clear the query text and focus.
    QueryCleared,
    /// A search task finished successfully.
    SearchCompleted {
        /// Token minted when the search was triggered.
        token: RequestToken,
        /// Matching candidates, in directory order.
        candidates: Vec<Candidate>,
    },
    /// A search task failed.
    SearchFailed {
        /// Token minted when the search was triggered.
        token: RequestToken,
        /// Transport or status failure.
        error: DirectoryError,
    },
    /// ArrowDown: move roving focus forward (wrapping).
    FocusNext,
    /// ArrowUp: move roving focus backward (wrapping).
    FocusPrev,
    /// Enter on the input: commit the focused candidate, if any.
    CommitFocused,
    /// Item-level commit (click, or Enter/Space on the item itself).
    Commit(usize),
    /// An item gained input focus (pointer or programmatic).
    ItemFocused(usize),
    /// An item lost input focus.
    ItemBlurred(usize),
    /// A dependent load finished successfully.
    ReposLoaded {
        /// Token minted when the load was dispatched.
        load: LoadToken,
        /// The candidate's repositories.
        repos: Vec<Repo>,
    },
    /// A dependent load failed.
    ReposFailed {
        /// Token minted when the load was dispatched.
        load: LoadToken,
        /// Transport or status failure.
        error: DirectoryError,
    },
}

impl From<TickEvent> for SearchMsg {
    fn from(_: TickEvent) -> Self {
        Self::Tick
    }
}

/// The incremental search controller.
pub struct SearchModel {
    config: SearchConfig,
    client: Arc<dyn DirectoryClient>,
    query: String,
    debounce: DebounceScheduler,
    sequencer: QuerySequencer,
    selection: SelectionModel,
    dispatcher: SelectionDispatcher,
    loading: bool,
    error: Option<String>,
    events: Vec<SearchEvent>,
}

impl SearchModel {
    /// Create a controller over the given directory client.
    pub fn new(client: Arc<dyn DirectoryClient>, config: SearchConfig) -> Self {
        Self {
            config,
            client,
            query: String::new(),
            debounce: DebounceScheduler::new(config.debounce),
            sequencer: QuerySequencer::new(),
            selection: SelectionModel::new(),
            dispatcher: SelectionDispatcher::new(),
            loading: false,
            error: None,
            events: Vec::new(),
        }
    }

    // --- Host-facing state access ---

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current candidate list.
    pub fn candidates(&self) -> &[Candidate] {
        self.selection.candidates()
    }

    /// Roving focus index.
    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.selection.focus()
    }

    /// Whether a search is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Search-scoped error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The committed candidate, if any.
    pub fn selected(&self) -> Option<&Candidate> {
        self.dispatcher.selected()
    }

    /// The dependent load state.
    pub fn repo_load(&self) -> &RepoLoad {
        self.dispatcher.load()
    }

    /// The token of the most recently triggered search, if any.
    #[must_use]
    pub fn current_search_token(&self) -> Option<RequestToken> {
        self.sequencer.latest()
    }

    /// Drain queued change notifications.
    ///
    /// Draining marks the end of the current logical step: a blur with no
    /// sibling focus claim is resolved here, so focus hops between items
    /// never flicker through the cleared state.
    pub fn drain_events(&mut self) -> Vec<SearchEvent> {
        if self.selection.settle() {
            self.emit_search_state();
        }
        std::mem::take(&mut self.events)
    }

    // --- Internals ---

    fn emit_search_state(&mut self) {
        self.events.push(SearchEvent::SearchStateChanged {
            candidates: self.selection.candidates().to_vec(),
            loading: self.loading,
            error: self.error.clone(),
            focus: self.selection.focus(),
        });
    }

    /// Issue one logical search for `query`.
    ///
    /// Empty or whitespace-only queries reset results synchronously and
    /// never reach the network.
    fn trigger(&mut self, query: &str) -> Cmd<SearchMsg> {
        if query.trim().is_empty() {
            self.loading = false;
            self.error = None;
            self.selection.replace(Vec::new());
            self.emit_search_state();
            return Cmd::none();
        }

        let token = self.sequencer.mint();
        self.loading = true;
        self.error = None;
        self.selection.clear_focus();
        self.emit_search_state();

        let client = Arc::clone(&self.client);
        let query = query.to_owned();
        let limit = self.config.page_size;
        debug!(%query, ?token, "search triggered");
        Cmd::task(move || match client.search(&query, limit) {
            Ok(candidates) => SearchMsg::SearchCompleted { token, candidates },
            Err(error) => SearchMsg::SearchFailed { token, error },
        })
    }

    fn commit(&mut self, candidate: Candidate) -> Cmd<SearchMsg> {
        match self.dispatcher.commit(&candidate) {
            CommitOutcome::Duplicate => {
                debug!(login = %candidate.login, "duplicate commit suppressed");
                Cmd::none()
            }
            CommitOutcome::Fetch(load) => {
                self.events
                    .push(SearchEvent::SelectionCommitted(candidate.clone()));
                self.events
                    .push(SearchEvent::RepoLoadChanged(self.dispatcher.load().clone()));
                let client = Arc::clone(&self.client);
                let login = candidate.login;
                Cmd::task(move || match client.list_repos(&login) {
                    Ok(repos) => SearchMsg::ReposLoaded { load, repos },
                    Err(error) => SearchMsg::ReposFailed { load, error },
                })
            }
        }
    }

    fn on_tick(&mut self) -> Cmd<SearchMsg> {
        let mut cmds = Vec::new();
        if let Some(query) = self.debounce.due(Instant::now()) {
            cmds.push(self.trigger(&query));
        }
        if self.debounce.is_armed() {
            cmds.push(Cmd::tick(TICK_INTERVAL));
        }
        Cmd::batch(cmds)
    }
}

impl Model for SearchModel {
    type Message = SearchMsg;

    fn update(&mut self, msg: SearchMsg) -> Cmd<SearchMsg> {
        // Messages that neither blur nor (re)claim item focus close the
        // focus step. A sibling's claim must land before any pending blur
        // resolves, or the event stream would pass through the cleared
        // state mid-hop.
        if !matches!(
            msg,
            SearchMsg::ItemBlurred(_) | SearchMsg::ItemFocused(_) | SearchMsg::Commit(_)
        ) && self.selection.settle()
        {
            self.emit_search_state();
        }

        match msg {
            SearchMsg::Tick => self.on_tick(),

            SearchMsg::QueryEdited(query) => {
                self.query = query.clone();
                self.debounce.note_edit(query, Instant::now());
                Cmd::tick(TICK_INTERVAL)
            }

            SearchMsg::QueryCleared => {
                self.query.clear();
                self.selection.clear_focus();
                self.emit_search_state();
                // The cleared query still flows through the debounce; the
                // eventual trigger resets results without a network call.
                self.debounce.note_edit(String::new(), Instant::now());
                Cmd::tick(TICK_INTERVAL)
            }

            SearchMsg::SearchCompleted { token, candidates } => {
                if !self.sequencer.is_current(token) {
                    debug!(?token, "stale search response discarded");
                    return Cmd::none();
                }
                self.loading = false;
                self.selection.replace(candidates);
                self.emit_search_state();
                Cmd::none()
            }

            SearchMsg::SearchFailed { token, error } => {
                if !self.sequencer.is_current(token) {
                    debug!(?token, %error, "stale search failure discarded");
                    return Cmd::none();
                }
                self.loading = false;
                self.error = Some(SEARCH_ERROR.to_owned());
                self.selection.replace(Vec::new());
                self.emit_search_state();
                Cmd::none()
            }

            SearchMsg::FocusNext => {
                if !self.selection.is_empty() {
                    self.selection.focus_next();
                    self.emit_search_state();
                }
                Cmd::none()
            }

            SearchMsg::FocusPrev => {
                if !self.selection.is_empty() {
                    self.selection.focus_prev();
                    self.emit_search_state();
                }
                Cmd::none()
            }

            SearchMsg::CommitFocused => match self.selection.focused().cloned() {
                Some(candidate) => self.commit(candidate),
                None => Cmd::none(),
            },

            SearchMsg::Commit(index) => {
                match self.selection.candidates().get(index).cloned() {
                    Some(candidate) => {
                        self.selection.item_focused(index);
                        self.emit_search_state();
                        self.commit(candidate)
                    }
                    None => Cmd::none(),
                }
            }

            SearchMsg::ItemFocused(index) => {
                self.selection.item_focused(index);
                self.emit_search_state();
                Cmd::none()
            }

            SearchMsg::ItemBlurred(index) => {
                self.selection.item_blurred(index);
                Cmd::none()
            }

            SearchMsg::ReposLoaded { load, repos } => {
                if self.dispatcher.apply_loaded(load, repos) {
                    self.events
                        .push(SearchEvent::RepoLoadChanged(self.dispatcher.load().clone()));
                } else {
                    debug!("stale dependent load discarded");
                }
                Cmd::none()
            }

            SearchMsg::ReposFailed { load, error } => {
                if self.dispatcher.apply_failed(load, &error.to_string()) {
                    self.events
                        .push(SearchEvent::RepoLoadChanged(self.dispatcher.load().clone()));
                } else {
                    debug!(%error, "stale dependent failure discarded");
                }
                Cmd::none()
            }
        }
    }
}
