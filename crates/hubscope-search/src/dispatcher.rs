//! Selection dispatcher and dependent load state.
//!
//! `commit` is the single entry point for both pointer clicks and keyboard
//! Enter. The duplicate-fetch guard makes recommitting the currently
//! selected candidate a no-op — unless the previous dependent load failed,
//! in which case the recommit is the retry affordance and bypasses the
//! guard.

use hubscope_core::{Candidate, Repo};

/// Identity of one dependent load, minted per accepted commit.
///
/// A load that was superseded by a later commit carries a stale token and
/// its result is discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

/// Lifecycle of the dependent load for the committed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing committed yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Repos populated.
    Loaded,
    /// Fetch failed; `error` holds a user-visible message.
    Failed,
}

/// Dependent load state; one instance alive at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLoad {
    /// Candidate the load belongs to.
    pub candidate: Option<Candidate>,
    /// Current lifecycle stage.
    pub status: LoadStatus,
    /// Loaded repositories (empty unless `Loaded`).
    pub repos: Vec<Repo>,
    /// User-visible failure message (set only when `Failed`).
    pub error: Option<String>,
}

impl Default for RepoLoad {
    fn default() -> Self {
        Self {
            candidate: None,
            status: LoadStatus::Idle,
            repos: Vec::new(),
            error: None,
        }
    }
}

/// Outcome of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Same candidate, prior load healthy — no fetch.
    Duplicate,
    /// Fetch the dependent list, reporting back with this token.
    Fetch(LoadToken),
}

/// Owns the committed selection and its dependent load.
#[derive(Debug, Clone, Default)]
pub struct SelectionDispatcher {
    selected: Option<Candidate>,
    load: RepoLoad,
    seq: u64,
    current: Option<LoadToken>,
}

impl SelectionDispatcher {
    /// Create a dispatcher with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a candidate.
    ///
    /// Returns [`CommitOutcome::Duplicate`] when the candidate is already
    /// selected and the prior load did not fail; otherwise replaces the
    /// selection, resets the load to `Loading`, and returns the token the
    /// fetch must report back with.
    pub fn commit(&mut self, candidate: &Candidate) -> CommitOutcome {
        let is_same = self.selected.as_ref().is_some_and(|s| s.id == candidate.id);
        if is_same && self.load.status != LoadStatus::Failed {
            return CommitOutcome::Duplicate;
        }

        self.selected = Some(candidate.clone());
        self.seq += 1;
        let token = LoadToken(self.seq);
        self.current = Some(token);
        self.load = RepoLoad {
            candidate: Some(candidate.clone()),
            status: LoadStatus::Loading,
            repos: Vec::new(),
            error: None,
        };
        CommitOutcome::Fetch(token)
    }

    /// Apply a successful dependent load; `false` means the token was stale.
    pub fn apply_loaded(&mut self, token: LoadToken, repos: Vec<Repo>) -> bool {
        if self.current != Some(token) {
            return false;
        }
        self.load.status = LoadStatus::Loaded;
        self.load.repos = repos;
        self.load.error = None;
        true
    }

    /// Apply a failed dependent load; `false` means the token was stale.
    ///
    /// Previously loaded rows are cleared so status and data stay
    /// consistent; the host retries by recommitting the candidate.
    pub fn apply_failed(&mut self, token: LoadToken, detail: &str) -> bool {
        if self.current != Some(token) {
            return false;
        }
        let login = self
            .load
            .candidate
            .as_ref()
            .map_or("user", |c| c.login.as_str());
        self.load.error = Some(format!(
            "Failed to load repositories for {login}: {detail}. Please try again."
        ));
        self.load.status = LoadStatus::Failed;
        self.load.repos = Vec::new();
        true
    }

    /// The committed candidate, if any.
    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }

    /// The dependent load state.
    pub fn load(&self) -> &RepoLoad {
        &self.load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octocat() -> Candidate {
        Candidate::new(583231, "octocat")
    }

    #[test]
    fn first_commit_fetches() {
        let mut dispatcher = SelectionDispatcher::new();
        let outcome = dispatcher.commit(&octocat());
        assert!(matches!(outcome, CommitOutcome::Fetch(_)));
        assert_eq!(dispatcher.load().status, LoadStatus::Loading);
        assert_eq!(dispatcher.selected().map(|c| c.id), Some(583231));
    }

    #[test]
    fn recommit_after_success_is_duplicate() {
        let mut dispatcher = SelectionDispatcher::new();
        let CommitOutcome::Fetch(token) = dispatcher.commit(&octocat()) else {
            panic!("first commit must fetch");
        };
        assert!(dispatcher.apply_loaded(token, Vec::new()));
        assert_eq!(dispatcher.commit(&octocat()), CommitOutcome::Duplicate);
        assert_eq!(dispatcher.load().status, LoadStatus::Loaded);
    }

    #[test]
    fn recommit_while_loading_is_duplicate() {
        let mut dispatcher = SelectionDispatcher::new();
        dispatcher.commit(&octocat());
        assert_eq!(dispatcher.commit(&octocat()), CommitOutcome::Duplicate);
    }

    #[test]
    fn recommit_after_failure_refetches() {
        let mut dispatcher = SelectionDispatcher::new();
        let CommitOutcome::Fetch(token) = dispatcher.commit(&octocat()) else {
            panic!("first commit must fetch");
        };
        assert!(dispatcher.apply_failed(token, "status 500"));
        assert_eq!(dispatcher.load().status, LoadStatus::Failed);
        assert!(matches!(
            dispatcher.commit(&octocat()),
            CommitOutcome::Fetch(_)
        ));
        assert_eq!(dispatcher.load().status, LoadStatus::Loading);
        assert!(dispatcher.load().error.is_none());
    }

    #[test]
    fn different_candidate_replaces_load() {
        let mut dispatcher = SelectionDispatcher::new();
        let CommitOutcome::Fetch(first) = dispatcher.commit(&octocat()) else {
            panic!("first commit must fetch");
        };
        let other = Candidate::new(2, "hubber");
        assert!(matches!(
            dispatcher.commit(&other),
            CommitOutcome::Fetch(_)
        ));
        // The superseded load's result is now stale.
        assert!(!dispatcher.apply_loaded(first, Vec::new()));
        assert_eq!(dispatcher.load().status, LoadStatus::Loading);
        assert_eq!(
            dispatcher.load().candidate.as_ref().map(|c| c.id),
            Some(2)
        );
    }

    #[test]
    fn failure_clears_previously_loaded_rows() {
        let mut dispatcher = SelectionDispatcher::new();
        let CommitOutcome::Fetch(token) = dispatcher.commit(&octocat()) else {
            panic!("first commit must fetch");
        };
        let repo = Repo {
            id: 1,
            name: "hello".into(),
            full_name: "octocat/hello".into(),
            description: None,
            html_url: String::new(),
            stargazers_count: 0,
            forks_count: 0,
            language: None,
            updated_at: String::new(),
            private: false,
        };
        assert!(dispatcher.apply_loaded(token, vec![repo]));
        let CommitOutcome::Fetch(retry) = dispatcher.commit(&Candidate::new(2, "hubber")) else {
            panic!("new candidate must fetch");
        };
        assert!(dispatcher.apply_failed(retry, "status 500"));
        assert!(dispatcher.load().repos.is_empty());
        let message = dispatcher.load().error.as_deref().unwrap_or("");
        assert!(message.contains("hubber"), "message names the login: {message}");
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut dispatcher = SelectionDispatcher::new();
        let CommitOutcome::Fetch(first) = dispatcher.commit(&octocat()) else {
            panic!("first commit must fetch");
        };
        dispatcher.commit(&Candidate::new(2, "hubber"));
        assert!(!dispatcher.apply_failed(first, "timeout"));
        assert_eq!(dispatcher.load().status, LoadStatus::Loading);
        assert!(dispatcher.load().error.is_none());
    }
}
