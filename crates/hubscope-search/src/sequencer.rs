//! Query sequencer tokens.
//!
//! Each triggered search mints a [`RequestToken`]; only the response
//! carrying the most recently minted token may update visible state.
//! Last-writer-wins is decided by issuance order, never by arrival order or
//! timestamps — the token comparison is the sole arbiter between
//! overlapping in-flight requests.

/// Opaque identity of one triggered search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Mints tokens and arbitrates response application.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySequencer {
    latest: u64,
}

impl QuerySequencer {
    /// Create a sequencer with no searches issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the token for a newly triggered search.
    ///
    /// Minting supersedes every previously issued token.
    pub fn mint(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether a response bearing `token` may be applied.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest && self.latest != 0
    }

    /// The most recently minted token, if any search was triggered.
    #[must_use]
    pub fn latest(&self) -> Option<RequestToken> {
        (self.latest != 0).then_some(RequestToken(self.latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minting_supersedes_prior_tokens() {
        let mut seq = QuerySequencer::new();
        let first = seq.mint();
        assert!(seq.is_current(first));
        let second = seq.mint();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut seq = QuerySequencer::new();
        let a = seq.mint();
        let b = seq.mint();
        let c = seq.mint();
        assert!(a < b && b < c);
    }

    #[test]
    fn no_token_is_current_before_first_mint() {
        let mut minter = QuerySequencer::new();
        let token = minter.mint();
        let fresh = QuerySequencer::new();
        assert!(!fresh.is_current(token));
        assert_eq!(fresh.latest(), None);
    }
}
