//! Construction-time configuration for the search controller.

use std::time::Duration;

/// Default quiet period before an edited query triggers a search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default number of candidates requested per search.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Default HTTP request timeout.
///
/// A hung request that is still the current one would otherwise pin the
/// loading flag forever; the timeout converts it into a transport failure.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunable constants for one controller instance.
///
/// The observed product behavior never varies these at runtime, so they are
/// fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period before an edited query triggers a search.
    pub debounce: Duration,
    /// Number of candidates requested per search.
    pub page_size: usize,
    /// Per-request timeout for directory calls.
    pub request_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SearchConfig {
    /// Set the debounce delay (builder).
    #[must_use]
    pub const fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Set the result page size (builder).
    #[must_use]
    pub const fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the request timeout (builder).
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_behavior() {
        let config = SearchConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn builders_override_fields() {
        let config = SearchConfig::default()
            .with_debounce(Duration::from_millis(50))
            .with_page_size(10);
        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }
}
