//! Directory records.
//!
//! Field names follow the GitHub REST API wire format so both records can be
//! deserialized straight from response bodies. Candidate lists are replaced
//! wholesale on every new result set; nothing here is diffed incrementally.

use serde::{Deserialize, Serialize};

/// One matching user returned by an incremental search.
///
/// `id` is the stable unique identifier; `login` is the primary label shown
/// in result lists. The remaining fields are optional detail the search
/// endpoint may or may not populate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable unique identifier.
    pub id: u64,
    /// Account login, the primary display label.
    pub login: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Profile page URL.
    #[serde(default)]
    pub html_url: String,
    /// Public repository count (detail endpoint only).
    #[serde(default)]
    pub public_repos: u64,
    /// Follower count (detail endpoint only).
    #[serde(default)]
    pub followers: u64,
    /// Following count (detail endpoint only).
    #[serde(default)]
    pub following: u64,
    /// Display name, if the user set one.
    #[serde(default)]
    pub name: Option<String>,
    /// Profile bio.
    #[serde(default)]
    pub bio: Option<String>,
    /// Company affiliation.
    #[serde(default)]
    pub company: Option<String>,
    /// Location string.
    #[serde(default)]
    pub location: Option<String>,
}

impl Candidate {
    /// Create a minimal candidate with just an id and login.
    ///
    /// Handy in tests and anywhere the optional detail fields are irrelevant.
    #[must_use]
    pub fn new(id: u64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            avatar_url: String::new(),
            html_url: String::new(),
            public_repos: 0,
            followers: 0,
            following: 0,
            name: None,
            bio: None,
            company: None,
            location: None,
        }
    }
}

/// One repository belonging to a committed candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Stable unique identifier.
    pub id: u64,
    /// Short repository name.
    pub name: String,
    /// `owner/name` form.
    pub full_name: String,
    /// Repository description.
    #[serde(default)]
    pub description: Option<String>,
    /// Repository page URL.
    #[serde(default)]
    pub html_url: String,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Primary language, if detected.
    #[serde(default)]
    pub language: Option<String>,
    /// Last update timestamp (RFC 3339).
    #[serde(default)]
    pub updated_at: String,
    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,
}
