#![forbid(unsafe_code)]

//! Domain records and client contracts for hubscope.
//!
//! This crate defines the data that flows through the search controller:
//! directory [`Candidate`]s, their dependent [`Repo`] records, the
//! [`DirectoryClient`] trait the controller calls, and the construction-time
//! [`SearchConfig`]. It carries no IO of its own.

pub mod client;
pub mod config;
pub mod error;
pub mod record;

pub use client::DirectoryClient;
pub use config::SearchConfig;
pub use error::DirectoryError;
pub use record::{Candidate, Repo};
