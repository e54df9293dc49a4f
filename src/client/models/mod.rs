//! Aikido API data models
//!
//! Typed views of the public API payloads. Every struct keeps the fields it
//! does not model in an `extra` map so full-detail responses lose nothing.

mod auth;
mod common;
mod group;
mod issue;
mod repo;

pub use auth::{AccessToken, TokenResponse};
pub use common::{Listing, ResourceId};
pub use group::IssueGroup;
pub use issue::{Issue, IssueType, Severity};
pub use repo::Repository;
