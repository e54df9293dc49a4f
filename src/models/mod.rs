//! Summary models for tool output
//!
//! Condensed shapes of API payloads, sized for an assistant's context window.

pub mod summary;

pub use summary::{IssueGroupSummary, IssueSummary};
