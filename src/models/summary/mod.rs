//! Condensed summaries of issues and issue groups
//!
//! Summaries drop remediation detail and long lists; the details tools return
//! the full payloads.

mod common;
mod group;
mod issue;

pub use group::IssueGroupSummary;
pub use issue::IssueSummary;
