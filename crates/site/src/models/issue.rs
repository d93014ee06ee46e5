//! Magazine issues.

use serde::Serialize;

use bioarchitettura_core::IssueId;

/// A numbered release of the magazine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub number: i64,
    pub title: String,
    pub year: i32,
    pub cover_image: Option<String>,
}

/// Input for creating an issue.
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub number: i64,
    pub title: String,
    pub year: i32,
    pub cover_image: Option<String>,
}
