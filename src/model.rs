//! Data model: the issue record and its tag/status enums.
//!
//! `Tag` and `Status` carry stable integer codes. The codes are the persisted
//! encoding in the `issue` table and the contract for callers that speak
//! integers; the in-memory representation is always the typed enum.

use crate::error::{IssueDbError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an issue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Bug,
    Feature,
    Enhancement,
}

impl Tag {
    pub const ALL: [Self; 3] = [Self::Bug, Self::Feature, Self::Enhancement];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Enhancement => "enhancement",
        }
    }

    /// Stable integer code (0..=2) used at the database boundary.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Bug => 0,
            Self::Feature => 1,
            Self::Enhancement => 2,
        }
    }

    /// Convert an integer code, rejecting anything outside 0..=2.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an out-of-range code.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Bug),
            1 => Ok(Self::Feature),
            2 => Ok(Self::Enhancement),
            other => Err(IssueDbError::validation(
                "tag",
                format!("code {other} is out of range (expected 0..=2)"),
            )),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = IssueDbError;

    /// Accepts the label or the integer code ("feature" and "1" are equal).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "enhancement" => Ok(Self::Enhancement),
            other => other.parse::<i64>().map_or_else(
                |_| {
                    Err(IssueDbError::validation(
                        "tag",
                        format!("unknown tag '{s}' (expected bug, feature, enhancement, or 0..=2)"),
                    ))
                },
                Self::from_code,
            ),
        }
    }
}

/// Lifecycle state of an issue.
///
/// `Deleted` is a settable status like any other; physically removing a row
/// is a separate operation and the two are deliberately independent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Proposed,
    Approved,
    Rejected,
    Deleted,
}

impl Status {
    pub const ALL: [Self; 4] = [
        Self::Proposed,
        Self::Approved,
        Self::Rejected,
        Self::Deleted,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Deleted => "deleted",
        }
    }

    /// Stable integer code (0..=3) used at the database boundary.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Proposed => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
            Self::Deleted => 3,
        }
    }

    /// Convert an integer code, rejecting anything outside 0..=3.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an out-of-range code.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Proposed),
            1 => Ok(Self::Approved),
            2 => Ok(Self::Rejected),
            3 => Ok(Self::Deleted),
            other => Err(IssueDbError::validation(
                "status",
                format!("code {other} is out of range (expected 0..=3)"),
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = IssueDbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "proposed" => Ok(Self::Proposed),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "deleted" => Ok(Self::Deleted),
            other => other.parse::<i64>().map_or_else(
                |_| {
                    Err(IssueDbError::validation(
                        "status",
                        format!(
                            "unknown status '{s}' (expected proposed, approved, rejected, deleted, or 0..=3)"
                        ),
                    ))
                },
                Self::from_code,
            ),
        }
    }
}

/// A persisted issue record.
///
/// `id` is assigned by the store and immutable; `status` is the only field
/// that ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub tag: Tag,
    pub status: Status,
    pub user_id: String,
}
