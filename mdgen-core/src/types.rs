//! Domain types for the mdgen project registry.
//!
//! The serialized shape (camelCase keys, `"In Progress"` status label) is the
//! on-store format; keep it stable so existing stored collections still load.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Registry-assigned project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ProjectId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Workflow status of a project. Derived from `step_current`, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Draft,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Status for a given step, or `None` when the step is outside the mapping.
    ///
    /// `1` → Draft, `2..=4` → InProgress, `5` → Completed.
    pub fn from_step(step: i64) -> Option<Self> {
        match step {
            1 => Some(Self::Draft),
            2..=4 => Some(Self::InProgress),
            5 => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Draft => write!(f, "Draft"),
            ProjectStatus::InProgress => write!(f, "In Progress"),
            ProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A project record held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub step_current: i64,
    pub step_total: i64,
    /// Creation date, already formatted for display.
    pub date: String,
    pub image_url: String,
}

impl Project {
    /// `(step_current, step_total)` for progress display.
    pub fn progress(&self) -> (i64, i64) {
        (self.step_current, self.step_total)
    }
}

/// A partial set of project fields merged over an existing record.
///
/// `None` leaves the field untouched. `status` is accepted but always
/// overwritten by the step derivation after the merge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub step_current: Option<i64>,
    pub step_total: Option<i64>,
    pub date: Option<String>,
    pub image_url: Option<String>,
}

impl ProjectUpdate {
    /// Shallow-merge every `Some` field over `project`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(step) = self.step_current {
            project.step_current = step;
        }
        if let Some(total) = self.step_total {
            project.step_total = total;
        }
        if let Some(date) = self.date {
            project.date = date;
        }
        if let Some(url) = self.image_url {
            project.image_url = url;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
