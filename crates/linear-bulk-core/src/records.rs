//! Remote records cached by category.
//!
//! Field names follow the GraphQL schema (camelCase on the wire). Only the
//! fields the provider reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Lightweight reference to a team embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamRef {
    /// Team identifier.
    pub id: String,
}

impl TeamRef {
    /// Creates a reference to the team with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// An issue label, either workspace-wide or owned by a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLabel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    /// Parent label group, if nested.
    #[serde(default)]
    pub parent: Option<LabelRef>,
    /// Owning team; `None` for workspace labels.
    #[serde(default)]
    pub team: Option<TeamRef>,
}

/// Reference to a parent label group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelRef {
    pub id: String,
}

/// A workflow state belonging to exactly one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    /// State type ("triage", "backlog", "unstarted", "started", "completed", "canceled").
    #[serde(rename = "type")]
    pub state_type: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: f64,
    /// Owning team.
    pub team: TeamRef,
}

impl WorkflowState {
    /// Returns true if this state belongs to the given team.
    pub fn belongs_to(&self, team_id: &str) -> bool {
        self.team.id == team_id
    }
}

/// An issue or project template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Template body as stored by the server.
    #[serde(default)]
    pub template_data: Option<serde_json::Value>,
    /// Owning team; `None` for workspace templates.
    #[serde(default)]
    pub team: Option<TeamRef>,
}

/// A team, addressed by its short key ("ENG") in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
}
