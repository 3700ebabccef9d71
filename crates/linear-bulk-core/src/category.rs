//! Resource categories served by the bulk cache.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One resource kind backed by its own lazily populated cache.
///
/// # Example
///
/// ```
/// use linear_bulk_core::Category;
///
/// assert_eq!(Category::WorkflowStates.as_str(), "workflow states");
/// assert_eq!(Category::ALL.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Issue labels, keyed by id.
    Labels,
    /// Workflow states, keyed by id and scanned by owning team.
    WorkflowStates,
    /// Issue templates, keyed by id. Fetched as one unpaginated list.
    Templates,
    /// Teams, keyed by their short key ("ENG") rather than id.
    Teams,
}

impl Category {
    /// Every category, in warm-up order.
    pub const ALL: [Category; 4] = [
        Category::Labels,
        Category::WorkflowStates,
        Category::Templates,
        Category::Teams,
    ];

    /// Human readable plural name, used in log lines and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Labels => "issue labels",
            Category::WorkflowStates => "workflow states",
            Category::Templates => "templates",
            Category::Teams => "teams",
        }
    }

    /// Singular noun for a single record of this category.
    pub fn singular(&self) -> &'static str {
        match self {
            Category::Labels => "label",
            Category::WorkflowStates => "workflow state",
            Category::Templates => "template",
            Category::Teams => "team",
        }
    }

    /// Stable identifier used as a metrics label.
    pub fn metric_label(&self) -> &'static str {
        match self {
            Category::Labels => "labels",
            Category::WorkflowStates => "workflow_states",
            Category::Templates => "templates",
            Category::Teams => "teams",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_plural() {
        assert_eq!(Category::Labels.to_string(), "issue labels");
        assert_eq!(Category::Teams.to_string(), "teams");
    }

    #[test]
    fn test_singular() {
        assert_eq!(Category::Labels.singular(), "label");
        assert_eq!(Category::WorkflowStates.singular(), "workflow state");
    }

    #[test]
    fn test_metric_labels_are_unique() {
        let mut labels: Vec<_> = Category::ALL.iter().map(|c| c.metric_label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }
}
