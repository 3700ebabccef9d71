//! GraphQL documents for the bulk list queries.
//!
//! Paginated queries take `$first` and `$after` and return a connection
//! with `nodes` and `pageInfo { hasNextPage endCursor }`.

/// Every issue label in the workspace.
pub const LIST_ISSUE_LABELS: &str = r#"
query ListIssueLabels($first: Int!, $after: String) {
  issueLabels(first: $first, after: $after) {
    nodes {
      id
      name
      color
      description
      isGroup
      parent { id }
      team { id }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

/// Every workflow state across all teams.
pub const LIST_WORKFLOW_STATES: &str = r#"
query ListWorkflowStates($first: Int!, $after: String) {
  workflowStates(first: $first, after: $after) {
    nodes {
      id
      name
      type
      color
      description
      position
      team { id }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

/// Every team visible to the API key.
pub const LIST_TEAMS: &str = r#"
query ListTeams($first: Int!, $after: String) {
  teams(first: $first, after: $after) {
    nodes {
      id
      key
      name
      description
      private
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

/// Every template; the API returns these as a plain list.
pub const LIST_TEMPLATES: &str = r#"
query ListTemplates {
  templates {
    id
    name
    type
    description
    templateData
    team { id }
  }
}
"#;

/// Returns the operation name of a query document, for logging.
pub fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .nth(1)
        .and_then(|token| token.split(['(', '{']).next())
        .unwrap_or("anonymous")
}
