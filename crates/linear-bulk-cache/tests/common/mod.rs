#![allow(dead_code)]
use std::time::Duration;

use async_trait::async_trait;
use linear_bulk_cache::linear_bulk_core::{
    IssueLabel, Page, PageInfo, SourceError, Team, TeamRef, Template, WorkflowState,
};
use linear_bulk_cache::{ListSource, PageSource, RequestContext};
use parking_lot::Mutex;

/// Scripted list endpoint for one category.
///
/// Page `n` is requested with cursor `cursor-n`; the first page with no
/// cursor. Every request is recorded.
pub struct Script<T> {
    pages: Vec<Vec<T>>,
    fail_at: Option<usize>,
    delay: Option<Duration>,
    requests: Mutex<Vec<Option<String>>>,
}

impl<T: Clone> Script<T> {
    pub fn new(pages: Vec<Vec<T>>) -> Self {
        Self {
            pages,
            fail_at: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A category with no records at all.
    pub fn empty() -> Self {
        Self::new(vec![vec![]])
    }

    /// Fails the request for the given zero-based page index.
    pub fn failing_at(mut self, page: usize) -> Self {
        self.fail_at = Some(page);
        self
    }

    /// Sleeps before answering each request.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.requests.lock().clone()
    }

    async fn serve(&self, cursor: Option<&str>) -> Result<Page<T>, SourceError> {
        self.requests.lock().push(cursor.map(str::to_string));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let index = match cursor {
            None => 0,
            Some(c) => c
                .strip_prefix("cursor-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| SourceError::request(format!("unknown cursor {c}")))?,
        };

        if self.fail_at == Some(index) {
            return Err(SourceError::http(500, "internal server error"));
        }

        let nodes = self
            .pages
            .get(index)
            .cloned()
            .ok_or_else(|| SourceError::request(format!("no page {index}")))?;

        let page_info = if index + 1 < self.pages.len() {
            PageInfo::more(format!("cursor-{}", index + 1))
        } else {
            PageInfo::last()
        };
        Ok(Page::new(nodes, page_info))
    }
}

/// In-memory stand-in for the remote API with one script per category.
pub struct FakeLinear {
    pub labels: Script<IssueLabel>,
    pub workflow_states: Script<WorkflowState>,
    pub templates: Script<Template>,
    pub teams: Script<Team>,
}

impl FakeLinear {
    pub fn empty() -> Self {
        Self {
            labels: Script::empty(),
            workflow_states: Script::empty(),
            templates: Script::empty(),
            teams: Script::empty(),
        }
    }

    pub fn with_labels(mut self, labels: Script<IssueLabel>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_workflow_states(mut self, states: Script<WorkflowState>) -> Self {
        self.workflow_states = states;
        self
    }

    pub fn with_templates(mut self, templates: Script<Template>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_teams(mut self, teams: Script<Team>) -> Self {
        self.teams = teams;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.labels.calls() + self.workflow_states.calls() + self.templates.calls() + self.teams.calls()
    }
}

#[async_trait]
impl PageSource<IssueLabel> for FakeLinear {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<IssueLabel>, SourceError> {
        self.labels.serve(cursor).await
    }
}

#[async_trait]
impl PageSource<WorkflowState> for FakeLinear {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<WorkflowState>, SourceError> {
        self.workflow_states.serve(cursor).await
    }
}

#[async_trait]
impl PageSource<Team> for FakeLinear {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<Team>, SourceError> {
        self.teams.serve(cursor).await
    }
}

#[async_trait]
impl ListSource<Template> for FakeLinear {
    async fn list_all(&self, _ctx: &RequestContext) -> Result<Vec<Template>, SourceError> {
        self.templates.serve(None).await.map(|page| page.nodes)
    }
}

pub fn label(id: &str, name: &str) -> IssueLabel {
    IssueLabel {
        id: id.to_string(),
        name: name.to_string(),
        color: None,
        description: None,
        is_group: false,
        parent: None,
        team: None,
    }
}

pub fn workflow_state(id: &str, name: &str, team_id: &str, position: f64) -> WorkflowState {
    WorkflowState {
        id: id.to_string(),
        name: name.to_string(),
        state_type: "unstarted".to_string(),
        color: None,
        description: None,
        position,
        team: TeamRef::new(team_id),
    }
}

pub fn template(id: &str, name: &str) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        template_type: "issue".to_string(),
        description: None,
        template_data: None,
        team: None,
    }
}

pub fn team(id: &str, key: &str) -> Team {
    Team {
        id: id.to_string(),
        key: key.to_string(),
        name: format!("Team {key}"),
        description: None,
        private: false,
    }
}
