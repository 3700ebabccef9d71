//! Bulk cache facade over the four resource categories.

use std::sync::Arc;

use linear_bulk_core::{BulkCacheError, Category, IssueLabel, Result, Team, Template, WorkflowState};
use tracing::{debug, info};

use crate::category::KeyedCategory;
use crate::context::RequestContext;
use crate::gate::CategoryState;
use crate::metrics::CacheMetrics;
use crate::source::{ListSource, PageSource, WholeList};

/// Every list capability the bulk cache consumes from a remote client.
///
/// Labels, workflow states and teams are cursor-paginated; templates come
/// back as one unpaginated list.
pub trait LinearApi:
    PageSource<IssueLabel> + PageSource<WorkflowState> + PageSource<Team> + ListSource<Template>
{
}

impl<C> LinearApi for C where
    C: PageSource<IssueLabel>
        + PageSource<WorkflowState>
        + PageSource<Team>
        + ListSource<Template>
        + ?Sized
{
}

fn label_id(label: &IssueLabel) -> &str {
    &label.id
}

fn workflow_state_id(state: &WorkflowState) -> &str {
    &state.id
}

fn template_id(template: &Template) -> &str {
    &template.id
}

fn team_key(team: &Team) -> &str {
    &team.key
}

/// Lazy, process-lifetime cache of labels, workflow states, templates and teams.
///
/// Each category is fetched in full the first time any of its records is
/// requested. Categories are independent: one failing does not affect the
/// others, and they may populate concurrently.
pub struct BulkCache<C: ?Sized> {
    client: Arc<C>,
    labels: KeyedCategory<IssueLabel>,
    workflow_states: KeyedCategory<WorkflowState>,
    templates: KeyedCategory<Template>,
    teams: KeyedCategory<Team>,
    metrics: CacheMetrics,
}

impl<C> BulkCache<C>
where
    C: LinearApi + ?Sized,
{
    /// Creates an empty cache over the given client.
    pub fn new(client: Arc<C>) -> Self {
        let metrics = CacheMetrics::new();

        Self {
            client,
            labels: KeyedCategory::new(Category::Labels, label_id, metrics.clone()),
            workflow_states: KeyedCategory::new(
                Category::WorkflowStates,
                workflow_state_id,
                metrics.clone(),
            ),
            templates: KeyedCategory::new(Category::Templates, template_id, metrics.clone()),
            teams: KeyedCategory::new(Category::Teams, team_key, metrics.clone()),
            metrics,
        }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the metrics recorder shared by all categories.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Returns the issue label with the given id.
    ///
    /// # Errors
    ///
    /// - `BulkCacheError::Transport` if labels could not be fetched
    /// - `BulkCacheError::NotFound` if no label has this id
    pub async fn get_label(&self, ctx: &RequestContext, id: &str) -> Result<Arc<IssueLabel>> {
        self.labels.get(ctx, self.client.as_ref(), id).await
    }

    /// Returns the workflow state with the given id.
    pub async fn get_workflow_state(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Arc<WorkflowState>> {
        self.workflow_states
            .get(ctx, self.client.as_ref(), id)
            .await
    }

    /// Returns every workflow state owned by the given team.
    ///
    /// States are ordered by position so output is stable; an unknown team
    /// yields an empty list, not an error.
    pub async fn workflow_states_for_team(
        &self,
        ctx: &RequestContext,
        team_id: &str,
    ) -> Result<Vec<WorkflowState>> {
        let matched = self
            .workflow_states
            .filter(ctx, self.client.as_ref(), |state| state.belongs_to(team_id))
            .await?;

        let mut states: Vec<WorkflowState> =
            matched.iter().map(|state| WorkflowState::clone(state)).collect();
        states.sort_by(|a, b| a.position.total_cmp(&b.position).then_with(|| a.id.cmp(&b.id)));

        debug!(team_id, count = states.len(), "workflow states for team");
        Ok(states)
    }

    /// Returns the template with the given id.
    pub async fn get_template(&self, ctx: &RequestContext, id: &str) -> Result<Arc<Template>> {
        let source = WholeList(self.client.as_ref());
        self.templates.get(ctx, &source, id).await
    }

    /// Returns the team with the given key (for example `"ENG"`).
    pub async fn get_team_by_key(&self, ctx: &RequestContext, key: &str) -> Result<Arc<Team>> {
        self.teams.get(ctx, self.client.as_ref(), key).await
    }

    /// Populates all four categories concurrently.
    ///
    /// Categories that already settled are not fetched again. The report
    /// carries each category's outcome; one failure does not stop the others.
    pub async fn warm(&self, ctx: &RequestContext) -> WarmReport {
        info!("warming bulk cache");
        let template_source = WholeList(self.client.as_ref());

        let (labels, workflow_states, templates, teams) = tokio::join!(
            self.labels.ensure_populated(ctx, self.client.as_ref()),
            self.workflow_states
                .ensure_populated(ctx, self.client.as_ref()),
            self.templates.ensure_populated(ctx, &template_source),
            self.teams.ensure_populated(ctx, self.client.as_ref()),
        );

        let report = WarmReport {
            outcomes: vec![
                (Category::Labels, labels.map(|m| m.len())),
                (Category::WorkflowStates, workflow_states.map(|m| m.len())),
                (Category::Templates, templates.map(|m| m.len())),
                (Category::Teams, teams.map(|m| m.len())),
            ],
        };

        info!(
            populated = report.populated().count(),
            failed = report.failures().count(),
            "bulk cache warm-up finished"
        );
        report
    }

    /// Returns the lifecycle state of one category without fetching it.
    pub fn state(&self, category: Category) -> CategoryState {
        match category {
            Category::Labels => self.labels.state(),
            Category::WorkflowStates => self.workflow_states.state(),
            Category::Templates => self.templates.state(),
            Category::Teams => self.teams.state(),
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for BulkCache<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkCache")
            .field("labels", &self.labels)
            .field("workflow_states", &self.workflow_states)
            .field("templates", &self.templates)
            .field("teams", &self.teams)
            .finish()
    }
}

/// Per-category outcome of [`BulkCache::warm`].
#[derive(Debug)]
pub struct WarmReport {
    outcomes: Vec<(Category, Result<usize>)>,
}

impl WarmReport {
    /// Returns every category with its item count or error.
    pub fn outcomes(&self) -> &[(Category, Result<usize>)] {
        &self.outcomes
    }

    /// Returns the categories that populated, with their item counts.
    pub fn populated(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(category, outcome)| outcome.as_ref().ok().map(|n| (*category, *n)))
    }

    /// Returns the categories that failed, with their sticky errors.
    pub fn failures(&self) -> impl Iterator<Item = (Category, &BulkCacheError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(category, outcome)| outcome.as_ref().err().map(|e| (*category, e)))
    }

    /// Returns true if every category populated.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}
