//! HTTP transport for the Linear GraphQL API.

use async_trait::async_trait;
use linear_bulk_cache::{ListSource, PageSource, RequestContext};
use linear_bulk_core::{IssueLabel, Page, SourceError, Team, Template, WorkflowState};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::config::LinearClientConfig;
use crate::queries::{
    LIST_ISSUE_LABELS, LIST_TEAMS, LIST_TEMPLATES, LIST_WORKFLOW_STATES, operation_name,
};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueLabelsData {
    issue_labels: Page<IssueLabel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkflowStatesData {
    workflow_states: Page<WorkflowState>,
}

#[derive(Debug, Deserialize)]
struct TeamsData {
    teams: Page<Team>,
}

#[derive(Debug, Deserialize)]
struct TemplatesData {
    templates: Vec<Template>,
}

/// Client for the Linear GraphQL API.
///
/// Cheap to clone; clones share the connection pool. Every list query is
/// exposed through the bulk cache's source traits.
#[derive(Debug, Clone)]
pub struct LinearClient {
    http: Client,
    config: LinearClientConfig,
}

impl LinearClient {
    /// Creates a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidConfig` if the HTTP client cannot be built.
    pub fn new(config: LinearClientConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| SourceError::InvalidConfig(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LinearClientConfig {
        &self.config
    }

    /// Executes one GraphQL operation and decodes its `data` member.
    async fn execute<D: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<D, SourceError> {
        let operation = operation_name(query);
        debug!(operation, "sending GraphQL request");

        let response = self
            .http
            .post(self.config.api_url())
            .header(AUTHORIZATION, self.config.api_key())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(SourceError::http(status.as_u16(), body));
        }

        trace!(operation, bytes = body.len(), "received GraphQL response");
        decode_envelope(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout {
                seconds: self.config.request_timeout().as_secs(),
            }
        } else {
            SourceError::request(e.to_string())
        }
    }

    fn page_variables(&self, cursor: Option<&str>) -> Value {
        json!({
            "first": self.config.page_size(),
            "after": cursor,
        })
    }
}

/// Decodes a GraphQL response envelope.
///
/// Any entry in `errors` fails the whole request, even when partial data
/// came back with it.
fn decode_envelope<D: DeserializeOwned>(body: &str) -> Result<D, SourceError> {
    let envelope: GraphQlResponse<D> =
        serde_json::from_str(body).map_err(|e| SourceError::decode(e.to_string()))?;

    if !envelope.errors.is_empty() {
        return Err(SourceError::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    envelope
        .data
        .ok_or_else(|| SourceError::decode("response carried neither data nor errors"))
}

#[async_trait]
impl PageSource<IssueLabel> for LinearClient {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<IssueLabel>, SourceError> {
        let data: IssueLabelsData = self
            .execute(LIST_ISSUE_LABELS, self.page_variables(cursor))
            .await?;
        Ok(data.issue_labels)
    }
}

#[async_trait]
impl PageSource<WorkflowState> for LinearClient {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<WorkflowState>, SourceError> {
        let data: WorkflowStatesData = self
            .execute(LIST_WORKFLOW_STATES, self.page_variables(cursor))
            .await?;
        Ok(data.workflow_states)
    }
}

#[async_trait]
impl PageSource<Team> for LinearClient {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<Team>, SourceError> {
        let data: TeamsData = self.execute(LIST_TEAMS, self.page_variables(cursor)).await?;
        Ok(data.teams)
    }
}

#[async_trait]
impl ListSource<Template> for LinearClient {
    async fn list_all(&self, _ctx: &RequestContext) -> Result<Vec<Template>, SourceError> {
        let data: TemplatesData = self.execute(LIST_TEMPLATES, json!({})).await?;
        Ok(data.templates)
    }
}
