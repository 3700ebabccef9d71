//! Linear bulk cache command-line front end.

mod cli;
mod settings;

use std::sync::Arc;

use clap::Parser;
use linear_bulk_cache::{BulkCache, LinearApi, RequestContext, WarmReport, register_cache_metrics};
use linear_bulk_core::Category;
use linear_bulk_sources::LinearClient;
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    let client_config = settings.client_config()?;

    tracing::info!("Starting linear-bulk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("API endpoint: {}", client_config.api_url());
    tracing::debug!(?settings, "settings loaded");

    register_cache_metrics();
    let cache = BulkCache::new(Arc::new(LinearClient::new(client_config)?));
    let ctx = settings.request_context();

    let output = execute(&cache, &ctx, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    let metrics = cache.metrics();
    for category in Category::ALL {
        let stats = metrics.stats(category);
        tracing::debug!(
            %category,
            fetches = stats.fetches,
            pages = stats.pages,
            hits = stats.hits,
            misses = stats.misses,
            "cache stats"
        );
    }
    tracing::debug!(hit_rate = metrics.hit_rate(), "cache lookups answered from memory");

    Ok(())
}

async fn execute<C>(cache: &BulkCache<C>, ctx: &RequestContext, command: Command) -> anyhow::Result<Value>
where
    C: LinearApi + ?Sized,
{
    let value = match command {
        Command::Warm => warm_report_json(&cache.warm(ctx).await),
        Command::Label { id } => serde_json::to_value(&*cache.get_label(ctx, &id).await?)?,
        Command::WorkflowState { id } => {
            serde_json::to_value(&*cache.get_workflow_state(ctx, &id).await?)?
        },
        Command::StatesForTeam { team_id } => {
            serde_json::to_value(cache.workflow_states_for_team(ctx, &team_id).await?)?
        },
        Command::Template { id } => serde_json::to_value(&*cache.get_template(ctx, &id).await?)?,
        Command::Team { key } => serde_json::to_value(&*cache.get_team_by_key(ctx, &key).await?)?,
    };
    Ok(value)
}

fn warm_report_json(report: &WarmReport) -> Value {
    let categories: serde_json::Map<String, Value> = report
        .outcomes()
        .iter()
        .map(|(category, outcome)| {
            let entry = match outcome {
                Ok(items) => json!({ "status": "populated", "items": items }),
                Err(e) => json!({ "status": "failed", "error": e.to_string() }),
            };
            (category.metric_label().to_string(), entry)
        })
        .collect();

    json!({
        "complete": report.is_complete(),
        "categories": categories,
    })
}
