use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use linear_bulk_cache::linear_bulk_core::{
    IssueLabel, Page, PageInfo, SourceError, Team, Template, TeamRef, WorkflowState,
};
use linear_bulk_cache::{BulkCache, ListSource, PageSource, RequestContext};
use std::sync::Arc;
use tokio::runtime::Runtime;

const PAGE_SIZE: usize = 250;

/// Fuente en memoria con N labels y N workflow states repartidos en paginas
struct InMemory {
    labels: Vec<IssueLabel>,
    states: Vec<WorkflowState>,
}

impl InMemory {
    fn new(count: usize) -> Self {
        let labels = (0..count)
            .map(|i| IssueLabel {
                id: format!("label-{}", i),
                name: format!("label {}", i),
                color: None,
                description: None,
                is_group: false,
                parent: None,
                team: None,
            })
            .collect();
        let states = (0..count)
            .map(|i| WorkflowState {
                id: format!("state-{}", i),
                name: format!("state {}", i),
                state_type: "started".to_string(),
                color: None,
                description: None,
                position: i as f64,
                team: TeamRef::new(format!("team-{}", i % 8)),
            })
            .collect();
        Self { labels, states }
    }
}

fn page_of<T: Clone>(items: &[T], cursor: Option<&str>) -> Page<T> {
    let start: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
    let end = (start + PAGE_SIZE).min(items.len());
    let info = if end < items.len() {
        PageInfo::more(end.to_string())
    } else {
        PageInfo::last()
    };
    Page::new(items[start..end].to_vec(), info)
}

#[async_trait]
impl PageSource<IssueLabel> for InMemory {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<IssueLabel>, SourceError> {
        Ok(page_of(&self.labels, cursor))
    }
}

#[async_trait]
impl PageSource<WorkflowState> for InMemory {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        cursor: Option<&str>,
    ) -> Result<Page<WorkflowState>, SourceError> {
        Ok(page_of(&self.states, cursor))
    }
}

#[async_trait]
impl PageSource<Team> for InMemory {
    async fn list_page(
        &self,
        _ctx: &RequestContext,
        _cursor: Option<&str>,
    ) -> Result<Page<Team>, SourceError> {
        Ok(Page::single(vec![]))
    }
}

#[async_trait]
impl ListSource<Template> for InMemory {
    async fn list_all(&self, _ctx: &RequestContext) -> Result<Vec<Template>, SourceError> {
        Ok(vec![])
    }
}

/// Benchmark: lookup de label con la categoria ya poblada
fn bench_label_hit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = BulkCache::new(Arc::new(InMemory::new(1000)));
    let ctx = RequestContext::new();

    // Poblar la categoria antes de medir
    rt.block_on(async {
        cache.get_label(&ctx, "label-0").await.unwrap();
    });

    c.bench_function("label_get_hit", |b| {
        b.to_async(&rt).iter(|| async {
            let result = cache.get_label(&ctx, "label-500").await;
            std::hint::black_box(result)
        });
    });
}

/// Benchmark: lookup de label inexistente
fn bench_label_miss(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = BulkCache::new(Arc::new(InMemory::new(1000)));
    let ctx = RequestContext::new();

    rt.block_on(async {
        cache.get_label(&ctx, "label-0").await.unwrap();
    });

    c.bench_function("label_get_miss", |b| {
        b.to_async(&rt).iter(|| async {
            let result = cache.get_label(&ctx, "nonexistent").await;
            std::hint::black_box(result)
        });
    });
}

/// Benchmark: primer poblado de la categoria con distintos tamanos
fn bench_cold_population(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cold_population");

    for size in [250, 1000, 5000].iter() {
        let source = Arc::new(InMemory::new(*size));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.to_async(&rt).iter(|| async {
                let cache = BulkCache::new(Arc::clone(&source));
                let result = cache.get_label(&RequestContext::new(), "label-0").await;
                std::hint::black_box(result)
            });
        });
    }

    group.finish();
}

/// Benchmark: escaneo de workflow states por team
fn bench_states_for_team(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = BulkCache::new(Arc::new(InMemory::new(1000)));
    let ctx = RequestContext::new();

    rt.block_on(async {
        cache.workflow_states_for_team(&ctx, "team-0").await.unwrap();
    });

    c.bench_function("workflow_states_for_team", |b| {
        b.to_async(&rt).iter(|| async {
            let result = cache.workflow_states_for_team(&ctx, "team-3").await;
            std::hint::black_box(result)
        });
    });
}

criterion_group!(
    benches,
    bench_label_hit,
    bench_label_miss,
    bench_cold_population,
    bench_states_for_team
);
criterion_main!(benches);
