use crate::{error::AppError, AppState};
use analytics::{DashboardReport, FilterDomain, PeriodPoint, ProductKpi, SalesSummary};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::{FilterSpec, Granularity, RankMetric, RankingConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Query parameters shared by the report endpoints. Absent fields fall
/// back to the configured defaults; absent date bounds fall back to the
/// dataset's full span.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Comma-separated product list; absent means the dimension is
    /// unfiltered, present-but-empty admits nothing.
    pub products: Option<String>,
    /// Comma-separated segment list, same convention as `products`.
    pub segments: Option<String>,
    pub metric: Option<RankMetric>,
    pub top_n: Option<usize>,
    pub granularity: Option<Granularity>,
}

/// The dashboard payload, with display rounding applied to the share
/// metric at this boundary.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub summary: SalesSummary,
    pub kpis: Vec<ProductKpi>,
    pub revenue_series: Vec<PeriodPoint>,
    pub ranking: Vec<ProductKpi>,
    pub leader_share_pct: Decimal,
}

impl DashboardResponse {
    fn from_report(report: DashboardReport) -> Self {
        Self {
            leader_share_pct: report.leader_share_pct.round_dp(1),
            summary: report.summary,
            kpis: report.kpis,
            revenue_series: report.revenue_series,
            ranking: report.ranking,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderShareResponse {
    pub leader_share_pct: Decimal,
}

/// The resolved selection for one request: filter spec, ranking config
/// and series granularity.
struct Selection {
    spec: FilterSpec,
    ranking: RankingConfig,
    granularity: Granularity,
}

fn resolve_selection(state: &AppState, query: &ReportQuery) -> Result<Selection, AppError> {
    let domain = state.engine.filter_domain(&state.records)?;
    let date_start = query
        .start
        .or(state.defaults.date_start)
        .unwrap_or(domain.date_min);
    let date_end = query
        .end
        .or(state.defaults.date_end)
        .unwrap_or(domain.date_max);
    if date_start > date_end {
        return Err(AppError::BadRequest(
            "start must not be after end".to_string(),
        ));
    }

    Ok(Selection {
        spec: FilterSpec {
            date_start,
            date_end,
            allowed_products: query.products.as_deref().map(parse_list),
            allowed_segments: query.segments.as_deref().map(parse_list),
        },
        ranking: RankingConfig {
            metric: query.metric.unwrap_or(state.defaults.metric),
            top_n: query.top_n.unwrap_or(state.defaults.top_n),
        },
        granularity: query.granularity.unwrap_or(state.defaults.granularity),
    })
}

/// Splits a comma-separated query value into a set, dropping empty items.
fn parse_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// # GET /api/filters
/// The selectable value ranges the frontend builds its widgets from.
pub async fn get_filter_domain(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterDomain>, AppError> {
    let domain = state.engine.filter_domain(&state.records)?;
    Ok(Json(domain))
}

/// # GET /api/dashboard
/// The full report for the query's selections.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let selection = resolve_selection(&state, &query)?;
    let report = state.engine.build_dashboard(
        &state.records,
        &selection.spec,
        &selection.ranking,
        selection.granularity,
    )?;
    Ok(Json(DashboardResponse::from_report(report)))
}

/// # GET /api/kpis
/// The per-product KPI table for the query's selections.
pub async fn get_kpis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<ProductKpi>>, AppError> {
    let selection = resolve_selection(&state, &query)?;
    let filtered = state.engine.filter(&state.records, &selection.spec)?;
    Ok(Json(state.engine.aggregate(&filtered)))
}

/// # GET /api/revenue-series
/// The bucketed revenue series for the query's selections.
pub async fn get_revenue_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<PeriodPoint>>, AppError> {
    let selection = resolve_selection(&state, &query)?;
    let filtered = state.engine.filter(&state.records, &selection.spec)?;
    Ok(Json(state.engine.bucket(&filtered, selection.granularity)))
}

/// # GET /api/ranking
/// The top-N ranking for the query's selections.
pub async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<ProductKpi>>, AppError> {
    let selection = resolve_selection(&state, &query)?;
    let filtered = state.engine.filter(&state.records, &selection.spec)?;
    let kpis = state.engine.aggregate(&filtered);
    Ok(Json(state.engine.rank(&kpis, &selection.ranking)?))
}

/// # GET /api/leader-share
/// The leading product's revenue share, rounded for display.
pub async fn get_leader_share(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<LeaderShareResponse>, AppError> {
    let selection = resolve_selection(&state, &query)?;
    let filtered = state.engine.filter(&state.records, &selection.spec)?;
    let kpis = state.engine.aggregate(&filtered);
    let share = state.engine.leader_share(&kpis)?;
    Ok(Json(LeaderShareResponse {
        leader_share_pct: share.round_dp(1),
    }))
}
