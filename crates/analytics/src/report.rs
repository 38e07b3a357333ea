use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-product totals over the filtered record subset.
///
/// One row exists per distinct product present after filtering; products
/// with no matching records are absent rather than zero-valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductKpi {
    pub product: String,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
}

/// One bucket of the revenue time series.
///
/// The label is `YYYY-MM-DD` for daily buckets and `YYYY-MM` for monthly
/// ones; buckets with no sales are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPoint {
    pub period: String,
    pub revenue: Decimal,
}

/// The header-row totals of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: Decimal,
    pub total_units: u64,
    pub product_count: usize,
}

/// The selectable value ranges the boundary derives its filter widgets
/// from: the dataset's full date span and its distinct products and
/// segments, each sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDomain {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub products: Vec<String>,
    pub segments: Vec<String>,
}

/// Every derived table and scalar for one filter/ranking selection.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as
/// the data transfer object for report results throughout the system. The
/// leader share is exact; display rounding is a boundary concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: SalesSummary,
    pub kpis: Vec<ProductKpi>,
    pub revenue_series: Vec<PeriodPoint>,
    pub ranking: Vec<ProductKpi>,
    pub leader_share_pct: Decimal,
}
