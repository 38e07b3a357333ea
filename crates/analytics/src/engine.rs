use crate::error::AnalyticsError;
use crate::report::{DashboardReport, FilterDomain, PeriodPoint, ProductKpi, SalesSummary};
use core_types::{FilterSpec, Granularity, RankMetric, RankingConfig, SaleRecord};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// A stateless calculator deriving the dashboard tables and scalars from
/// raw sales records.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: runs the pipeline stages in order.
    ///
    /// # Arguments
    ///
    /// * `records` - The full record store supplied by the ingestion boundary.
    /// * `spec` - The filter selections for this report.
    /// * `ranking` - Metric and row count for the top-N table.
    /// * `granularity` - Bucket size for the revenue series.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DashboardReport` or an `AnalyticsError`.
    /// The contract is all-or-nothing: the first stage error aborts the
    /// report and no partial aggregates are returned.
    pub fn build_dashboard(
        &self,
        records: &[SaleRecord],
        spec: &FilterSpec,
        ranking: &RankingConfig,
        granularity: Granularity,
    ) -> Result<DashboardReport, AnalyticsError> {
        let filtered = self.filter(records, spec)?;
        let kpis = self.aggregate(&filtered);
        let revenue_series = self.bucket(&filtered, granularity);
        let ranking = self.rank(&kpis, ranking)?;
        let leader_share_pct = self.leader_share(&kpis)?;
        let summary = self.summarize(&kpis);

        Ok(DashboardReport {
            summary,
            kpis,
            revenue_series,
            ranking,
            leader_share_pct,
        })
    }

    /// Applies the three filter dimensions in a single pass.
    ///
    /// The predicates form a pure intersection, so the subset is the same
    /// whatever order the dimensions are evaluated in, and the original
    /// record order is preserved. An empty subset is an error: no
    /// downstream stage ever aggregates over zero rows.
    pub fn filter(
        &self,
        records: &[SaleRecord],
        spec: &FilterSpec,
    ) -> Result<Vec<SaleRecord>, AnalyticsError> {
        let filtered: Vec<SaleRecord> = records
            .iter()
            .filter(|record| spec.matches(record))
            .cloned()
            .collect();

        if filtered.is_empty() {
            return Err(AnalyticsError::EmptyResult(
                "no records match the selected filters".to_string(),
            ));
        }

        tracing::debug!(
            selected = filtered.len(),
            total = records.len(),
            "filters applied"
        );
        Ok(filtered)
    }

    /// Groups the filtered subset by product, summing quantity and revenue.
    ///
    /// Rows come back sorted by product name ascending, which is the
    /// deterministic ordering contract for every consumer.
    pub fn aggregate(&self, records: &[SaleRecord]) -> Vec<ProductKpi> {
        let mut groups: BTreeMap<&str, (u64, Decimal)> = BTreeMap::new();

        for record in records {
            let entry = groups
                .entry(record.product.as_str())
                .or_insert((0, Decimal::ZERO));
            entry.0 += u64::from(record.quantity);
            entry.1 += record.revenue();
        }

        groups
            .into_iter()
            .map(|(product, (total_quantity, total_revenue))| ProductKpi {
                product: product.to_string(),
                total_quantity,
                total_revenue,
            })
            .collect()
    }

    /// Sums revenue into calendar buckets, ascending by period.
    ///
    /// Monthly buckets merge every record of the same calendar month
    /// regardless of day. Periods with no sales are omitted, not
    /// zero-filled.
    pub fn bucket(&self, records: &[SaleRecord], granularity: Granularity) -> Vec<PeriodPoint> {
        // Zero-padded ISO labels sort lexicographically in calendar order.
        let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();

        for record in records {
            let label = match granularity {
                Granularity::Daily => record.date.format("%Y-%m-%d").to_string(),
                Granularity::Monthly => record.date.format("%Y-%m").to_string(),
            };
            *buckets.entry(label).or_insert(Decimal::ZERO) += record.revenue();
        }

        buckets
            .into_iter()
            .map(|(period, revenue)| PeriodPoint { period, revenue })
            .collect()
    }

    /// Sorts the KPI table by the configured metric, descending, and
    /// truncates it to `top_n` rows.
    ///
    /// Equal metric values fall back to ascending product name so the
    /// ordering is fully deterministic. `top_n` above the row count is
    /// clamped by the truncation; `top_n` below 1 is rejected.
    pub fn rank(
        &self,
        kpis: &[ProductKpi],
        config: &RankingConfig,
    ) -> Result<Vec<ProductKpi>, AnalyticsError> {
        if config.top_n < 1 {
            return Err(AnalyticsError::InvalidRankingConfig(
                "top_n must be at least 1".to_string(),
            ));
        }

        let mut ranked = kpis.to_vec();
        ranked.sort_by(|a, b| Self::metric_order(a, b, config.metric));
        ranked.truncate(config.top_n);
        Ok(ranked)
    }

    /// The leading product's share of total revenue, in percent.
    ///
    /// The leader is selected by revenue with the same tie-break as the
    /// ranking stage. The value is exact; rounding for display is the
    /// caller's concern. Zero total revenue is surfaced as an error, never
    /// as a silent 0.
    pub fn leader_share(&self, kpis: &[ProductKpi]) -> Result<Decimal, AnalyticsError> {
        let Some(leader) = kpis
            .iter()
            .min_by(|a, b| Self::metric_order(a, b, RankMetric::Revenue))
        else {
            return Err(AnalyticsError::DivisionByZero("leader_share".to_string()));
        };

        let total: Decimal = kpis.iter().map(|kpi| kpi.total_revenue).sum();
        if total == Decimal::ZERO {
            return Err(AnalyticsError::DivisionByZero("leader_share".to_string()));
        }

        Ok(leader.total_revenue / total * Decimal::from(100))
    }

    /// The header-row totals over the KPI table.
    pub fn summarize(&self, kpis: &[ProductKpi]) -> SalesSummary {
        SalesSummary {
            total_revenue: kpis.iter().map(|kpi| kpi.total_revenue).sum(),
            total_units: kpis.iter().map(|kpi| kpi.total_quantity).sum(),
            product_count: kpis.len(),
        }
    }

    /// The selectable value ranges for the boundary's filter widgets.
    ///
    /// Derived from the full record store, not a filtered subset, so the
    /// option lists stay stable across selections. Records without a
    /// segment contribute nothing to the segment list.
    pub fn filter_domain(&self, records: &[SaleRecord]) -> Result<FilterDomain, AnalyticsError> {
        let (Some(date_min), Some(date_max)) = (
            records.iter().map(|record| record.date).min(),
            records.iter().map(|record| record.date).max(),
        ) else {
            return Err(AnalyticsError::NotEnoughData(
                "the record store is empty".to_string(),
            ));
        };

        let products: BTreeSet<&str> = records
            .iter()
            .map(|record| record.product.as_str())
            .collect();
        let segments: BTreeSet<&str> = records
            .iter()
            .filter_map(|record| record.segment.as_deref())
            .collect();

        Ok(FilterDomain {
            date_min,
            date_max,
            products: products.into_iter().map(str::to_string).collect(),
            segments: segments.into_iter().map(str::to_string).collect(),
        })
    }

    /// Descending by the chosen metric, ties broken by ascending product
    /// name. Shared by ranking and leader selection.
    fn metric_order(a: &ProductKpi, b: &ProductKpi, metric: RankMetric) -> Ordering {
        let by_metric = match metric {
            RankMetric::Revenue => b.total_revenue.cmp(&a.total_revenue),
            RankMetric::Quantity => b.total_quantity.cmp(&a.total_quantity),
        };
        by_metric.then_with(|| a.product.cmp(&b.product))
    }
}
