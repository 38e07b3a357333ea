use crate::enums::RankMetric;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single row of the sales dataset.
///
/// Records are immutable once constructed; the `revenue` field is derived
/// from `quantity` and `unit_price` at construction and is never stored
/// independently of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub product: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Optional categorical attribute (e.g. a demographic) used as a
    /// filter dimension. Absent for records that carry no segment.
    pub segment: Option<String>,
    revenue: Decimal,
}

impl SaleRecord {
    /// Builds a record, deriving its revenue as `quantity * unit_price`.
    ///
    /// The unit price must be non-negative; quantity is non-negative by
    /// construction of its type.
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        segment: Option<String>,
    ) -> Result<Self, CoreError> {
        if unit_price.is_sign_negative() {
            return Err(CoreError::InvalidInput(
                "unit_price".to_string(),
                unit_price.to_string(),
            ));
        }
        Ok(Self {
            date,
            product: product.into(),
            quantity,
            unit_price,
            segment,
            revenue: Decimal::from(quantity) * unit_price,
        })
    }

    /// The revenue derived for this record at construction.
    pub fn revenue(&self) -> Decimal {
        self.revenue
    }
}

/// The filter selections supplied by the boundary.
///
/// For the product and segment dimensions, `None` means the dimension is
/// not filtered at all, while `Some` restricts to the listed values — an
/// empty set admits nothing. The date bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub allowed_products: Option<HashSet<String>>,
    pub allowed_segments: Option<HashSet<String>>,
}

impl FilterSpec {
    /// A spec covering the given inclusive date window with the product
    /// and segment dimensions unfiltered.
    pub fn for_window(date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            date_start,
            date_end,
            allowed_products: None,
            allowed_segments: None,
        }
    }

    /// Whether a record passes all three filter dimensions.
    ///
    /// The dimensions form a pure intersection, so their evaluation order
    /// never changes the outcome.
    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.matches_date(record) && self.matches_product(record) && self.matches_segment(record)
    }

    pub fn matches_date(&self, record: &SaleRecord) -> bool {
        self.date_start <= record.date && record.date <= self.date_end
    }

    pub fn matches_product(&self, record: &SaleRecord) -> bool {
        match &self.allowed_products {
            None => true,
            Some(allowed) => allowed.contains(&record.product),
        }
    }

    /// A record with no segment passes only when segment filtering is
    /// unconfigured.
    pub fn matches_segment(&self, record: &SaleRecord) -> bool {
        match &self.allowed_segments {
            None => true,
            Some(allowed) => record
                .segment
                .as_deref()
                .is_some_and(|segment| allowed.contains(segment)),
        }
    }
}

/// How the top-N ranking is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub metric: RankMetric,
    /// Number of rows to keep; values above the distinct-product count are
    /// clamped, values below 1 are rejected by the ranking stage.
    pub top_n: usize,
}
