use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::{Granularity, RankMetric};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dataset: Dataset,
    pub server: Server,
    pub report: ReportDefaults,
}

/// Where the sales dataset is read from.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Path to the sales CSV file, relative to the working directory.
    pub path: PathBuf,
}

/// Bind settings for the dashboard HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Default selections applied when a request or command does not specify
/// its own.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDefaults {
    /// Bucket size for the revenue time series.
    pub granularity: Granularity,
    /// Metric used by the top-N ranking.
    pub metric: RankMetric,
    /// Number of rows kept in the top-N ranking.
    pub top_n: usize,
    /// Optional override for the default reporting window. When unset the
    /// window spans the whole dataset.
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl Config {
    /// Checks the cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_n < 1 {
            return Err(ConfigError::ValidationError(
                "report.top_n must be at least 1".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.report.date_start, self.report.date_end) {
            if start > end {
                return Err(ConfigError::ValidationError(
                    "report.date_start must not be after report.date_end".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(top_n: usize, date_start: Option<&str>, date_end: Option<&str>) -> Config {
        Config {
            dataset: Dataset {
                path: PathBuf::from("sales.csv"),
            },
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            report: ReportDefaults {
                granularity: Granularity::Monthly,
                metric: RankMetric::Revenue,
                top_n,
                date_start: date_start.map(|d| d.parse().unwrap()),
                date_end: date_end.map(|d| d.parse().unwrap()),
            },
        }
    }

    #[test]
    fn accepts_a_sensible_config() {
        assert!(config(5, None, None).validate().is_ok());
        assert!(config(1, Some("2024-01-01"), Some("2024-12-31")).validate().is_ok());
    }

    #[test]
    fn rejects_zero_top_n() {
        let result = config(0, None, None).validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_an_inverted_date_window() {
        let result = config(5, Some("2024-12-31"), Some("2024-01-01")).validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
