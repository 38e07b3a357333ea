use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Filtering produced zero records: {0}")]
    EmptyResult(String),

    #[error("Invalid ranking configuration: {0}")]
    InvalidRankingConfig(String),

    #[error("Calculation error: Division by zero encountered in metric '{0}'")]
    DivisionByZero(String),

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),
}
