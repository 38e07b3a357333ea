use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to open the dataset file '{0}': {1}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid record at data line {0}: {1}")]
    InvalidRecord(usize, String),
}
