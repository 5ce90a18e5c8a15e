use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference range for {marker}: low {low} is greater than high {high}")]
    InvalidRange { marker: String, low: f64, high: f64 },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
