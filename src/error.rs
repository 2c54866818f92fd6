use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoexistError {
    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: i64, end: i64 },
    #[error("Out of order report: start {start} is before the last reported start {last_start}")]
    OutOfOrder { start: i64, last_start: i64 },
    #[error("Reporting has been closed")]
    ReportingClosed,
    #[error("Config error: {0}")]
    Config(String),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, CoexistError>;

// Helper conversions
impl From<config::ConfigError> for CoexistError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for CoexistError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<serde_json::Error> for CoexistError {
    fn from(e: serde_json::Error) -> Self { Self::Io(e.to_string()) }
}
impl<T> From<std::sync::PoisonError<T>> for CoexistError {
    fn from(e: std::sync::PoisonError<T>) -> Self { Self::Lock(e.to_string()) }
}
