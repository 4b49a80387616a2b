use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid numeric value '{value}' in column '{column}'")]
    InvalidNumeric { column: String, value: String },

    #[error("Column '{name}' not found in dataset")]
    MissingColumn { name: String },

    #[error("Column '{name}' is constant; min-max normalization is undefined")]
    ConstantColumn { name: String },

    #[error("Clustering requires at least two usable columns, got {count}")]
    InsufficientColumns { count: usize },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chart rendering error: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ProcessingError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ProcessingError::Render(err.to_string())
    }
}
