/// Error types for the flood data core
use thiserror::Error;

/// Main error type for loading and reconciling flood data
#[derive(Error, Debug)]
pub enum FloodError {
    /// A caller broke an input contract, e.g. an empty candidate set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required CSV column is absent from the header row
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// A numeric cell could not be read
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// GeoJSON document has an unexpected shape
    #[error("Invalid GeoJSON: {0}")]
    GeoJson(String),

    /// Text is not valid GeoJSON
    #[error("Failed to parse GeoJSON: {0}")]
    GeoJsonParse(#[from] geojson::Error),

    /// Failed to decompress data
    #[error("Failed to decompress data: {0}")]
    Decompression(#[from] std::io::Error),
}

/// Type alias for Results using FloodError
pub type Result<T> = std::result::Result<T, FloodError>;
