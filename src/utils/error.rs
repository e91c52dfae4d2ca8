use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid distribution for segment '{segment}': {source}")]
    DistributionError {
        segment: String,
        #[source]
        source: rand_distr::NormalError,
    },

    #[error("Rendering error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No samples for segment '{segment}'")]
    EmptySegmentError { segment: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    Rendering,
}

impl ChartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChartError::IoError(_) | ChartError::ImageError(_) => ErrorCategory::Io,
            ChartError::CsvError(_)
            | ChartError::SerializationError(_)
            | ChartError::EmptySegmentError { .. } => ErrorCategory::Data,
            ChartError::RenderError { .. } => ErrorCategory::Rendering,
            ChartError::DistributionError { .. }
            | ChartError::ConfigError { .. }
            | ChartError::InvalidConfigValueError { .. }
            | ChartError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration value named in the error",
            ErrorCategory::Data => "Make sure every displayed segment has at least one sample",
            ErrorCategory::Rendering => "Check that a system sans-serif font is installed",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
