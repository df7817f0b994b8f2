//! Error types for sources, configuration and analysis runs.
//!
//! Only [`AnalysisError`] stops a run. [`SourceError`] values are converted
//! into [`Degradation`]s by the pipeline and the run continues with an empty
//! collection.

use crate::models::{Dataset, Degradation};

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to obtain one of the input collections.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// File missing, unreadable, or not parseable as a table.
    #[error("{dataset} source unavailable: {message}")]
    Unavailable { dataset: Dataset, message: String },

    /// Required columns absent from the table header.
    #[error("{dataset} source is missing required columns: {}", .missing_columns.join(", "))]
    SchemaMismatch {
        dataset: Dataset,
        missing_columns: Vec<String>,
    },
}

impl SourceError {
    pub fn unavailable(dataset: Dataset, message: impl Into<String>) -> Self {
        Self::Unavailable {
            dataset,
            message: message.into(),
        }
    }

    pub fn dataset(&self) -> Dataset {
        match self {
            Self::Unavailable { dataset, .. } | Self::SchemaMismatch { dataset, .. } => *dataset,
        }
    }
}

impl From<&SourceError> for Degradation {
    fn from(err: &SourceError) -> Self {
        match err {
            SourceError::Unavailable { dataset, message } => Degradation::SourceUnavailable {
                dataset: *dataset,
                message: message.clone(),
            },
            SourceError::SchemaMismatch {
                dataset,
                missing_columns,
            } => Degradation::SchemaMismatch {
                dataset: *dataset,
                missing_columns: missing_columns.clone(),
            },
        }
    }
}

/// Configuration loading or validation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Error that prevents a snapshot from being produced.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Analysis stage '{stage}' panicked")]
    StagePanicked { stage: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::SchemaMismatch {
            dataset: Dataset::Positions,
            missing_columns: vec!["SOG".to_string(), "COG".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "positions source is missing required columns: SOG, COG"
        );
        assert_eq!(err.dataset(), Dataset::Positions);
    }

    #[test]
    fn test_source_error_to_degradation() {
        let err = SourceError::unavailable(Dataset::Ports, "file not found");
        let degradation = Degradation::from(&err);
        assert_eq!(
            degradation,
            Degradation::SourceUnavailable {
                dataset: Dataset::Ports,
                message: "file not found".to_string(),
            }
        );
    }

    #[test]
    fn test_analysis_error_from_config_error() {
        let err: AnalysisError = ConfigError::invalid("speed_threshold_knots", "must be >= 0").into();
        assert!(err.to_string().contains("speed_threshold_knots"));
    }
}
