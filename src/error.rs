//! Unified error hierarchy for RowStrength
//!
//! Every failure is either bad user input, missing reference data or a
//! broken table file. Nothing is retried; each error maps onto one message
//! shown to the user.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all RowStrength operations
#[derive(Debug, Error)]
pub enum RowStrengthError {
    /// Invalid user input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Reference table loading or validation errors
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Lookup or conversion failures
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors in values typed in by the user
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Time does not look like MM:SS or MM:SS.t
    #[error("Invalid time format '{input}', expected MM:SS or MM:SS.t")]
    InvalidTimeFormat { input: String },

    /// Seconds field is 60 or more
    #[error("Seconds must be below 60, got {seconds}")]
    SecondsOutOfRange { seconds: u32 },

    /// Rep count not covered by the reps table
    #[error("Supported reps are 1..=30, got {reps}")]
    UnsupportedReps { reps: u32 },

    /// Unknown gender label
    #[error("Unknown gender: {0}")]
    UnknownGender(String),

    /// Unknown exercise label
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Numeric parameter outside its domain
    #[error("Invalid parameter {parameter}={value}")]
    InvalidParameter { parameter: String, value: String },
}

/// Reference table loading errors
#[derive(Debug, Error)]
pub enum TableError {
    /// Table file could not be read
    #[error("Cannot read table {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file is not valid JSON of the expected shape
    #[error("Malformed {table} table: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A key or value inside the table is invalid
    #[error("Invalid entry in {table} table at {location}: {reason}")]
    InvalidEntry {
        table: &'static str,
        location: String,
        reason: String,
    },
}

/// Lookup failures during a conversion
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// No rowing data for the gender/distance pair
    #[error("No rowing data for {gender} at {distance}m")]
    NoRowingData { gender: String, distance: u32 },

    /// Time is not tabulated for the distance
    #[error("Time {time} out of range, available from {first} to {last}")]
    TimeOutOfRange {
        time: String,
        first: String,
        last: String,
    },

    /// No strength data for the gender/body weight pair
    #[error("No strength data for {gender} at {body_weight}kg")]
    NoStrengthData { gender: String, body_weight: Decimal },

    /// Percentage missing from an exercise table
    #[error("Percentage {percent} is not tabulated for {exercise}")]
    PercentageNotTabulated { exercise: String, percent: Decimal },

    /// Placeholder cell with no usable neighbours
    #[error("No strength value for {exercise} at {percent}%")]
    MissingStrengthValue { exercise: String, percent: Decimal },

    /// One-rep max below every tabulated weight
    #[error("One-rep max {one_rep_max}kg is below every tabulated {exercise} weight")]
    NoMatchingPercentage {
        exercise: String,
        one_rep_max: Decimal,
    },
}

/// Result type alias for RowStrength operations
pub type Result<T> = std::result::Result<T, RowStrengthError>;

impl RowStrengthError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RowStrengthError::Input(_) => ErrorSeverity::Warning,
            RowStrengthError::Calculation(_) => ErrorSeverity::Warning,
            RowStrengthError::Table(_) => ErrorSeverity::Critical,
            RowStrengthError::Json(_) => ErrorSeverity::Error,
        }
    }

    /// Emit a tracing event at the level of this error's severity
    pub fn log(&self) {
        let severity = self.severity();
        if severity.to_tracing_level() == tracing::Level::ERROR {
            tracing::error!(?severity, error = %self, "Command failed");
        } else {
            tracing::warn!(?severity, error = %self, "Command rejected");
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RowStrengthError::Input(err) => err.to_string(),
            RowStrengthError::Calculation(err) => err.to_string(),
            RowStrengthError::Table(TableError::Unreadable { path, .. }) => {
                format!("Could not open reference table: {}", path.display())
            }
            RowStrengthError::Table(_) => {
                "Reference tables are damaged. Please reinstall or fix the configured table files."
                    .to_string()
            }
            RowStrengthError::Json(_) => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Reference data unusable, no calculation can succeed
    Critical,
    /// Error that prevents operation
    Error,
    /// Rejected input, the user can retry with other values
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
