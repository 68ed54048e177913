// Library interface for RowStrength modules
// This allows integration tests and benches to access the core functionality

pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod models;
pub mod reps;
pub mod report;
pub mod split;
pub mod tables;

// Re-export commonly used types for convenience
pub use convert::{BarbellInput, BarbellToErg, Converter, ErgInput, ErgToBarbell};
pub use error::{CalculationError, InputError, Result, RowStrengthError, TableError};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{ErgTime, Exercise, Gender};
pub use reps::{estimate_one_rep_max, percentage_for_reps, REPS_TABLE};
pub use split::{get_split_500m, Split};
pub use tables::ReferenceTables;
