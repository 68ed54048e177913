//! Static reference tables
//!
//! Both tables are read once and never modified afterwards. The crate ships
//! default tables in `data/`; configuration may point at replacement files.

pub mod rowing;
pub mod strength;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, TableError};
use crate::models::Gender;

pub use rowing::{DistanceTable, RowingRecord, RowingTable};
pub use strength::{ExerciseTable, StrengthCell, StrengthProfile, StrengthTable, StrengthValue};

const BUNDLED_ROWING: &str = include_str!("../../data/rowing.json");
const BUNDLED_STRENGTH: &str = include_str!("../../data/strength.json");

/// Distance used when converting a lift back into an erg result
pub const REFERENCE_DISTANCE_M: u32 = 2000;

/// The rowing and strength tables used by every calculation
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub rowing: RowingTable,
    pub strength: StrengthTable,
}

impl ReferenceTables {
    /// Tables shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_ROWING, BUNDLED_STRENGTH)
    }

    pub fn from_json_str(rowing: &str, strength: &str) -> Result<Self> {
        Ok(Self {
            rowing: RowingTable::from_json_str(rowing)?,
            strength: StrengthTable::from_json_str(strength)?,
        })
    }

    /// Load tables, falling back to the bundled copy for any path not given
    pub fn load(rowing_path: Option<&Path>, strength_path: Option<&Path>) -> Result<Self> {
        let rowing = match rowing_path {
            Some(path) => RowingTable::load(path)?,
            None => RowingTable::from_json_str(BUNDLED_ROWING)?,
        };
        let strength = match strength_path {
            Some(path) => StrengthTable::load(path)?,
            None => StrengthTable::from_json_str(BUNDLED_STRENGTH)?,
        };

        tracing::info!(
            rowing = %rowing_path.map_or("bundled".into(), |p| p.display().to_string()),
            strength = %strength_path.map_or("bundled".into(), |p| p.display().to_string()),
            "Reference tables loaded"
        );
        Ok(Self { rowing, strength })
    }
}

pub(crate) fn read_table_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        TableError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

pub(crate) fn parse_gender(table: &'static str, key: &str) -> Result<Gender> {
    Gender::from_str(key).map_err(|err| {
        TableError::InvalidEntry {
            table,
            location: key.to_string(),
            reason: err.to_string(),
        }
        .into()
    })
}
