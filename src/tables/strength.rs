//! Strength reference table
//!
//! Maps gender, body weight and exercise onto the kilograms lifted at each
//! percentage of the strength distribution. Cells holding the literal `"1"`
//! are placeholders without measured data.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::path::Path;
use std::str::FromStr;

use super::{parse_gender, read_table_file};
use crate::error::{CalculationError, Result, TableError};
use crate::models::{Exercise, Gender};

const TABLE: &str = "strength";
const PLACEHOLDER: &str = "1";

type RawStrengthTable =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>>;

/// A single tabulated value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthCell {
    Kilograms(Decimal),
    /// Placeholder, no data for this percentage
    Missing,
}

impl StrengthCell {
    pub fn kilograms(&self) -> Option<Decimal> {
        match self {
            StrengthCell::Kilograms(kg) => Some(*kg),
            StrengthCell::Missing => None,
        }
    }
}

/// Resolved weight for one exercise at one percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthValue {
    pub kilograms: Decimal,
    /// True when the cell was a placeholder and the value was derived from
    /// its neighbours
    pub interpolated: bool,
}

/// Kilograms per percentage for one exercise, ascending by percentage
#[derive(Debug, Clone)]
pub struct ExerciseTable {
    exercise: Exercise,
    cells: BTreeMap<Decimal, StrengthCell>,
}

impl ExerciseTable {
    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn cells(&self) -> impl Iterator<Item = (&Decimal, &StrengthCell)> {
        self.cells.iter()
    }

    /// Kilograms at `percent`
    ///
    /// A placeholder cell is linearly interpolated between the closest
    /// tabulated percentages on each side. With data on one side only, the
    /// nearest value is used.
    pub fn kilograms_at(&self, percent: Decimal) -> std::result::Result<StrengthValue, CalculationError> {
        let cell = self
            .cells
            .get(&percent)
            .ok_or_else(|| CalculationError::PercentageNotTabulated {
                exercise: self.exercise.to_string(),
                percent,
            })?;

        if let StrengthCell::Kilograms(kilograms) = cell {
            return Ok(StrengthValue {
                kilograms: *kilograms,
                interpolated: false,
            });
        }

        let below = self
            .cells
            .range(..percent)
            .rev()
            .find_map(|(pct, cell)| cell.kilograms().map(|kg| (*pct, kg)));
        let above = self
            .cells
            .range((Excluded(percent), Unbounded))
            .find_map(|(pct, cell)| cell.kilograms().map(|kg| (*pct, kg)));

        let kilograms = match (below, above) {
            (Some((lo_pct, lo_kg)), Some((hi_pct, hi_kg))) => {
                lo_kg + (hi_kg - lo_kg) * (percent - lo_pct) / (hi_pct - lo_pct)
            }
            (Some((_, kg)), None) | (None, Some((_, kg))) => kg,
            (None, None) => {
                return Err(CalculationError::MissingStrengthValue {
                    exercise: self.exercise.to_string(),
                    percent,
                })
            }
        };

        tracing::warn!(
            exercise = %self.exercise,
            %percent,
            %kilograms,
            "Placeholder strength cell interpolated"
        );

        Ok(StrengthValue {
            kilograms: kilograms.round_dp(2),
            interpolated: true,
        })
    }

    /// True when tabulated weights never decrease as the percentage grows
    pub fn is_monotonic(&self) -> bool {
        let values: Vec<Decimal> = self.cells.values().filter_map(StrengthCell::kilograms).collect();
        values.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// Strength data for one gender and body weight bucket
#[derive(Debug, Clone)]
pub struct StrengthProfile {
    body_weight: u32,
    exercises: BTreeMap<Exercise, ExerciseTable>,
}

impl StrengthProfile {
    /// Tabulated body weight of this bucket
    pub fn body_weight(&self) -> u32 {
        self.body_weight
    }

    pub fn exercise(&self, exercise: Exercise) -> Option<&ExerciseTable> {
        self.exercises.get(&exercise)
    }
}

/// Strength table for every gender and body weight
#[derive(Debug, Clone, Default)]
pub struct StrengthTable {
    genders: BTreeMap<Gender, BTreeMap<u32, StrengthProfile>>,
}

impl StrengthTable {
    /// Parse and validate a strength table document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawStrengthTable = serde_json::from_str(json)
            .map_err(|source| TableError::Malformed { table: TABLE, source })?;

        let mut genders = BTreeMap::new();
        for (gender_key, weights) in raw {
            let gender = parse_gender(TABLE, &gender_key)?;

            let mut profiles = BTreeMap::new();
            for (weight_key, exercises) in weights {
                let location = format!("{}/{}", gender_key, weight_key);
                let body_weight = weight_key
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| invalid(&location, "body weight must be whole kilograms"))?;

                let mut tables = BTreeMap::new();
                for (exercise_key, cells) in exercises {
                    let location = format!("{}/{}", location, exercise_key);
                    let exercise = Exercise::from_str(&exercise_key)
                        .map_err(|err| invalid(&location, &err.to_string()))?;
                    let table = parse_exercise(&location, exercise, cells)?;

                    if !table.is_monotonic() {
                        tracing::warn!(
                            location = %location,
                            "Strength values decrease with percentage, reverse lookups may stop early"
                        );
                    }
                    tables.insert(exercise, table);
                }

                if let Some(missing) = Exercise::ALL.iter().find(|ex| !tables.contains_key(*ex)) {
                    return Err(invalid(&location, &format!("missing exercise {}", missing)));
                }

                profiles.insert(
                    body_weight,
                    StrengthProfile {
                        body_weight,
                        exercises: tables,
                    },
                );
            }

            genders.insert(gender, profiles);
        }

        tracing::debug!(genders = genders.len(), "Strength table loaded");
        Ok(Self { genders })
    }

    /// Read a strength table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_table_file(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Bucket for a body weight: the heaviest tabulated weight not above it
    pub fn bucket(&self, gender: Gender, body_weight: Decimal) -> Option<&StrengthProfile> {
        let whole_kg = body_weight.floor().to_u32()?;
        self.genders
            .get(&gender)?
            .range(..=whole_kg)
            .next_back()
            .map(|(_, profile)| profile)
    }

    /// Tabulated body weights for a gender, ascending
    pub fn weights(&self, gender: Gender) -> Vec<u32> {
        self.genders
            .get(&gender)
            .map(|profiles| profiles.keys().copied().collect())
            .unwrap_or_default()
    }
}

fn parse_exercise(
    location: &str,
    exercise: Exercise,
    raw: BTreeMap<String, String>,
) -> Result<ExerciseTable> {
    let mut cells = BTreeMap::new();

    for (percent_key, value) in raw {
        let field = format!("{}/{}", location, percent_key);
        let percent = Decimal::from_str(percent_key.trim())
            .map_err(|_| invalid(&field, "percentage must be a number"))?;

        let cell = if value.trim() == PLACEHOLDER {
            StrengthCell::Missing
        } else {
            let kilograms = Decimal::from_str(value.trim())
                .map_err(|_| invalid(&field, &format!("invalid weight '{}'", value)))?;
            StrengthCell::Kilograms(kilograms)
        };
        cells.insert(percent, cell);
    }

    Ok(ExerciseTable { exercise, cells })
}

fn invalid(location: &str, reason: &str) -> crate::error::RowStrengthError {
    TableError::InvalidEntry {
        table: TABLE,
        location: location.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
