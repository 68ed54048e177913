//! Erg ↔ barbell conversions
//!
//! Forward: an erg result is placed in a percentile bucket by the rowing
//! table, and that bucket is read back out of the strength table for each
//! lift. Reverse: a set is turned into a one-rep max, placed in the strength
//! distribution, and matched against the 2000m rowing table.
//!
//! Both directions go through discretized percentage buckets, so they are
//! inverses of each other only up to bucket precision.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{CalculationError, InputError, Result};
use crate::models::{ErgTime, Exercise, Gender};
use crate::reps::estimate_one_rep_max;
use crate::split::Split;
use crate::tables::{ReferenceTables, StrengthProfile, REFERENCE_DISTANCE_M};

/// An erg result to convert into lifts
#[derive(Debug, Clone, PartialEq)]
pub struct ErgInput {
    pub gender: Gender,
    /// Athlete body weight in kg
    pub body_weight: Decimal,
    /// Distance rowed in meters
    pub distance: u32,
    pub time: ErgTime,
}

/// A barbell set to convert into a 2000m erg time
#[derive(Debug, Clone, PartialEq)]
pub struct BarbellInput {
    pub gender: Gender,
    /// Athlete body weight in kg
    pub body_weight: Decimal,
    pub exercise: Exercise,
    /// Load on the bar in kg
    pub bar_weight: Decimal,
    pub reps: u32,
}

/// Predicted time at one distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistancePrediction {
    pub distance: u32,
    pub time: ErgTime,
    pub split: Split,
}

/// Strength equivalent for one lift
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiftEquivalent {
    pub exercise: Exercise,
    pub kilograms: Decimal,
    /// Value derived from neighbouring cells
    pub interpolated: bool,
}

/// Result of an erg → barbell conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErgToBarbell {
    pub gender: Gender,
    pub distance: u32,
    pub time: ErgTime,
    pub split: Split,
    /// Percentile bucket of the erg result
    pub percent: Decimal,
    /// Tabulated body weight the athlete was matched to
    pub body_weight_bucket: u32,
    pub predictions: Vec<DistancePrediction>,
    pub lifts: Vec<LiftEquivalent>,
}

/// Result of a barbell → erg conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarbellToErg {
    pub gender: Gender,
    pub exercise: Exercise,
    pub one_rep_max: Decimal,
    /// Highest strength percentage reached by the one-rep max
    pub percent: Decimal,
    pub body_weight_bucket: u32,
    pub distance: u32,
    pub time: ErgTime,
    pub split: Split,
}

/// Runs conversions against a set of reference tables
pub struct Converter<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> Converter<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Convert an erg result into bench press, squat and deadlift equivalents
    #[tracing::instrument(
        skip(self, input),
        fields(gender = %input.gender, distance = input.distance, time = %input.time)
    )]
    pub fn erg_to_barbell(&self, input: &ErgInput) -> Result<ErgToBarbell> {
        let distance_table = self
            .tables
            .rowing
            .distance(input.gender, input.distance)
            .ok_or_else(|| CalculationError::NoRowingData {
                gender: input.gender.to_string(),
                distance: input.distance,
            })?;

        let record = match distance_table.lookup(input.time) {
            Some(record) => record,
            None => {
                let (first, last) = distance_table.time_bounds().ok_or_else(|| {
                    CalculationError::NoRowingData {
                        gender: input.gender.to_string(),
                        distance: input.distance,
                    }
                })?;
                return Err(CalculationError::TimeOutOfRange {
                    time: input.time.truncated().to_string(),
                    first: first.to_string(),
                    last: last.to_string(),
                }
                .into());
            }
        };
        tracing::debug!(time = %input.time, percent = %record.percent, "Rowing record found");

        let profile = self.profile(input.gender, input.body_weight)?;

        let mut lifts = Vec::with_capacity(Exercise::ALL.len());
        for exercise in Exercise::ALL {
            let table = profile
                .exercise(exercise)
                .ok_or_else(|| CalculationError::PercentageNotTabulated {
                    exercise: exercise.to_string(),
                    percent: record.percent,
                })?;
            let value = table.kilograms_at(record.percent)?;
            lifts.push(LiftEquivalent {
                exercise,
                kilograms: value.kilograms,
                interpolated: value.interpolated,
            });
        }

        let predictions = record
            .predictions
            .iter()
            .map(|(distance, time)| {
                Ok(DistancePrediction {
                    distance: *distance,
                    time: *time,
                    split: Split::calculate(*distance, *time)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            gender = %input.gender,
            distance = input.distance,
            time = %input.time,
            percent = %record.percent,
            bucket = profile.body_weight(),
            "Erg result converted to barbell equivalents"
        );

        Ok(ErgToBarbell {
            gender: input.gender,
            distance: input.distance,
            time: input.time,
            split: Split::calculate(input.distance, input.time)?,
            percent: record.percent,
            body_weight_bucket: profile.body_weight(),
            predictions,
            lifts,
        })
    }

    /// Convert a barbell set into an equivalent 2000m erg time
    #[tracing::instrument(
        skip(self, input),
        fields(gender = %input.gender, exercise = %input.exercise, reps = input.reps)
    )]
    pub fn barbell_to_erg(&self, input: &BarbellInput) -> Result<BarbellToErg> {
        let one_rep_max = estimate_one_rep_max(input.bar_weight, input.reps)?;
        let profile = self.profile(input.gender, input.body_weight)?;

        let table = profile
            .exercise(input.exercise)
            .ok_or_else(|| CalculationError::NoMatchingPercentage {
                exercise: input.exercise.to_string(),
                one_rep_max,
            })?;

        // Tables grow with the percentage; the first heavier cell ends the scan.
        let mut matched = None;
        for (percent, cell) in table.cells() {
            let Some(kilograms) = cell.kilograms() else {
                continue;
            };
            if kilograms <= one_rep_max {
                matched = Some(*percent);
            } else {
                break;
            }
        }
        let percent = matched.ok_or_else(|| CalculationError::NoMatchingPercentage {
            exercise: input.exercise.to_string(),
            one_rep_max,
        })?;
        tracing::debug!(%one_rep_max, %percent, "Strength percentage matched");

        let no_rowing_data = || CalculationError::NoRowingData {
            gender: input.gender.to_string(),
            distance: REFERENCE_DISTANCE_M,
        };
        let distance_table = self
            .tables
            .rowing
            .distance(input.gender, REFERENCE_DISTANCE_M)
            .ok_or_else(no_rowing_data)?;

        // First time whose bucket drops below the lift's; slowest time otherwise.
        let mut equivalent = None;
        for (time, record) in distance_table.rows() {
            equivalent = Some(*time);
            if record.percent < percent {
                break;
            }
        }
        let time = equivalent.ok_or_else(no_rowing_data)?;

        tracing::info!(
            gender = %input.gender,
            exercise = %input.exercise,
            %one_rep_max,
            %percent,
            time = %time,
            "Barbell set converted to erg equivalent"
        );

        Ok(BarbellToErg {
            gender: input.gender,
            exercise: input.exercise,
            one_rep_max,
            percent,
            body_weight_bucket: profile.body_weight(),
            distance: REFERENCE_DISTANCE_M,
            time,
            split: Split::calculate(REFERENCE_DISTANCE_M, time)?,
        })
    }

    fn profile(&self, gender: Gender, body_weight: Decimal) -> Result<&'a StrengthProfile> {
        if body_weight <= Decimal::ZERO {
            return Err(InputError::InvalidParameter {
                parameter: "body_weight".to_string(),
                value: body_weight.to_string(),
            }
            .into());
        }

        let profile = self
            .tables
            .strength
            .bucket(gender, body_weight)
            .ok_or_else(|| CalculationError::NoStrengthData {
                gender: gender.to_string(),
                body_weight,
            })?;
        Ok(profile)
    }
}
