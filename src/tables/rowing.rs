//! Rowing reference table
//!
//! Maps gender, distance and a finishing time onto a percentile bucket and
//! the times predicted for every other distance.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use super::{parse_gender, read_table_file};
use crate::error::{Result, TableError};
use crate::models::{ErgTime, Gender};

const TABLE: &str = "rowing";
const PERCENT_KEY: &str = "percent";

type RawRowingTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>>;

/// One tabulated finishing time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowingRecord {
    /// Percentile bucket of the performance
    pub percent: Decimal,

    /// Predicted time per distance in meters
    pub predictions: BTreeMap<u32, ErgTime>,
}

/// All tabulated times for one gender and distance, fastest first
#[derive(Debug, Clone)]
pub struct DistanceTable {
    distance: u32,
    rows: BTreeMap<ErgTime, RowingRecord>,
}

impl DistanceTable {
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Exact lookup at whole-second resolution
    pub fn lookup(&self, time: ErgTime) -> Option<&RowingRecord> {
        self.rows.get(&time.truncated())
    }

    /// Rows in ascending time order
    pub fn rows(&self) -> impl Iterator<Item = (&ErgTime, &RowingRecord)> {
        self.rows.iter()
    }

    /// Fastest and slowest tabulated times
    pub fn time_bounds(&self) -> Option<(ErgTime, ErgTime)> {
        let first = self.rows.keys().next()?;
        let last = self.rows.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rowing table for every gender and distance
#[derive(Debug, Clone, Default)]
pub struct RowingTable {
    genders: BTreeMap<Gender, BTreeMap<u32, DistanceTable>>,
}

impl RowingTable {
    /// Parse and validate a rowing table document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawRowingTable = serde_json::from_str(json)
            .map_err(|source| TableError::Malformed { table: TABLE, source })?;

        let mut genders = BTreeMap::new();
        for (gender_key, distances) in raw {
            let gender = parse_gender(TABLE, &gender_key)?;

            let mut tables = BTreeMap::new();
            for (distance_key, times) in distances {
                let location = format!("{}/{}", gender_key, distance_key);
                let distance = parse_distance(&location, &distance_key)?;

                let mut rows = BTreeMap::new();
                for (time_key, record) in times {
                    let location = format!("{}/{}", location, time_key);
                    let time = parse_time(&location, &time_key)?;
                    if time.has_fraction() {
                        return Err(invalid(&location, "time keys must be whole seconds"));
                    }
                    rows.insert(time, parse_record(&location, record)?);
                }

                tables.insert(distance, DistanceTable { distance, rows });
            }

            genders.insert(gender, tables);
        }

        let table = Self { genders };
        tracing::debug!(
            genders = table.genders.len(),
            rows = table.row_count(),
            "Rowing table loaded"
        );
        Ok(table)
    }

    /// Read a rowing table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_table_file(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Times tabulated for a gender and distance
    pub fn distance(&self, gender: Gender, meters: u32) -> Option<&DistanceTable> {
        self.genders.get(&gender)?.get(&meters)
    }

    /// Distances available for a gender, ascending
    pub fn distances(&self, gender: Gender) -> Vec<u32> {
        self.genders
            .get(&gender)
            .map(|tables| tables.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn genders(&self) -> impl Iterator<Item = Gender> + '_ {
        self.genders.keys().copied()
    }

    fn row_count(&self) -> usize {
        self.genders
            .values()
            .flat_map(|tables| tables.values())
            .map(DistanceTable::len)
            .sum()
    }
}

fn parse_distance(location: &str, key: &str) -> Result<u32> {
    match key.trim().parse::<u32>() {
        Ok(meters) if meters > 0 => Ok(meters),
        _ => Err(invalid(location, "distance must be a positive number of meters")),
    }
}

fn parse_time(location: &str, value: &str) -> Result<ErgTime> {
    ErgTime::parse(value).map_err(|err| invalid(location, &err.to_string()))
}

fn parse_record(location: &str, raw: BTreeMap<String, String>) -> Result<RowingRecord> {
    let mut percent = None;
    let mut predictions = BTreeMap::new();

    for (key, value) in raw {
        if key == PERCENT_KEY {
            let parsed = Decimal::from_str(value.trim())
                .map_err(|_| invalid(location, &format!("invalid percent '{}'", value)))?;
            percent = Some(parsed);
        } else {
            let field = format!("{}/{}", location, key);
            let meters = parse_distance(&field, &key)?;
            predictions.insert(meters, parse_time(&field, &value)?);
        }
    }

    let percent = percent.ok_or_else(|| invalid(location, "missing percent"))?;
    Ok(RowingRecord {
        percent,
        predictions,
    })
}

fn invalid(location: &str, reason: &str) -> crate::error::RowStrengthError {
    TableError::InvalidEntry {
        table: TABLE,
        location: location.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
