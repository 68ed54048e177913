//! Rendering of conversion results for the terminal and as JSON

use serde::Serialize;
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};

use crate::convert::{BarbellToErg, ErgToBarbell};
use crate::error::Result;
use crate::models::Gender;
use crate::split::Split;
use crate::tables::ReferenceTables;

/// Plain-text report for an erg → barbell conversion
pub fn render_erg_to_barbell(result: &ErgToBarbell) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}m in {} ({})",
        result.distance, result.time, result.split
    );
    let _ = writeln!(out, "Performance bucket: {}%", result.percent);
    let _ = writeln!(out);

    let _ = writeln!(out, "Estimated maximums at other distances:");
    for prediction in &result.predictions {
        let _ = writeln!(
            out,
            "  {:>6}m  {}  ({})",
            prediction.distance, prediction.time, prediction.split
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "At {}kg body weight this compares to:",
        result.body_weight_bucket
    );
    for lift in &result.lifts {
        let marker = if lift.interpolated { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {:<12} {:.2} kg{}",
            lift.exercise.label(),
            lift.kilograms,
            marker
        );
    }
    if result.lifts.iter().any(|lift| lift.interpolated) {
        let _ = writeln!(out, "  * interpolated from neighbouring table values");
    }

    out
}

/// Plain-text report for a barbell → erg conversion
pub fn render_barbell_to_erg(result: &BarbellToErg) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Estimated one-rep max ({}): {:.2} kg",
        result.exercise.label(),
        result.one_rep_max
    );
    let _ = writeln!(out, "Strength bucket: {}%", result.percent);
    let _ = writeln!(
        out,
        "At {}kg body weight this compares to {} over {}m ({})",
        result.body_weight_bucket, result.time, result.distance, result.split
    );

    out
}

/// One-line split report
pub fn render_split(meters: u32, split: &Split) -> String {
    format!("{}m split: {}", meters, split)
}

/// Pretty JSON for any result
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Tabled)]
struct DistanceRow {
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Distance (m)")]
    distance: u32,
    #[tabled(rename = "Fastest")]
    fastest: String,
    #[tabled(rename = "Slowest")]
    slowest: String,
    #[tabled(rename = "Rows")]
    rows: usize,
}

/// Summary of the loaded reference tables
pub fn render_table_summary(tables: &ReferenceTables, gender: Option<Gender>) -> String {
    let genders: Vec<Gender> = match gender {
        Some(gender) => vec![gender],
        None => Gender::ALL.to_vec(),
    };

    let mut rows = Vec::new();
    for gender in &genders {
        for meters in tables.rowing.distances(*gender) {
            let Some(distance) = tables.rowing.distance(*gender, meters) else {
                continue;
            };
            let (fastest, slowest) = distance
                .time_bounds()
                .map(|(first, last)| (first.to_string(), last.to_string()))
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
            rows.push(DistanceRow {
                gender: gender.to_string(),
                distance: meters,
                fastest,
                slowest,
                rows: distance.len(),
            });
        }
    }

    let mut out = Table::new(rows).with(Style::rounded()).to_string();
    out.push('\n');

    for gender in &genders {
        let weights = tables.strength.weights(*gender);
        let listed: Vec<String> = weights.iter().map(u32::to_string).collect();
        let _ = writeln!(
            out,
            "Body weight buckets ({}): {}",
            gender,
            if listed.is_empty() {
                "none".to_string()
            } else {
                listed.join(", ")
            }
        );
    }

    out
}
