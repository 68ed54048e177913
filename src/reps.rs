//! Repetition maximum estimation
//!
//! Converts a set of `reps` with a given bar weight into an estimated
//! one-rep max using a fixed table of percentages of 1RM.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::InputError;

/// Percentage of 1RM that can be lifted for `index + 1` reps
pub const REPS_TABLE: [u32; 30] = [
    100, 97, 94, 92, 89, 86, 83, 81, 78, 75, // 1-10
    73, 71, 70, 68, 67, 65, 64, 63, 61, 60, // 11-20
    59, 58, 57, 56, 55, 54, 53, 52, 51, 50, // 21-30
];

pub const MIN_REPS: u32 = 1;
pub const MAX_REPS: u32 = REPS_TABLE.len() as u32;

/// Percentage of 1RM for a rep count, `None` outside 1..=30
pub fn percentage_for_reps(reps: u32) -> Option<u32> {
    if reps < MIN_REPS {
        return None;
    }
    REPS_TABLE.get((reps - 1) as usize).copied()
}

/// Estimate the one-rep max from a set
///
/// `bar_weight / percentage * 100`, rounded to two decimals.
pub fn estimate_one_rep_max(bar_weight: Decimal, reps: u32) -> Result<Decimal, InputError> {
    let percentage = percentage_for_reps(reps).ok_or(InputError::UnsupportedReps { reps })?;

    let invalid = || InputError::InvalidParameter {
        parameter: "bar_weight".to_string(),
        value: bar_weight.to_string(),
    };

    if bar_weight <= Decimal::ZERO {
        return Err(invalid());
    }

    let one_rep_max = bar_weight
        .checked_div(Decimal::from(percentage))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(invalid)?;

    Ok(one_rep_max.round_dp(2))
}
