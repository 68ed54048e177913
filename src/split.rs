//! 500m split calculation
//!
//! Rowers compare paces as time per 500 meters regardless of the distance
//! actually rowed. All arithmetic is done on integer hundredths of a second.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InputError, Result};
use crate::models::ErgTime;

/// Reference distance of a split in meters
pub const SPLIT_DISTANCE_M: u32 = 500;

/// Pace per 500m
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pace: ErgTime,
}

impl Split {
    /// Split for `time` rowed over `meters`
    ///
    /// `seconds * 500 / meters`, rounded half up to tenths.
    pub fn calculate(meters: u32, time: ErgTime) -> Result<Self> {
        if meters == 0 {
            return Err(InputError::InvalidParameter {
                parameter: "distance".to_string(),
                value: meters.to_string(),
            }
            .into());
        }

        // hundredths * 500 / meters / 10, half up
        let scaled = u64::from(time.hundredths()) * u64::from(SPLIT_DISTANCE_M);
        let divisor = u64::from(meters) * 10;
        let tenths = (scaled * 2 + divisor) / (divisor * 2);

        Ok(Self {
            pace: ErgTime::from_tenths(tenths as u32),
        })
    }

    /// Time per 500m
    pub fn pace(&self) -> ErgTime {
        self.pace
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}m", self.pace.to_tenths_string(), SPLIT_DISTANCE_M)
    }
}

/// Format the 500m split for a time typed as `MM:SS[.t]`
pub fn get_split_500m(meters: u32, time: &str) -> Result<String> {
    let time = ErgTime::parse(time)?;
    Ok(Split::calculate(meters, time)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_kilometer_split() {
        assert_eq!(get_split_500m(2000, "06:10").unwrap(), "01:32.5/500m");
    }

    #[test]
    fn test_split_rounds_half_up() {
        // 6:11 over 2000m is 92.75s, rounded to 92.8
        assert_eq!(get_split_500m(2000, "06:11").unwrap(), "01:32.8/500m");
        // 3:00 over 1000m divides evenly
        assert_eq!(get_split_500m(1000, "03:00").unwrap(), "01:30.0/500m");
        // 19:59 over 6000m is 99.92s
        assert_eq!(get_split_500m(6000, "19:59").unwrap(), "01:39.9/500m");
    }

    #[test]
    fn test_split_uses_hundredths() {
        // 370.95s over 2000m is 92.7375s
        assert_eq!(get_split_500m(2000, "06:10.95").unwrap(), "01:32.7/500m");
        assert_eq!(get_split_500m(500, "01:32.25").unwrap(), "01:32.3/500m");
    }

    #[test]
    fn test_split_of_a_split_is_unchanged() {
        assert_eq!(get_split_500m(500, "01:32.5").unwrap(), "01:32.5/500m");
    }

    #[test]
    fn test_split_rejects_zero_distance() {
        assert!(get_split_500m(0, "06:10").is_err());
        assert!(get_split_500m(2000, "6:75").is_err());
    }

    proptest! {
        #[test]
        fn test_split_reformatting_is_idempotent(
            meters in 500u32..20000u32,
            minutes in 0u32..100u32,
            seconds in 0u32..60u32
        ) {
            let time = format!("{:02}:{:02}", minutes, seconds);
            let split = Split::calculate(meters, ErgTime::parse(&time).unwrap()).unwrap();

            let again = get_split_500m(SPLIT_DISTANCE_M, &split.pace().to_tenths_string()).unwrap();
            prop_assert_eq!(again, split.to_string());
        }
    }
}
