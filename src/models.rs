use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::InputError;

/// Gender keys used by both reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Key under which the gender appears in table files
    pub fn as_key(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Gender {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "men" => Ok(Gender::Male),
            "female" | "f" | "w" | "woman" | "women" => Ok(Gender::Female),
            _ => Err(InputError::UnknownGender(s.to_string())),
        }
    }
}

/// Barbell lifts covered by the strength table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
    BenchPress,
    Squat,
    Deadlift,
}

impl Exercise {
    /// Reporting order
    pub const ALL: [Exercise; 3] = [Exercise::BenchPress, Exercise::Squat, Exercise::Deadlift];

    pub fn as_key(&self) -> &'static str {
        match self {
            Exercise::BenchPress => "bench-press",
            Exercise::Squat => "squat",
            Exercise::Deadlift => "deadlift",
        }
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            Exercise::BenchPress => "Bench press",
            Exercise::Squat => "Squat",
            Exercise::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for Exercise {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "bench-press" | "bench" => Ok(Exercise::BenchPress),
            "squat" => Ok(Exercise::Squat),
            "deadlift" => Ok(Exercise::Deadlift),
            _ => Err(InputError::UnknownExercise(s.to_string())),
        }
    }
}

// Matches: 6:11, 06:11, 06:11.5, 06:11,25
static TIME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})(?:[.,](\d{1,2}))?\s*$").ok());

/// Erg time with hundredth-of-a-second resolution
///
/// Stored as an integer count of hundredths so that table keys, splits and
/// comparisons never go through floating point. The whole seconds are kept
/// exactly as typed; rounding to tenths only happens for display and splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ErgTime {
    hundredths: u32,
}

impl ErgTime {
    pub fn from_tenths(tenths: u32) -> Self {
        Self {
            hundredths: tenths * 10,
        }
    }

    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            hundredths: seconds * 100,
        }
    }

    /// Parse `MM:SS`, `MM:SS.t` or `MM:SS.hh`
    ///
    /// Seconds must be below 60.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let invalid = || InputError::InvalidTimeFormat {
            input: input.to_string(),
        };

        let captures = TIME_PATTERN
            .as_ref()
            .and_then(|pattern| pattern.captures(input))
            .ok_or_else(invalid)?;

        let minutes: u32 = captures[1].parse().map_err(|_| invalid())?;
        let seconds: u32 = captures[2].parse().map_err(|_| invalid())?;
        if seconds >= 60 {
            return Err(InputError::SecondsOutOfRange { seconds });
        }

        let fraction = match captures.get(3) {
            Some(m) if m.as_str().len() == 1 => m.as_str().parse::<u32>().map_err(|_| invalid())? * 10,
            Some(m) => m.as_str().parse::<u32>().map_err(|_| invalid())?,
            None => 0,
        };

        Ok(Self {
            hundredths: (minutes * 60 + seconds) * 100 + fraction,
        })
    }

    pub fn hundredths(&self) -> u32 {
        self.hundredths
    }

    /// Tenths of a second, rounded half up
    pub fn tenths(&self) -> u32 {
        (self.hundredths + 5) / 10
    }

    /// Whole seconds, fraction truncated
    pub fn whole_seconds(&self) -> u32 {
        self.hundredths / 100
    }

    /// Drop the fractional part, as table keys have whole-second resolution
    pub fn truncated(&self) -> Self {
        Self::from_seconds(self.whole_seconds())
    }

    pub fn has_fraction(&self) -> bool {
        self.hundredths % 100 != 0
    }

    /// Always `MM:SS.t`, rounded half up to tenths
    pub fn to_tenths_string(&self) -> String {
        let tenths = self.tenths();
        let seconds = tenths / 10;
        format!("{:02}:{:02}.{}", seconds / 60, seconds % 60, tenths % 10)
    }
}

impl fmt::Display for ErgTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.whole_seconds();
        let fraction = self.hundredths % 100;
        if fraction == 0 {
            write!(f, "{:02}:{:02}", seconds / 60, seconds % 60)
        } else if fraction % 10 == 0 {
            write!(f, "{:02}:{:02}.{}", seconds / 60, seconds % 60, fraction / 10)
        } else {
            write!(f, "{:02}:{:02}.{:02}", seconds / 60, seconds % 60, fraction)
        }
    }
}

impl FromStr for ErgTime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErgTime::parse(s)
    }
}

impl Serialize for ErgTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ErgTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ErgTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_time() {
        let time = ErgTime::parse("06:10").unwrap();
        assert_eq!(time.tenths(), 3700);
        assert_eq!(time.to_string(), "06:10");
    }

    #[test]
    fn test_parse_normalizes_short_minutes() {
        assert_eq!(ErgTime::parse("6:11").unwrap().to_string(), "06:11");
        assert_eq!(ErgTime::parse(" 06:11.0 ").unwrap().to_string(), "06:11");
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(ErgTime::parse("06:10.5").unwrap().tenths(), 3705);
        assert_eq!(ErgTime::parse("06:10,5").unwrap().tenths(), 3705);
        // hundredths round half up
        assert_eq!(ErgTime::parse("06:10.25").unwrap().tenths(), 3703);
        assert_eq!(ErgTime::parse("06:10.95").unwrap().tenths(), 3710);
        assert_eq!(ErgTime::parse("06:10.5").unwrap().truncated().to_string(), "06:10");
        assert_eq!(ErgTime::parse("06:10.25").unwrap().to_string(), "06:10.25");
    }

    #[test]
    fn test_truncation_keeps_typed_seconds() {
        let time = ErgTime::parse("06:10.95").unwrap();
        assert_eq!(time.whole_seconds(), 370);
        assert_eq!(time.truncated().to_string(), "06:10");
        assert_eq!(time.to_tenths_string(), "06:11.0");

        assert_eq!(ErgTime::parse("05:39.99").unwrap().truncated().to_string(), "05:39");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            ErgTime::parse("6.10"),
            Err(InputError::InvalidTimeFormat {
                input: "6.10".to_string()
            })
        );
        assert!(ErgTime::parse("").is_err());
        assert!(ErgTime::parse("123:00").is_err());
        assert!(ErgTime::parse("06:1").is_err());
        assert_eq!(
            ErgTime::parse("06:60"),
            Err(InputError::SecondsOutOfRange { seconds: 60 })
        );
    }

    #[test]
    fn test_tenths_formatting() {
        assert_eq!(ErgTime::from_tenths(925).to_tenths_string(), "01:32.5");
        assert_eq!(ErgTime::from_seconds(92).to_tenths_string(), "01:32.0");
        assert_eq!(ErgTime::from_tenths(925).to_string(), "01:32.5");
    }

    #[test]
    fn test_gender_and_exercise_parsing() {
        assert_eq!("M".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("x".parse::<Gender>().is_err());

        assert_eq!("bench_press".parse::<Exercise>().unwrap(), Exercise::BenchPress);
        assert_eq!("Deadlift".parse::<Exercise>().unwrap(), Exercise::Deadlift);
        assert!("curl".parse::<Exercise>().is_err());
    }

    #[test]
    fn test_erg_time_serde() {
        let json = serde_json::to_string(&ErgTime::from_tenths(3705)).unwrap();
        assert_eq!(json, "\"06:10.5\"");
        let back: ErgTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tenths(), 3705);
    }
}
