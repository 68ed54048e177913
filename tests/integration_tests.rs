use rowstrength::{
    get_split_500m, BarbellInput, CalculationError, Converter, ErgInput, ErgTime, Exercise,
    Gender, ReferenceTables, RowStrengthError, REPS_TABLE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Integration tests that run complete conversions against the bundled tables

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn erg_input(gender: Gender, body_weight: Decimal, distance: u32, time: &str) -> ErgInput {
        ErgInput {
            gender,
            body_weight,
            distance,
            time: ErgTime::parse(time).unwrap(),
        }
    }

    /// Forward then reverse lands within the same percentage bucket
    #[test]
    fn test_round_trip_through_deadlift() {
        let tables = ReferenceTables::bundled().unwrap();
        let converter = Converter::new(&tables);

        let forward = converter
            .erg_to_barbell(&erg_input(Gender::Male, dec!(80), 2000, "06:10"))
            .unwrap();
        let deadlift = forward
            .lifts
            .iter()
            .find(|lift| lift.exercise == Exercise::Deadlift)
            .unwrap();

        let reverse = converter
            .barbell_to_erg(&BarbellInput {
                gender: Gender::Male,
                body_weight: dec!(80),
                exercise: Exercise::Deadlift,
                bar_weight: deadlift.kilograms,
                reps: 1,
            })
            .unwrap();

        assert_eq!(reverse.percent, forward.percent);
        let drift = reverse.time.whole_seconds() as i64 - forward.time.whole_seconds() as i64;
        assert!((0..=2).contains(&drift), "drift of {} seconds", drift);
    }

    /// Every exercise reverses to a valid 2000m time for every bucket
    #[test]
    fn test_reverse_covers_every_bucket() {
        let tables = ReferenceTables::bundled().unwrap();
        let converter = Converter::new(&tables);

        for gender in Gender::ALL {
            let (fastest, slowest) = tables
                .rowing
                .distance(gender, 2000)
                .unwrap()
                .time_bounds()
                .unwrap();

            for weight in tables.strength.weights(gender) {
                for exercise in Exercise::ALL {
                    let result = converter
                        .barbell_to_erg(&BarbellInput {
                            gender,
                            body_weight: weight.into(),
                            exercise,
                            bar_weight: dec!(100),
                            reps: 5,
                        })
                        .unwrap();

                    assert!(result.time >= fastest && result.time <= slowest);
                    assert_eq!(result.body_weight_bucket, weight);
                }
            }
        }
    }

    /// Slower times never map onto heavier lifts
    #[test]
    fn test_slower_times_give_lighter_lifts() {
        let tables = ReferenceTables::bundled().unwrap();
        let converter = Converter::new(&tables);

        let fast = converter
            .erg_to_barbell(&erg_input(Gender::Female, dec!(62), 5000, "18:00"))
            .unwrap();
        let slow = converter
            .erg_to_barbell(&erg_input(Gender::Female, dec!(62), 5000, "21:00"))
            .unwrap();

        assert!(fast.percent > slow.percent);
        for (a, b) in fast.lifts.iter().zip(&slow.lifts) {
            assert_eq!(a.exercise, b.exercise);
            assert!(a.kilograms >= b.kilograms);
        }
    }

    /// Heavier sets never map onto slower erg times
    #[test]
    fn test_heavier_sets_give_faster_times() {
        let tables = ReferenceTables::bundled().unwrap();
        let converter = Converter::new(&tables);

        let mut previous: Option<ErgTime> = None;
        for bar_weight in [60, 80, 100, 120, 140, 160] {
            let result = converter
                .barbell_to_erg(&BarbellInput {
                    gender: Gender::Male,
                    body_weight: dec!(90),
                    exercise: Exercise::Squat,
                    bar_weight: Decimal::from(bar_weight),
                    reps: 3,
                })
                .unwrap();

            if let Some(previous) = previous {
                assert!(result.time <= previous);
            }
            previous = Some(result.time);
        }
    }

    #[test]
    fn test_out_of_range_message() {
        let tables = ReferenceTables::bundled().unwrap();
        let converter = Converter::new(&tables);

        let err = converter
            .erg_to_barbell(&erg_input(Gender::Female, dec!(60), 2000, "10:30"))
            .unwrap_err();

        assert!(matches!(
            err,
            RowStrengthError::Calculation(CalculationError::TimeOutOfRange { .. })
        ));
        assert_eq!(
            err.user_message(),
            "Time 10:30 out of range, available from 06:25 to 08:40"
        );
    }

    #[test]
    fn test_documented_examples() {
        assert_eq!(get_split_500m(2000, "06:10").unwrap(), "01:32.5/500m");
        assert_eq!(REPS_TABLE[0], 100);
        assert_eq!(REPS_TABLE[29], 50);
    }

    #[test]
    fn test_invalid_time_is_rejected_before_lookup() {
        let err = get_split_500m(2000, "6:10:00").unwrap_err();
        assert!(err.user_message().contains("Invalid time format"));

        let err = "05:75".parse::<ErgTime>().unwrap_err();
        assert!(err.to_string().contains("below 60"));
    }
}
