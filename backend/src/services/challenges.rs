//! Weekly challenges and daily bonus goals.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::daily_log::DayRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    WaterLiters,
    DaysLogged,
    WorkoutMinutes,
}

struct ChallengeDef {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    unit: &'static str,
    target: f64,
    measure: Measure,
}

const WEEKLY_CHALLENGES: &[ChallengeDef] = &[
    ChallengeDef {
        key: "hydration",
        name: "Hydration Challenge",
        description: "Drink 21L this week",
        unit: "L",
        target: 21.0,
        measure: Measure::WaterLiters,
    },
    // Counts logged days this week rather than a strict run of 7
    ChallengeDef {
        key: "consistency",
        name: "Consistency Challenge",
        description: "Log 7 days in a row",
        unit: "days",
        target: 7.0,
        measure: Measure::DaysLogged,
    },
    ChallengeDef {
        key: "intensity",
        name: "Intensity Challenge",
        description: "500 min total workouts",
        unit: "min",
        target: 500.0,
        measure: Measure::WorkoutMinutes,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct BonusGoal {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub bonus_xp: i32,
}

pub const DAILY_BONUS_GOALS: &[BonusGoal] = &[
    BonusGoal {
        key: "morning_logger",
        name: "Morning Logger",
        description: "Log your day before 10 AM",
        bonus_xp: 10,
    },
    BonusGoal {
        key: "overachiever",
        name: "Overachiever",
        description: "2 workouts + 4L water + 30 min reading in one day",
        bonus_xp: 30,
    },
];

pub const OVERACHIEVER_MIN_WATER_LITERS: f64 = 4.0;
pub const OVERACHIEVER_MIN_READING_MINUTES: i64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct ChallengeProgress {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub value: f64,
    /// `value` clamped to the target, for progress rings.
    pub progress: f64,
    pub target: f64,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyChallenges {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub challenges: Vec<ChallengeProgress>,
    pub bonus_goals: &'static [BonusGoal],
    pub overachiever_days: i32,
}

pub fn find_monday(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday(); // Mon=0
    date - Duration::days(weekday as i64)
}

pub fn is_overachiever_day(record: &DayRecord) -> bool {
    record.has_workout_1
        && record.has_workout_2
        && record.water_liters >= OVERACHIEVER_MIN_WATER_LITERS
        && record.reading_minutes >= OVERACHIEVER_MIN_READING_MINUTES
}

/// Progress for the week containing `today`, counting records from Monday
/// through `today`.
pub fn weekly_challenges(records: &[DayRecord], today: NaiveDate) -> WeeklyChallenges {
    let week_start = find_monday(today);
    let week_end = week_start + Duration::days(6);
    let this_week: Vec<&DayRecord> = records
        .iter()
        .filter(|r| r.log_date >= week_start && r.log_date <= today)
        .collect();

    let challenges = WEEKLY_CHALLENGES
        .iter()
        .map(|def| {
            let value = match def.measure {
                Measure::WaterLiters => this_week.iter().map(|r| r.water_liters).sum(),
                Measure::DaysLogged => this_week.len() as f64,
                Measure::WorkoutMinutes => {
                    this_week.iter().map(|r| r.workout_minutes).sum::<i64>() as f64
                }
            };
            ChallengeProgress {
                key: def.key,
                name: def.name,
                description: def.description,
                unit: def.unit,
                value,
                progress: value.min(def.target),
                target: def.target,
                done: value >= def.target,
            }
        })
        .collect();

    WeeklyChallenges {
        week_start,
        week_end,
        challenges,
        bonus_goals: DAILY_BONUS_GOALS,
        overachiever_days: this_week.iter().filter(|r| is_overachiever_day(r)).count() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::daily_log::fixtures;

    // Thursday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 12).unwrap()
    }

    fn challenge<'a>(week: &'a WeeklyChallenges, key: &str) -> &'a ChallengeProgress {
        week.challenges.iter().find(|c| c.key == key).unwrap()
    }

    #[test]
    fn test_find_monday() {
        let monday = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        assert_eq!(find_monday(today()), monday);
        assert_eq!(find_monday(monday), monday);
        assert_eq!(find_monday(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()), monday);
    }

    #[test]
    fn test_only_this_week_counts() {
        let records = vec![
            fixtures::full_day(today()),
            fixtures::full_day(today() - Duration::days(3)),
            // previous Sunday
            fixtures::full_day(today() - Duration::days(4)),
        ];
        let week = weekly_challenges(&records, today());
        assert_eq!(challenge(&week, "consistency").value, 2.0);
        assert_eq!(challenge(&week, "hydration").value, 7.0);
        assert_eq!(challenge(&week, "intensity").value, 180.0);
        assert_eq!(week.week_end - week.week_start, Duration::days(6));
    }

    #[test]
    fn test_progress_clamped_and_done() {
        let records: Vec<DayRecord> = (0..4)
            .map(|n| {
                let mut r = fixtures::full_day(today() - Duration::days(n));
                r.water_liters = 6.0;
                r.workout_minutes = 100;
                r
            })
            .collect();
        let week = weekly_challenges(&records, today());

        let hydration = challenge(&week, "hydration");
        assert_eq!(hydration.value, 24.0);
        assert_eq!(hydration.progress, 21.0);
        assert!(hydration.done);

        let intensity = challenge(&week, "intensity");
        assert_eq!(intensity.value, 400.0);
        assert!(!intensity.done);
    }

    #[test]
    fn test_overachiever_days() {
        let mut strong = fixtures::full_day(today());
        strong.water_liters = 4.0;
        strong.reading_minutes = 30;
        let regular = fixtures::full_day(today() - Duration::days(1));
        let week = weekly_challenges(&[strong, regular], today());
        assert_eq!(week.overachiever_days, 1);
        assert_eq!(week.bonus_goals.len(), 2);
    }

    #[test]
    fn test_empty_week() {
        let week = weekly_challenges(&[], today());
        assert!(week.challenges.iter().all(|c| c.value == 0.0 && !c.done));
        assert_eq!(week.overachiever_days, 0);
    }
}
