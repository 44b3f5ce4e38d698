//! Battle points and head-to-head comparison for the leaderboard.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::daily_log::DayRecord;
use crate::services::metrics::{aggregate, ActivityMetrics};
use crate::services::streaks::{current_streak, longest_streak_in_range};

pub const POINTS_PER_DAY_LOGGED: i64 = 10;
pub const POINTS_PER_STREAK_DAY: i64 = 15;
pub const POINTS_PER_FULL_DAY: i64 = 50;
pub const POINTS_PER_100_WORKOUT_MIN: i64 = 10;
pub const POINTS_PER_LITER_WATER: i64 = 5;
pub const POINTS_PER_10_READING_MIN: i64 = 5;

pub fn calculate_points(metrics: &ActivityMetrics) -> i64 {
    i64::from(metrics.days_logged) * POINTS_PER_DAY_LOGGED
        + i64::from(metrics.streak) * POINTS_PER_STREAK_DAY
        + i64::from(metrics.full_completion_days) * POINTS_PER_FULL_DAY
        + (metrics.total_workout_min / 100) * POINTS_PER_100_WORKOUT_MIN
        + (metrics.total_water_l.max(0.0).floor() as i64) * POINTS_PER_LITER_WATER
        + (metrics.total_reading_min / 10) * POINTS_PER_10_READING_MIN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LeaderboardRange {
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "overall")]
    Overall,
}

impl LeaderboardRange {
    /// Parse the `?range=` value; anything unrecognised falls back to 7 days.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("30d") => Self::Last30Days,
            Some("overall") => Self::Overall,
            _ => Self::Last7Days,
        }
    }

    /// Inclusive date window ending today.
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days_back = match self {
            Self::Last7Days => 6,
            Self::Last30Days => 29,
            Self::Overall => 365,
        };
        (today - Duration::days(days_back), today)
    }
}

/// Metrics for one user inside a leaderboard window. Short windows score the
/// best run inside the window; overall scores the live streak.
pub fn compute_window_metrics(
    records: &[DayRecord],
    range: LeaderboardRange,
    today: NaiveDate,
) -> ActivityMetrics {
    let (from, to) = range.bounds(today);
    let in_window: Vec<DayRecord> = records
        .iter()
        .filter(|r| r.log_date >= from && r.log_date <= to)
        .copied()
        .collect();

    let dates = in_window.iter().map(|r| r.log_date);
    let streak = match range {
        LeaderboardRange::Overall => current_streak(dates, today),
        _ => longest_streak_in_range(dates, from, to),
    };
    aggregate(&in_window, streak)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Leader {
    A,
    B,
    Tie,
}

fn leader<T: PartialOrd>(a: T, b: T) -> Leader {
    if a > b {
        Leader::A
    } else if b > a {
        Leader::B
    } else {
        Leader::Tie
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricComparison {
    pub metric: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value_a: f64,
    pub value_b: f64,
    pub leader: Leader,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub points_a: i64,
    pub points_b: i64,
    /// Equal points go to side A.
    pub winner: Leader,
    pub advantage: i64,
    pub wins_a: u32,
    pub wins_b: u32,
    pub metrics: Vec<MetricComparison>,
}

pub fn compare(a: &ActivityMetrics, b: &ActivityMetrics) -> HeadToHead {
    let points_a = calculate_points(a);
    let points_b = calculate_points(b);

    let rows: [(&'static str, &'static str, &'static str, f64, f64); 6] = [
        ("days_logged", "Days logged", "days", f64::from(a.days_logged), f64::from(b.days_logged)),
        ("streak", "Streak", "days", f64::from(a.streak), f64::from(b.streak)),
        (
            "full_completion_days",
            "Full completion days",
            "days",
            f64::from(a.full_completion_days),
            f64::from(b.full_completion_days),
        ),
        (
            "total_workout_min",
            "Total workout",
            "min",
            a.total_workout_min as f64,
            b.total_workout_min as f64,
        ),
        ("total_water_L", "Total water", "L", a.total_water_l, b.total_water_l),
        (
            "total_reading_min",
            "Total reading",
            "min",
            a.total_reading_min as f64,
            b.total_reading_min as f64,
        ),
    ];

    let metrics: Vec<MetricComparison> = rows
        .into_iter()
        .map(|(metric, label, unit, value_a, value_b)| MetricComparison {
            metric,
            label,
            unit,
            value_a,
            value_b,
            leader: leader(value_a, value_b),
        })
        .collect();

    let wins_a = metrics.iter().filter(|m| m.leader == Leader::A).count() as u32;
    let wins_b = metrics.iter().filter(|m| m.leader == Leader::B).count() as u32;

    HeadToHead {
        points_a,
        points_b,
        winner: if points_a >= points_b { Leader::A } else { Leader::B },
        advantage: (points_a - points_b).abs(),
        wins_a,
        wins_b,
        metrics,
    }
}
