//! Experience points and the level curve.

use crate::models::daily_log::DayRecord;
use crate::services::streaks::longest_streak_ever;

pub const XP_PER_DAY_LOGGED: i32 = 10;
pub const XP_PER_FULL_DAY: i32 = 50;
pub const XP_BONUS_7_STREAK: i32 = 100;
pub const XP_BONUS_30_STREAK: i32 = 500;

pub const MAX_LEVEL: i32 = 99;

struct LevelTitle {
    min: i32,
    max: i32,
    title: &'static str,
}

const LEVEL_TITLES: &[LevelTitle] = &[
    LevelTitle { min: 1, max: 5, title: "Beginner" },
    LevelTitle { min: 6, max: 10, title: "Committed" },
    LevelTitle { min: 11, max: 20, title: "Champion" },
    LevelTitle { min: 21, max: MAX_LEVEL, title: "Legend" },
];

/// Total XP: per day logged, per full day, plus one-off bonuses for a
/// lifetime-best streak of 7 and of 30 days (the two stack).
pub fn calculate_xp(records: &[DayRecord], full_completion_count: i32) -> i32 {
    if records.is_empty() {
        return 0;
    }

    let days_logged = records.len() as i32;
    let best_streak = longest_streak_ever(records.iter().map(|r| r.log_date));

    let mut xp = days_logged * XP_PER_DAY_LOGGED + full_completion_count * XP_PER_FULL_DAY;
    if best_streak >= 7 {
        xp += XP_BONUS_7_STREAK;
    }
    if best_streak >= 30 {
        xp += XP_BONUS_30_STREAK;
    }
    xp
}

/// Cumulative XP needed to reach `level`.
pub fn xp_threshold_for_level(level: i32) -> i32 {
    match level {
        i32::MIN..=1 => 0,
        2..=5 => (level - 1) * 100,
        6..=10 => 500 + (level - 6) * 200,
        11..=20 => 1500 + (level - 11) * 350,
        _ => 5000 + (level - 21) * 500,
    }
}

pub fn title_for_level(level: i32) -> &'static str {
    LEVEL_TITLES
        .iter()
        .find(|t| (t.min..=t.max).contains(&level))
        .map(|t| t.title)
        .unwrap_or("Legend")
}

/// Highest level (capped at 99) whose threshold `xp` has reached, with its title.
pub fn level_for_xp(xp: i32) -> (i32, &'static str) {
    let mut level = 1;
    while level < MAX_LEVEL && xp >= xp_threshold_for_level(level + 1) {
        level += 1;
    }
    (level, title_for_level(level))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LevelProgress {
    pub xp_into_level: i32,
    pub xp_needed_for_level: i32,
    pub level: i32,
}

pub fn xp_progress_in_level(xp: i32) -> LevelProgress {
    let (level, _) = level_for_xp(xp);
    let base = xp_threshold_for_level(level);
    let next_base = xp_threshold_for_level(level + 1);
    LevelProgress {
        xp_into_level: xp - base,
        xp_needed_for_level: next_base - base,
        level,
    }
}
