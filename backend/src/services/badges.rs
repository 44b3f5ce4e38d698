//! Badge catalogue and unlock rules.
//!
//! Badge ids are stored verbatim in `achievements.badge_type`, so they must
//! stay stable.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::models::achievement::Achievement;
use crate::services::metrics::{ActivityMetrics, MetricKey};

pub const FALLBACK_ICON: &str = "🏆";

#[derive(Debug)]
pub struct BadgeRule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub metric: MetricKey,
    pub threshold: f64,
}

pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule {
        id: "first_step",
        name: "First Step",
        description: "Log your first day",
        icon: "⭐",
        metric: MetricKey::DaysLogged,
        threshold: 1.0,
    },
    BadgeRule {
        id: "week_warrior",
        name: "Week Warrior",
        description: "7-day streak",
        icon: "🏆",
        metric: MetricKey::Streak,
        threshold: 7.0,
    },
    BadgeRule {
        id: "month_master",
        name: "Month Master",
        description: "30-day streak",
        icon: "👑",
        metric: MetricKey::Streak,
        threshold: 30.0,
    },
    BadgeRule {
        id: "hydration_hero",
        name: "Hydration Hero",
        description: "100L total water",
        icon: "💧",
        metric: MetricKey::TotalWaterL,
        threshold: 100.0,
    },
    BadgeRule {
        id: "reading_rookie",
        name: "Reading Rookie",
        description: "10 hours total reading",
        icon: "📖",
        metric: MetricKey::TotalReadingMin,
        threshold: 600.0,
    },
    BadgeRule {
        id: "workout_wonder",
        name: "Workout Wonder",
        description: "1000 min total workout",
        icon: "🏋️",
        metric: MetricKey::TotalWorkoutMin,
        threshold: 1000.0,
    },
    BadgeRule {
        id: "perfect_week",
        name: "Perfect Week",
        description: "7 consecutive full completion days",
        icon: "💎",
        metric: MetricKey::FullCompletionStreak,
        threshold: 7.0,
    },
    BadgeRule {
        id: "75_hard_complete",
        name: "75 Hard Complete",
        description: "Complete 75 days",
        icon: "🏅",
        metric: MetricKey::DaysLogged,
        threshold: 75.0,
    },
];

/// Badges whose threshold is met and that are not in `already_earned`, in
/// catalogue order. Persisting them is up to the caller.
pub fn evaluate_badges(
    metrics: &ActivityMetrics,
    already_earned: &HashSet<String>,
) -> Vec<&'static str> {
    BADGE_RULES
        .iter()
        .filter(|rule| !already_earned.contains(rule.id))
        .filter(|rule| metrics.value(rule.metric) >= rule.threshold)
        .map(|rule| rule.id)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeInfo {
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Display data for a badge id. Unknown ids (e.g. retired badges still in
/// the table) render as the raw id with the generic icon.
pub fn badge_info(badge_id: &str) -> BadgeInfo {
    match BADGE_RULES.iter().find(|rule| rule.id == badge_id) {
        Some(rule) => BadgeInfo {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            icon: rule.icon.to_string(),
        },
        None => BadgeInfo {
            name: badge_id.to_string(),
            description: String::new(),
            icon: FALLBACK_ICON.to_string(),
        },
    }
}

#[derive(Debug, Serialize)]
pub struct BadgeEntry {
    pub id: String,
    #[serde(flatten)]
    pub info: BadgeInfo,
    pub metric: Option<MetricKey>,
    pub threshold: Option<f64>,
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}

/// The full shelf: every catalogue badge with its earned state, followed by
/// any earned ids the catalogue no longer knows.
pub fn badge_catalogue(earned: &[Achievement]) -> Vec<BadgeEntry> {
    let earned_at: HashMap<&str, DateTime<Utc>> = earned
        .iter()
        .map(|a| (a.badge_type.as_str(), a.earned_at))
        .collect();

    let mut entries: Vec<BadgeEntry> = BADGE_RULES
        .iter()
        .map(|rule| BadgeEntry {
            id: rule.id.to_string(),
            info: badge_info(rule.id),
            metric: Some(rule.metric),
            threshold: Some(rule.threshold),
            earned: earned_at.contains_key(rule.id),
            earned_at: earned_at.get(rule.id).copied(),
        })
        .collect();

    for achievement in earned {
        if BADGE_RULES.iter().all(|rule| rule.id != achievement.badge_type) {
            entries.push(BadgeEntry {
                id: achievement.badge_type.clone(),
                info: badge_info(&achievement.badge_type),
                metric: None,
                threshold: None,
                earned: true,
                earned_at: Some(achievement.earned_at),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn earned(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_75_days_unlocks_first_step_and_75_hard() {
        let metrics = ActivityMetrics {
            days_logged: 75,
            ..Default::default()
        };
        let newly = evaluate_badges(&metrics, &HashSet::new());
        assert_eq!(newly, vec!["first_step", "75_hard_complete"]);
    }

    #[test]
    fn test_already_earned_are_skipped() {
        let metrics = ActivityMetrics {
            days_logged: 75,
            ..Default::default()
        };
        let newly = evaluate_badges(&metrics, &earned(&["first_step"]));
        assert_eq!(newly, vec!["75_hard_complete"]);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let metrics = ActivityMetrics {
            days_logged: 10,
            streak: 8,
            total_water_l: 120.0,
            ..Default::default()
        };
        let already = earned(&["first_step"]);
        let first = evaluate_badges(&metrics, &already);
        let second = evaluate_badges(&metrics, &already);
        assert_eq!(first, second);
        assert_eq!(first, vec!["week_warrior", "hydration_hero"]);
    }

    #[test]
    fn test_empty_metrics_unlock_nothing() {
        assert!(evaluate_badges(&ActivityMetrics::default(), &HashSet::new()).is_empty());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let metrics = ActivityMetrics {
            total_reading_min: 600,
            total_workout_min: 999,
            full_completion_streak: 7,
            ..Default::default()
        };
        let newly = evaluate_badges(&metrics, &HashSet::new());
        assert_eq!(newly, vec!["reading_rookie", "perfect_week"]);
    }

    #[test]
    fn test_badge_info_known_and_unknown() {
        let info = badge_info("hydration_hero");
        assert_eq!(info.name, "Hydration Hero");
        assert_eq!(info.icon, "💧");

        let unknown = badge_info("mystery_badge");
        assert_eq!(unknown.name, "mystery_badge");
        assert_eq!(unknown.description, "");
        assert_eq!(unknown.icon, FALLBACK_ICON);
    }

    #[test]
    fn test_badge_ids_are_unique() {
        let ids: HashSet<&str> = BADGE_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), BADGE_RULES.len());
    }

    #[test]
    fn test_catalogue_marks_earned_and_keeps_unknown() {
        let now = Utc::now();
        let achievements = vec![
            Achievement {
                id: Uuid::new_v4(),
                user_id: Uuid::nil(),
                badge_type: "week_warrior".into(),
                earned_at: now,
            },
            Achievement {
                id: Uuid::new_v4(),
                user_id: Uuid::nil(),
                badge_type: "retired_badge".into(),
                earned_at: now,
            },
        ];
        let shelf = badge_catalogue(&achievements);
        assert_eq!(shelf.len(), BADGE_RULES.len() + 1);

        let week = shelf.iter().find(|b| b.id == "week_warrior").unwrap();
        assert!(week.earned);
        assert_eq!(week.earned_at, Some(now));

        let first = shelf.iter().find(|b| b.id == "first_step").unwrap();
        assert!(!first.earned);

        let retired = shelf.last().unwrap();
        assert_eq!(retired.id, "retired_badge");
        assert_eq!(retired.info.icon, FALLBACK_ICON);
    }

    #[test]
    fn test_catalogue_entry_serializes_flat() {
        let shelf = badge_catalogue(&[]);
        let json = serde_json::to_value(&shelf[3]).unwrap();
        assert_eq!(json["id"], "hydration_hero");
        assert_eq!(json["name"], "Hydration Hero");
        assert_eq!(json["metric"], "total_water_L");
        assert_eq!(json["earned"], false);
    }
}
