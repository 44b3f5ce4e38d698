//! Scoring rules for the challenge: pure functions over [`DayRecord`]s.
//!
//! Nothing in here touches the database or the clock; handlers fetch rows,
//! convert them once with `DayRecord::from`, and pass `today` explicitly.
//!
//! [`DayRecord`]: crate::models::daily_log::DayRecord

pub mod badges;
pub mod challenges;
pub mod dashboard;
pub mod metrics;
pub mod points;
pub mod records;
pub mod streaks;
pub mod xp;
