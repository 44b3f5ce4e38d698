pub mod auth;
pub mod badges;
pub mod challenges;
pub mod daily_logs;
pub mod dashboard;
pub mod health;
pub mod leaderboard;
