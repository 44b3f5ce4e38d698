mod achievements;
mod logs;
mod pool;

pub use achievements::{award_badge, list_achievements};
pub use logs::fetch_logs_between;
#[cfg(test)]
pub use pool::lazy_pool;
pub use pool::create_pool;
