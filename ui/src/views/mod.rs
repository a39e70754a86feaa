mod dashboard;
pub use dashboard::{Dashboard, DashboardStats, STATS_GLOBAL};
