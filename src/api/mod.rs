pub mod attendance;
pub mod leaderboard;
pub mod seller;
