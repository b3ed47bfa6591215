pub mod activity_log;
pub mod attendance_calc;
pub mod db_utils;
pub mod pay_period;
pub mod photo_store;
pub mod ranking;
pub mod username_cache;
pub mod username_filter;
