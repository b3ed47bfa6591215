pub mod attendance;
pub mod role;
pub mod seller;
pub mod time_slot;
