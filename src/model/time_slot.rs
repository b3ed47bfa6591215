use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reusable shift definition, deduplicated by (start_time, end_time,
/// duration_hours). Rows are created lazily the first time a seller picks a
/// combination and reused by everyone afterwards.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimeSlot {
    #[schema(example = 3)]
    pub id: u64,

    #[schema(example = "10:00 PM - 2:00 AM")]
    pub name: String,

    #[schema(example = "22:00:00", value_type = String)]
    pub start_time: NaiveTime,

    #[schema(example = "02:00:00", value_type = String)]
    pub end_time: NaiveTime,

    #[schema(example = 4.0)]
    pub duration_hours: f64,

    #[schema(example = true)]
    pub is_active: bool,
}
