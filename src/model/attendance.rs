use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle of an attendance record.
///
/// `scheduled -> checked_in -> completed`, with `scheduled -> cancelled` as
/// the only other transition. The photo submission flow may create records
/// directly in `completed` (see `Config::attendance_direct_completion`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Scheduled,
    CheckedIn,
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: u64,
    pub seller_id: u64,
    /// Business day the record is filed under (06:00 rollover, not midnight).
    #[schema(example = "2025-03-09", value_type = String, format = "date")]
    pub attendance_date: NaiveDate,
    pub time_slot_id: u64,
    pub solds_quantity: Option<u32>,
    pub photo_path: Option<String>,
    pub hours_worked: Option<f64>,
    #[schema(example = "completed")]
    pub status: String,
    #[schema(value_type = String, nullable = true)]
    pub check_in_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub check_out_time: Option<NaiveTime>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
