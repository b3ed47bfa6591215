use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Hourly payout rates by experience level.
pub const HOURLY_RATE_TENURED: f64 = 65.0;
pub const HOURLY_RATE_NEWBIE: f64 = 55.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceStatus {
    Newbie,
    Tenured,
}

impl ExperienceStatus {
    pub fn hourly_rate(&self) -> f64 {
        match self {
            ExperienceStatus::Tenured => HOURLY_RATE_TENURED,
            ExperienceStatus::Newbie => HOURLY_RATE_NEWBIE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "username": "mira.live",
        "full_name": "Mira Santos",
        "email": "mira@agency.com",
        "experience_status": "tenured",
        "status": "active",
        "profile_image": "sellers/7/profile.jpg",
        "created_at": "2025-01-05T08:00:00Z"
    })
)]
pub struct Seller {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = "mira.live")]
    pub username: String,

    #[schema(example = "Mira Santos")]
    pub full_name: String,

    #[schema(example = "mira@agency.com")]
    pub email: String,

    #[schema(example = "tenured", nullable = true)]
    pub experience_status: Option<String>,

    #[schema(example = "active")]
    pub status: String,

    #[schema(example = "sellers/7/profile.jpg", nullable = true)]
    pub profile_image: Option<String>,

    #[schema(example = "2025-01-05T08:00:00Z", value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}
