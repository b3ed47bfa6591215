use crate::api::attendance::{
    AttendanceQuery, AttendanceView, PhotoReviewQuery, PhotoReviewRecord, PhotoReviewResponse,
    PhotoReviewStats, ScheduleSlotReq, SubmissionResponse,
};
use crate::api::leaderboard::{
    DashboardEntry, DashboardResponse, LeaderboardQuery, LeaderboardResponse, PayPeriodResponse,
};
use crate::api::seller::{CreateSeller, SellerListResponse, SellerQuery, SellerStats};
use crate::model::attendance::AttendanceRecord;
use crate::model::seller::{ExperienceStatus, Seller};
use crate::model::time_slot::TimeSlot;
use crate::utils::pay_period::PayPeriod;
use crate::utils::ranking::SellerPerformance;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Live Host Agency API",
        version = "1.0.0",
        description = r#"
## TikTok Live Host Agency

Backend for a live-seller agency: administrators manage seller accounts and
performance dashboards, sellers submit daily attendance with a sales photo.

### Key Features
- **Seller Management**
  - Create, update, list and delete live-seller accounts
- **Attendance**
  - Daily photo-backed submissions with a 6 AM business-day rollover
  - Slot scheduling with check-in / check-out / cancel
- **Leaderboards**
  - Bi-monthly pay periods, sales and hours rankings, payout projection

### Security
Protected endpoints use **JWT Bearer authentication** with admin and
live-seller roles.
"#,
    ),
    paths(
        crate::api::seller::create_seller,
        crate::api::seller::list_sellers,
        crate::api::seller::seller_stats,
        crate::api::seller::get_seller,
        crate::api::seller::update_seller,
        crate::api::seller::delete_seller,

        crate::api::attendance::submit_attendance,
        crate::api::attendance::schedule_slot,
        crate::api::attendance::list_time_slots,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::cancel_slot,
        crate::api::attendance::list_own_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::review_photos,

        crate::api::leaderboard::current_pay_period,
        crate::api::leaderboard::leaderboard,
        crate::api::leaderboard::admin_dashboard,
    ),
    components(
        schemas(
            Seller,
            ExperienceStatus,
            CreateSeller,
            SellerQuery,
            SellerListResponse,
            SellerStats,
            TimeSlot,
            SubmissionResponse,
            ScheduleSlotReq,
            AttendanceQuery,
            AttendanceView,
            AttendanceRecord,
            PhotoReviewQuery,
            PhotoReviewRecord,
            PhotoReviewStats,
            PhotoReviewResponse,
            PayPeriod,
            PayPeriodResponse,
            SellerPerformance,
            LeaderboardQuery,
            LeaderboardResponse,
            DashboardEntry,
            DashboardResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Sellers", description = "Seller account management APIs"),
        (name = "Attendance", description = "Attendance submission and scheduling APIs"),
        (name = "Leaderboard", description = "Pay periods and performance ranking APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
