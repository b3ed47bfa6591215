use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::auth::AuthUser,
    utils::pay_period::{PayPeriod, days_until_reset, pay_period_for},
    utils::ranking::{RankTarget, SellerPerformance, hourly_rate, rank_sellers, total_earned},
};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LeaderboardQuery {
    /// Any date inside the wanted pay period; defaults to today
    #[schema(example = "2025-03-09", value_type = String, format = "date")]
    pub date: Option<NaiveDate>,
    /// Primary ranking target: "sales" (default) or "hours"
    #[schema(example = "sales")]
    pub by: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub period: PayPeriod,
    pub entries: Vec<SellerPerformance>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardEntry {
    #[schema(example = 1)]
    pub rank: u32,
    #[schema(example = 7)]
    pub seller_id: u64,
    #[schema(example = "mira.live")]
    pub username: String,
    #[schema(example = "Mira Santos")]
    pub full_name: String,
    #[schema(example = "tenured", nullable = true)]
    pub experience_status: Option<String>,
    #[schema(example = 50)]
    pub total_solds: i64,
    #[schema(example = 42.5)]
    pub total_hours: f64,
    #[schema(example = 11)]
    pub working_days: i64,
    #[schema(example = 65.0)]
    pub hourly_rate: f64,
    /// Derived projection, never stored
    #[schema(example = 2762.5)]
    pub total_earned: f64,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub period: PayPeriod,
    #[schema(example = 6)]
    pub days_until_reset: i64,
    pub entries: Vec<DashboardEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct PayPeriodResponse {
    #[serde(flatten)]
    #[schema(inline)]
    pub period: PayPeriod,
    #[schema(example = 6)]
    pub days_until_reset: i64,
}

/// Full per-request rescan of the period's attendance rows; aggregates are
/// never cached or incrementally maintained.
async fn fetch_performance(
    pool: &MySqlPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<SellerPerformance>, sqlx::Error> {
    sqlx::query_as::<_, SellerPerformance>(
        r#"
        SELECT u.id AS seller_id, u.username, u.full_name, u.experience_status,
               CAST(COALESCE(SUM(a.solds_quantity), 0) AS SIGNED) AS total_solds,
               CAST(COALESCE(SUM(a.hours_worked), 0) AS DOUBLE) AS total_hours,
               CAST(COUNT(DISTINCT a.attendance_date) AS SIGNED) AS working_days
        FROM users u
        LEFT JOIN attendance a
            ON a.seller_id = u.id
            AND a.status <> 'cancelled'
            AND a.attendance_date BETWEEN ? AND ?
        WHERE u.role = 'live_seller' AND u.status = 'active'
        GROUP BY u.id, u.username, u.full_name, u.experience_status
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Current pay period and reset countdown
#[utoipa::path(
    get,
    path = "/api/v1/pay-period",
    responses(
        (status = 200, description = "Current pay period", body = PayPeriodResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaderboard"
)]
pub async fn current_pay_period(_auth: AuthUser) -> actix_web::Result<impl Responder> {
    let today = Local::now().date_naive();

    Ok(HttpResponse::Ok().json(PayPeriodResponse {
        period: pay_period_for(today),
        days_until_reset: days_until_reset(today),
    }))
}

/// Seller leaderboard for a pay period
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked sellers", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaderboard"
)]
pub async fn leaderboard(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaderboardQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let period = pay_period_for(date);

    let target = match query.by.as_deref() {
        Some("hours") => RankTarget::HoursWorked,
        _ => RankTarget::SalesQuantity,
    };

    let mut entries = fetch_performance(pool.get_ref(), period.start_date, period.end_date)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to aggregate leaderboard");
            ErrorInternalServerError("Internal Server Error")
        })?;

    rank_sellers(&mut entries, target);

    Ok(HttpResponse::Ok().json(LeaderboardResponse { period, entries }))
}

/// Admin dashboard with payout projection
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/dashboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked sellers with pay projection", body = DashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leaderboard"
)]
pub async fn admin_dashboard(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaderboardQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let period = pay_period_for(date);

    let mut rows = fetch_performance(pool.get_ref(), period.start_date, period.end_date)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to aggregate dashboard");
            ErrorInternalServerError("Internal Server Error")
        })?;

    rank_sellers(&mut rows, RankTarget::SalesQuantity);

    let entries = rows
        .into_iter()
        .map(|row| {
            let rate = hourly_rate(row.experience_status.as_deref());
            let earned = total_earned(row.total_hours, row.experience_status.as_deref());
            DashboardEntry {
                rank: row.rank,
                seller_id: row.seller_id,
                username: row.username,
                full_name: row.full_name,
                experience_status: row.experience_status,
                total_solds: row.total_solds,
                total_hours: row.total_hours,
                working_days: row.working_days,
                hourly_rate: rate,
                total_earned: earned,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(DashboardResponse {
        period,
        days_until_reset: days_until_reset(date),
        entries,
    }))
}
