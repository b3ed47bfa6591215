use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::auth::AuthUser,
    config::Config,
    error::SubmissionError,
    model::attendance::{AttendanceRecord, AttendanceStatus},
    model::time_slot::TimeSlot,
    utils::attendance_calc::{business_date, hours_worked, parse_slot_times},
    utils::photo_store,
};

/// How far ahead a slot may be scheduled.
const MAX_SCHEDULE_DAYS_AHEAD: u64 = 30;

#[derive(Debug, MultipartForm)]
pub struct SubmitAttendanceForm {
    pub slot_name: Text<String>,
    pub start_time: Text<String>,
    pub end_time: Text<String>,
    pub duration_hours: Text<f64>,
    pub solds_quantity: Text<u32>,
    #[multipart(limit = "10MB")]
    pub photo: TempFile,
}

#[derive(Serialize, ToSchema)]
pub struct SubmissionResponse {
    #[schema(example = 981)]
    pub attendance_id: u64,
    #[schema(example = "2025-03-09", value_type = String, format = "date")]
    pub attendance_date: NaiveDate,
    #[schema(example = "completed")]
    pub status: String,
    #[schema(example = 4.0, nullable = true)]
    pub hours_worked: Option<f64>,
    #[schema(example = "sellers/7/2025-03-09_9f4d.jpg")]
    pub photo_path: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ScheduleSlotReq {
    #[schema(example = "2025-03-12", value_type = String, format = "date")]
    pub attendance_date: NaiveDate,
    #[schema(example = "10:00 PM - 2:00 AM")]
    pub name: String,
    #[schema(example = "22:00:00")]
    pub start_time: String,
    #[schema(example = "02:00:00")]
    pub end_time: String,
    #[schema(example = 4.0)]
    pub duration_hours: f64,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Business day to list; defaults to the current one
    #[schema(example = "2025-03-09", value_type = String, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceView {
    pub id: u64,
    #[schema(value_type = String, format = "date")]
    pub attendance_date: NaiveDate,
    pub slot_name: String,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
    pub duration_hours: f64,
    pub solds_quantity: Option<u32>,
    pub photo_path: Option<String>,
    pub hours_worked: Option<f64>,
    pub status: String,
    #[schema(value_type = String, nullable = true)]
    pub check_in_time: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub check_out_time: Option<NaiveTime>,
}

/// Deduplicating get-or-create for time slots, keyed by the exact
/// (start, end, duration) triple. Single atomic upsert; concurrent callers
/// converge on one row.
async fn resolve_time_slot(
    pool: &MySqlPool,
    name: &str,
    start_time: NaiveTime,
    end_time: NaiveTime,
    duration_hours: f64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO attendance_time_slots (name, start_time, end_time, duration_hours, is_active)
        VALUES (?, ?, ?, ?, 1)
        ON DUPLICATE KEY UPDATE id = LAST_INSERT_ID(id)
        "#,
    )
    .bind(name)
    .bind(start_time)
    .bind(end_time)
    .bind(duration_hours)
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

/// Idempotency safeguard: the same slot on the same day is rejected even
/// when the submission gate has not fired (e.g. the prior record was
/// cancelled).
async fn slot_already_taken(
    pool: &MySqlPool,
    seller_id: u64,
    date: NaiveDate,
    time_slot_id: u64,
) -> Result<bool, sqlx::Error> {
    let existing = sqlx::query_scalar::<_, u64>(
        r#"
        SELECT id FROM attendance
        WHERE seller_id = ? AND attendance_date = ? AND time_slot_id = ?
        LIMIT 1
        "#,
    )
    .bind(seller_id)
    .bind(date)
    .bind(time_slot_id)
    .fetch_optional(pool)
    .await?;

    Ok(existing.is_some())
}

async fn do_submit(
    pool: &MySqlPool,
    config: &Config,
    seller_id: u64,
    form: &SubmitAttendanceForm,
    business_day: NaiveDate,
) -> Result<SubmissionResponse, SubmissionError> {
    // Photo is required before anything is persisted.
    if form.photo.size == 0 {
        return Err(SubmissionError::Validation(
            "A total-sold photo is required".into(),
        ));
    }
    if let Some(ct) = &form.photo.content_type {
        if ct.type_().as_str() != "image" {
            return Err(SubmissionError::Validation(
                "The uploaded file must be an image".into(),
            ));
        }
    }

    let (start, end) = parse_slot_times(&form.start_time, &form.end_time, *form.duration_hours)?;

    let time_slot_id =
        resolve_time_slot(pool, &form.slot_name, start, end, *form.duration_hours).await?;

    if slot_already_taken(pool, seller_id, business_day, time_slot_id).await? {
        return Err(SubmissionError::DuplicateSlot);
    }

    // A parse failure leaves hours unset; the submission still counts.
    let hours = hours_worked(&form.start_time, &form.end_time);

    let status = if config.attendance_direct_completion {
        AttendanceStatus::Completed
    } else {
        AttendanceStatus::Scheduled
    };

    let bytes = tokio::fs::read(form.photo.file.path()).await?;
    let photo_path = photo_store::save_photo(
        &config.upload_root,
        seller_id,
        business_day,
        form.photo.file_name.as_deref(),
        &bytes,
    )
    .await?;

    let insert = sqlx::query(
        r#"
        INSERT INTO attendance
        (seller_id, attendance_date, time_slot_id, solds_quantity, photo_path, hours_worked, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(seller_id)
    .bind(business_day)
    .bind(time_slot_id)
    .bind(*form.solds_quantity)
    .bind(&photo_path)
    .bind(hours)
    .bind(status.to_string())
    .execute(pool)
    .await;

    match insert {
        Ok(result) => Ok(SubmissionResponse {
            attendance_id: result.last_insert_id(),
            attendance_date: business_day,
            status: status.to_string(),
            hours_worked: hours,
            photo_path,
        }),
        Err(e) => {
            // No row was written; don't leave the photo orphaned.
            photo_store::remove_photo(&config.upload_root, &photo_path).await;
            Err(SubmissionError::from_insert_error(e))
        }
    }
}

/// Daily attendance submission with sales photo
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body(content = Object, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Attendance recorded", body = SubmissionResponse),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "A total-sold photo is required"
        })),
        (status = 409, description = "Already submitted for this business day", body = Object, example = json!({
            "message": "Attendance already submitted for today",
            "outcome": "already_submitted"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn submit_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    MultipartForm(form): MultipartForm<SubmitAttendanceForm>,
) -> actix_web::Result<impl Responder> {
    auth.require_live_seller()?;

    let business_day = business_date(Local::now().naive_local());

    match do_submit(pool.get_ref(), config.get_ref(), auth.user_id, &form, business_day).await {
        Ok(resp) => Ok(HttpResponse::Created().json(resp)),

        Err(SubmissionError::Validation(message)) => {
            Ok(HttpResponse::BadRequest().json(json!({ "message": message })))
        }

        // Normal states, not errors; callers branch on `outcome`.
        Err(SubmissionError::AlreadySubmitted) => Ok(HttpResponse::Conflict().json(json!({
            "message": "Attendance already submitted for today",
            "outcome": "already_submitted"
        }))),
        Err(SubmissionError::DuplicateSlot) => Ok(HttpResponse::Conflict().json(json!({
            "message": "This time slot is already recorded for today",
            "outcome": "duplicate_slot"
        }))),

        Err(e) => {
            error!(error = %e, seller_id = auth.user_id, "Attendance submission failed");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// Schedule a future time slot (no photo required)
#[utoipa::path(
    post,
    path = "/api/v1/attendance/schedule",
    request_body = ScheduleSlotReq,
    responses(
        (status = 201, description = "Slot scheduled"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Day already has a non-cancelled record"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn schedule_slot(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<ScheduleSlotReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_live_seller()?;

    let today = Local::now().date_naive();
    let horizon = today
        .checked_add_days(Days::new(MAX_SCHEDULE_DAYS_AHEAD))
        .unwrap_or(today);

    if payload.attendance_date < today {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "You cannot schedule for past dates"
        })));
    }
    if payload.attendance_date > horizon {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": format!("You can only schedule up to {MAX_SCHEDULE_DAYS_AHEAD} days in advance")
        })));
    }

    let result: Result<u64, SubmissionError> = async {
        let (start, end) =
            parse_slot_times(&payload.start_time, &payload.end_time, payload.duration_hours)?;

        let time_slot_id =
            resolve_time_slot(pool.get_ref(), &payload.name, start, end, payload.duration_hours)
                .await?;

        if slot_already_taken(pool.get_ref(), auth.user_id, payload.attendance_date, time_slot_id)
            .await?
        {
            return Err(SubmissionError::DuplicateSlot);
        }

        let insert = sqlx::query(
            r#"
            INSERT INTO attendance (seller_id, attendance_date, time_slot_id, status)
            VALUES (?, ?, ?, 'scheduled')
            "#,
        )
        .bind(auth.user_id)
        .bind(payload.attendance_date)
        .bind(time_slot_id)
        .execute(pool.get_ref())
        .await
        .map_err(SubmissionError::from_insert_error)?;

        Ok(insert.last_insert_id())
    }
    .await;

    match result {
        Ok(attendance_id) => Ok(HttpResponse::Created().json(json!({
            "message": "Slot scheduled successfully",
            "attendance_id": attendance_id
        }))),
        Err(SubmissionError::Validation(message)) => {
            Ok(HttpResponse::BadRequest().json(json!({ "message": message })))
        }
        Err(SubmissionError::AlreadySubmitted) => Ok(HttpResponse::Conflict().json(json!({
            "message": "A slot is already booked for that date",
            "outcome": "already_submitted"
        }))),
        Err(SubmissionError::DuplicateSlot) => Ok(HttpResponse::Conflict().json(json!({
            "message": "You have already scheduled this time slot for the selected date",
            "outcome": "duplicate_slot"
        }))),
        Err(e) => {
            error!(error = %e, seller_id = auth.user_id, "Slot scheduling failed");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// Check in to a scheduled slot
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{attendance_id}/check-in",
    params(("attendance_id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Checked in"),
        (status = 400, description = "No scheduled record to check in to"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_live_seller()?;

    let attendance_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET status = 'checked_in', check_in_time = CURTIME()
        WHERE id = ? AND seller_id = ? AND status = 'scheduled'
        "#,
    )
    .bind(attendance_id)
    .bind(auth.user_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, attendance_id, "Check-in failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "No scheduled record found to check in to"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Checked in successfully"
    })))
}

/// Check out of an active slot
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{attendance_id}/check-out",
    params(("attendance_id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Checked out"),
        (status = 400, description = "No active check-in found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_live_seller()?;

    let attendance_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET status = 'completed',
            check_out_time = CURTIME(),
            hours_worked = ROUND(
                MOD(TIME_TO_SEC(CURTIME()) - TIME_TO_SEC(check_in_time) + 86400, 86400) / 3600,
                2
            )
        WHERE id = ? AND seller_id = ? AND status = 'checked_in'
        "#,
    )
    .bind(attendance_id)
    .bind(auth.user_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, attendance_id, "Check-out failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "No active check-in found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Checked out successfully"
    })))
}

/// Cancel a scheduled slot (owner only; terminal)
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{attendance_id}/cancel",
    params(("attendance_id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Slot cancelled"),
        (status = 400, description = "Record not found or not cancellable"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn cancel_slot(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_live_seller()?;

    let attendance_id = path.into_inner();

    // Only scheduled records may be cancelled; every other status is final
    // for this path.
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET status = 'cancelled'
        WHERE id = ? AND seller_id = ? AND status = 'scheduled'
        "#,
    )
    .bind(attendance_id)
    .bind(auth.user_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, attendance_id, "Cancel failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Record not found or not in a cancellable state"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Time slot cancelled successfully"
    })))
}

/// Own attendance records for a business day
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_own_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_live_seller()?;

    let date = query
        .date
        .unwrap_or_else(|| business_date(Local::now().naive_local()));

    let records = sqlx::query_as::<_, AttendanceView>(
        r#"
        SELECT a.id, a.attendance_date, ats.name AS slot_name, ats.start_time, ats.end_time,
               ats.duration_hours, a.solds_quantity, a.photo_path, a.hours_worked, a.status,
               a.check_in_time, a.check_out_time
        FROM attendance a
        JOIN attendance_time_slots ats ON a.time_slot_id = ats.id
        WHERE a.seller_id = ? AND a.attendance_date = ?
        ORDER BY ats.start_time
        "#,
    )
    .bind(auth.user_id)
    .bind(date)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, seller_id = auth.user_id, "Failed to fetch attendance");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Single attendance record (owner or admin)
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{attendance_id}",
    params(("attendance_id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record", body = AttendanceRecord),
        (status = 404, description = "Record not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let attendance_id = path.into_inner();

    let record = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, seller_id, attendance_date, time_slot_id, solds_quantity, photo_path,
               hours_worked, status, check_in_time, check_out_time, created_at
        FROM attendance
        WHERE id = ?
        "#,
    )
    .bind(attendance_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, attendance_id, "Failed to fetch attendance record");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match record {
        Some(r) if auth.is_admin() || r.seller_id == auth.user_id => {
            Ok(HttpResponse::Ok().json(r))
        }
        Some(_) => Err(actix_web::error::ErrorForbidden("Not your record")),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Attendance record not found"
        }))),
    }
}

/// Active time slots for the schedule form
#[utoipa::path(
    get,
    path = "/api/v1/attendance/slots",
    responses(
        (status = 200, description = "Active time slots", body = [TimeSlot]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_time_slots(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let slots = sqlx::query_as::<_, TimeSlot>(
        "SELECT id, name, start_time, end_time, duration_hours, is_active
         FROM attendance_time_slots WHERE is_active = 1 ORDER BY start_time",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch time slots");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(slots))
}

// -------------------- Admin photo review --------------------

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PhotoReviewQuery {
    /// Filter by seller
    pub seller_id: Option<u64>,
    /// Filter by exact business day
    #[schema(example = "2025-03-09", value_type = String, format = "date")]
    pub date: Option<NaiveDate>,
    /// Filter by month ("YYYY-MM"); ignored when `date` is set
    #[schema(example = "2025-03")]
    pub month: Option<String>,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct PhotoReviewRecord {
    pub id: u64,
    #[schema(value_type = String, format = "date")]
    pub attendance_date: NaiveDate,
    pub solds_quantity: Option<u32>,
    pub photo_path: Option<String>,
    pub hours_worked: Option<f64>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
    pub seller_id: u64,
    pub full_name: String,
    pub profile_image: Option<String>,
    pub experience_status: Option<String>,
    pub slot_name: String,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
    pub duration_hours: f64,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct PhotoReviewStats {
    pub total_sellers: i64,
    pub total_submissions: i64,
    pub total_solds: i64,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub earliest_date: Option<NaiveDate>,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub latest_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct PhotoReviewResponse {
    pub data: Vec<PhotoReviewRecord>,
    pub stats: PhotoReviewStats,
}

enum ReviewFilter<'a> {
    U64(u64),
    Date(NaiveDate),
    Str(&'a str),
}

/// Photo-backed submissions for admin review
#[utoipa::path(
    get,
    path = "/api/v1/attendance/photos",
    params(PhotoReviewQuery),
    responses(
        (status = 200, description = "Submissions with photos", body = PhotoReviewResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn review_photos(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<PhotoReviewQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let mut where_sql = String::from(
        " WHERE a.status IN ('completed', 'checked_in') AND a.photo_path IS NOT NULL",
    );
    let mut args: Vec<ReviewFilter> = Vec::new();

    if let Some(seller_id) = query.seller_id {
        where_sql.push_str(" AND a.seller_id = ?");
        args.push(ReviewFilter::U64(seller_id));
    }

    if let Some(date) = query.date {
        where_sql.push_str(" AND a.attendance_date = ?");
        args.push(ReviewFilter::Date(date));
    } else if let Some(month) = query.month.as_deref() {
        where_sql.push_str(" AND DATE_FORMAT(a.attendance_date, '%Y-%m') = ?");
        args.push(ReviewFilter::Str(month));
    }

    let data_sql = format!(
        r#"
        SELECT a.id, a.attendance_date, a.solds_quantity, a.photo_path, a.hours_worked,
               a.created_at,
               u.id AS seller_id, u.full_name, u.profile_image, u.experience_status,
               ats.name AS slot_name, ats.start_time, ats.end_time, ats.duration_hours
        FROM attendance a
        JOIN users u ON a.seller_id = u.id
        JOIN attendance_time_slots ats ON a.time_slot_id = ats.id
        {}
        ORDER BY a.attendance_date DESC, a.created_at DESC
        "#,
        where_sql
    );
    debug!(sql = %data_sql, "Fetching photo review records");

    let mut data_q = sqlx::query_as::<_, PhotoReviewRecord>(&data_sql);
    for arg in &args {
        data_q = match arg {
            ReviewFilter::U64(v) => data_q.bind(*v),
            ReviewFilter::Date(d) => data_q.bind(*d),
            ReviewFilter::Str(s) => data_q.bind(*s),
        };
    }

    let data = data_q.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch photo review records");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let stats_sql = format!(
        r#"
        SELECT CAST(COUNT(DISTINCT a.seller_id) AS SIGNED) AS total_sellers,
               CAST(COUNT(a.id) AS SIGNED) AS total_submissions,
               CAST(COALESCE(SUM(a.solds_quantity), 0) AS SIGNED) AS total_solds,
               MIN(a.attendance_date) AS earliest_date,
               MAX(a.attendance_date) AS latest_date
        FROM attendance a
        {}
        "#,
        where_sql
    );

    let mut stats_q = sqlx::query_as::<_, PhotoReviewStats>(&stats_sql);
    for arg in &args {
        stats_q = match arg {
            ReviewFilter::U64(v) => stats_q.bind(*v),
            ReviewFilter::Date(d) => stats_q.bind(*d),
            ReviewFilter::Str(s) => stats_q.bind(*s),
        };
    }

    let stats = stats_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch photo review stats");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(PhotoReviewResponse { data, stats }))
}
