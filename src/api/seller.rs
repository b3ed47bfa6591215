use crate::{
    auth::auth::AuthUser,
    auth::handlers::is_username_available,
    auth::password::hash_password,
    config::Config,
    model::seller::{ExperienceStatus, Seller},
    utils::activity_log::log_activity,
    utils::db_utils::{build_update_sql, execute_update},
    utils::photo_store,
    utils::username_cache,
    utils::username_filter,
};
use actix_web::{HttpRequest, HttpResponse, Responder, error::ErrorInternalServerError, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

/// Columns the admin edit endpoint may touch. Role and password go through
/// dedicated flows.
const UPDATABLE_COLUMNS: &[&str] = &[
    "username",
    "full_name",
    "email",
    "experience_status",
    "status",
    "profile_image",
];

#[derive(Deserialize, ToSchema)]
pub struct CreateSeller {
    #[schema(example = "mira.live")]
    pub username: String,

    #[schema(example = "s3cret-pass")]
    pub password: String,

    #[schema(example = "Mira Santos")]
    pub full_name: String,

    #[schema(example = "mira@agency.com", format = "email")]
    pub email: String,

    #[schema(example = "newbie")]
    pub experience_status: ExperienceStatus,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SellerQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,
    #[schema(example = 20)]
    pub per_page: Option<u32>,
    /// Filter by account status
    #[schema(example = "active")]
    pub status: Option<String>,
    /// Filter by experience level
    #[schema(example = "tenured")]
    pub experience_status: Option<String>,
    /// Search by name, username or email
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SellerListResponse {
    pub data: Vec<Seller>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct SellerStats {
    #[schema(example = 42)]
    pub total_sellers: i64,
    #[schema(example = 30)]
    pub active_sellers: i64,
    #[schema(example = 12)]
    pub newbie_sellers: i64,
    #[schema(example = 30)]
    pub tenured_sellers: i64,
}

const SELLER_COLUMNS: &str =
    "id, username, full_name, email, experience_status, status, profile_image, created_at";

/// Create a live-seller account
#[utoipa::path(
    post,
    path = "/api/v1/sellers",
    request_body = CreateSeller,
    responses(
        (status = 201, description = "Seller created", body = Object, example = json!({
            "message": "Seller created successfully"
        })),
        (status = 409, description = "Username already taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn create_seller(
    auth: AuthUser,
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateSeller>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() || payload.full_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "username, password and full_name are required"
        })));
    }

    if !is_username_available(username, pool.get_ref()).await {
        return Ok(HttpResponse::Conflict().json(json!({
            "message": "Username already taken"
        })));
    }

    let hashed = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password, full_name, email, role, experience_status)
        VALUES (?, ?, ?, ?, 'live_seller', ?)
        "#,
    )
    .bind(username)
    .bind(hashed)
    .bind(payload.full_name.trim())
    .bind(&payload.email)
    .bind(payload.experience_status.to_string())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            username_filter::insert(username);
            username_cache::mark_taken(username).await;

            log_activity(
                pool.get_ref(),
                auth.user_id,
                "create_seller",
                Some(&format!("Created seller {username}")),
                Some(&req),
            )
            .await;

            Ok(HttpResponse::Created().json(json!({
                "message": "Seller created successfully"
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "Username already taken"
                    })));
                }
            }

            error!(error = %e, "Failed to create seller");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Paginated seller listing with filters
#[utoipa::path(
    get,
    path = "/api/v1/sellers",
    params(SellerQuery),
    responses(
        (status = 200, description = "Paginated seller list", body = SellerListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn list_sellers(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<SellerQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut where_sql = String::from(" WHERE role = 'live_seller'");
    let mut args: Vec<String> = Vec::new();

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(status.to_string());
    }

    if let Some(experience) = query.experience_status.as_deref() {
        where_sql.push_str(" AND experience_status = ?");
        args.push(experience.to_string());
    }

    if let Some(search) = query.search.as_deref() {
        where_sql.push_str(" AND (full_name LIKE ? OR username LIKE ? OR email LIKE ?)");
        let like = format!("%{}%", search);
        args.push(like.clone());
        args.push(like.clone());
        args.push(like);
    }

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM users{}", where_sql);
    debug!(sql = %count_sql, "Counting sellers");

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = count_q.bind(arg);
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count sellers");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT {} FROM users{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        SELLER_COLUMNS, where_sql
    );
    debug!(sql = %data_sql, page, per_page, "Fetching sellers");

    let mut data_q = sqlx::query_as::<_, Seller>(&data_sql);
    for arg in &args {
        data_q = data_q.bind(arg);
    }
    data_q = data_q.bind(per_page as i64).bind(offset as i64);

    let sellers = data_q.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch sellers");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(SellerListResponse {
        data: sellers,
        page,
        per_page,
        total,
    }))
}

/// Roster stats for the admin dashboard header
#[utoipa::path(
    get,
    path = "/api/v1/sellers/stats",
    responses(
        (status = 200, description = "Seller roster stats", body = SellerStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn seller_stats(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let stats = sqlx::query_as::<_, SellerStats>(
        r#"
        SELECT
            CAST(COUNT(*) AS SIGNED) AS total_sellers,
            CAST(SUM(CASE WHEN status = 'active' THEN 1 ELSE 0 END) AS SIGNED) AS active_sellers,
            CAST(SUM(CASE WHEN experience_status = 'newbie' THEN 1 ELSE 0 END) AS SIGNED) AS newbie_sellers,
            CAST(SUM(CASE WHEN experience_status = 'tenured' THEN 1 ELSE 0 END) AS SIGNED) AS tenured_sellers
        FROM users
        WHERE role = 'live_seller'
        "#,
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch seller stats");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Get seller by ID
#[utoipa::path(
    get,
    path = "/api/v1/sellers/{seller_id}",
    params(("seller_id", Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller found", body = Seller),
        (status = 404, description = "Seller not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn get_seller(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let seller_id = path.into_inner();

    // Sellers may read their own profile; everything else is admin only.
    if !auth.is_admin() && auth.user_id != seller_id {
        return Err(actix_web::error::ErrorForbidden("Admin only"));
    }

    let sql = format!(
        "SELECT {} FROM users WHERE id = ? AND role = 'live_seller'",
        SELLER_COLUMNS
    );

    let seller = sqlx::query_as::<_, Seller>(&sql)
        .bind(seller_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, seller_id, "Failed to fetch seller");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match seller {
        Some(s) => Ok(HttpResponse::Ok().json(s)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Seller not found"
        }))),
    }
}

/// Partial update of a seller account
#[utoipa::path(
    put,
    path = "/api/v1/sellers/{seller_id}",
    params(("seller_id", Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller updated"),
        (status = 404, description = "Seller not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn update_seller(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let seller_id = path.into_inner();

    let update = build_update_sql("users", UPDATABLE_COLUMNS, &body, "id", seller_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Seller not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Seller updated successfully"
    })))
}

/// Delete a seller account and its owned image files
#[utoipa::path(
    delete,
    path = "/api/v1/sellers/{seller_id}",
    params(("seller_id", Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Seller not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn delete_seller(
    auth: AuthUser,
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let seller_id = path.into_inner();

    let row = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT username, profile_image FROM users WHERE id = ? AND role = 'live_seller'",
    )
    .bind(seller_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, seller_id, "Failed to fetch seller before delete");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let (username, profile_image) = match row {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Seller not found"
            })));
        }
    };

    // Attendance rows cascade with the user row.
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(seller_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, seller_id, "Failed to delete seller");
            ErrorInternalServerError("Internal Server Error")
        })?;

    // Image files go with the account.
    if let Some(image) = profile_image.as_deref() {
        photo_store::remove_photo(&config.upload_root, image).await;
    }
    photo_store::remove_seller_photos(&config.upload_root, seller_id).await;

    username_filter::remove(&username);
    username_cache::invalidate(&username).await;

    log_activity(
        pool.get_ref(),
        auth.user_id,
        "delete_seller",
        Some(&format!("Deleted seller {username}")),
        Some(&req),
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
