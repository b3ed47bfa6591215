use actix_web::HttpRequest;
use sqlx::MySqlPool;

/// Records a user action in activity_logs. Never fails the caller; a lost
/// audit row is not worth failing a login over.
pub async fn log_activity(
    pool: &MySqlPool,
    user_id: u64,
    action: &str,
    description: Option<&str>,
    req: Option<&HttpRequest>,
) {
    let ip_address = req
        .and_then(|r| r.connection_info().realip_remote_addr().map(str::to_string));
    let user_agent = req.and_then(|r| {
        r.headers()
            .get("User-Agent")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    });

    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO activity_logs (user_id, action, description, ip_address, user_agent)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(action)
    .bind(description)
    .bind(ip_address)
    .bind(user_agent)
    .execute(pool)
    .await
    {
        tracing::error!(error = %e, user_id, action, "Failed to write activity log");
    }
}
