use crate::{
    api::{attendance, leaderboard, seller},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/sellers")
                    // /sellers
                    .service(
                        web::resource("")
                            .route(web::post().to(seller::create_seller))
                            .route(web::get().to(seller::list_sellers)),
                    )
                    // /sellers/stats
                    .service(web::resource("/stats").route(web::get().to(seller::seller_stats)))
                    // /sellers/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(seller::get_seller))
                            .route(web::put().to(seller::update_seller))
                            .route(web::delete().to(seller::delete_seller)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::submit_attendance))
                            .route(web::get().to(attendance::list_own_attendance)),
                    )
                    // /attendance/schedule
                    .service(
                        web::resource("/schedule")
                            .route(web::post().to(attendance::schedule_slot)),
                    )
                    // /attendance/slots
                    .service(
                        web::resource("/slots")
                            .route(web::get().to(attendance::list_time_slots)),
                    )
                    // /attendance/photos
                    .service(
                        web::resource("/photos").route(web::get().to(attendance::review_photos)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(attendance::get_attendance)),
                    )
                    // /attendance/{id}/...
                    .service(
                        web::resource("/{id}/check-in")
                            .route(web::put().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/{id}/check-out")
                            .route(web::put().to(attendance::check_out)),
                    )
                    .service(
                        web::resource("/{id}/cancel")
                            .route(web::put().to(attendance::cancel_slot)),
                    ),
            )
            .service(
                web::scope("/leaderboard")
                    .service(web::resource("").route(web::get().to(leaderboard::leaderboard)))
                    .service(
                        web::resource("/dashboard")
                            .route(web::get().to(leaderboard::admin_dashboard)),
                    ),
            )
            .service(
                web::resource("/pay-period")
                    .route(web::get().to(leaderboard::current_pay_period)),
            ),
    );
}
