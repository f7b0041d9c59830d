use crate::{
    api::{self, attendance, department},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::{Result, anyhow};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` with a burst of the same size.
pub fn build_limiter_config(requests_per_min: u32) -> Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min} requests per minute"))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    // Public routes
    cfg.service(api::health);

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(Governor::new(limiter)) // rate limiting
            .service(
                web::scope("/departments")
                    // /departments
                    .service(
                        web::resource("").route(web::get().to(department::list_departments)),
                    )
                    // /departments/resolve?name=..
                    .service(
                        web::resource("/resolve")
                            .route(web::get().to(department::resolve_department)),
                    )
                    // /departments/{slug}
                    .service(
                        web::resource("/{slug}").route(web::get().to(department::get_department)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/evaluate
                    .service(
                        web::resource("/evaluate").route(web::post().to(attendance::evaluate)),
                    )
                    // /attendance/report
                    .service(web::resource("/report").route(web::post().to(attendance::report))),
            ),
    );
}
