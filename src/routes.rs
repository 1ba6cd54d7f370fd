use crate::{
    api::{admin, attendance},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

type Limiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter settings, built once and shared by every worker.
pub struct RateLimits {
    punch: Limiter,
    admin: Limiter,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            punch: build_limiter(config.rate_punch_per_min)
                .context("RATE_PUNCH_PER_MIN produced an invalid limiter")?,
            admin: build_limiter(config.rate_admin_per_min)
                .context("RATE_ADMIN_PER_MIN produced an invalid limiter")?,
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Option<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limits: &RateLimits) {
    // admin scope first so `/api` doesn't swallow it
    cfg.service(
        web::scope(&format!("{}/admin", config.api_prefix))
            .wrap(Governor::new(&limits.admin))
            .configure(admin_routes),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&limits.punch))
            .configure(employee_routes),
    );
}

pub fn employee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/punch-in").route(web::post().to(attendance::punch_in)))
        .service(web::resource("/punch-out").route(web::post().to(attendance::punch_out)))
        // /records/{employeeId}
        .service(
            web::resource("/records/{employeeId}")
                .route(web::get().to(attendance::employee_records)),
        );
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // /admin/records
        web::resource("/records")
            .route(web::get().to(admin::list_records))
            .route(web::delete().to(admin::clear_records)),
    )
    // /admin/stats
    .service(web::resource("/stats").route(web::get().to(admin::stats)));
}
