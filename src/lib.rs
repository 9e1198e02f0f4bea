//! Teamtailor candidate CSV export service.
//!
//! An HTTP service with one substantial endpoint: `GET /api/export/candidates`
//! streams every candidate (one row per job application) as a CSV download.
//! Pages are pulled from the Teamtailor JSON:API one at a time and encoded
//! incrementally, so memory use is bounded by a single page regardless of
//! account size.

pub mod config;
pub mod error;
pub mod routes;
pub mod streaming;
pub mod teamtailor;

use actix_web::web;

/// Registers every API route on an actix `App`.
///
/// Static file serving stays out of here; the binary mounts it last so it can
/// never shadow an API path, and tests skip it entirely.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::export::configure_routes())
        .route("/health", web::get().to(routes::health::health))
        .route(
            "/api-docs.json",
            web::get().to(routes::docs::openapi_document),
        );
}
