//! Liveness endpoint.

use actix_web::HttpResponse;
use chrono::{SecondsFormat, Utc};

/// `GET /health` — reports that the process is up and serving requests.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
