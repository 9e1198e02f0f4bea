//! CSV export endpoint.
//!
//! `GET /api/export/candidates` streams the full candidate export as a CSV
//! attachment. The first remote page is fetched before the response is
//! committed so early failures can still be answered with a structured JSON
//! error (502 for remote failures, 500 otherwise). Once streaming has begun
//! the status is already on the wire; a mid-stream failure is logged and the
//! connection is closed without a trailer.

use actix_web::web::{self, get, scope};
use actix_web::{HttpResponse, Scope};
use chrono::Utc;
use futures_util::StreamExt;
use tracing::error;

use crate::error::ExportError;
use crate::streaming::candidate_csv_stream;
use crate::teamtailor::{CandidatePages, TeamtailorClient};

/// Mounts the export routes under `/api/export`.
pub fn configure_routes() -> Scope {
    scope("/api/export").route("/candidates", get().to(export_candidates))
}

async fn export_candidates(client: web::Data<TeamtailorClient>) -> HttpResponse {
    let mut pages = CandidatePages::new(client.get_ref().clone());

    let first_page = match pages.next_page().await {
        Ok(page) => page,
        Err(err) => return error_response("fetching first candidates page", err),
    };

    let stream = match candidate_csv_stream(first_page, pages) {
        Ok(stream) => stream,
        Err(err) => return error_response("encoding CSV header", err),
    };
    let stream = stream.map(|chunk| {
        chunk.inspect_err(|err| error!("[EXPORT] aborted mid-stream, closing connection: {err}"))
    });

    let filename = format!("candidates-{}.csv", Utc::now().format("%Y-%m-%d"));
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream)
}

/// Converts a pre-stream failure into the structured error response.
fn error_response(stage: &str, err: ExportError) -> HttpResponse {
    error!("[EXPORT] {stage} failed: {err}");
    let body = err.to_error_body();
    if err.is_gateway_error() {
        HttpResponse::BadGateway().json(body)
    } else {
        HttpResponse::InternalServerError().json(body)
    }
}
