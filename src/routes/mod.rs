//! HTTP surface of the export service.
//!
//! - `GET /api/export/candidates` — streamed CSV export ([`export`])
//! - `GET /health` — liveness probe ([`health`])
//! - `GET /api-docs.json` — OpenAPI document ([`docs`])

pub mod docs;
pub mod export;
pub mod health;
