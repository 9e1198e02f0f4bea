//! Teamtailor API integration layer.
//!
//! - [`client`] holds the authenticated HTTP client: token header, API
//!   version header, JSON:API accept header, request timeout, safe logging.
//! - [`candidates`] drives the paginated candidates fetch and flattens
//!   candidates with their side-loaded job applications into export rows.
//! - [`types`] mirrors the JSON:API wire format.

pub mod candidates;
pub mod client;
pub mod types;

pub use candidates::CandidatePages;
pub use client::TeamtailorClient;
