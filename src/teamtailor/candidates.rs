//! Candidate export: paginated fetch and row flattening.
//!
//! [`CandidatePages`] pulls one collection page at a time, following the
//! server-supplied `links.next` until it is absent. Flattening is pure: each
//! page's `included` list is indexed by id, every candidate becomes one row
//! per job application (or a single row with empty application fields), and
//! the index is dropped with the page. Nothing accumulates across pages.

use std::collections::HashMap;

use tracing::debug;
use url::Url;

use crate::error::ExportError;
use crate::teamtailor::client::TeamtailorClient;
use crate::teamtailor::types::{
    CsvRow, JsonApiEnvelope, JsonApiResource, JOB_APPLICATIONS_TYPE,
};

/// Sparse fieldset requested for candidates; anything else is dead weight on
/// the wire.
const CANDIDATE_FIELDS: &str = "first-name,last-name,email,job-applications";

/// Sparse fieldset requested for side-loaded job applications.
const JOB_APPLICATION_FIELDS: &str = "created-at";

// ─────────────────────────────────────────────────────────────────────────────
// Paginating fetcher
// ─────────────────────────────────────────────────────────────────────────────

/// Pull-iterator over the candidates collection.
///
/// Each [`next_page`](Self::next_page) call performs exactly one remote
/// request; the producer never runs ahead of the consumer. A fresh instance
/// restarts the sequence from the first page.
pub struct CandidatePages {
    client: TeamtailorClient,
    next_url: Option<String>,
    page_count: u32,
}

impl CandidatePages {
    pub fn new(client: TeamtailorClient) -> Self {
        let first_url = initial_candidates_url(&client);
        Self {
            client,
            next_url: Some(first_url),
            page_count: 0,
        }
    }

    /// Fetches the next page, or returns `None` once the previous page
    /// carried no `next` link.
    ///
    /// Any fetch failure ends the sequence; there is no retry.
    pub async fn next_page(&mut self) -> Result<Option<JsonApiEnvelope>, ExportError> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let envelope = self.client.fetch_envelope(&url).await?;
        self.page_count += 1;
        self.next_url = envelope.links.next.clone();

        debug!(
            "[TT] page {}: {} candidates, {} included, more={}",
            self.page_count,
            envelope.data.len(),
            envelope.included.len(),
            self.next_url.is_some()
        );

        Ok(Some(envelope))
    }
}

/// First-page URL: sparse fieldsets for both resource types, the configured
/// page size, and job applications side-loaded into the same response so no
/// per-candidate follow-up calls are needed.
fn initial_candidates_url(client: &TeamtailorClient) -> String {
    let mut url: Url = client.base_url().clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("candidates");
    }
    url.query_pairs_mut()
        .append_pair("fields[candidates]", CANDIDATE_FIELDS)
        .append_pair("fields[job-applications]", JOB_APPLICATION_FIELDS)
        .append_pair("page[size]", &client.page_size().to_string())
        .append_pair("include", "job-applications");
    url.into()
}

// ─────────────────────────────────────────────────────────────────────────────
// Row flattener
// ─────────────────────────────────────────────────────────────────────────────

/// Indexes one page's `included` list by job application id.
///
/// Only resources typed `job-applications` are kept; duplicate ids keep the
/// last occurrence.
pub fn build_job_application_index(
    included: &[JsonApiResource],
) -> HashMap<&str, &JsonApiResource> {
    included
        .iter()
        .filter(|resource| resource.kind == JOB_APPLICATIONS_TYPE)
        .map(|resource| (resource.id.as_str(), resource))
        .collect()
}

/// Flattens one candidate into export rows.
///
/// One row per job-application relationship entry, in relationship order; a
/// candidate without applications yields a single row with the application
/// fields empty. An entry whose id is missing from the index still yields a
/// row with empty application fields rather than failing the page.
pub fn candidate_to_rows(
    candidate: &JsonApiResource,
    index: &HashMap<&str, &JsonApiResource>,
) -> Vec<CsvRow> {
    let entries: Vec<_> = candidate
        .relationships
        .get(JOB_APPLICATIONS_TYPE)
        .map(|relationship| relationship.collection())
        .unwrap_or(&[])
        .iter()
        .filter(|entry| entry.kind == JOB_APPLICATIONS_TYPE)
        .collect();

    if entries.is_empty() {
        return vec![row_for(candidate, None)];
    }

    entries
        .into_iter()
        .map(|entry| row_for(candidate, index.get(entry.id.as_str()).copied()))
        .collect()
}

/// Flattens one full page: index the side list, then map candidates in
/// primary-list order.
pub fn page_to_rows(envelope: &JsonApiEnvelope) -> Vec<CsvRow> {
    let index = build_job_application_index(&envelope.included);
    envelope
        .data
        .iter()
        .flat_map(|candidate| candidate_to_rows(candidate, &index))
        .collect()
}

fn row_for(candidate: &JsonApiResource, application: Option<&JsonApiResource>) -> CsvRow {
    CsvRow {
        candidate_id: candidate.id.clone(),
        first_name: candidate.attr_str("first-name").to_owned(),
        last_name: candidate.attr_str("last-name").to_owned(),
        email: candidate.attr_str("email").to_owned(),
        job_application_id: application.map(|a| a.id.clone()).unwrap_or_default(),
        job_application_created_at: application
            .map(|a| a.attr_str("created-at").to_owned())
            .unwrap_or_default(),
    }
}
