//! Wire types for the Teamtailor JSON:API candidates endpoint.
//!
//! These structs mirror the remote JSON exactly; only the members this
//! service reads are modeled, everything else is ignored during
//! deserialization. Resource ids arrive as either JSON strings or numbers
//! depending on endpoint version, so they are coerced to `String` at the
//! deserialization boundary.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Resource type tag for job applications in `included` and relationships.
pub const JOB_APPLICATIONS_TYPE: &str = "job-applications";

/// Column names of the export, in output order.
pub const CSV_HEADERS: [&str; 6] = [
    "candidate_id",
    "first_name",
    "last_name",
    "email",
    "job_application_id",
    "job_application_created_at",
];

// ─────────────────────────────────────────────────────────────────────────────
// JSON:API envelope
// ─────────────────────────────────────────────────────────────────────────────

/// One page of a JSON:API collection response.
///
/// `data` is mandatory: a success body without it is a malformed response,
/// not an empty page, and deserialization fails accordingly.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonApiEnvelope {
    /// Primary resources of this page, in server order.
    pub data: Vec<JsonApiResource>,
    /// Side-loaded related resources, referenced from `relationships` by id.
    #[serde(default)]
    pub included: Vec<JsonApiResource>,
    /// Pagination links.
    #[serde(default)]
    pub links: Links,
}

/// Pagination links. Only `next` drives the fetch loop; its absence
/// terminates the page sequence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// A typed resource object: `type`, `id`, `attributes`, `relationships`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonApiResource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl JsonApiResource {
    /// String attribute by name; missing or non-string attributes read as "".
    pub fn attr_str(&self, name: &str) -> &str {
        self.attributes
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// A relationship object. `data` may be absent, a single identifier, or a
/// list of identifiers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

impl Relationship {
    /// Entries of a to-many relationship. `job-applications` is to-many;
    /// absent or single-object `data` resolves to zero entries.
    pub fn collection(&self) -> &[ResourceIdentifier] {
        match &self.data {
            Some(RelationshipData::Many(items)) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
}

/// A `(type, id)` reference to a resource elsewhere in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
}

/// Accepts a JSON string or number and yields its string form.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "resource id must be a string or number, got {other}"
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output record
// ─────────────────────────────────────────────────────────────────────────────

/// One denormalized export row: a `(candidate, job application)` pair, or a
/// candidate alone with the application fields empty. Constructed once,
/// handed to the encoder, and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub candidate_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_application_id: String,
    pub job_application_created_at: String,
}
