//! Streaming CSV encoding for export responses.
//!
//! Rows are encoded page by page with the `csv` crate and handed to the HTTP
//! response as byte chunks; the full dataset is never buffered.

mod csv_stream;

pub use csv_stream::{candidate_csv_stream, encode_rows};
