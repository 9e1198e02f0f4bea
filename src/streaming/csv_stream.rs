//! Incremental CSV encoding over the paginated candidate fetch.
//!
//! The export body is a stream of byte chunks, one chunk per remote page, so
//! at most one page of rows is ever held in memory. The transport polls the
//! stream only when the client connection can accept more bytes; between
//! polls the pipeline sits suspended, which is what keeps a slow reader from
//! piling up fetched pages. Dropping the stream (client disconnect) cancels
//! the pipeline before the next page is requested.

use actix_web::web::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

use crate::error::ExportError;
use crate::teamtailor::candidates::{page_to_rows, CandidatePages};
use crate::teamtailor::types::{CsvRow, JsonApiEnvelope, CSV_HEADERS};

/// Encodes one batch of rows to CSV bytes, optionally preceded by the header
/// line. Quoting of embedded commas, quotes, and newlines follows standard
/// CSV rules.
pub fn encode_rows(rows: &[CsvRow], include_header: bool) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    if include_header {
        writer
            .write_record(CSV_HEADERS)
            .map_err(|e| ExportError::Sink(e.to_string()))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ExportError::Sink(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Sink(e.to_string()))
}

/// Builds the CSV body stream from an already-fetched first page and the
/// remaining page sequence.
///
/// The first page is fetched by the caller before the response is committed,
/// so its failures can still become structured error responses; this function
/// only encodes it. The returned stream yields the header plus the first
/// page's rows as its first chunk (header alone for an empty export), then
/// one chunk per subsequent page. A failure on a later page surfaces as an
/// `Err` item, which the transport answers by closing the connection.
pub fn candidate_csv_stream(
    first_page: Option<JsonApiEnvelope>,
    pages: CandidatePages,
) -> Result<impl Stream<Item = Result<Bytes, ExportError>>, ExportError> {
    let first_rows = first_page.as_ref().map(page_to_rows).unwrap_or_default();
    let head = Bytes::from(encode_rows(&first_rows, true)?);

    let tail = stream::try_unfold(pages, |mut pages| async move {
        match pages.next_page().await? {
            Some(envelope) => {
                let chunk = encode_rows(&page_to_rows(&envelope), false)?;
                Ok(Some((Bytes::from(chunk), pages)))
            }
            None => Ok(None),
        }
    });

    Ok(stream::once(async move { Ok(head) }).chain(tail))
}
