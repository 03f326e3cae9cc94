use std::io::{Cursor, Read};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tiny_http::{Request, Response};

use petal_counter::{AnalysisTicket, Analyzer, FileCandidate, PetalConfig, Result, Session};

use crate::state::{self, AnalysisEvent, SharedState};
use crate::util::multipart::{extract_boundary, extract_file_parts, extract_text_field};

/// Room for multipart headers and the `source` field on top of the file limit.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Files of one upload form, in submission order.
#[derive(Debug)]
struct UploadForm {
    files: Vec<FileCandidate>,
    /// Sent by the drop zone script; the file picker posts `picker`.
    from_drop: bool,
}

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

/// Accepts a picker or drop upload, starts the analysis, and redirects home.
/// Rejections are stored on the session and shown on the next page load.
pub fn handle_upload(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let limit = state::lock(&state).config.max_upload_bytes;

    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let boundary = match extract_boundary(&content_type) {
        Some(b) => b,
        None => {
            log::warn!("upload without multipart boundary");
            return crate::routes::redirect("/");
        }
    };

    let body = match read_body(request.as_reader(), limit) {
        Ok(body) => body,
        Err(e) => {
            log::warn!("failed to read upload body: {}", e);
            return crate::routes::redirect("/");
        }
    };
    let form = parse_form(&body, &boundary);

    let mut st = state::lock(&state);
    match start_upload(&mut st.session, form) {
        Some(Ok(ticket)) => {
            let bytes = st.session.uploaded().map(|u| u.bytes().to_vec()).unwrap_or_default();
            let (tx, rx) = mpsc::channel::<AnalysisEvent>();
            st.analysis_rx = Some(Arc::new(Mutex::new(rx)));
            let config = st.config.clone();
            drop(st);
            spawn_analysis(state.clone(), config, ticket, bytes, tx);
        }
        Some(Err(e)) => log::info!("upload rejected: {}", e),
        None => log::info!("upload contained no file"),
    }

    crate::routes::redirect("/")
}

/// Reads at most one byte more than `limit` plus multipart overhead.  A body
/// cut off there still yields a file part longer than the limit, so
/// validation reports it as too large.
fn read_body<R: Read + ?Sized>(reader: &mut R, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    reader.take(limit + MULTIPART_OVERHEAD + 1).read_to_end(&mut body)?;
    Ok(body)
}

fn parse_form(body: &[u8], boundary: &str) -> UploadForm {
    let files = extract_file_parts(body, boundary)
        .into_iter()
        .map(|p| FileCandidate::new(p.filename, p.content_type, p.bytes))
        .collect();
    let from_drop = extract_text_field(body, boundary, "source").as_deref() == Some("drop");
    UploadForm { files, from_drop }
}

/// Drops go through the drop zone (first file only); the picker submits its
/// single file directly.
fn start_upload(session: &mut Session, form: UploadForm) -> Option<Result<AnalysisTicket>> {
    if form.from_drop {
        session.drop_files(form.files)
    } else {
        form.files.into_iter().next().map(|f| session.submit(f))
    }
}

/// Runs one analysis off the request thread and records its outcome.
fn spawn_analysis(
    state: SharedState,
    config: PetalConfig,
    ticket: AnalysisTicket,
    bytes: Vec<u8>,
    tx: mpsc::Sender<AnalysisEvent>,
) {
    thread::spawn(move || {
        let mut analyzer = Analyzer::from_config(&config);
        let outcome = analyzer.analyze_bytes(&bytes);
        let event = match &outcome {
            Ok(result) => AnalysisEvent::Finished(result.clone()),
            Err(e) => AnalysisEvent::Failed(e.user_message()),
        };

        let applied = state::lock(&state).session.complete(ticket, outcome);
        if applied {
            // Receiver may already be gone (reset or no listener); that's fine.
            let _ = tx.send(event);
        }
    });
}
