use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Builds header values, skipping any that are not valid header bytes.
fn headers(pairs: &[(&str, &str)]) -> Vec<Header> {
    pairs
        .iter()
        .filter_map(|(name, value)| Header::from_bytes(name.as_bytes(), value.as_bytes()).ok())
        .collect()
}

fn bytes_response(status: u16, pairs: &[(&str, &str)], body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    Response::new(StatusCode(status), headers(pairs), Cursor::new(body), Some(len), None)
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    bytes_response(200, &[("Content-Type", "text/html; charset=utf-8")], body.into_bytes())
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    bytes_response(303, &[("Location", location), ("Content-Length", "0")], Vec::new())
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    bytes_response(404, &[("Content-Type", "text/plain")], b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Regular handlers borrow the request so the dispatcher can respond; the SSE
/// handler takes ownership to stream into the raw connection.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("").to_owned();

    log::debug!("{} {}", method, path);

    if method == Method::Get && path == "/analysis/events" {
        handlers::analysis_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get, "/") => handlers::home::handle_get(state),
        (Method::Post, "/upload") => handlers::upload::handle_upload(&mut request, state),
        (Method::Post, "/reset") => handlers::reset::handle_reset(state),
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        log::debug!("client went away before the response was sent: {}", e);
    }
}
