use std::io::Cursor;
use tiny_http::Response;

use crate::state::{self, SharedState};

/// `POST /reset`: drops the image, result and error, and forgets any
/// running analysis.  The worker still finishes; its outcome is discarded.
pub fn handle_reset(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state::lock(&state);
    st.session.reset();
    st.analysis_rx = None;
    drop(st);

    log::info!("session reset");
    crate::routes::redirect("/")
}
