use std::io::Write;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tiny_http::Request;

use petal_counter::Session;

use crate::state::{self, AnalysisEvent, SharedState};
use crate::util::sse::EventStream;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// `GET /analysis/events`: Server-Sent Events handler.
///
/// Consumes `request` to get at the raw connection, then:
/// 1. waits on the analysis channel, pinging every 500 ms;
/// 2. on an event writes `result` (JSON `AnalysisResult`) or `failed`;
/// 3. if the session stops analyzing without an event (reset) or the
///    channel is gone, reports whatever the session now holds.
pub fn handle(request: Request, state: SharedState) {
    let mut stream = EventStream::start(request.into_writer());
    if stream.is_open() {
        stream_analysis(&mut stream, &state);
    }
}

fn stream_analysis<W: Write>(stream: &mut EventStream<W>, state: &SharedState) {
    let rx_arc = {
        let st = state::lock(state);
        if st.session.is_analyzing() { st.analysis_rx.clone() } else { None }
    };
    let rx_arc = match rx_arc {
        Some(r) => r,
        None => return send_settled(stream, state),
    };

    loop {
        let received = {
            let rx = rx_arc.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rx.recv_timeout(POLL_INTERVAL)
        };

        match received {
            Ok(event) => return send_event(stream, &event),
            Err(RecvTimeoutError::Timeout) => {
                if !state::lock(state).session.is_analyzing() {
                    return send_settled(stream, state);
                }
                if !stream.ping() {
                    log::debug!("analysis listener disconnected");
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return send_settled(stream, state),
        }
    }
}

fn send_event<W: Write>(stream: &mut EventStream<W>, event: &AnalysisEvent) {
    match event {
        AnalysisEvent::Finished(result) => stream.send("result", result),
        AnalysisEvent::Failed(message) => stream.send("failed", &serde_json::json!({ "message": message })),
    };
}

/// What the session shows once no analysis is pending; `None` when it
/// holds neither a result nor an error.
fn settled_event(session: &Session) -> Option<AnalysisEvent> {
    match (session.result(), session.error()) {
        (Some(result), _) => Some(AnalysisEvent::Finished(result.clone())),
        (None, Some(message)) => Some(AnalysisEvent::Failed(message.to_owned())),
        (None, None) => None,
    }
}

fn send_settled<W: Write>(stream: &mut EventStream<W>, state: &SharedState) {
    let event = settled_event(&state::lock(state).session);
    match event {
        Some(event) => send_event(stream, &event),
        None => {
            stream.send("idle", &serde_json::json!({}));
        }
    }
}
