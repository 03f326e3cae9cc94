use std::io::Write;

use serde::Serialize;

/// Raw HTTP head for an event stream written straight to the connection.
pub const SSE_RESPONSE_HEAD: &str = "HTTP/1.1 200 OK\r\n\
                                     Content-Type: text/event-stream\r\n\
                                     Cache-Control: no-cache\r\n\
                                     Connection: keep-alive\r\n\
                                     X-Accel-Buffering: no\r\n\
                                     \r\n";

/// Event stream over a raw connection.  Every write is flushed; once a write
/// fails the stream is marked closed and later sends are no-ops.
pub struct EventStream<W: Write> {
    writer: W,
    open: bool,
}

impl<W: Write> EventStream<W> {
    /// Sends the response head; the stream starts closed if that fails.
    pub fn start(writer: W) -> Self {
        let mut stream = EventStream { writer, open: true };
        stream.write_raw(SSE_RESPONSE_HEAD);
        stream
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// `event: <name>` with the JSON form of `payload` as data.
    pub fn send<T: Serialize>(&mut self, name: &str, payload: &T) -> bool {
        let data = serde_json::to_string(payload).unwrap_or_else(|e| {
            log::warn!("could not encode '{}' event: {}", name, e);
            "{}".to_owned()
        });
        self.write_raw(&frame(name, &data))
    }

    /// Comment line; `EventSource` ignores it but the socket stays busy.
    pub fn ping(&mut self) -> bool {
        self.write_raw(": ping\n\n")
    }

    fn write_raw(&mut self, msg: &str) -> bool {
        if self.open {
            self.open = self.writer.write_all(msg.as_bytes()).is_ok() && self.writer.flush().is_ok();
        }
        self.open
    }
}

fn frame(name: &str, data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", name, data)
}
