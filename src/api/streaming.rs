use super::parameters::StreamCallback;
use crate::error::{AiHelperError, Result};
use futures::{Stream, StreamExt};
use serde_json::Value;
use tokio::time::{timeout, Duration};

/// Read a server-sent-event body, handing every event's `data:` payload to
/// `callback` in arrival order. Returns all delivered chunks once the stream
/// ends or `[DONE]` is seen.
pub async fn process_streaming_response<S, B>(
    mut stream: S,
    timeout_secs: u64,
    callback: StreamCallback,
) -> Result<Vec<Value>>
where
    S: Stream<Item = std::result::Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    let chunk_timeout = Duration::from_secs(timeout_secs);
    let mut pending: Vec<u8> = Vec::new();
    let mut events = EventBuffer::new(callback);

    loop {
        match timeout(chunk_timeout, stream.next()).await {
            Ok(Some(chunk)) => {
                let chunk = chunk?;
                pending.extend_from_slice(chunk.as_ref());
            }
            Ok(None) => break,
            Err(_) => {
                tracing::warn!(
                    "no stream data received for {} seconds, giving up",
                    timeout_secs
                );
                return Err(AiHelperError::Timeout);
            }
        }

        // Only complete lines are processed; a multi-byte character may be
        // split across network chunks.
        while let Some(line_end) = pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = pending.drain(..=line_end).collect();
            let line = String::from_utf8_lossy(&line);
            if events.feed_line(line.trim_end_matches(['\r', '\n'])) {
                return Ok(events.into_chunks());
            }
        }
    }

    // Stream ended without a trailing newline or blank line
    if !pending.is_empty() {
        let line = String::from_utf8_lossy(&pending).into_owned();
        if events.feed_line(line.trim_end_matches('\r')) {
            return Ok(events.into_chunks());
        }
    }
    events.dispatch();

    Ok(events.into_chunks())
}

/// Collects `data:` lines until the blank line that ends an event.
struct EventBuffer {
    callback: StreamCallback,
    data: Vec<String>,
    chunks: Vec<Value>,
}

impl EventBuffer {
    fn new(callback: StreamCallback) -> Self {
        Self {
            callback,
            data: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Returns true once the terminating `[DONE]` event is seen.
    fn feed_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return false;
        }

        let (field, value) = match line.find(':') {
            Some(colon_pos) => {
                let value = &line[colon_pos + 1..];
                (&line[..colon_pos], value.strip_prefix(' ').unwrap_or(value))
            }
            None => (line, ""),
        };

        match field {
            "data" => self.data.push(value.to_string()),
            "event" | "id" | "retry" => tracing::debug!("SSE {}: {}", field, value),
            _ => tracing::debug!("unknown SSE field: {}", field),
        }

        false
    }

    /// Deliver the buffered event, if any. Returns true for `[DONE]`.
    fn dispatch(&mut self) -> bool {
        if self.data.is_empty() {
            return false;
        }
        let payload = self.data.join("\n");
        self.data.clear();

        if payload.trim() == "[DONE]" {
            return true;
        }
        match serde_json::from_str::<Value>(&payload) {
            Ok(parsed) => {
                (self.callback)(&parsed);
                self.chunks.push(parsed);
            }
            Err(e) => tracing::debug!("skipping unparsable stream chunk: {}", e),
        }

        false
    }

    fn into_chunks(self) -> Vec<Value> {
        self.chunks
    }
}
