//! Destinations for pixel events.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use serde::Serialize;

use crate::analytics::{EventName, PixelEvent, PixelPayload};

/// Receives pixel events.
///
/// Implementations must not fail loudly: a tracker that is missing or
/// broken drops the event. Nothing is queued or retried.
pub trait AnalyticsSink {
    /// Report one event.
    fn track(&self, event: &PixelEvent);
}

/// Sink used when no tracker is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, event: &PixelEvent) {
        tracing::trace!(event = %event.name, "no tracker loaded, event dropped");
    }
}

/// Records events in memory.
///
/// Clones share the same buffer, so a caller can hand one clone to the
/// service and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<PixelEvent>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events tracked so far.
    pub fn events(&self) -> Vec<PixelEvent> {
        self.events.borrow().clone()
    }

    /// Names of all events tracked so far, in order.
    pub fn names(&self) -> Vec<EventName> {
        self.events.borrow().iter().map(|e| e.name).collect()
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<PixelEvent> {
        self.events.borrow().last().cloned()
    }
}

impl AnalyticsSink for MemorySink {
    fn track(&self, event: &PixelEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// One line written by [`JsonLinesSink`].
#[derive(Serialize)]
struct TrackLine<'a> {
    event: &'a str,
    #[serde(flatten)]
    payload: &'a PixelPayload,
}

/// Writes each event as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JsonLinesSink<W> {
    /// Write events to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_event(&self, event: &PixelEvent) -> std::io::Result<()> {
        let line = TrackLine {
            event: event.name.as_str(),
            payload: &event.payload,
        };
        let mut out = self.out.borrow_mut();
        serde_json::to_writer(&mut *out, &line)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

impl<W: Write> AnalyticsSink for JsonLinesSink<W> {
    fn track(&self, event: &PixelEvent) {
        if let Err(e) = self.write_event(event) {
            tracing::warn!(event = %event.name, error = %e, "failed to write pixel event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Price};

    fn added() -> PixelEvent {
        PixelEvent::item_added(&ProductId::new("P1"), Price::new(5.0), Currency::USD)
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.track(&added());
        assert_eq!(handle.names(), vec![EventName::AddToCart]);
        assert_eq!(handle.last().unwrap().payload.value, 5.0);
    }

    #[test]
    fn test_json_lines_sink() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.track(&added());
        sink.track(&added());

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "AddToCart");
        assert_eq!(first["content_ids"][0], "P1");
        assert!(first.get("num_items").is_none());
    }

    #[test]
    fn test_noop_sink_accepts_events() {
        NoopSink.track(&added());
    }
}
