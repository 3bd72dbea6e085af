use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

/// Observer interface for performance-span events.  Implement this trait
/// and wrap it in a [`Listener`] to receive timing data from a search pass.
///
/// All methods are called synchronously from the search code; keep
/// them lightweight.
pub trait PerfListener {
    /// Return whether this listener cares about the given span.  If `false`,
    /// none of the other callbacks will fire for that span.
    fn is_interested_in_span(&self, span_id: u64) -> bool;
    /// Called when a span begins.
    fn on_span_start(&self, span_id: u64, start_time: Instant);
    /// Called at each checkpoint within a span, with the wall-clock duration
    /// since the previous checkpoint (or span start).
    fn on_check_point(
        &self,
        span_id: u64,
        point_time: Instant,
        duration_since_last_checkpoint: Duration,
        label: &str,
    );
    /// Called when a free-text annotation is attached to a span.
    fn on_annotate(&self, span_id: u64, annotation: &str);
    /// Called when a span ends, with its total duration.
    fn on_span_end(&self, span_id: u64, span_duration: Duration);
}

/// A clonable, reference-counted wrapper around a [`PerfListener`].
#[derive(Clone)]
pub struct Listener {
    inner_impl: Rc<dyn PerfListener>,
}

impl Listener {
    pub fn new(listener: Rc<dyn PerfListener>) -> Listener {
        Listener {
            inner_impl: listener,
        }
    }
}

impl Deref for Listener {
    type Target = dyn PerfListener;
    fn deref(&self) -> &Self::Target {
        &*self.inner_impl
    }
}

struct PerfCheckPoint {
    label: String,
    time: Instant,
}

struct PerfEvent {
    span_id: u64,
    start_time: Instant,
    last_point_time: Option<Instant>,
    listeners: Vec<Listener>,
}

impl PerfEvent {
    fn point(&mut self, point: PerfCheckPoint) {
        let since = point
            .time
            .duration_since(self.last_point_time.unwrap_or(self.start_time));
        self.listeners.iter().for_each(|l| {
            l.on_check_point(self.span_id, point.time, since, point.label.as_str())
        });
        self.last_point_time = Some(point.time);
    }

    fn annotate(&self, annotation: &str) {
        self.listeners
            .iter()
            .for_each(|l| l.on_annotate(self.span_id, annotation));
    }
}

/// Tracks in-flight performance spans and fans events out to registered
/// [`Listener`]s.
///
/// **Not `Send` or `Sync`**: the internal event map uses `RefCell`.  Each
/// [`crate::TextHighlightSearch`] owns its own `PerfLogger`.
pub struct PerfLogger {
    events: RefCell<HashMap<u64, PerfEvent>>,
    listeners: Vec<Listener>,
}

impl PerfLogger {
    /// Create a new logger with the given set of listeners.  Pass an empty
    /// `Vec` to disable all perf logging.
    pub fn new(listeners: Vec<Listener>) -> PerfLogger {
        PerfLogger {
            events: RefCell::new(HashMap::new()),
            listeners,
        }
    }

    /// Begin a span.  Only listeners interested in `span_id` are notified
    /// and remembered for the rest of the span.
    pub fn start(&self, span_id: u64) {
        let event_listeners = self
            .listeners
            .iter()
            .filter(|l| l.is_interested_in_span(span_id))
            .cloned()
            .collect::<Vec<_>>();
        if event_listeners.is_empty() {
            return;
        }
        let start_time = Instant::now();
        event_listeners
            .iter()
            .for_each(|l| l.on_span_start(span_id, start_time));
        self.events.borrow_mut().insert(
            span_id,
            PerfEvent {
                span_id,
                start_time,
                last_point_time: None,
                listeners: event_listeners,
            },
        );
    }

    pub fn check_point_str(&self, span_id: u64, label: &str) {
        self.check_point(span_id, String::from(label));
    }

    pub fn check_point(&self, span_id: u64, label: String) {
        if let Some(event) = self.events.borrow_mut().get_mut(&span_id) {
            event.point(PerfCheckPoint {
                label,
                time: Instant::now(),
            });
        }
    }

    pub fn annotate_str(&self, span_id: u64, annotation: &str) {
        if let Some(event) = self.events.borrow().get(&span_id) {
            event.annotate(annotation);
        }
    }

    pub fn annotate(&self, span_id: u64, annotation: String) {
        self.annotate_str(span_id, annotation.as_str());
    }

    /// End the span, notify listeners with the total duration, and forget it.
    pub fn end(&self, span_id: u64) {
        if let Some(event) = self.events.borrow_mut().remove(&span_id) {
            let duration = Instant::now().duration_since(event.start_time);
            event
                .listeners
                .iter()
                .for_each(|l| l.on_span_end(span_id, duration));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logging::logging_defs::*;

    /// Records every callback as a short string so tests can assert on order.
    #[derive(Default)]
    pub(crate) struct RecordingListener {
        pub(crate) events: RefCell<Vec<String>>,
    }

    impl PerfListener for RecordingListener {
        fn is_interested_in_span(&self, span_id: u64) -> bool {
            span_id != MERGE_TEXT_NODES
        }

        fn on_span_start(&self, span_id: u64, _start_time: Instant) {
            self.events
                .borrow_mut()
                .push(format!("start:{}", name(span_id)));
        }

        fn on_check_point(&self, span_id: u64, _: Instant, _: Duration, label: &str) {
            self.events
                .borrow_mut()
                .push(format!("point:{}:{}", name(span_id), label));
        }

        fn on_annotate(&self, span_id: u64, annotation: &str) {
            self.events
                .borrow_mut()
                .push(format!("note:{}:{}", name(span_id), annotation));
        }

        fn on_span_end(&self, span_id: u64, _span_duration: Duration) {
            self.events
                .borrow_mut()
                .push(format!("end:{}", name(span_id)));
        }
    }

    #[test]
    fn uninterested_spans_are_not_recorded() {
        let recorder = Rc::new(RecordingListener::default());
        let logger = PerfLogger::new(vec![Listener::new(recorder.clone())]);

        logger.start(MERGE_TEXT_NODES);
        logger.check_point_str(MERGE_TEXT_NODES, "ignored");
        logger.end(MERGE_TEXT_NODES);

        logger.start(SEARCH);
        logger.check_point_str(SEARCH, "walked");
        logger.annotate_str(SEARCH, "query=fox");
        logger.end(SEARCH);
        logger.end(SEARCH);

        assert_eq!(
            *recorder.events.borrow(),
            vec![
                "start:SEARCH".to_string(),
                "point:SEARCH:walked".to_string(),
                "note:SEARCH:query=fox".to_string(),
                "end:SEARCH".to_string(),
            ]
        );
    }
}
