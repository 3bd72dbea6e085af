pub mod logger;

pub mod logging_defs;
#[macro_use]
pub mod macros;

use logger::{Listener, PerfListener, PerfLogger};
use logging_defs::*;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

/// A [`PerfListener`] that prints every span event to stdout.  It only
/// reports spans when `enabled` is set, which [`create_perf_logger`] ties to
/// [`crate::SearchOptions::debug`].
pub struct PerfConsoleListener {
    pub enabled: bool,
}

impl PerfListener for PerfConsoleListener {
    fn is_interested_in_span(&self, _span_id: u64) -> bool {
        self.enabled
    }

    fn on_span_start(&self, span_id: u64, _start_time: Instant) {
        println!("Start of span: {}", name(span_id));
    }

    fn on_check_point(
        &self,
        span_id: u64,
        _point_time: Instant,
        duration_since_last_checkpoint: Duration,
        point_label: &str,
    ) {
        println!(
            "Span: \"{}\" point: \"{}\": {} seconds",
            name(span_id),
            point_label,
            duration_since_last_checkpoint.as_secs_f64()
        );
    }

    fn on_annotate(&self, span_id: u64, annotation: &str) {
        println!("Span: \"{}\" annotation: \"{}\"", name(span_id), annotation);
    }

    fn on_span_end(&self, span_id: u64, span_duration: Duration) {
        println!(
            "Span ended: \"{}\": {} seconds",
            name(span_id),
            span_duration.as_secs_f64()
        );
    }
}

pub fn create_perf_logger(debug: bool) -> PerfLogger {
    let listeners = vec![Listener::new(Rc::new(PerfConsoleListener { enabled: debug }))];
    PerfLogger::new(listeners)
}
