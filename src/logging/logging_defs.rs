/// Span IDs for performance-logging events.  Each ID must be unique;
/// simply increment when adding a new span.
pub const SEARCH: u64 = 1;
pub const CLEAR_HIGHLIGHTS: u64 = 2;
pub const COLLECT_MATCHES: u64 = 3;
pub const APPLY_HIGHLIGHTS: u64 = 4;
pub const MERGE_TEXT_NODES: u64 = 5;

pub fn name(span_id: u64) -> &'static str {
    match span_id {
        SEARCH => "SEARCH",
        CLEAR_HIGHLIGHTS => "CLEAR_HIGHLIGHTS",
        COLLECT_MATCHES => "COLLECT_MATCHES",
        APPLY_HIGHLIGHTS => "APPLY_HIGHLIGHTS",
        MERGE_TEXT_NODES => "MERGE_TEXT_NODES",
        _ => panic!(
            "Calling logging::logging_defs::name with unknown span_id: {}",
            span_id
        ),
    }
}
