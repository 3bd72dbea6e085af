use crate::highlight_set::HighlightSet;
use crate::logging::create_perf_logger;
use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::matcher::{query_len, QueryPattern, Segment};
use crate::models::SearchOptions;
use crate::node_utils::new_html_element_with_attrs;
use crate::parser::{NodeExt, NodeRef};
use crate::utils::*;
use std::rc::Rc;

/// A text node that matched, with the fragments that will replace it.
struct PlannedReplacement {
    node: NodeRef,
    fragments: Vec<(String, bool)>,
}

/// Highlights every case-insensitive, literal occurrence of a query in the
/// text of a document, and removes those highlights again.
///
/// The component owns the set of marks it inserted ([`HighlightSet`]); a
/// search always starts by clearing the previous one, so marks never
/// accumulate across queries.  The document is mutated in place and must
/// not be shared with another `TextHighlightSearch`.
///
/// # Examples
///
/// ```rust
/// use vault_highlight::parser::parse_html;
/// use vault_highlight::{SearchOptions, TextHighlightSearch};
///
/// let doc = parse_html("<p>Hello World, hello world</p>");
/// let mut search = TextHighlightSearch::new(doc.clone(), SearchOptions::default());
/// search.search("WORLD");
/// assert_eq!(search.highlight_count(), 2);
/// assert_eq!(doc.text_contents(), "Hello World, hello world");
/// ```
pub struct TextHighlightSearch {
    root: NodeRef,
    options: SearchOptions,
    highlights: HighlightSet,
    logger: Rc<PerfLogger>,
}

impl TextHighlightSearch {
    /// Create a search over `document`.  Only text under `<body>` is scanned
    /// when the document has one.
    pub fn new(document: NodeRef, options: SearchOptions) -> TextHighlightSearch {
        let logger = Rc::new(create_perf_logger(options.debug));
        TextHighlightSearch {
            root: search_root(&document),
            options,
            highlights: HighlightSet::default(),
            logger,
        }
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// The marks currently in the document, in document order.
    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn highlight_count(&self) -> usize {
        self.highlights.len()
    }

    /// Clear the previous highlights, then wrap every occurrence of `query`
    /// in a highlight mark.  Queries shorter than
    /// [`SearchOptions::min_query_chars`] only clear.
    pub fn search(&mut self, query: &str) {
        let logger = Rc::clone(&self.logger);
        start_span!(logger, SEARCH);
        self.clear_highlights();

        if query_len(query) < self.options.min_query_chars.max(1) {
            d!({
                if self.options.debug {
                    eprintln!("Query {:?} is too short, skipping scan", query);
                }
            });
            end_span!(logger, SEARCH);
            return;
        }
        let pattern = match QueryPattern::new(query) {
            Some(pattern) => pattern,
            None => {
                end_span!(logger, SEARCH);
                return;
            }
        };

        let plan = self.collect_matches(&pattern);
        add_point_to_span_str!(logger, SEARCH, "collected_matches");
        self.apply(plan);
        annotate_span!(
            logger,
            SEARCH,
            format!("query={:?} marks={}", query, self.highlights.len())
        );
        end_span!(logger, SEARCH);
    }

    /// Replace every mark with its plain text and merge the text nodes back
    /// together, so the tree returns to its pre-search shape.
    pub fn clear_highlights(&mut self) {
        let logger = &self.logger;
        start_span!(logger, CLEAR_HIGHLIGHTS);
        let parents = self.highlights.unwrap_all();
        for parent in &parents {
            merge_adjacent_text_nodes_logged(parent, logger);
        }
        annotate_span!(
            logger,
            CLEAR_HIGHLIGHTS,
            format!("parents={}", parents.len())
        );
        end_span!(logger, CLEAR_HIGHLIGHTS);
    }

    /// Walk the text nodes and plan their replacements without touching the
    /// tree.
    fn collect_matches(&self, pattern: &QueryPattern) -> Vec<PlannedReplacement> {
        let logger = &self.logger;
        start_span!(logger, COLLECT_MATCHES);
        let mut plan = vec![];
        for node in text_nodes_in_order(&self.root) {
            if is_excluded_text_node(&node, &self.options) {
                continue;
            }
            let Some(text) = node.text_value() else {
                continue;
            };
            if !pattern.is_match(&text) {
                continue;
            }
            let fragments = pattern
                .split(&text)
                .into_iter()
                .map(|segment| match segment {
                    Segment::Plain(s) => (s.to_string(), false),
                    Segment::Match(s) => (s.to_string(), true),
                })
                .collect();
            plan.push(PlannedReplacement { node, fragments });
        }
        end_span!(logger, COLLECT_MATCHES);
        plan
    }

    fn apply(&mut self, plan: Vec<PlannedReplacement>) {
        let logger = &self.logger;
        start_span!(logger, APPLY_HIGHLIGHTS);
        for PlannedReplacement { node, fragments } in plan {
            if node.parent().is_none() {
                continue;
            }
            for (text, is_match) in fragments {
                if is_match {
                    let mark = new_html_element_with_attrs(
                        &self.options.highlight_tag,
                        &[("class", self.options.highlight_class.as_str())],
                    );
                    mark.append(NodeRef::new_text(text));
                    node.insert_before(mark.clone());
                    self.highlights.insert(mark);
                } else {
                    node.insert_before(NodeRef::new_text(text));
                }
            }
            node.detach();
        }
        end_span!(logger, APPLY_HIGHLIGHTS);
    }
}
