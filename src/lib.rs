//! Literal, case-insensitive text search and highlighting over a parsed HTML
//! document, as used by published documentation pages.
//!
//! ## Quick start
//!
//! ```rust
//! use vault_highlight::parser::parse_html;
//! use vault_highlight::{SearchOptions, TextHighlightSearch};
//!
//! let doc = parse_html("<html><body><p>The quick brown fox</p></body></html>");
//! let mut search = TextHighlightSearch::new(doc.clone(), SearchOptions::default());
//!
//! search.search("quick");
//! assert_eq!(search.highlight_count(), 1);
//!
//! search.clear_highlights();
//! assert_eq!(search.highlight_count(), 0);
//! ```
//!
//! ## Module layout
//!
//! * **Top level** – [`TextHighlightSearch`] is the core component.
//!   [`LiveSearch`] wires it to an installed [`SearchBox`] through a
//!   [`Debouncer`], so that a burst of keystrokes results in a single scan.
//! * [`parser`] – thin wrappers around the underlying HTML parser ([`parser::NodeRef`],
//!   [`parser::parse_html`]).
//! * [`SearchOptions`] / [`load_options`] – knobs and their layered JSON loading.
//! * [`QueryPattern`] – the literal matcher used for every text node.

macro_rules! d {
    ($code:block) => {
        if cfg!(debug_assertions) {
            $code
        }
    };
}

#[macro_use]
mod logging;

mod config;
mod debounce;
mod error;
mod highlight;
mod highlight_set;
mod live;
mod matcher;
mod models;
mod node_utils;
mod search_box;
mod utils;

pub use config::{load_options, LOCAL_CONFIG_FILE_NAME, CONFIG_FILE_NAME};
pub use debounce::Debouncer;
pub use error::ConfigError;
pub use highlight::TextHighlightSearch;
pub use highlight_set::HighlightSet;
pub use live::LiveSearch;
pub use matcher::{QueryPattern, Segment};
pub use models::SearchOptions;
pub use node_utils::{new_html_element, NodeExt};
pub use search_box::SearchBox;

/// Convenience re-exports of the DOM helpers the search is built on.
pub mod shared_utils {
    pub use crate::utils::{
        document_text, is_excluded_text_node, merge_adjacent_text_nodes, search_root,
        text_nodes_in_order,
    };
}

/// Thin wrappers around the underlying HTML parser.
///
/// [`NodeRef`] is the reference-counted DOM node type used throughout the crate.
/// [`parse_html`] parses a complete HTML document into a [`NodeRef`] tree.
pub mod parser {
    use kuchikikiki::traits::TendrilSink;
    pub use kuchikikiki::{Attributes, NodeRef};
    pub use crate::node_utils::{new_html_element, NodeExt};

    /// Parse an HTML string into a [`NodeRef`] document tree.
    ///
    /// The parser follows the HTML5 specification; an implicit `<html>`, `<head>`,
    /// and `<body>` are synthesised when missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vault_highlight::parser::parse_html;
    ///
    /// let doc = parse_html("<div><p>hello</p></div>");
    /// assert!(doc.select_first("p").is_ok());
    /// ```
    pub fn parse_html(html: &str) -> NodeRef {
        kuchikikiki::parse_html().one(html)
    }
}
