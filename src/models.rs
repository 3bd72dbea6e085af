use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Knobs that control the search, the highlight marks and the installed
/// search box.
///
/// All fields have sensible defaults via [`Default`]; start there and only
/// override what you need.  Every field is optional when deserialising, so a
/// JSON document only needs to name the values it changes.
///
/// # Examples
///
/// ```rust
/// use vault_highlight::SearchOptions;
///
/// let mut opts = SearchOptions::default();
/// opts.min_query_chars = 3;      // ignore two-letter queries too
/// opts.inject_style = false;     // the page ships its own CSS
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Enable `eprintln!` tracing and console perf spans (debug builds only).
    pub debug: bool,
    /// Queries shorter than this many characters clear the highlights and
    /// skip the scan.
    pub min_query_chars: usize,
    /// Quiet period, in milliseconds, between the last input and the scan.
    pub debounce_ms: u64,
    /// Tag name of the element wrapped around every match.
    pub highlight_tag: String,
    /// Class put on every highlight mark.
    pub highlight_class: String,
    /// Class of the search input.  Text under an element carrying it is
    /// never highlighted.
    pub input_class: String,
    /// Class of the element wrapping the search input; excluded the same way.
    pub container_class: String,
    /// Placeholder text of the installed input.
    pub placeholder: String,
    /// Elements whose text content is never scanned.
    pub skip_tags: BTreeSet<String>,
    /// Whether [`crate::SearchBox`] injects the highlight `<style>` element.
    pub inject_style: bool,
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            debug: false,
            min_query_chars: 2,
            debounce_ms: 300,
            highlight_tag: "mark".to_string(),
            highlight_class: "search-highlight".to_string(),
            input_class: "search-input".to_string(),
            container_class: "search-container".to_string(),
            placeholder: "Search...".to_string(),
            skip_tags: ["script", "style", "noscript", "template", "textarea"]
                .into_iter()
                .map(String::from)
                .collect(),
            inject_style: true,
        }
    }
}

impl SearchOptions {
    /// Parse options from a single JSON object, falling back to the default
    /// for every absent key, and validate the result.
    pub fn from_json_str(json: &str) -> Result<SearchOptions, ConfigError> {
        let options: SearchOptions = serde_json::from_str(json).map_err(|source| {
            ConfigError::Parse {
                path: None,
                source,
            }
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.min_query_chars == 0 {
            return Err(ConfigError::Invalid(
                "min_query_chars must be at least 1".to_string(),
            ));
        }
        if !is_valid_tag_name(&self.highlight_tag) {
            return Err(ConfigError::Invalid(format!(
                "highlight_tag {:?} is not a valid element name",
                self.highlight_tag
            )));
        }
        if !can_wrap_text(&self.highlight_tag) {
            return Err(ConfigError::Invalid(format!(
                "highlight_tag {:?} cannot hold the matched text",
                self.highlight_tag
            )));
        }
        if let Some(tag) = self.skip_tags.iter().find(|t| !is_valid_tag_name(t)) {
            return Err(ConfigError::Invalid(format!(
                "skip_tags entry {:?} is not a valid element name",
                tag
            )));
        }
        for (field, value) in [
            ("highlight_class", &self.highlight_class),
            ("input_class", &self.input_class),
            ("container_class", &self.container_class),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a single non-empty class name, got {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Void elements serialise without children, and raw-text elements keep
/// their content as literal source, so neither can display a match.
const NON_WRAPPING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr", "iframe", "noembed", "noframes", "noscript",
    "plaintext", "script", "style", "template", "textarea", "title", "xmp",
];

fn can_wrap_text(tag: &str) -> bool {
    !NON_WRAPPING_TAGS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(tag))
}

fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}
