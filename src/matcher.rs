use regex::{Regex, RegexBuilder};

/// Compiled-size allowance per query byte.  Case-insensitive literals grow
/// into one character class per letter, so long pasted queries need more
/// than the regex crate's default limit.
const SIZE_LIMIT_PER_QUERY_BYTE: usize = 4 * 1024;
const MIN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A piece of a text node after matching: either text kept as-is or a
/// substring to wrap in a highlight mark.  Both borrow from the scanned text,
/// so a match keeps the casing found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Plain(s) | Segment::Match(s) => s,
        }
    }
}

/// Literal, case-insensitive matcher for one query.
///
/// Regex metacharacters in the query are escaped, so `"."` only ever matches
/// a dot.  Matches are leftmost-first and never overlap.
///
/// ```rust
/// use vault_highlight::{QueryPattern, Segment};
///
/// let pattern = QueryPattern::new("world").unwrap();
/// assert_eq!(
///     pattern.split("Hello World"),
///     vec![Segment::Plain("Hello "), Segment::Match("World")]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryPattern {
    query: String,
    regex: Regex,
}

impl QueryPattern {
    /// Build the matcher, or `None` for an empty query (which would match
    /// between every pair of characters) or one too large to compile.
    pub fn new(query: &str) -> Option<QueryPattern> {
        if query.is_empty() {
            return None;
        }
        let size_limit = query
            .len()
            .saturating_mul(SIZE_LIMIT_PER_QUERY_BYTE)
            .max(MIN_SIZE_LIMIT);
        let regex = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
        {
            Ok(regex) => regex,
            Err(e) => {
                d!({
                    eprintln!(
                        "Query of {} bytes could not be compiled, skipping scan: {}",
                        query.len(),
                        e
                    );
                });
                return None;
            }
        };
        Some(QueryPattern {
            query: query.to_string(),
            regex,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Split `text` into plain and matched segments.  Concatenating the
    /// segments gives back `text`; no segment is empty.
    pub fn split<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = vec![];
        let mut last_end = 0;
        for m in self.regex.find_iter(text) {
            if m.start() > last_end {
                segments.push(Segment::Plain(&text[last_end..m.start()]));
            }
            segments.push(Segment::Match(m.as_str()));
            last_end = m.end();
        }
        if last_end < text.len() {
            segments.push(Segment::Plain(&text[last_end..]));
        }
        segments
    }
}

/// Number of characters in a query, as the minimum-length policy counts them.
pub fn query_len(query: &str) -> usize {
    query.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn empty_query_has_no_pattern() {
        assert!(QueryPattern::new("").is_none());
    }

    #[test]
    fn matching_ignores_case_both_ways() {
        for query in ["world", "WORLD", "wOrLd"] {
            let pattern = QueryPattern::new(query).unwrap();
            assert_eq!(
                pattern.split("Hello World"),
                vec![Segment::Plain("Hello "), Segment::Match("World")]
            );
        }
    }

    #[test]
    fn metacharacters_match_literally() {
        let dot = QueryPattern::new(".").unwrap();
        assert_eq!(dot.count("a.b.c"), 2);
        assert!(!dot.is_match("abc"));

        let group = QueryPattern::new("(a|b)*").unwrap();
        assert!(!group.is_match("aaab"));
        assert_eq!(group.count("x (a|b)* y"), 1);

        for query in ["$^", "[x]", r"\d", "a+?", "{1}"] {
            let pattern = QueryPattern::new(query).unwrap();
            let text = format!("before {} after", query);
            assert_eq!(pattern.count(&text), 1, "query {:?}", query);
        }
    }

    #[test]
    fn splits_around_every_occurrence() {
        let pattern = QueryPattern::new("quick").unwrap();
        let segments = pattern.split("The quick brown fox");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("The "),
                Segment::Match("quick"),
                Segment::Plain(" brown fox"),
            ]
        );

        let segments = pattern.split("Quick, quick!quick");
        assert_eq!(
            segments,
            vec![
                Segment::Match("Quick"),
                Segment::Plain(", "),
                Segment::Match("quick"),
                Segment::Plain("!"),
                Segment::Match("quick"),
            ]
        );
        assert_eq!(joined(&segments), "Quick, quick!quick");
    }

    #[test]
    fn overlapping_occurrences_match_leftmost_first() {
        let pattern = QueryPattern::new("aa").unwrap();
        assert_eq!(
            pattern.split("aaa"),
            vec![Segment::Match("aa"), Segment::Plain("a")]
        );
    }

    #[test]
    fn non_ascii_text_splits_on_char_boundaries() {
        let pattern = QueryPattern::new("ÉTÉ").unwrap();
        let segments = pattern.split("un été chaud");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("un "),
                Segment::Match("été"),
                Segment::Plain(" chaud"),
            ]
        );
    }

    #[test]
    fn query_len_counts_characters_not_bytes() {
        assert_eq!(query_len(""), 0);
        assert_eq!(query_len("é"), 1);
        assert_eq!(query_len("fox"), 3);
        // One scalar value even though it takes two UTF-16 code units.
        assert_eq!(query_len("🦊"), 1);
        assert_eq!(query_len("🦊🦊"), 2);
    }

    #[test]
    fn long_queries_still_compile_and_match() {
        let query = "Kelvin sits still ".repeat(400);
        let pattern = QueryPattern::new(&query).unwrap();
        let text = format!("before {} after", query.to_uppercase());
        assert_eq!(pattern.count(&text), 1);
        assert_eq!(
            pattern.split(&text),
            vec![
                Segment::Plain("before "),
                Segment::Match(&text[7..7 + query.len()]),
                Segment::Plain(" after"),
            ]
        );
    }
}
