use crate::debounce::Debouncer;
use crate::highlight::TextHighlightSearch;
use crate::models::SearchOptions;
use crate::parser::NodeRef;
use crate::search_box::SearchBox;
use std::time::Instant;

/// The search as a page runs it: an installed [`SearchBox`] feeding typed
/// queries through a [`Debouncer`] into a [`TextHighlightSearch`].
///
/// Every input restarts the quiet period, so a burst of keystrokes ends in a
/// single scan for the last query.  Scans themselves are synchronous.
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use vault_highlight::parser::parse_html;
/// use vault_highlight::{LiveSearch, SearchOptions};
///
/// let doc = parse_html("<p>The quick brown fox</p>");
/// let mut live = LiveSearch::install(&doc, SearchOptions::default());
/// let t0 = Instant::now();
/// live.on_input("qu", t0);
/// live.on_input("quick", t0 + Duration::from_millis(80));
/// assert!(!live.poll(t0 + Duration::from_millis(300)));
/// assert!(live.poll(t0 + Duration::from_millis(380)));
/// assert_eq!(live.search().highlight_count(), 1);
/// assert_eq!(live.scans_performed(), 1);
/// ```
pub struct LiveSearch {
    search: TextHighlightSearch,
    search_box: SearchBox,
    debouncer: Debouncer<String>,
    scans: u64,
}

impl LiveSearch {
    /// Install the search box into `document` and prepare a search over it.
    pub fn install(document: &NodeRef, options: SearchOptions) -> LiveSearch {
        let search_box = SearchBox::install(document, &options);
        let debouncer = Debouncer::new(options.debounce());
        LiveSearch {
            search: TextHighlightSearch::new(document.clone(), options),
            search_box,
            debouncer,
            scans: 0,
        }
    }

    pub fn search(&self) -> &TextHighlightSearch {
        &self.search
    }

    pub fn search_box(&self) -> &SearchBox {
        &self.search_box
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.debouncer.due_at()
    }

    pub fn scans_performed(&self) -> u64 {
        self.scans
    }

    /// Record a change of the input's value and (re)schedule the scan,
    /// cancelling any scan still waiting.  Returns the token a timer
    /// callback should pass to [`LiveSearch::fire`].
    pub fn on_input(&mut self, query: &str, now: Instant) -> u64 {
        self.search_box.set_value(query);
        self.debouncer.schedule(query.to_string(), now)
    }

    /// Run the pending scan if its quiet period has elapsed at `now`.
    /// Returns whether a scan ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let query = self.debouncer.poll(now);
        self.run(query)
    }

    /// Run the pending scan if `token` belongs to the latest input.
    pub fn fire(&mut self, token: u64) -> bool {
        let query = self.debouncer.fire(token);
        self.run(query)
    }

    /// Run any pending scan right away.
    pub fn flush(&mut self) -> bool {
        let query = self.debouncer.flush();
        self.run(query)
    }

    /// Cancel any pending scan, clear the highlights and take the control
    /// out of the page.
    pub fn uninstall(mut self) {
        self.debouncer.cancel();
        self.search.clear_highlights();
        self.search_box.remove();
    }

    fn run(&mut self, query: Option<String>) -> bool {
        match query {
            Some(query) => {
                self.search.search(&query);
                self.scans += 1;
                true
            }
            None => false,
        }
    }
}
