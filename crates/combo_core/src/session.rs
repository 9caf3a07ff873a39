//! The transient, per-query-cycle suggestion list.
//!
//! One session holds the filtered/paginated items currently shown, the
//! loading flag, and the "no results" placeholder state. The loading
//! affordance and the placeholder are flags rather than list entries, so
//! they can never be counted toward the pagination cursor and appended
//! items naturally land before the affordance.

use catalog::{ComboOption, Matcher, OptionCatalog};
use core_types::ScrollInfo;

/// Scroll distance from the bottom (px) that triggers a request for more
/// suggestions.
pub const SCROLL_BOTTOM_THRESHOLD_PX: f32 = 50.0;

/// Debounce applied to scroll-position checks.
pub const SCROLL_DEBOUNCE_MS: u64 = 100;

/// Default typing debounce.
pub const DEFAULT_QUERY_DELAY_MS: u64 = 200;

#[derive(Clone, Debug, Default)]
pub struct SuggestionSession {
    items: Vec<ComboOption>,
    loading: bool,
    no_results: bool,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ComboOption] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count of items already shown; passed to the host as the cursor when
    /// requesting the next page. Placeholder and affordance never count.
    pub fn start_cursor(&self) -> usize {
        self.items.len()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Toggle the loading affordance. Turning it off without appending
    /// items simply removes the affordance.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.no_results = false;
        }
    }

    /// Whether the host should render the single disabled "no results"
    /// placeholder instead of an empty list.
    pub fn no_results(&self) -> bool {
        self.no_results
    }

    /// Filter `catalog` through `matcher` for `text`, replacing the items
    /// atomically. A self-filtered query supersedes any outstanding fetch,
    /// so the loading affordance is dropped.
    ///
    /// When the catalog yields nothing, falls back to scanning the
    /// already-rendered items: externally appended entries may be visible
    /// before the catalog reflects them, and the list must never silently
    /// show zero suggestions while matching items are on screen.
    pub fn query(
        &mut self,
        catalog: &OptionCatalog,
        text: &str,
        matcher: &Matcher,
        rendered: &[ComboOption],
    ) {
        let mut matched: Vec<ComboOption> = catalog
            .iter()
            .filter(|opt| matcher.matches(opt, text))
            .cloned()
            .collect();

        if matched.is_empty() {
            matched = rendered
                .iter()
                .filter(|opt| matcher.matches(opt, text))
                .cloned()
                .collect();
            if !matched.is_empty() {
                log::debug!(
                    target: "combo.session",
                    "catalog empty for query, using {} rendered items",
                    matched.len()
                );
            }
        }

        self.items = matched;
        self.loading = false;
        self.no_results = false;
        log::trace!(target: "combo.session", "query {:?} -> {} items", text, self.items.len());
    }

    /// Append externally fetched suggestions.
    ///
    /// Entries with neither a value nor any content are malformed: they are
    /// logged and skipped individually, never aborting the batch. Clears
    /// the loading affordance; if the list ends up empty in total, the
    /// "no results" placeholder is raised.
    pub fn append(&mut self, items: Vec<ComboOption>, clear_existing: bool) {
        if clear_existing {
            self.items.clear();
        }
        for item in items {
            if item.value.is_empty() && item.content.is_empty() && item.text.is_empty() {
                log::warn!(target: "combo.session", "skipping malformed suggestion entry");
                continue;
            }
            self.items.push(item);
        }
        self.loading = false;
        self.no_results = self.items.is_empty();
    }

    /// Drop all items and transient flags.
    pub fn clear(&mut self) {
        self.items.clear();
        self.loading = false;
        self.no_results = false;
    }

    /// Whether `scroll` is close enough to the bottom to ask for more.
    ///
    /// Never true while the loading affordance is up: an outstanding
    /// request must complete before the next page is requested.
    pub fn wants_more(&self, scroll: ScrollInfo) -> bool {
        !self.loading
            && !self.items.is_empty()
            && scroll.distance_to_bottom() <= SCROLL_BOTTOM_THRESHOLD_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MatchMode;

    fn catalog(entries: &[(&str, &str)]) -> OptionCatalog {
        let mut cat = OptionCatalog::new();
        cat.rebuild(entries.iter().map(|(v, t)| ComboOption::new(*v, *t)));
        cat
    }

    #[test]
    fn query_replaces_items_atomically() {
        let cat = catalog(&[("a", "Apple"), ("b", "Banana"), ("k", "Kiwi")]);
        let mut session = SuggestionSession::new();
        let matcher = Matcher::default();

        session.query(&cat, "an", &matcher, &[]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.items()[0].value, "b");

        session.query(&cat, "", &matcher, &[]);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn zero_catalog_matches_fall_back_to_rendered_items() {
        let cat = catalog(&[("a", "Apple")]);
        let rendered = vec![ComboOption::new("x", "Xigua")];
        let mut session = SuggestionSession::new();

        session.query(&cat, "xig", &Matcher::default(), &rendered);
        assert_eq!(session.len(), 1);
        assert_eq!(session.items()[0].value, "x");
    }

    #[test]
    fn fallback_still_applies_the_matcher() {
        let cat = catalog(&[("a", "Apple")]);
        let rendered = vec![ComboOption::new("x", "Xigua")];
        let mut session = SuggestionSession::new();

        session.query(&cat, "zzz", &Matcher::Mode(MatchMode::Contains), &rendered);
        assert!(session.is_empty());
    }

    #[test]
    fn query_clears_a_stale_loading_flag() {
        let cat = catalog(&[("a", "Apple")]);
        let mut session = SuggestionSession::new();
        session.set_loading(true);

        session.query(&cat, "ap", &Matcher::default(), &[]);
        assert!(!session.loading());
    }

    #[test]
    fn append_skips_malformed_entries_without_aborting() {
        let mut session = SuggestionSession::new();
        session.append(
            vec![
                ComboOption::new("a", "Apple"),
                ComboOption::default(),
                ComboOption::new("b", "Banana"),
            ],
            false,
        );
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn append_clears_loading_and_sets_cursor() {
        let mut session = SuggestionSession::new();
        session.set_loading(true);
        session.append(
            vec![
                ComboOption::new("1", "One"),
                ComboOption::new("2", "Two"),
                ComboOption::new("3", "Three"),
            ],
            false,
        );
        assert!(!session.loading());
        assert_eq!(session.start_cursor(), 3);
    }

    #[test]
    fn empty_fetch_raises_no_results_placeholder() {
        let mut session = SuggestionSession::new();
        session.set_loading(true);
        session.append(Vec::new(), true);
        assert!(session.no_results());
        // The placeholder is not an item and never feeds the cursor.
        assert_eq!(session.start_cursor(), 0);
    }

    #[test]
    fn wants_more_respects_threshold_and_loading() {
        let mut session = SuggestionSession::new();
        session.append(vec![ComboOption::new("a", "Apple")], false);

        let near = ScrollInfo {
            offset: 460.0,
            viewport: 100.0,
            content: 600.0,
        };
        let far = ScrollInfo {
            offset: 0.0,
            viewport: 100.0,
            content: 600.0,
        };
        assert!(session.wants_more(near));
        assert!(!session.wants_more(far));

        session.set_loading(true);
        assert!(!session.wants_more(near));
    }
}
