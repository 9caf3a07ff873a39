//! Insertion-ordered, value-deduplicated option index.

use crate::option::ComboOption;
use std::collections::HashMap;

/// The full set of known options, independent of what is currently shown.
///
/// Rebuilt wholesale whenever the external catalog-changed signal fires;
/// there is deliberately no incremental patch API, so the index and the
/// ordered list cannot drift apart.
#[derive(Clone, Debug, Default)]
pub struct OptionCatalog {
    options: Vec<ComboOption>,
    by_value: HashMap<String, usize>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire catalog with `options`.
    ///
    /// Duplicate values collapse last-write-wins: the later option's fields
    /// replace the earlier entry in place, keeping the first occurrence's
    /// position so rebuilds are order-stable.
    pub fn rebuild(&mut self, options: impl IntoIterator<Item = ComboOption>) {
        self.options.clear();
        self.by_value.clear();
        for opt in options {
            match self.by_value.get(&opt.value) {
                Some(&idx) => {
                    self.options[idx] = opt;
                }
                None => {
                    self.by_value.insert(opt.value.clone(), self.options.len());
                    self.options.push(opt);
                }
            }
        }
        log::trace!(target: "combo.catalog", "rebuilt catalog, {} options", self.options.len());
    }

    /// Point lookup by value.
    pub fn get(&self, value: &str) -> Option<&ComboOption> {
        self.by_value.get(value).map(|&idx| &self.options[idx])
    }

    pub fn contains(&self, value: &str) -> bool {
        self.by_value.contains_key(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComboOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(value: &str, text: &str) -> ComboOption {
        ComboOption::new(value, text)
    }

    #[test]
    fn rebuild_preserves_insertion_order() {
        let mut cat = OptionCatalog::new();
        cat.rebuild([opt("b", "Banana"), opt("a", "Apple"), opt("c", "Cherry")]);

        let values: Vec<_> = cat.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_values_collapse_last_write_wins() {
        let mut cat = OptionCatalog::new();
        cat.rebuild([opt("a", "Apple"), opt("b", "Banana"), opt("a", "Apricot")]);

        assert_eq!(cat.len(), 2);
        // Later fields win, first occurrence keeps its position.
        assert_eq!(cat.get("a").unwrap().text, "Apricot");
        let values: Vec<_> = cat.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn rebuild_discards_previous_contents() {
        let mut cat = OptionCatalog::new();
        cat.rebuild([opt("a", "Apple")]);
        cat.rebuild([opt("b", "Banana")]);

        assert!(!cat.contains("a"));
        assert!(cat.contains("b"));
        assert_eq!(cat.len(), 1);
    }
}
