//! Stateless inclusion predicates over options.

use crate::option::ComboOption;
use memchr::memmem;
use std::fmt;
use std::rc::Rc;

/// Built-in match strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring of the trimmed query in `text`
    /// (falling back to `content` when `text` is empty). The empty query
    /// matches everything.
    #[default]
    Contains,
    /// Case-insensitive prefix test against `content.trim()`.
    StartsWith,
}

/// An inclusion predicate: built-in mode or caller-supplied function.
///
/// A custom function receives the raw option/query pair; no trimming or
/// case folding is applied on its behalf.
#[derive(Clone)]
pub enum Matcher {
    Mode(MatchMode),
    Custom(Rc<dyn Fn(&ComboOption, &str) -> bool>),
}

impl Default for Matcher {
    fn default() -> Self {
        Matcher::Mode(MatchMode::Contains)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Mode(mode) => write!(f, "Matcher::Mode({mode:?})"),
            Matcher::Custom(_) => write!(f, "Matcher::Custom(..)"),
        }
    }
}

impl Matcher {
    pub fn custom(f: impl Fn(&ComboOption, &str) -> bool + 'static) -> Self {
        Matcher::Custom(Rc::new(f))
    }

    /// Decide inclusion of `option` for `query`.
    pub fn matches(&self, option: &ComboOption, query: &str) -> bool {
        match self {
            Matcher::Custom(f) => f(option, query),
            Matcher::Mode(MatchMode::Contains) => {
                let needle = query.trim().to_lowercase();
                if needle.is_empty() {
                    return true;
                }
                let haystack = if option.text.is_empty() {
                    &option.content
                } else {
                    &option.text
                };
                let haystack = haystack.to_lowercase();
                memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
            }
            Matcher::Mode(MatchMode::StartsWith) => {
                let needle = query.trim().to_lowercase();
                option.content.trim().to_lowercase().starts_with(&needle)
            }
        }
    }
}

/// Case-insensitive equality of the committed string against the option's
/// trimmed `content`. Used only for exact-match resolution on commit,
/// never for filtering; `text` deliberately does not participate.
pub fn equals_fold(option: &ComboOption, committed: &str) -> bool {
    option.content.trim().to_lowercase() == committed.trim().to_lowercase()
}
