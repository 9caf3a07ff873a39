//! # catalog
//!
//! The full set of known selectable options and the pure match predicates
//! that filter it.
//!
//! - [`ComboOption`]: one selectable entry, identified by its `value`.
//! - [`OptionCatalog`]: insertion-ordered, value-deduplicated index with
//!   O(1) point lookup. Always rebuilt wholesale, never patched.
//! - [`Matcher`]/[`MatchMode`]: stateless inclusion predicates
//!   (`contains`, `startswith`, caller-supplied function) plus the
//!   equality fold used for exact-match resolution on commit.
//!
//! Nothing in this crate knows about suggestion sessions, selection, or
//! timing; it is a pure data layer.

mod index;
mod matcher;
mod option;

pub use index::OptionCatalog;
pub use matcher::{MatchMode, Matcher, equals_fold};
pub use option::ComboOption;
