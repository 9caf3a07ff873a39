//! # combo_core
//!
//! UI-agnostic combo-box / autocomplete controller.
//!
//! This crate provides the editing and suggestion semantics of a combo
//! control without touching any widget toolkit:
//! - [`ComboController`]: the state machine tying everything together
//! - [`SuggestionSession`]: the transient filtered/paginated item list
//! - [`SelectionModel`]: single/multi selection with tag handles
//! - [`FocusNavigator`]: virtual focus over the suggestion items
//! - [`ItemHost`]: the trait the embedding layer implements
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on:
//! - Any graphics framework
//! - Layout or hit-testing systems
//! - Platform-specific APIs or wall clocks
//!
//! All time-sensitive operations take `now_ms` explicitly; hosts drive the
//! controller by calling [`ComboController::tick`] and
//! [`ComboController::frame`], which makes every debounce and deferred
//! task deterministic under test.

mod controller;
mod events;
mod focus;
mod host;
mod selection;
mod session;

pub use controller::{ComboController, Key, Phase};
pub use events::ComboEvent;
pub use focus::FocusNavigator;
pub use host::ItemHost;
pub use selection::{SelectionModel, TagHandle, display_label, resolve_exact_match};
pub use session::{
    DEFAULT_QUERY_DELAY_MS, SCROLL_BOTTOM_THRESHOLD_PX, SCROLL_DEBOUNCE_MS, SuggestionSession,
};
