//! Shared vocabulary types used across the workspace.
//!
//! Kept deliberately tiny and dependency-free so every crate can name these
//! without coupling to the controller or the host layer.

/// Opaque identity of one rendered row (a suggestion item or a tag widget).
///
/// The value has no meaning inside the engine; host layers mint them and map
/// them back to whatever they render.
pub type ItemId = u64;

/// Selection cardinality of the control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
}

/// Where to pin an item when scrolling it into the visible viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Item was above the viewport: scroll it to the top edge.
    Top,
    /// Item was below the viewport: scroll it to the bottom edge.
    Bottom,
}

/// Scroll geometry of the suggestion list, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollInfo {
    /// Current scroll offset from the top of the content.
    pub offset: f32,
    /// Height of the visible viewport.
    pub viewport: f32,
    /// Total height of the scrollable content.
    pub content: f32,
}

impl ScrollInfo {
    /// Remaining distance to the bottom of the content, clamped at zero.
    pub fn distance_to_bottom(&self) -> f32 {
        (self.content - self.viewport - self.offset).max(0.0)
    }
}
