//! Host-facing trait: everything the controller needs from the layer that
//! owns the real widgets.
//!
//! The controller never touches a DOM. Option discovery, rendered-item
//! scanning, selection marks, and scroll geometry all come through this
//! trait, so different hosts (a real DOM bridge, a TUI, the scripted test
//! host) can be swapped in without changing the controller.

use catalog::ComboOption;
use core_types::{Align, ScrollInfo};

/// The controller's view of the embedding layer.
pub trait ItemHost {
    /// All options currently present in the host's markup.
    ///
    /// Called on construction and on every coalesced catalog-changed
    /// notification; the result replaces the catalog wholesale.
    fn options(&self) -> Vec<ComboOption>;

    /// Items currently rendered in the suggestion list.
    ///
    /// Fallback source when a query matches nothing in the catalog: items
    /// appended externally (e.g. asynchronously) may be visible before the
    /// catalog reflects them, and the control must never show an empty list
    /// while matching items are on screen.
    fn rendered_items(&self) -> Vec<ComboOption>;

    /// Values of the items the host currently marks as selected.
    ///
    /// Drives re-derivation of the selection after a catalog change.
    fn selected_values(&self) -> Vec<String>;

    /// Scroll geometry of the open suggestion list.
    fn scroll_state(&self) -> ScrollInfo;

    /// Vertical extent `(top, bottom)` of the rendered item at `index`, in
    /// content pixels. `None` when the item is not rendered.
    fn item_bounds(&self, index: usize) -> Option<(f32, f32)>;

    /// Scroll the item at `index` into the viewport, pinned per `align`.
    fn scroll_item_into_view(&mut self, index: usize, align: Align);

    /// Logical focus moved to the item at `index`; `None` returns logical
    /// focus to the text input itself.
    fn set_active_descendant(&mut self, index: Option<usize>);
}
