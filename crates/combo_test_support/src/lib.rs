//! Test doubles and fixtures for the combo controller.
//!
//! [`ScriptedHost`] is a deterministic [`ItemHost`] backed by plain data:
//! tests script its options, selected marks, and scroll geometry and then
//! inspect what the controller pushed back. [`load_catalog_fixture`] reads
//! option catalogs from JSON so larger scenarios live next to the tests
//! instead of inline.

use catalog::ComboOption;
use combo_core::ItemHost;
use core_types::{Align, ScrollInfo};
use serde::Deserialize;
use std::path::Path;

/// Fixed row height the scripted host assumes for item geometry.
pub const ITEM_HEIGHT_PX: f32 = 20.0;

/// Calls the controller makes into the host, recorded in order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    ScrollItemIntoView { index: usize, align: Align },
    SetActiveDescendant(Option<usize>),
}

/// A scriptable, fully in-memory host.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub options: Vec<ComboOption>,
    pub rendered: Vec<ComboOption>,
    pub selected: Vec<String>,
    pub scroll: ScrollInfo,
    pub calls: Vec<HostCall>,
}

impl ScriptedHost {
    pub fn new(options: Vec<ComboOption>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_viewport(mut self, viewport: f32) -> Self {
        self.scroll.viewport = viewport;
        self.scroll.content = self.options.len() as f32 * ITEM_HEIGHT_PX;
        self
    }

    /// Mark `value` as selected in the scripted markup.
    pub fn mark_selected(&mut self, value: &str) {
        if !self.selected.iter().any(|v| v == value) {
            self.selected.push(value.to_string());
        }
    }

    pub fn unmark_selected(&mut self, value: &str) {
        self.selected.retain(|v| v != value);
    }

    /// Last active-descendant index the controller pushed, if any.
    pub fn active_descendant(&self) -> Option<Option<usize>> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::SetActiveDescendant(idx) => Some(*idx),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ItemHost for ScriptedHost {
    fn options(&self) -> Vec<ComboOption> {
        self.options.clone()
    }

    fn rendered_items(&self) -> Vec<ComboOption> {
        self.rendered.clone()
    }

    fn selected_values(&self) -> Vec<String> {
        self.selected.clone()
    }

    fn scroll_state(&self) -> ScrollInfo {
        self.scroll
    }

    fn item_bounds(&self, index: usize) -> Option<(f32, f32)> {
        let top = index as f32 * ITEM_HEIGHT_PX;
        Some((top, top + ITEM_HEIGHT_PX))
    }

    fn scroll_item_into_view(&mut self, index: usize, align: Align) {
        self.calls.push(HostCall::ScrollItemIntoView { index, align });
        // Mimic a real scroll so follow-up geometry queries see the move.
        let (top, bottom) = (
            index as f32 * ITEM_HEIGHT_PX,
            (index + 1) as f32 * ITEM_HEIGHT_PX,
        );
        self.scroll.offset = match align {
            Align::Top => top,
            Align::Bottom => (bottom - self.scroll.viewport).max(0.0),
        };
    }

    fn set_active_descendant(&mut self, index: Option<usize>) {
        self.calls.push(HostCall::SetActiveDescendant(index));
    }
}

#[derive(Debug, Deserialize)]
struct FixtureOption {
    value: String,
    text: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    disabled: bool,
}

/// Load an option catalog from a JSON fixture: an array of objects with
/// `value`, `text`, and optional `content`, `icon`, `disabled` fields.
///
/// Panics on I/O or parse failure; fixtures are part of the test source.
pub fn load_catalog_fixture(path: &Path) -> Vec<ComboOption> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
    let raw: Vec<FixtureOption> = serde_json::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"));
    raw.into_iter()
        .map(|entry| {
            let mut opt = ComboOption::new(entry.value, entry.text);
            if let Some(content) = entry.content {
                opt = opt.with_content(content);
            }
            if let Some(icon) = entry.icon {
                opt = opt.with_icon(icon);
            }
            opt.disabled(entry.disabled)
        })
        .collect()
}

/// Shorthand for building a plain option list inline.
pub fn options(entries: &[(&str, &str)]) -> Vec<ComboOption> {
    entries
        .iter()
        .map(|(value, text)| ComboOption::new(*value, *text))
        .collect()
}
