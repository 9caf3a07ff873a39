//! Authoritative selection state and its tag projection.
//!
//! `values` is the single source of truth for what is selected. In
//! MULTIPLE mode every value also owns one or more [`TagHandle`]s — opaque
//! records the rendering layer projects into visible tag widgets. Handles
//! are minted from an internal counter; there is no back-reference to any
//! widget.
//!
//! Invariants (spec'd and fuzz-tested):
//! - `values` never contains duplicates.
//! - SINGLE mode holds at most one value and no tags.
//! - In MULTIPLE mode, every value has at least one tag handle and every
//!   handle's value is present in `values`.

use catalog::{ComboOption, OptionCatalog, equals_fold};
use core_types::{ItemId, SelectionMode};
use std::collections::HashMap;

/// One visible tag in MULTIPLE mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagHandle {
    pub id: ItemId,
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    mode: SelectionMode,
    values: Vec<String>,
    tags: HashMap<String, Vec<TagHandle>>,
    next_tag_id: ItemId,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch selection cardinality.
    ///
    /// Narrowing to SINGLE keeps only the first value and drops all tags;
    /// widening to MULTIPLE mints a tag for the existing value.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        match mode {
            SelectionMode::Single => {
                let changed = self.values.len() > 1;
                self.values.truncate(1);
                self.tags.clear();
                changed
            }
            SelectionMode::Multiple => {
                for value in self.values.clone() {
                    let handle = self.mint_tag(&value, &value);
                    self.tags.insert(value, vec![handle]);
                }
                false
            }
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// First (or only) selected value.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clone of the current value set, for change detection and reset.
    pub fn snapshot(&self) -> Vec<String> {
        self.values.clone()
    }

    /// Tags in selection order.
    pub fn tags(&self) -> impl Iterator<Item = &TagHandle> {
        self.values
            .iter()
            .filter_map(|v| self.tags.get(v))
            .flatten()
    }

    pub fn tag_count(&self, value: &str) -> usize {
        self.tags.get(value).map_or(0, Vec::len)
    }

    /// Select `value`, minting (or replacing) its tag in MULTIPLE mode.
    ///
    /// Re-adding an existing value leaves `values` untouched but still
    /// replaces that value's tag. Returns whether the value set changed.
    pub fn add_value(&mut self, value: &str, label: &str) -> bool {
        match self.mode {
            SelectionMode::Single => {
                let changed = self.values.first().map(String::as_str) != Some(value);
                self.values.clear();
                self.values.push(value.to_string());
                changed
            }
            SelectionMode::Multiple => {
                let changed = !self.contains(value);
                if changed {
                    self.values.push(value.to_string());
                }
                let handle = self.mint_tag(value, label);
                self.tags.insert(value.to_string(), vec![handle]);
                changed
            }
        }
    }

    /// Register an additional tag for `value` without replacing existing
    /// ones (duplicate tags can arrive from the host's own rendering).
    ///
    /// Ensures the value is selected; returns the new handle's id. In
    /// SINGLE mode (where tags do not exist) this is a plain replace and
    /// no handle is minted.
    pub fn add_tag(&mut self, value: &str, label: &str) -> Option<ItemId> {
        if self.mode == SelectionMode::Single {
            self.add_value(value, label);
            return None;
        }
        if !self.contains(value) {
            self.values.push(value.to_string());
        }
        let handle = self.mint_tag(value, label);
        let id = handle.id;
        self.tags.entry(value.to_string()).or_default().push(handle);
        Some(id)
    }

    /// Remove one tag for `value`; the value itself leaves the selection
    /// only when no tag with that value remains.
    ///
    /// No-op (returns `false`) when the value is not selected. Returns
    /// whether the value set changed.
    pub fn remove_value(&mut self, value: &str) -> bool {
        match self.mode {
            SelectionMode::Single => {
                if self.values.first().map(String::as_str) == Some(value) {
                    self.values.clear();
                    true
                } else {
                    false
                }
            }
            SelectionMode::Multiple => {
                let Some(handles) = self.tags.get_mut(value) else {
                    return false;
                };
                handles.pop();
                if handles.is_empty() {
                    self.tags.remove(value);
                    self.values.retain(|v| v != value);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Full replace of the selection.
    ///
    /// With `force_selection`, candidates absent from the catalog are
    /// silently dropped. Duplicates collapse to their first occurrence.
    /// SINGLE mode keeps only the first accepted candidate. Tags are
    /// cleared and re-minted in order, labeled from the catalog when the
    /// value resolves and from the raw value otherwise. Returns whether
    /// the value set changed.
    pub fn set_values(
        &mut self,
        candidates: &[String],
        force_selection: bool,
        catalog: &OptionCatalog,
    ) -> bool {
        let mut accepted: Vec<String> = Vec::new();
        for candidate in candidates {
            if force_selection && !catalog.contains(candidate) {
                log::debug!(
                    target: "combo.selection",
                    "dropping candidate {candidate:?}: not in catalog"
                );
                continue;
            }
            if !accepted.contains(candidate) {
                accepted.push(candidate.clone());
            }
            if self.mode == SelectionMode::Single && !accepted.is_empty() {
                break;
            }
        }

        let changed = accepted != self.values;
        self.tags.clear();
        self.values = accepted;
        if self.mode == SelectionMode::Multiple {
            for value in self.values.clone() {
                let label = display_label(catalog, &value);
                let handle = self.mint_tag(&value, &label);
                self.tags.insert(value, vec![handle]);
            }
        }
        changed
    }

    /// Drop everything. Returns whether the value set changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.values.is_empty();
        self.values.clear();
        self.tags.clear();
        changed
    }

    fn mint_tag(&mut self, value: &str, label: &str) -> TagHandle {
        let id = self.next_tag_id;
        self.next_tag_id += 1;
        TagHandle {
            id,
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Display label for `value`: catalog entry's label when it resolves, the
/// raw value otherwise (a selection may reference a value the catalog no
/// longer carries; the control tolerates that rather than erroring).
pub fn display_label(catalog: &OptionCatalog, value: &str) -> String {
    catalog
        .get(value)
        .map(|opt| opt.label().to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Exact-match resolution for a committed string.
///
/// Among all catalog entries whose content equals `committed` under case
/// folding, the first whose trimmed content matches case-sensitively wins;
/// otherwise the first fold match does.
pub fn resolve_exact_match<'a>(
    catalog: &'a OptionCatalog,
    committed: &str,
) -> Option<&'a ComboOption> {
    let trimmed = committed.trim();
    let mut first_fold = None;
    for opt in catalog.iter() {
        if !equals_fold(opt, committed) {
            continue;
        }
        if opt.content.trim() == trimmed {
            return Some(opt);
        }
        if first_fold.is_none() {
            first_fold = Some(opt);
        }
    }
    first_fold
}
