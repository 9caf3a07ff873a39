//! The orchestrator: keystrokes in, selection mutations and signals out.
//!
//! `ComboController` wires the match engine, the suggestion session, the
//! selection model, and the focus navigator into one state machine:
//!
//! ```text
//! Idle -> Typing -> (Loading |) SuggestionsOpen -> commit -> Idle
//! ```
//!
//! All time-sensitive entry points take `now_ms` explicitly and deferred
//! work runs from `tick` (timers) and `frame` (once-per-frame tasks); the
//! controller never reads a clock of its own.

use crate::events::ComboEvent;
use crate::focus::FocusNavigator;
use crate::host::ItemHost;
use crate::selection::{SelectionModel, display_label, resolve_exact_match};
use crate::session::{DEFAULT_QUERY_DELAY_MS, SCROLL_DEBOUNCE_MS, SuggestionSession};
use bus::{Dispatcher, FrameQueue, ListenerId, Signal, Timer};
use catalog::{Matcher, OptionCatalog};
use core_types::{Align, ScrollInfo, SelectionMode};

/// Where the controller currently is in its query cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No pending query, suggestions closed.
    Idle,
    /// A keystroke armed the debounce timer.
    Typing,
    /// Suggestions visible; arrow keys drive the focus navigator.
    SuggestionsOpen,
    /// The host prevented a suggestions request's default action and owes
    /// us an `add_suggestions` call.
    Loading,
}

/// Keys the controller interprets. Printable input arrives through
/// [`ComboController::input_changed`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Home,
    End,
    Enter,
    Tab,
    ShiftTab,
    Escape,
}

/// Work queued for the next host frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeferredTask {
    /// Coalesced catalog-changed handling: rebuild wholesale, then
    /// re-derive the selection from the host's selected marks.
    RebuildCatalog,
    /// Push virtual focus to the host (active descendant + scroll), one
    /// frame late so we never fight a synchronous focus change triggered
    /// by the same gesture.
    SyncActiveDescendant,
}

pub struct ComboController<H: ItemHost> {
    host: H,
    catalog: OptionCatalog,
    session: SuggestionSession,
    selection: SelectionModel,
    focus: FocusNavigator,
    matcher: Matcher,
    dispatcher: Dispatcher<ComboEvent>,

    phase: Phase,
    invalid: bool,
    input_text: String,
    delay_ms: u64,
    force_selection: bool,

    debounce: Timer,
    scroll_debounce: Timer,
    pending_scroll: Option<ScrollInfo>,
    deferred: FrameQueue<DeferredTask>,

    initial_values: Vec<String>,
}

impl<H: ItemHost> ComboController<H> {
    /// Build a controller over `host`, seeding the catalog from the host's
    /// current options and the selection from its selected marks (last mark
    /// wins in the default SINGLE mode). `reset` restores this snapshot.
    pub fn new(host: H) -> Self {
        let mut catalog = OptionCatalog::new();
        catalog.rebuild(host.options());
        let mut selection = SelectionModel::new();
        let seed: Vec<String> = host.selected_values().last().cloned().into_iter().collect();
        selection.set_values(&seed, false, &catalog);
        let initial_values = selection.snapshot();
        let input_text = selection
            .value()
            .map(|v| display_label(&catalog, v))
            .unwrap_or_default();
        Self {
            host,
            catalog,
            session: SuggestionSession::new(),
            selection,
            focus: FocusNavigator::new(),
            matcher: Matcher::default(),
            dispatcher: Dispatcher::new(),
            phase: Phase::Idle,
            invalid: false,
            input_text,
            delay_ms: DEFAULT_QUERY_DELAY_MS,
            force_selection: false,
            debounce: Timer::new(),
            scroll_debounce: Timer::new(),
            pending_scroll: None,
            deferred: FrameQueue::new(),
            initial_values,
        }
    }

    // -- configuration ----------------------------------------------------

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    pub fn force_selection(&self) -> bool {
        self.force_selection
    }

    pub fn set_force_selection(&mut self, force: bool) {
        self.force_selection = force;
    }

    pub fn multiple(&self) -> bool {
        self.selection.mode() == SelectionMode::Multiple
    }

    pub fn set_multiple(&mut self, multiple: bool) {
        let mode = if multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        };
        if self.selection.set_mode(mode) {
            self.emit(ComboEvent::Change);
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn set_matcher(&mut self, matcher: Matcher) {
        self.matcher = matcher;
    }

    // -- observers --------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::SuggestionsOpen | Phase::Loading)
    }

    pub fn invalid(&self) -> bool {
        self.invalid
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn session(&self) -> &SuggestionSession {
        &self.session
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn focused_item(&self) -> Option<usize> {
        self.focus.current()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn add_listener(&mut self, f: impl FnMut(&mut Signal<ComboEvent>) + 'static) -> ListenerId {
        self.dispatcher.add_listener(f)
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.dispatcher.remove_listener(id);
    }

    // -- programmatic value access ----------------------------------------

    pub fn value(&self) -> Option<&str> {
        self.selection.value()
    }

    pub fn values(&self) -> &[String] {
        self.selection.values()
    }

    /// Programmatic single-value assignment, honoring forced selection.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.set_values(&[value.into()]);
    }

    /// Programmatic full-replace assignment, honoring forced selection.
    ///
    /// Fires `change` iff the resulting value set differs. In SINGLE mode
    /// the input text follows the assignment, so a later blur commits the
    /// assigned label instead of stale text.
    pub fn set_values(&mut self, values: &[String]) {
        let changed = self
            .selection
            .set_values(values, self.force_selection, &self.catalog);
        self.sync_input_to_selection();
        if changed {
            self.emit(ComboEvent::Change);
        }
    }

    /// Select an additional value (MULTIPLE) or replace the value (SINGLE).
    pub fn add_value(&mut self, value: &str, label: &str) {
        if self.selection.add_value(value, label) {
            self.emit(ComboEvent::Change);
        }
    }

    /// Remove one tag for `value`. Fires `change` only when the value
    /// actually leaves the selection (other tags may share it).
    pub fn remove_value(&mut self, value: &str) {
        if self.selection.remove_value(value) {
            self.emit(ComboEvent::Change);
        }
    }

    /// Drop the selection and the input text.
    pub fn clear(&mut self) {
        self.input_text.clear();
        self.invalid = false;
        if self.selection.clear() {
            self.emit(ComboEvent::Change);
        }
    }

    /// Restore the initial selection snapshot taken at construction.
    pub fn reset(&mut self) {
        self.input_text.clear();
        self.invalid = false;
        let initial = self.initial_values.clone();
        let changed = self.selection.set_values(&initial, false, &self.catalog);
        self.sync_input_to_selection();
        if changed {
            self.emit(ComboEvent::Change);
        }
    }

    pub fn loading(&self) -> bool {
        self.session.loading()
    }

    /// Toggle the loading affordance directly (host-driven).
    pub fn set_loading(&mut self, loading: bool) {
        self.session.set_loading(loading);
        match (loading, self.phase) {
            (true, Phase::SuggestionsOpen) => self.phase = Phase::Loading,
            (false, Phase::Loading) => self.phase = Phase::SuggestionsOpen,
            _ => {}
        }
    }

    // -- input events ------------------------------------------------------

    /// The input's text changed (a keystroke, paste, or cut).
    ///
    /// (Re)starts the debounce timer; user input always clears the invalid
    /// marking immediately, before any match is resolved.
    pub fn input_changed(&mut self, text: impl Into<String>, now_ms: u64) {
        self.input_text = text.into();
        self.invalid = false;
        self.phase = Phase::Typing;
        if self.delay_ms == 0 {
            self.open_suggestions(now_ms);
        } else {
            self.debounce.arm(now_ms, self.delay_ms);
        }
    }

    pub fn key_pressed(&mut self, key: Key, now_ms: u64) {
        match key {
            Key::Down | Key::Up if !self.is_open() => {
                // Arrow on a closed control opens the list untyped.
                self.open_suggestions(now_ms);
                if self.phase == Phase::SuggestionsOpen {
                    self.navigate(key);
                }
            }
            Key::Down | Key::Up | Key::Home | Key::End if self.is_open() => {
                self.navigate(key);
            }
            Key::Enter | Key::Tab => {
                self.commit(now_ms);
            }
            Key::Escape | Key::ShiftTab => {
                self.hide_suggestions();
            }
            _ => {}
        }
    }

    /// Keyboard focus left the control (`inside` when it moved to another
    /// part of the same control, e.g. a tag's remove affordance).
    ///
    /// SINGLE mode commits on blur-outside; MULTIPLE never auto-commits.
    pub fn blur(&mut self, now_ms: u64, inside: bool) {
        if inside {
            return;
        }
        if self.multiple() {
            self.hide_suggestions();
        } else {
            self.commit(now_ms);
        }
    }

    pub fn outside_click(&mut self) {
        self.hide_suggestions();
    }

    /// A click on the suggestion item at `index` commits it directly.
    pub fn item_clicked(&mut self, index: usize, _now_ms: u64) {
        let Some(item) = self.session.items().get(index) else {
            return;
        };
        if item.disabled {
            return;
        }
        let (value, label) = (item.value.clone(), item.label().to_string());
        self.apply_choice(&value, &label);
    }

    /// The suggestion list scrolled; the bottom check is debounced to
    /// coalesce rapid scroll events.
    pub fn scrolled(&mut self, info: ScrollInfo, now_ms: u64) {
        self.pending_scroll = Some(info);
        self.scroll_debounce.arm(now_ms, SCROLL_DEBOUNCE_MS);
    }

    /// Advance timers. Fires at most the latest deadline per purpose.
    pub fn tick(&mut self, now_ms: u64) {
        if self.debounce.fire(now_ms) && self.phase == Phase::Typing {
            self.open_suggestions(now_ms);
        }
        if self.scroll_debounce.fire(now_ms) {
            self.request_more_if_near_bottom();
        }
    }

    /// Run deferred once-per-frame work (catalog rebuilds, focus sync).
    pub fn frame(&mut self) {
        for task in self.deferred.drain() {
            match task {
                DeferredTask::RebuildCatalog => self.rebuild_catalog(),
                DeferredTask::SyncActiveDescendant => self.sync_active_descendant(),
            }
        }
    }

    /// External catalog-changed notification. Multiple notifications
    /// before the next frame coalesce into one rebuild.
    pub fn notify_catalog_changed(&mut self) {
        self.deferred.schedule(DeferredTask::RebuildCatalog);
    }

    // -- suggestion lifecycle ----------------------------------------------

    /// Open (or refresh) the suggestion list for the current input text.
    ///
    /// Emits a cancelable `showsuggestions` with cursor 0. A prevented
    /// default means the host fetches asynchronously: the session shows its
    /// loading affordance until `add_suggestions` arrives. Otherwise the
    /// controller filters the catalog itself.
    pub fn show_suggestions(&mut self, now_ms: u64) {
        self.open_suggestions(now_ms);
    }

    fn open_suggestions(&mut self, _now_ms: u64) {
        self.debounce.cancel();
        let signal = self.emit_cancelable(ComboEvent::ShowSuggestions {
            value: self.input_text.clone(),
            start: 0,
        });
        if signal.default_prevented() {
            self.session.clear();
            self.session.set_loading(true);
            self.phase = Phase::Loading;
        } else {
            let rendered = self.host.rendered_items();
            self.session
                .query(&self.catalog, &self.input_text, &self.matcher, &rendered);
            self.phase = Phase::SuggestionsOpen;
        }
        self.focus.reset();
        self.deferred.schedule(DeferredTask::SyncActiveDescendant);
    }

    /// Append host-fetched suggestions; exits the loading state.
    pub fn add_suggestions(&mut self, items: Vec<catalog::ComboOption>, clear_existing: bool) {
        self.session.append(items, clear_existing);
        if self.phase == Phase::Loading {
            self.phase = Phase::SuggestionsOpen;
        }
        self.focus.revalidate(self.session.items());
        self.deferred.schedule(DeferredTask::SyncActiveDescendant);
    }

    /// Drop the current suggestion items without closing the list.
    pub fn clear_suggestions(&mut self) {
        self.session.clear();
        self.focus.reset();
        self.deferred.schedule(DeferredTask::SyncActiveDescendant);
    }

    /// Close the suggestion list.
    ///
    /// Cancels pending debounce deadlines and clears the loading flag, so
    /// hiding can never leave a timer or affordance behind. Returns `false`
    /// when a listener prevented the close.
    pub fn hide_suggestions(&mut self) -> bool {
        if self.phase == Phase::Idle && self.session.is_empty() && !self.session.loading() {
            return true;
        }
        let signal = self.emit_cancelable(ComboEvent::HideSuggestions);
        if signal.default_prevented() {
            return false;
        }
        self.debounce.cancel();
        self.scroll_debounce.cancel();
        self.pending_scroll = None;
        self.session.clear();
        self.focus.reset();
        self.phase = Phase::Idle;
        self.deferred.schedule(DeferredTask::SyncActiveDescendant);
        true
    }

    // -- internals ---------------------------------------------------------

    fn navigate(&mut self, key: Key) {
        let items = self.session.items();
        match key {
            Key::Down => self.focus.next(items),
            Key::Up => self.focus.previous(items),
            Key::Home => self.focus.home(items),
            Key::End => self.focus.end(items),
            _ => unreachable!("navigate called with non-navigation key"),
        };
        self.deferred.schedule(DeferredTask::SyncActiveDescendant);
    }

    /// Commit the current input: virtually focused item first, exact-match
    /// resolution otherwise, forced-selection validation last.
    ///
    /// A commit that fails forced selection marks the control invalid and
    /// leaves the suggestions open so the user can keep refining.
    fn commit(&mut self, _now_ms: u64) {
        log::trace!(target: "combo.controller", "commit, phase {:?}", self.phase);

        if let Some(index) = self.focus.current() {
            if let Some(item) = self.session.items().get(index).filter(|i| !i.disabled) {
                let (value, label) = (item.value.clone(), item.label().to_string());
                self.apply_choice(&value, &label);
                return;
            }
            self.focus.reset();
        }

        let text = self.input_text.clone();
        if let Some(opt) = resolve_exact_match(&self.catalog, &text) {
            let (value, label) = (opt.value.clone(), opt.label().to_string());
            self.apply_choice(&value, &label);
            return;
        }

        if self.force_selection {
            self.invalid = match self.selection.mode() {
                SelectionMode::Single => true,
                SelectionMode::Multiple => {
                    !text.trim().is_empty() || self.values_blank_after_commit()
                }
            };
            if self.invalid {
                log::debug!(target: "combo.controller", "commit rejected: no exact match for {text:?}");
                return;
            }
            self.hide_suggestions();
            return;
        }

        // Free text becomes the value.
        let before = self.selection.snapshot();
        match self.selection.mode() {
            SelectionMode::Single => {
                if text.is_empty() {
                    self.selection.clear();
                } else {
                    self.selection.add_value(&text, &text);
                }
            }
            SelectionMode::Multiple => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    self.selection.add_value(trimmed, trimmed);
                }
                self.input_text.clear();
            }
        }
        if self.selection.snapshot() != before {
            self.emit(ComboEvent::Change);
        }
        self.invalid = false;
        self.hide_suggestions();
    }

    /// Select a resolved catalog choice and close.
    fn apply_choice(&mut self, value: &str, label: &str) {
        let before = self.selection.snapshot();
        self.selection.add_value(value, label);
        match self.selection.mode() {
            SelectionMode::Single => {
                self.input_text = display_label(&self.catalog, value);
            }
            SelectionMode::Multiple => self.input_text.clear(),
        }
        if self.selection.snapshot() != before {
            self.emit(ComboEvent::Change);
        }
        self.invalid = false;
        self.hide_suggestions();
    }

    fn values_blank_after_commit(&self) -> bool {
        let values = self.selection.values();
        values.is_empty() || values.iter().all(String::is_empty)
    }

    fn request_more_if_near_bottom(&mut self) {
        let Some(info) = self.pending_scroll.take() else {
            return;
        };
        if self.phase != Phase::SuggestionsOpen || !self.session.wants_more(info) {
            return;
        }
        let signal = self.emit_cancelable(ComboEvent::ShowSuggestions {
            value: self.input_text.clone(),
            start: self.session.start_cursor(),
        });
        if signal.default_prevented() {
            self.session.set_loading(true);
            self.phase = Phase::Loading;
        }
        // Default not prevented: the catalog is exhausted; nothing to do.
    }

    fn rebuild_catalog(&mut self) {
        self.catalog.rebuild(self.host.options());
        self.reconcile_selected_from_host();
        self.focus.revalidate(self.session.items());
    }

    /// Re-derive the selection from the items the host marks selected.
    ///
    /// SINGLE mode prefers the last marked item (the rest are considered
    /// deselected); MULTIPLE adopts all marks in order.
    fn reconcile_selected_from_host(&mut self) {
        let marks = self.host.selected_values();
        let changed = match self.selection.mode() {
            SelectionMode::Single => {
                let pick: Vec<String> = marks.last().cloned().into_iter().collect();
                self.selection.set_values(&pick, false, &self.catalog)
            }
            SelectionMode::Multiple => self.selection.set_values(&marks, false, &self.catalog),
        };
        // Only while idle: a rebuild must not clobber text mid-typing.
        if changed && self.phase == Phase::Idle {
            self.sync_input_to_selection();
        }
        if changed {
            self.emit(ComboEvent::Change);
        }
    }

    /// Mirror the selection into the input text. SINGLE mode only; in
    /// MULTIPLE mode the input is a tag-entry draft the selection never
    /// owns.
    fn sync_input_to_selection(&mut self) {
        if self.multiple() {
            return;
        }
        self.input_text = self
            .selection
            .value()
            .map(|v| display_label(&self.catalog, v))
            .unwrap_or_default();
    }

    fn sync_active_descendant(&mut self) {
        let current = self.focus.current();
        self.host.set_active_descendant(current);
        let Some(index) = current else {
            return;
        };
        let Some((top, bottom)) = self.host.item_bounds(index) else {
            return;
        };
        let info = self.host.scroll_state();
        if top < info.offset {
            self.host.scroll_item_into_view(index, Align::Top);
        } else if bottom > info.offset + info.viewport {
            self.host.scroll_item_into_view(index, Align::Bottom);
        }
    }

    fn emit(&mut self, event: ComboEvent) -> Signal<ComboEvent> {
        let name = event.signal_name();
        self.dispatcher.dispatch(Signal::new(name, event))
    }

    fn emit_cancelable(&mut self, event: ComboEvent) -> Signal<ComboEvent> {
        let name = event.signal_name();
        self.dispatcher.dispatch(Signal::cancelable(name, event))
    }
}

impl<H: ItemHost + std::fmt::Debug> std::fmt::Debug for ComboController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboController")
            .field("phase", &self.phase)
            .field("invalid", &self.invalid)
            .field("input_text", &self.input_text)
            .field("values", &self.selection.values())
            .field("session_len", &self.session.len())
            .finish()
    }
}
