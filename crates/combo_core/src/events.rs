//! Signals the controller emits toward the host.

/// Payloads delivered through [`bus::Dispatcher`].
///
/// `ShowSuggestions` is cancelable: preventing its default tells the
/// controller that the host will fetch suggestions asynchronously, so the
/// session enters its loading state instead of self-filtering the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComboEvent {
    /// New suggestions are needed for `value`; `start` is the number of
    /// items already shown (the pagination cursor).
    ShowSuggestions { value: String, start: usize },
    /// The suggestion list is about to close.
    HideSuggestions,
    /// The committed value set differs from the one before the operation.
    Change,
}

impl ComboEvent {
    /// Wire name of the signal, matching the control's public event names.
    pub fn signal_name(&self) -> &'static str {
        match self {
            ComboEvent::ShowSuggestions { .. } => "showsuggestions",
            ComboEvent::HideSuggestions => "hidesuggestions",
            ComboEvent::Change => "change",
        }
    }
}
