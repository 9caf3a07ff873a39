//! Synchronous signal dispatch with explicit cancelation fields.
//!
//! Listeners run in registration order on the caller's stack. A listener can
//! stop later listeners from seeing the signal (`stop_propagation`) or veto
//! the emitter's default action (`prevent_default`); the emitter reads the
//! outcome from the returned signal after dispatch.

/// One in-flight signal carrying a payload of type `P`.
#[derive(Debug)]
pub struct Signal<P> {
    name: &'static str,
    payload: P,
    cancelable: bool,
    propagate: bool,
    default_prevented: bool,
}

impl<P> Signal<P> {
    pub fn new(name: &'static str, payload: P) -> Self {
        Self {
            name,
            payload,
            cancelable: false,
            propagate: true,
            default_prevented: false,
        }
    }

    pub fn cancelable(name: &'static str, payload: P) -> Self {
        Self {
            cancelable: true,
            ..Self::new(name, payload)
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Stop delivery to listeners registered after the current one.
    pub fn stop_propagation(&mut self) {
        self.propagate = false;
    }

    /// Veto the emitter's default action.
    ///
    /// No-op on signals that are not cancelable, matching DOM semantics.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn propagates(&self) -> bool {
        self.propagate
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle returned by [`Dispatcher::add_listener`], used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener<P> = Box<dyn FnMut(&mut Signal<P>)>;

/// Ordered listener registry for signals carrying payload `P`.
///
/// Delivery is synchronous: `dispatch` returns only after every listener has
/// run (or one stopped propagation), so the emitter can immediately act on
/// `default_prevented`.
pub struct Dispatcher<P> {
    listeners: Vec<(ListenerId, Listener<P>)>,
    next_id: u64,
}

impl<P> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Dispatcher<P> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add_listener(&mut self, f: impl FnMut(&mut Signal<P>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(f)));
        id
    }

    /// Remove a listener. No-op if the id is unknown (already removed).
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver the signal to all listeners in registration order.
    ///
    /// Returns the signal so the emitter can inspect `default_prevented`.
    pub fn dispatch(&mut self, mut signal: Signal<P>) -> Signal<P> {
        log::trace!(target: "bus.signal", "dispatch {}", signal.name());
        for (_, listener) in &mut self.listeners {
            listener(&mut signal);
            if !signal.propagates() {
                break;
            }
        }
        signal
    }
}

impl<P> std::fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
