// Signal dispatch and deferred event queue
//
// A `SignalBus` lives inside the object it dispatches for (its "owner"). Callbacks
// receive the owner mutably, so emission goes through the `Emitter` trait, which
// snapshots the bound callbacks before calling them.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Callback bound to a signal. Receives the owning object and the signal arguments.
pub type Callback<C, V> = Rc<dyn Fn(&mut C, &[V])>;

/// Token returned by [`SignalBus::bind`], used to unbind that callback later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

struct Binding<S, C, V> {
    signal: S,
    id: BindingId,
    callback: Callback<C, V>,
}

/// Ordered multi-subscriber signal table
pub struct SignalBus<S, C, V> {
    bindings: Vec<Binding<S, C, V>>,
    next_id: u64,
}

impl<S, C, V> Default for SignalBus<S, C, V> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            next_id: 0,
        }
    }
}

impl<S: Copy + PartialEq, C, V> SignalBus<S, C, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a callback. Callbacks of the same signal run in binding order.
    pub fn bind(&mut self, signal: S, callback: impl Fn(&mut C, &[V]) + 'static) -> BindingId {
        let id = BindingId(self.next_id);
        self.next_id += 1;
        self.bindings.push(Binding {
            signal,
            id,
            callback: Rc::new(callback),
        });
        id
    }

    /// Remove one binding. Returns false if it was not bound to `signal`.
    pub fn unbind(&mut self, signal: S, id: BindingId) -> bool {
        let before = self.bindings.len();
        self.bindings
            .retain(|binding| !(binding.signal == signal && binding.id == id));
        self.bindings.len() != before
    }

    /// Remove every binding of a signal, returning how many were removed
    pub fn unbind_all(&mut self, signal: S) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|binding| binding.signal != signal);
        before - self.bindings.len()
    }

    /// Check if a signal has at least one binding
    pub fn is_bound(&self, signal: S) -> bool {
        self.bindings.iter().any(|binding| binding.signal == signal)
    }

    /// Number of bindings for a signal
    pub fn binding_count(&self, signal: S) -> usize {
        self.bindings
            .iter()
            .filter(|binding| binding.signal == signal)
            .count()
    }

    /// Snapshot of the callbacks bound to a signal, in call order
    pub fn callbacks(&self, signal: S) -> Vec<Callback<C, V>> {
        self.bindings
            .iter()
            .filter(|binding| binding.signal == signal)
            .map(|binding| Rc::clone(&binding.callback))
            .collect()
    }
}

impl<S: fmt::Debug, C, V> fmt::Debug for SignalBus<S, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalBus")
            .field(
                "bindings",
                &self
                    .bindings
                    .iter()
                    .map(|binding| (&binding.signal, binding.id))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Implemented by objects that own a [`SignalBus`] keyed on themselves
pub trait Emitter: Sized {
    type Signal: Copy + PartialEq;
    type Value;

    fn signals(&self) -> &SignalBus<Self::Signal, Self, Self::Value>;

    /// Call every callback bound to `signal` synchronously, in binding order.
    /// An unbound signal is a no-op. Returns the number of callbacks called.
    fn emit(&mut self, signal: Self::Signal, args: &[Self::Value]) -> usize {
        let callbacks = self.signals().callbacks(signal);
        for callback in &callbacks {
            callback(self, args);
        }
        callbacks.len()
    }
}

/// A deferred signal with its arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Event<S, V> {
    pub signal: S,
    pub args: Vec<V>,
}

impl<S, V> Event<S, V> {
    pub fn new(signal: S, args: Vec<V>) -> Self {
        Self { signal, args }
    }
}

/// FIFO of events waiting for the owner's next tick
#[derive(Debug)]
pub struct EventQueue<S, V> {
    events: VecDeque<Event<S, V>>,
}

impl<S, V> Default for EventQueue<S, V> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl<S, V> EventQueue<S, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the back of the queue
    pub fn enqueue(&mut self, signal: S, args: Vec<V>) {
        self.events.push_back(Event::new(signal, args));
    }

    /// Pop the oldest event
    pub fn dequeue(&mut self) -> Option<Event<S, V>> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
