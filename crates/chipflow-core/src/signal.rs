//! Widget-to-host notifications.
//!
//! A [`Signal`] holds a list of slots and calls each one, in the order they
//! were connected, every time the owner emits. Chips use it to report taps
//! and the container uses it to announce removals and collapse changes.
//!
//! ```
//! use chipflow_core::Signal;
//!
//! let removed = Signal::<String>::new();
//! let id = removed.connect(|key| println!("{key} removed"));
//! removed.emit("alice".to_string());
//! assert!(removed.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of callbacks taking `&Args`.
///
/// Use `()` for signals that carry nothing.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }
}

impl<Args> Signal<Args> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Returns `false` if `id` was already disconnected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Call every connected slot with `args`.
    ///
    /// The lock is released before any slot runs, so a slot may connect to or
    /// disconnect from this signal. Such changes apply from the next emit.
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emit");
        for slot in &slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(&u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |&v: &u32| sink.lock().push(v))
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<u32>::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in [1u32, 2, 3] {
            let order = order.clone();
            signal.connect(move |&v| order.lock().push(tag * 10 + v));
        }

        signal.emit(7);

        assert_eq!(*order.lock(), vec![17, 27, 37]);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let signal = Signal::<u32>::new();
        let (seen, slot) = recorder();
        let id = signal.connect(slot);

        signal.emit(1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*seen.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_slot_may_disconnect_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let handle = signal.clone();
        let counter = hits.clone();
        let slot_id = own_id.clone();
        let id = signal.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = slot_id.lock().take() {
                handle.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_connected_during_emit_waits_for_next() {
        let signal = Arc::new(Signal::<u32>::new());
        let (seen, slot) = recorder();
        let slot = Arc::new(Mutex::new(Some(slot)));

        let inner = signal.clone();
        signal.connect(move |_| {
            if let Some(slot) = slot.lock().take() {
                inner.connect(slot);
            }
        });

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*seen.lock(), vec![2]);
    }
}
