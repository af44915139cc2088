use std::rc::Rc;

use crate::data_model::ListenerKey;

/// Callbacks interested in store changes. Listeners are only ever called from
/// [`Listeners::due_notifications`]'s output, never while the store is borrowed.
#[derive(Default)]
pub(crate) struct Listeners {
    listeners: slotmap::SlotMap<slotmap::DefaultKey, Rc<dyn Fn(ListenerKey)>>,
}

impl Listeners {
    pub(crate) fn register(&mut self, listener: impl Fn(ListenerKey) + 'static) -> ListenerKey {
        ListenerKey(self.listeners.insert(Rc::new(listener)))
    }

    /// Returns false if the key was not registered.
    pub(crate) fn unregister(&mut self, key: ListenerKey) -> bool {
        self.listeners.remove(key.0).is_some()
    }

    pub(crate) fn due_notifications(&self) -> Vec<Box<dyn FnOnce()>> {
        self.listeners
            .iter()
            .map(|(key, listener)| {
                let listener = listener.clone();
                Box::new(move || listener(ListenerKey(key))) as Box<dyn FnOnce()>
            })
            .collect()
    }
}
