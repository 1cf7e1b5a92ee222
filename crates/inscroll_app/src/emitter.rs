//! Multi-observer notification channel
//!
//! Handlers are `Rc` based like every other UI callback. Emission works on a
//! snapshot of the registered handlers, so a handler may register or remove
//! handlers (itself included) while being called.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Emitter::on`]
    pub struct HandlerId;
}

/// Observer callback
pub type Handler<T> = Rc<dyn Fn(&T)>;

pub struct Emitter<T> {
    handlers: RefCell<SlotMap<HandlerId, Handler<T>>>,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(SlotMap::with_key()),
        }
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler
    pub fn on<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&T) + 'static,
    {
        self.handlers.borrow_mut().insert(Rc::new(handler))
    }

    /// Remove a handler, returns false if it was already gone
    pub fn off(&self, id: HandlerId) -> bool {
        self.handlers.borrow_mut().remove(id).is_some()
    }

    pub fn has_observers(&self) -> bool {
        !self.handlers.borrow().is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    /// Call every registered handler, returns how many were called
    pub fn emit(&self, value: &T) -> usize {
        let handlers: Vec<Handler<T>> = self.handlers.borrow().values().cloned().collect();
        for handler in &handlers {
            handler(value);
        }
        handlers.len()
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("observers", &self.observer_count())
            .finish()
    }
}
