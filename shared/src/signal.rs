use log::trace;

/// Handle returned by [`Signal::subscribe`], used to unsubscribe later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionKey(u32);

/// A typed list of callbacks, invoked synchronously and in subscription order
/// whenever the owning component emits.
pub struct Signal<T> {
    next_key: u32,
    handlers: Vec<(SubscriptionKey, Box<dyn FnMut(&T)>)>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            next_key: 0,
            handlers: Vec::new(),
        }
    }

    pub fn subscribe<F: FnMut(&T) + 'static>(&mut self, handler: F) -> SubscriptionKey {
        let key = SubscriptionKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.handlers.push((key, Box::new(handler)));
        key
    }

    /// Returns whether a handler was removed
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_key, _)| *handler_key != key);
        before != self.handlers.len()
    }

    pub fn emit(&mut self, value: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(value);
        }
    }

    pub fn clear(&mut self) {
        if !self.handlers.is_empty() {
            trace!("Signal: dropping {} subscriber(s)", self.handlers.len());
        }
        self.handlers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Signal<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
