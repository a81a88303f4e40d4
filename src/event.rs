//! Ordered multicast callbacks.
//!
//! An [`EventHandler`] keeps its subscribers in insertion order and invokes
//! every one of them, synchronously, each time it fires. It is the glue that
//! lets a list window feed a sibling detail window without either knowing
//! about the other.

use std::fmt;

use crate::error::WindowError;

type Subscriber<A> = Box<dyn FnMut(&A) -> Result<(), WindowError>>;

/// Handle returned by [`EventHandler::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Payload of a list's data-changed event: the index the cursor settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChanged {
    pub index: usize,
}

pub struct EventHandler<A> {
    subscribers: Vec<(SubscriptionId, Subscriber<A>)>,
    next_id: u64,
}

impl<A> EventHandler<A> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Append `callback` to the subscriber list.
    ///
    /// The same logic may be subscribed more than once; every subscription
    /// fires independently.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&A) -> Result<(), WindowError> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber in subscription order with the same `args`.
    ///
    /// The first subscriber error stops the fan-out and is returned to the
    /// caller; later subscribers are not invoked for this firing. The
    /// subscriber list itself is never reordered.
    pub fn fire(&mut self, args: &A) -> Result<(), WindowError> {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(args)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<A> Default for EventHandler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventHandler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fires_each_subscriber_once_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut handler = EventHandler::<usize>::new();
        for tag in 0..4 {
            let seen = Rc::clone(&seen);
            handler.subscribe(move |value| {
                seen.borrow_mut().push((tag, *value));
                Ok(())
            });
        }
        handler.fire(&7).unwrap();
        assert_eq!(*seen.borrow(), vec![(0, 7), (1, 7), (2, 7), (3, 7)]);
    }

    #[test]
    fn duplicate_subscriptions_fire_independently() {
        let count = Rc::new(RefCell::new(0));
        let mut handler = EventHandler::<()>::new();
        let make = |count: Rc<RefCell<i32>>| {
            move |_: &()| {
                *count.borrow_mut() += 1;
                Ok(())
            }
        };
        handler.subscribe(make(Rc::clone(&count)));
        handler.subscribe(make(Rc::clone(&count)));
        handler.fire(&()).unwrap();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscription() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut handler = EventHandler::<u8>::new();
        let a = {
            let seen = Rc::clone(&seen);
            handler.subscribe(move |_| {
                seen.borrow_mut().push('a');
                Ok(())
            })
        };
        {
            let seen = Rc::clone(&seen);
            handler.subscribe(move |_| {
                seen.borrow_mut().push('b');
                Ok(())
            });
        }
        assert!(handler.unsubscribe(a));
        assert!(!handler.unsubscribe(a));
        handler.fire(&0).unwrap();
        assert_eq!(*seen.borrow(), vec!['b']);
        assert_eq!(handler.len(), 1);
    }

    #[test]
    fn subscriber_error_propagates_and_stops_fan_out() {
        let reached = Rc::new(RefCell::new(false));
        let mut handler = EventHandler::<u8>::new();
        handler.subscribe(|_| Err(WindowError::FocusInvariant("boom".into())));
        {
            let reached = Rc::clone(&reached);
            handler.subscribe(move |_| {
                *reached.borrow_mut() = true;
                Ok(())
            });
        }
        assert!(handler.fire(&1).is_err());
        assert!(!*reached.borrow());
        assert_eq!(handler.len(), 2);
    }
}
