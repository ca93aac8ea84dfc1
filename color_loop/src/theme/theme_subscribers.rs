// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! An ordered registry of callbacks. Each callback is identified by the
//! [`SubscriberId`] handed out when it was added, which is how it is removed again.
//! Publishing is synchronous: every callback runs, in subscription order, before
//! [`SubscriberList::publish`] returns.

use std::fmt::{Debug, Formatter, Result};

pub type SubscriberFn<E> = Box<dyn FnMut(&E) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

pub struct SubscriberList<E> {
    subscribers: Vec<(SubscriberId, SubscriberFn<E>)>,
    next_id: u64,
}

impl<E> Default for SubscriberList<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> Debug for SubscriberList<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<E> SubscriberList<E> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&mut self, callback: impl FnMut(&E) + Send + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed (or was already removed).
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(it, _)| *it != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, event: &E) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.subscribers.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.subscribers.is_empty() }

    pub fn clear(&mut self) { self.subscribers.clear(); }
}
