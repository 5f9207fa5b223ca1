//! In-process change-notification registry.
//!
//! # Responsibility
//! - Fan successful repository mutations out to whatever holds a view of
//!   the task list.
//!
//! # Invariants
//! - Subscribers receive the full replacement snapshot, never a diff.
//! - Notification order follows subscription order.
//! - Single logical thread of control; callbacks need not be `Send`.

use crate::model::task::Task;
use std::collections::BTreeMap;

/// Handle returned by [`ChangeNotifier::subscribe`]; used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&[Task])>;

/// Registry of task-set subscribers.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one subscriber and returns its handle.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[Task]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Box::new(subscriber));
        id
    }

    /// Removes one subscriber. Returns whether the handle was live.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers the replacement snapshot to every live subscriber.
    pub fn notify(&self, tasks: &[Task]) {
        for subscriber in self.subscribers.values() {
            subscriber(tasks);
        }
    }
}
