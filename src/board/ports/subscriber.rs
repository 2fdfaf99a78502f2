//! Observer port notified with every committed board snapshot.

use crate::board::domain::BoardSnapshot;
use std::fmt;

/// Receives each snapshot the store commits, after the commit is complete.
///
/// Called synchronously on the store's thread, so implementations must not
/// block; anything slow (such as persistence) belongs behind a channel.
#[cfg_attr(test, mockall::automock)]
pub trait BoardSubscriber: Send + Sync {
    /// Observes a committed snapshot.
    fn on_commit(&self, snapshot: &BoardSnapshot);
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}
