//! Bounded per-participant outbound queues.
//!
//! [`ChannelDelivery`] is the stock [`Delivery`] the server registers. Each
//! connected participant owns one bounded tokio `mpsc` queue; the
//! participant's socket task drains the receiving end. A payload is
//! cloned into the recipient's queue with `try_send`, so fan-out never
//! blocks on a slow reader.
//!
//! Ordering is FIFO per recipient. Nothing is promised across recipients.
//! When a queue is full the newest payload is rejected and reported as
//! [`DeliveryFailure::QueueFull`]; a participant without a live queue is
//! reported as [`DeliveryFailure::Disconnected`] and the payload dropped.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use realm_types::{Participant, ParticipantId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

use crate::dispatch::Delivery;
use crate::error::DeliveryFailure;

/// Routes payloads into per-participant bounded queues.
#[derive(Debug)]
pub struct ChannelDelivery<P> {
    queues: RwLock<BTreeMap<ParticipantId, mpsc::Sender<P>>>,
}

impl<P> ChannelDelivery<P> {
    /// Create a delivery with no queues.
    pub const fn new() -> Self {
        Self {
            queues: RwLock::new(BTreeMap::new()),
        }
    }

    /// Open a queue for `participant` and return its receiving end.
    ///
    /// Any previous queue for the same participant is replaced, which
    /// closes it from the sender side. A zero capacity is raised to one.
    pub fn register(&self, participant: ParticipantId, capacity: usize) -> mpsc::Receiver<P> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let replaced = self
            .queues
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(participant, tx)
            .is_some();
        debug!(participant = %participant, capacity, replaced, "Outbound queue registered");
        rx
    }

    /// Close and forget the queue for `participant`.
    ///
    /// Returns whether a queue was registered.
    pub fn unregister(&self, participant: ParticipantId) -> bool {
        let removed = self
            .queues
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&participant)
            .is_some();
        if removed {
            debug!(participant = %participant, "Outbound queue closed");
        }
        removed
    }

    /// Forget the queue for `participant` only if its receiver is gone.
    ///
    /// A session that ends after a newer session for the same participant
    /// registered leaves the newer queue in place. Returns whether a queue
    /// was removed.
    pub fn prune(&self, participant: ParticipantId) -> bool {
        let mut queues = self.queues.write().unwrap_or_else(PoisonError::into_inner);
        let closed = queues.get(&participant).is_some_and(mpsc::Sender::is_closed);
        if closed {
            queues.remove(&participant);
            debug!(participant = %participant, "Outbound queue pruned");
        }
        closed
    }

    /// Whether `participant` currently has a queue.
    pub fn is_registered(&self, participant: ParticipantId) -> bool {
        self.queues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&participant)
    }

    /// Number of open queues.
    pub fn len(&self) -> usize {
        self.queues
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no queue is open.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for ChannelDelivery<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Delivery<P> for ChannelDelivery<P>
where
    P: Clone + Send + Sync,
{
    fn deliver(&self, participant: &Participant, payload: &P) -> Result<(), DeliveryFailure> {
        let queues = self.queues.read().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = queues.get(&participant.id) else {
            return Err(DeliveryFailure::Disconnected);
        };

        tx.try_send(payload.clone()).map_err(|err| match err {
            TrySendError::Full(_) => DeliveryFailure::QueueFull {
                capacity: tx.max_capacity(),
            },
            TrySendError::Closed(_) => DeliveryFailure::Disconnected,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::roster::Roster;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add("Alice", "h1").unwrap();
        roster.add("Bob", "h2").unwrap();
        roster
    }

    #[tokio::test]
    async fn queued_payloads_arrive_in_order() {
        let delivery = ChannelDelivery::<String>::new();
        let mut rx = delivery.register(ParticipantId(1), 8);
        let roster = roster();
        let alice = roster.find(ParticipantId(1)).unwrap();

        delivery.deliver(alice, &String::from("one")).unwrap();
        delivery.deliver(alice, &String::from("two")).unwrap();

        assert_eq!(rx.recv().await.unwrap(), "one");
        assert_eq!(rx.recv().await.unwrap(), "two");
    }

    #[tokio::test]
    async fn full_queue_rejects_newest() {
        let delivery = ChannelDelivery::<String>::new();
        let mut rx = delivery.register(ParticipantId(1), 1);
        let roster = roster();
        let alice = roster.find(ParticipantId(1)).unwrap();

        delivery.deliver(alice, &String::from("kept")).unwrap();
        assert_eq!(
            delivery.deliver(alice, &String::from("dropped")),
            Err(DeliveryFailure::QueueFull { capacity: 1 })
        );
        assert_eq!(rx.recv().await.unwrap(), "kept");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unregistered_participant_is_disconnected() {
        let delivery = ChannelDelivery::<String>::new();
        let roster = roster();
        let bob = roster.find(ParticipantId(2)).unwrap();
        assert_eq!(
            delivery.deliver(bob, &String::new()),
            Err(DeliveryFailure::Disconnected)
        );
    }

    #[test]
    fn dropped_receiver_is_disconnected() {
        let delivery = ChannelDelivery::<String>::new();
        drop(delivery.register(ParticipantId(1), 4));
        let roster = roster();
        let alice = roster.find(ParticipantId(1)).unwrap();
        assert_eq!(
            delivery.deliver(alice, &String::new()),
            Err(DeliveryFailure::Disconnected)
        );
    }

    #[test]
    fn unregister_closes_queue() {
        let delivery = ChannelDelivery::<String>::new();
        let mut rx = delivery.register(ParticipantId(1), 4);
        assert!(delivery.is_registered(ParticipantId(1)));
        assert!(delivery.unregister(ParticipantId(1)));
        assert!(!delivery.unregister(ParticipantId(1)));
        assert!(delivery.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn prune_keeps_live_replacement() {
        let delivery = ChannelDelivery::<String>::new();
        let old = delivery.register(ParticipantId(1), 4);
        let current = delivery.register(ParticipantId(1), 4);
        drop(old);
        assert!(!delivery.prune(ParticipantId(1)));
        assert!(delivery.is_registered(ParticipantId(1)));

        drop(current);
        assert!(delivery.prune(ParticipantId(1)));
        assert!(!delivery.is_registered(ParticipantId(1)));
    }

    #[tokio::test]
    async fn broadcast_through_channels_reports_missing_queue() {
        let delivery = Arc::new(ChannelDelivery::<String>::new());
        let mut alice_rx = delivery.register(ParticipantId(1), 4);
        let dispatcher: Dispatcher<String> = Dispatcher::new(delivery);
        let roster = roster();

        let report = dispatcher.broadcast(roster.iter(), &String::from("hi")).unwrap();
        assert_eq!(report.delivered, vec![ParticipantId(1)]);
        assert_eq!(
            report.failed,
            vec![(ParticipantId(2), DeliveryFailure::Disconnected)]
        );
        assert_eq!(alice_rx.recv().await.unwrap(), "hi");
    }
}
