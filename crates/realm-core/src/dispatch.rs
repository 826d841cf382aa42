//! Packet dispatch.
//!
//! The realm never talks to the network itself. The surrounding system
//! registers one [`Delivery`] implementation (often just a closure), and
//! the [`Dispatcher`] fans payloads out through it. The dispatcher is
//! generic over the payload type, so any packet kind can travel through
//! it.
//!
//! Fan-out walks recipients in roster order without filtering on
//! connectivity; deciding what to do with a disconnected recipient is the
//! delivery's job. A failure for one recipient never stops delivery to the
//! rest. Failures are collected into a [`DeliveryReport`] and returned
//! once the fan-out is done.

use std::sync::Arc;

use realm_types::{Participant, ParticipantId};
use tracing::{debug, warn};

use crate::error::{DeliveryFailure, DispatchError};

/// Transport-side delivery of one payload to one participant.
///
/// Implementations must report failure through the return value rather
/// than panicking into the dispatch loop.
pub trait Delivery<P>: Send + Sync {
    /// Hand `payload` to the transport for `participant`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryFailure`] if the transport cannot accept it.
    fn deliver(&self, participant: &Participant, payload: &P) -> Result<(), DeliveryFailure>;
}

impl<P, F> Delivery<P> for F
where
    F: Fn(&Participant, &P) -> Result<(), DeliveryFailure> + Send + Sync,
{
    fn deliver(&self, participant: &Participant, payload: &P) -> Result<(), DeliveryFailure> {
        self(participant, payload)
    }
}

/// Outcome of a fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipients whose delivery succeeded, in fan-out order.
    pub delivered: Vec<ParticipantId>,
    /// Recipients whose delivery failed, in fan-out order.
    pub failed: Vec<(ParticipantId, DeliveryFailure)>,
}

impl DeliveryReport {
    /// Whether every attempted delivery succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Every recipient that was attempted, successful or not.
    pub fn attempted(&self) -> usize {
        self.delivered.len().saturating_add(self.failed.len())
    }
}

/// Fans payloads out through the registered [`Delivery`].
pub struct Dispatcher<P> {
    delivery: Option<Arc<dyn Delivery<P>>>,
}

impl<P> Dispatcher<P> {
    /// A dispatcher with no delivery registered yet.
    ///
    /// Every dispatch attempt fails with [`DispatchError::Unconfigured`]
    /// until [`register`](Self::register) is called.
    pub const fn unconfigured() -> Self {
        Self { delivery: None }
    }

    /// A dispatcher that delivers through `delivery`.
    pub fn new(delivery: Arc<dyn Delivery<P>>) -> Self {
        Self {
            delivery: Some(delivery),
        }
    }

    /// Register (or replace) the delivery.
    pub fn register(&mut self, delivery: Arc<dyn Delivery<P>>) {
        self.delivery = Some(delivery);
    }

    /// Whether a delivery is registered.
    pub const fn is_configured(&self) -> bool {
        self.delivery.is_some()
    }

    /// Deliver `payload` to exactly one participant.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Unconfigured`] without a registered
    /// delivery and [`DispatchError::Delivery`] if the transport refuses
    /// the payload.
    pub fn notify(&self, participant: &Participant, payload: &P) -> Result<(), DispatchError> {
        let delivery = self.delivery()?;
        delivery
            .deliver(participant, payload)
            .map_err(|failure| DispatchError::Delivery {
                participant: participant.id,
                failure,
            })
    }

    /// Deliver `payload` to every recipient, in order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Unconfigured`] without a registered
    /// delivery. Per-recipient failures are reported in the
    /// [`DeliveryReport`], not as an error.
    pub fn broadcast<'a>(
        &self,
        recipients: impl IntoIterator<Item = &'a Participant>,
        payload: &P,
    ) -> Result<DeliveryReport, DispatchError> {
        let delivery = self.delivery()?;
        let mut report = DeliveryReport::default();

        for participant in recipients {
            match delivery.deliver(participant, payload) {
                Ok(()) => report.delivered.push(participant.id),
                Err(failure) => {
                    warn!(participant = %participant.id, error = %failure, "Delivery failed");
                    report.failed.push((participant.id, failure));
                }
            }
        }

        debug!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "Broadcast complete"
        );
        Ok(report)
    }

    /// Deliver `payload` to every recipient except `excluded`.
    ///
    /// Relative order of the remaining recipients is preserved.
    ///
    /// # Errors
    ///
    /// As [`broadcast`](Self::broadcast).
    pub fn broadcast_except<'a>(
        &self,
        recipients: impl IntoIterator<Item = &'a Participant>,
        payload: &P,
        excluded: ParticipantId,
    ) -> Result<DeliveryReport, DispatchError> {
        self.broadcast(
            recipients.into_iter().filter(|p| p.id != excluded),
            payload,
        )
    }

    fn delivery(&self) -> Result<&dyn Delivery<P>, DispatchError> {
        self.delivery.as_deref().ok_or(DispatchError::Unconfigured)
    }
}

impl<P> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl<P> core::fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("configured", &self.is_configured())
            .finish()
    }
}
