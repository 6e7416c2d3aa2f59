use std::sync::Arc;

use {
    anyhow::Result,
    tracing::{info, warn},
};

use crate::{
    dedup::DuplicateGuard,
    orchestrator::{Collaborators, Orchestrator},
};

/// Per-message outcome the consumer loop acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// A branch completed; acknowledge the message.
    Completed,
    /// Suppressed as a recent duplicate; acknowledge.
    Duplicate,
    /// Payload could not be parsed; acknowledge, redelivery cannot fix it.
    Rejected,
}

/// The full intake path for one raw queue-message body:
/// parse → duplicate guard → conversation branch.
pub struct IntakePipeline {
    guard: DuplicateGuard,
    orchestrator: Orchestrator,
}

impl IntakePipeline {
    pub fn new(collaborators: Collaborators) -> Self {
        let guard = DuplicateGuard::new(
            Arc::clone(&collaborators.leads),
            Arc::clone(&collaborators.messages),
        );
        Self {
            guard,
            orchestrator: Orchestrator::new(collaborators),
        }
    }

    /// Process one message body.
    ///
    /// Every `Ok` variant means the message must be acknowledged; `Err`
    /// means it stays on the queue for provider redelivery.
    pub async fn process(&self, raw: &[u8]) -> Result<Disposition> {
        let message = match leadgate_wire::parse(raw) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "rejecting unparsable payload");
                return Ok(Disposition::Rejected);
            },
        };

        if self
            .guard
            .is_duplicate(&message.phone, &message.content)
            .await?
        {
            info!(
                phone = %message.phone,
                provider_message_id = %message.provider_message_id,
                "suppressing duplicate inbound message"
            );
            return Ok(Disposition::Duplicate);
        }

        self.orchestrator.handle(&message).await?;
        Ok(Disposition::Completed)
    }
}
