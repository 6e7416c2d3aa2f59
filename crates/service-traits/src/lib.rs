//! Collaborator ports for the intake pipeline.
//!
//! Everything the pipeline touches beyond its own state — lead, category,
//! message, and agent storage, the outbound channel, SLA bookkeeping,
//! auto-reply dispatch, and real-time notification fan-out — is defined here
//! as an async trait. Implementations live with their backends; this crate
//! ships only the contracts plus in-memory stores for tests.

pub mod error;
pub mod memory;
pub mod outbound;
pub mod stores;

pub use {
    error::{Error, Result},
    outbound::{AutoReplyDispatcher, ChannelSender, NotificationSink, SlaTracker},
    stores::{AgentRoster, CategoryStore, LeadStore, MessageStore},
};
