//! The inbound-message intake pipeline.
//!
//! Composes the wire parser, duplicate guard, category classifier, agent
//! selector, and the external collaborators into the conversation state
//! machine described in one place: [`orchestrator::Orchestrator`]. The queue
//! consumer drives [`IntakePipeline::process`] per message and acknowledges
//! based on the returned [`Disposition`].

pub mod dedup;
pub mod intake;
pub mod orchestrator;

pub use {
    dedup::DuplicateGuard,
    intake::{Disposition, IntakePipeline},
    orchestrator::{Collaborators, Orchestrator},
};
