//! Shared domain types used across all leadgate crates.

pub mod types;

pub use types::{
    AgentCandidate, Category, Direction, Lead, NewLead, NewStoredMessage, StoredMessage,
};
