//! Wire-format handling for inbound channel events.
//!
//! The queue delivers provider-shaped JSON payloads (webhook-relayed chat
//! events). This crate turns a raw payload into a normalized
//! [`ParsedMessage`] and owns the two string micro-formats the conversation
//! protocol rides on: phone numbers and flow correlation tokens.

pub mod message;
pub mod parse;
pub mod phone;
pub mod token;
pub mod types;

pub use {
    message::{FlowFields, MediaKind, MessageKind, ParsedMessage},
    parse::{ParseError, parse},
    phone::normalize_phone,
    token::{CATEGORY_SELECT_PREFIX, FlowToken, TokenParseError},
};
