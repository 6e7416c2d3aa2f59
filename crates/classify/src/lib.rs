//! Keyword-based category classification.
//!
//! A category's keywords are scored against inbound message content; the
//! category with the strictly highest score wins. Scoring is pure
//! ([`score_keywords`]); [`CategoryDetector`] adds the catalog fetch.

pub mod detect;
pub mod score;

pub use {
    detect::CategoryDetector,
    score::{KeywordScore, score_keywords},
};
