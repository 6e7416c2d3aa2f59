//! Queue consumption for the intake pipeline.
//!
//! A single cooperative poll loop receives bounded batches from the queue,
//! feeds each body through [`leadgate_pipeline::IntakePipeline`], and deletes
//! messages whose processing completed (including permanently-failed ones —
//! parse rejects and handled logical errors). Everything else is left on the
//! queue for the provider's visibility-timeout redelivery.

pub mod config;
pub mod queue;
pub mod worker;

pub use {
    config::ConsumerConfig,
    queue::{MessageQueue, QueueMessage, ReceiveOptions},
    worker::start_consumer,
};
