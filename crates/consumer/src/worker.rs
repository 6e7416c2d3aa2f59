use std::sync::Arc;

use {
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
};

use leadgate_pipeline::IntakePipeline;

use crate::{
    config::ConsumerConfig,
    queue::{MessageQueue, QueueMessage},
};

/// Start the poll-receive-process-delete loop.
///
/// Spawns a background task that runs until the returned token is
/// cancelled. The token is checked between cycles, so an in-flight cycle
/// completes before the loop exits.
pub fn start_consumer(
    queue: Arc<dyn MessageQueue>,
    pipeline: Arc<IntakePipeline>,
    config: ConsumerConfig,
) -> CancellationToken {
    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    tokio::spawn(async move {
        info!(queue_url = %config.queue_url, "starting intake consumer loop");
        run_loop(queue, pipeline, config, loop_cancel).await;
    });
    cancel
}

async fn run_loop(
    queue: Arc<dyn MessageQueue>,
    pipeline: Arc<IntakePipeline>,
    config: ConsumerConfig,
    cancel: CancellationToken,
) {
    let options = config.receive_options();

    loop {
        if cancel.is_cancelled() {
            info!("intake consumer stopped");
            break;
        }

        match queue.receive(options).await {
            Ok(batch) => {
                if !batch.is_empty() {
                    debug!(count = batch.len(), "received batch");
                    // Sequential processing: no intra-batch race on a single
                    // phone number.
                    for message in batch {
                        process_message(queue.as_ref(), pipeline.as_ref(), message).await;
                    }
                }
            },
            Err(e) => {
                warn!(error = %e, "queue receive failed");
            },
        }

        tokio::time::sleep(config.idle_delay()).await;
    }
}

/// Process one message and acknowledge it unless processing failed.
async fn process_message(
    queue: &dyn MessageQueue,
    pipeline: &IntakePipeline,
    message: QueueMessage,
) {
    match pipeline.process(&message.body).await {
        Ok(disposition) => {
            debug!(
                message_id = %message.message_id,
                ?disposition,
                "message handled"
            );
            if let Err(e) = queue.delete(&message.receipt_handle).await {
                // The delivery reappears after the visibility timeout; the
                // duplicate guard is the only shield then.
                warn!(
                    message_id = %message.message_id,
                    error = %e,
                    "failed to delete handled message"
                );
            }
        },
        Err(e) => {
            // Leave undeleted; the provider redelivers after the visibility
            // timeout elapses.
            error!(
                message_id = %message.message_id,
                error = %e,
                "message processing failed, leaving for redelivery"
            );
        },
    }
}
