//! Periodic automation trigger
//!
//! Fires the queue processor on a fixed interval until stopped. Each
//! firing is independent; an error from one pass is logged and the loop
//! keeps going.

use crate::config::RedditCredentials;
use crate::processor::QueueProcessor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Drives the queue processor on a fixed wall-clock interval
pub struct AutomationScheduler {
    processor: Arc<QueueProcessor>,
    interval: Duration,
}

impl AutomationScheduler {
    /// Create a scheduler firing every `interval`
    pub fn new(processor: Arc<QueueProcessor>, interval: Duration) -> Self {
        Self {
            processor,
            interval,
        }
    }

    /// Start firing; the first pass runs one full interval after start
    ///
    /// Returns a handle that stops future firings. A pass already underway
    /// when the handle is stopped runs to completion.
    pub fn start(&self, credentials: RedditCredentials) -> AutomationHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let processor = Arc::clone(&self.processor);
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Automation scheduler stopping");
                        break;
                    }
                    _ = sleep(interval) => {
                        info!("Running scheduled automation...");
                        match processor.process_batch(&credentials, None).await {
                            Ok(count) => {
                                info!("Scheduled automation processed {} queue items", count);
                            }
                            Err(e) => {
                                error!("Error in scheduled automation: {}", e);
                            }
                        }
                    }
                }
            }
        });

        AutomationHandle {
            shutdown_tx,
            handle,
        }
    }
}

/// Handle for cancelling a running automation loop
pub struct AutomationHandle {
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl AutomationHandle {
    /// Stop future firings and wait for the loop to exit
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.handle.await {
            warn!("Automation task panicked: {}", e);
        }
    }

    /// Check whether the loop is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}
