use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::errors::AppError;

/// A permission failure captured at a request boundary, routed here so it
/// can be surfaced distinctly from user-input errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionEvent {
    pub context: String,
    pub message: String,
}

/// Central fan-out point for permission failures. Handlers capture errors
/// into it; interested listeners subscribe. Sending never fails the request
/// path, even with no listener attached.
#[derive(Clone)]
pub struct PermissionEvents {
    sender: broadcast::Sender<PermissionEvent>,
}

impl PermissionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(32);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PermissionEvent> {
        self.sender.subscribe()
    }

    /// Publish the error if, and only if, it is a permission failure.
    pub fn capture(&self, context: &str, error: &AppError) {
        if let AppError::Permission(message) = error {
            let _ = self.sender.send(PermissionEvent {
                context: context.to_string(),
                message: message.clone(),
            });
        }
    }

    /// Default listener: log permission failures at warn level, apart from
    /// the error-level noise of ordinary request failures.
    pub fn spawn_logger(&self) -> JoinHandle<()> {
        let mut receiver = self.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        log::warn!("permission denied in {}: {}", event.context, event.message);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!("permission listener lagged, {} events dropped", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for PermissionEvents {
    fn default() -> Self {
        Self::new()
    }
}
