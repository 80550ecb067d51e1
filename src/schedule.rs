//! Cancellable deferred delivery.
//!
//! The driver's only timing requirement is "send this message after delay
//! D, and give me a handle that can cancel it". Everything else - what the
//! message means, whether it is stale - belongs to the receiver.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Handle to a deferred send. Dropping it cancels the delivery.
#[derive(Debug)]
pub struct Scheduled {
    handle: JoinHandle<()>,
}

impl Scheduled {
    /// Cancels the delivery if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Sends `msg` on `tx` after `delay`.
///
/// The send is silently dropped if the receiver is gone by then; a closed
/// channel means the session the message was for no longer exists.
pub fn send_after<T: Send + 'static>(
    tx: UnboundedSender<T>,
    delay: Duration,
    msg: T,
) -> Scheduled {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(msg);
    });
    Scheduled { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_message_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _scheduled = send_after(tx, Duration::from_millis(500), 42u32);
        tokio::time::sleep(Duration::from_millis(501)).await;
        assert_eq!(rx.recv().await, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduled = send_after(tx, Duration::from_millis(500), 42u32);
        drop(scheduled);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rx.try_recv().ok(), None);
    }
}
