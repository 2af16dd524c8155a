//! Event debouncing (防抖)
//!
//! Date edits arrive in bursts while the user is still typing. Callers
//! push them through a debounced channel and act only on the value that
//! settles once the channel stays quiet for the window.

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

/// Quiet window before a burst of edits settles
pub const DEBOUNCE_MS: u64 = 500;

/// Build a debounced channel. The sender side is a plain unbounded
/// sender; the receiver coalesces.
pub fn channel<T>(delay: Duration) -> (mpsc::UnboundedSender<T>, Debounced<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Debounced { rx, delay })
}

/// Receiver half that yields only settled values.
pub struct Debounced<T> {
    rx: mpsc::UnboundedReceiver<T>,
    delay: Duration,
}

impl<T> Debounced<T> {
    /// Wait for the next settled value: the most recent send once the
    /// channel has been quiet for the window. Every send restarts the
    /// window. Returns `None` when all senders are gone and nothing is
    /// pending.
    pub async fn next(&mut self) -> Option<T> {
        let mut latest = self.rx.recv().await?;
        let mut deadline = Instant::now() + self.delay;

        loop {
            tokio::select! {
                _ = sleep_until(deadline) => return Some(latest),

                more = self.rx.recv() => match more {
                    Some(value) => {
                        latest = value;
                        deadline = Instant::now() + self.delay;
                    }
                    // Senders gone; flush what is pending
                    None => return Some(latest),
                },
            }
        }
    }
}
