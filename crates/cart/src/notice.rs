//! Transient failure notice.
//!
//! `show()` makes the notice visible and (re)starts its countdown. Repeated
//! calls restart the countdown instead of stacking: the notice disappears a
//! fixed duration after the *last* call. Dropping the manager cancels any
//! pending expiry so nothing is written after teardown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::flags::SharedFlags;

pub struct NoticeManager {
    flags: SharedFlags,
    duration: Duration,
    generation: Arc<AtomicU64>,
    expiry: Mutex<Option<JoinHandle<()>>>,
}

impl NoticeManager {
    pub(crate) fn new(flags: SharedFlags, duration: Duration) -> Self {
        Self {
            flags,
            duration,
            generation: Arc::new(AtomicU64::new(0)),
            expiry: Mutex::new(None),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.flags.borrow().show_error
    }

    /// Show the notice and restart its countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self) {
        // The generation is bumped under the flags lock so an expiry can never
        // interleave between "new show" and "flag set".
        let mut generation = 0;
        self.flags.send_modify(|f| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            f.show_error = true;
        });

        // The window runs from this call, not from when the task is first polled.
        let deadline = tokio::time::Instant::now() + self.duration;
        let flags = self.flags.clone();
        let current = self.generation.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let cleared = flags.send_if_modified(|f| {
                if current.load(Ordering::SeqCst) == generation && f.show_error {
                    f.show_error = false;
                    true
                } else {
                    false
                }
            });
            if cleared {
                debug!(generation, "failure notice expired");
            }
        });

        let previous = self
            .expiry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for NoticeManager {
    fn drop(&mut self) {
        let pending = self
            .expiry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}
