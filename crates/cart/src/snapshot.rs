//! Live cart line list.
//!
//! The host publishes a fresh line list whenever the cart changes. Readers
//! always see the latest published list and never keep their own copy.

use tokio::sync::watch;

use crate::line::CartLine;

/// Host side: publishes the authoritative line list.
#[derive(Debug)]
pub struct CartPublisher {
    tx: watch::Sender<Vec<CartLine>>,
}

impl CartPublisher {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self {
            tx: watch::Sender::new(lines),
        }
    }

    pub fn publish(&self, lines: Vec<CartLine>) {
        self.tx.send_replace(lines);
    }

    /// Apply `f` to the current list and publish the result.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<CartLine>),
    {
        self.tx.send_modify(f);
    }

    /// Apply `f` and publish only if it reports a change.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Vec<CartLine>) -> bool,
    {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> CartLines {
        CartLines {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read-only handle on the live line list.
#[derive(Debug, Clone)]
pub struct CartLines {
    rx: watch::Receiver<Vec<CartLine>>,
}

impl CartLines {
    /// Latest published lines.
    pub fn current(&self) -> Vec<CartLine> {
        self.rx.borrow().clone()
    }

    /// Run `f` against the latest lines without cloning them.
    pub fn with<R>(&self, f: impl FnOnce(&[CartLine]) -> R) -> R {
        f(&self.rx.borrow())
    }

    /// Whether a list was published since this handle last looked.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the host to publish a new list.
    ///
    /// Returns `false` once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn readers_see_latest_publish() {
        let publisher = CartPublisher::new(Vec::new());
        let mut lines = publisher.subscribe();
        let other = lines.clone();

        publisher.publish(vec![CartLine::new("L1", "V1", 1)]);

        assert!(lines.changed().await);
        assert_eq!(lines.current().len(), 1);
        assert_eq!(other.with(|l| l[0].id.as_str().to_string()), "L1");
    }

    #[tokio::test]
    async fn changed_reports_closed_publisher() {
        let publisher = CartPublisher::new(Vec::new());
        let mut lines = publisher.subscribe();
        drop(publisher);
        assert!(!lines.changed().await);
    }
}
