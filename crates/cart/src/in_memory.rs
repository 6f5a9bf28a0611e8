//! In-memory cart for tests/dev.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use offerkit_core::CartLineId;

use crate::change::{CartApi, CartChangeResult, CartLineChange};
use crate::line::{CartLine, Merchandise};
use crate::snapshot::{CartLines, CartPublisher};

/// Cart host that applies changes to an in-memory line list and republishes it.
///
/// - Adding an already-present variant increases that line's quantity
/// - Removing the full quantity drops the line
/// - Failures can be injected and in-flight changes held
pub struct InMemoryCart {
    publisher: CartPublisher,
    next_line: AtomicU64,
    failures: Mutex<VecDeque<String>>,
    applied: Mutex<Vec<CartLineChange>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

/// Releases a change held by [`InMemoryCart::hold`].
pub struct CartGate(Arc<Notify>);

impl CartGate {
    pub fn release(&self) {
        self.0.notify_one();
    }
}

impl Default for InMemoryCart {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryCart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        let next_line = lines.len() as u64 + 1;
        Self {
            publisher: CartPublisher::new(lines),
            next_line: AtomicU64::new(next_line),
            failures: Mutex::new(VecDeque::new()),
            applied: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    pub fn lines(&self) -> CartLines {
        self.publisher.subscribe()
    }

    /// Reject the next change with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(message.into());
    }

    /// Make the next change wait until the returned gate is released.
    pub fn hold(&self) -> CartGate {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = Some(notify.clone());
        CartGate(notify)
    }

    /// Every change received, in order, including rejected ones.
    pub fn received(&self) -> Vec<CartLineChange> {
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, change: &CartLineChange) -> CartChangeResult {
        match change {
            CartLineChange::AddCartLine {
                merchandise_id,
                quantity,
            } => {
                self.publisher.update(|lines| {
                    match lines.iter_mut().find(|l| &l.merchandise.id == merchandise_id) {
                        Some(line) => line.quantity += quantity,
                        None => {
                            let n = self.next_line.fetch_add(1, Ordering::SeqCst);
                            lines.push(CartLine {
                                id: CartLineId::new(format!("gid://shopify/CartLine/{n}")),
                                merchandise: Merchandise {
                                    id: merchandise_id.clone(),
                                },
                                quantity: *quantity,
                            });
                        }
                    }
                });
                CartChangeResult::Success
            }
            CartLineChange::RemoveCartLine { id, quantity } => {
                let removed = self.publisher.update_if(|lines| {
                    match lines.iter().position(|l| &l.id == id) {
                        Some(idx) if lines[idx].quantity <= *quantity => {
                            lines.remove(idx);
                            true
                        }
                        Some(idx) => {
                            lines[idx].quantity -= quantity;
                            true
                        }
                        None => false,
                    }
                });
                if removed {
                    CartChangeResult::Success
                } else {
                    CartChangeResult::Error {
                        message: format!("cart line {id} not found"),
                    }
                }
            }
        }
    }
}

#[async_trait]
impl CartApi for InMemoryCart {
    async fn apply_cart_lines_change(&self, change: CartLineChange) -> CartChangeResult {
        self.applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change.clone());

        let gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        if let Some(message) = failure {
            return CartChangeResult::Error { message };
        }

        self.apply(&change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerkit_core::VariantId;

    #[tokio::test]
    async fn add_then_remove_round_trips_the_cart() {
        let cart = InMemoryCart::default();
        let lines = cart.lines();

        let added = cart
            .apply_cart_lines_change(CartLineChange::add_one(VariantId::new("V1")))
            .await;
        assert_eq!(added, CartChangeResult::Success);
        let line = lines.current()[0].clone();
        assert_eq!(line.quantity, 1);

        let removed = cart
            .apply_cart_lines_change(CartLineChange::remove(line.id, 1))
            .await;
        assert_eq!(removed, CartChangeResult::Success);
        assert!(lines.current().is_empty());
    }

    #[tokio::test]
    async fn adding_present_variant_bumps_quantity() {
        let cart = InMemoryCart::new(vec![CartLine::new("L1", "V1", 1)]);
        cart.apply_cart_lines_change(CartLineChange::add_one(VariantId::new("V1")))
            .await;
        assert_eq!(cart.lines().current(), vec![CartLine::new("L1", "V1", 2)]);
    }

    #[tokio::test]
    async fn injected_failure_leaves_lines_untouched() {
        let cart = InMemoryCart::default();
        cart.fail_next("Out of stock");

        let result = cart
            .apply_cart_lines_change(CartLineChange::add_one(VariantId::new("V2")))
            .await;

        assert_eq!(
            result,
            CartChangeResult::Error {
                message: "Out of stock".to_string()
            }
        );
        assert!(cart.lines().current().is_empty());
        assert_eq!(cart.received().len(), 1);
    }

    #[tokio::test]
    async fn removing_unknown_line_is_an_error_and_publishes_nothing() {
        let cart = InMemoryCart::new(vec![CartLine::new("L1", "V1", 1)]);
        let lines = cart.lines();

        let result = cart
            .apply_cart_lines_change(CartLineChange::remove(CartLineId::new("L9"), 1))
            .await;

        assert!(matches!(result, CartChangeResult::Error { .. }));
        assert!(!lines.has_changed());
        assert_eq!(lines.current(), vec![CartLine::new("L1", "V1", 1)]);
    }
}
