//! Cart sync controller.
//!
//! Per widget instance the controller is a two-state machine,
//! `idle -> mutating -> idle`. The `processing` flag is a single-slot mutex:
//! it is taken before a mutation is issued and released when the mutation
//! settles, whatever the outcome. At most one mutation is ever in flight.
//!
//! The controller never keeps its own view of the cart. Membership is derived
//! from the host's latest line list, so a failed add simply leaves the derived
//! state unchanged.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info};

use offerkit_core::{InstanceId, VariantId};

use crate::change::{CartApi, CartChangeResult, CartLineChange};
use crate::flags::{self, ControllerFlags, SharedFlags};
use crate::line::find_line;
use crate::notice::NoticeManager;
use crate::snapshot::CartLines;

/// What a toggle call did. Informational only; failures are already routed
/// to the notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The host accepted the change.
    Applied,
    /// The host rejected the change.
    Failed { message: String },
    /// Another mutation was in flight; nothing was issued.
    Busy,
    /// Removal requested but the variant has no cart line; nothing was issued.
    NotInCart,
}

pub struct CartSyncController {
    instance: InstanceId,
    api: Arc<dyn CartApi>,
    lines: CartLines,
    flags: SharedFlags,
    notice: NoticeManager,
}

/// Held `processing` slot; releasing it is unconditional.
struct ProcessingSlot {
    flags: SharedFlags,
}

impl Drop for ProcessingSlot {
    fn drop(&mut self) {
        self.flags.send_modify(|f| f.processing = false);
    }
}

impl CartSyncController {
    pub fn new(
        instance: InstanceId,
        api: Arc<dyn CartApi>,
        lines: CartLines,
        notice_duration: Duration,
    ) -> Self {
        let flags = flags::shared();
        let notice = NoticeManager::new(flags.clone(), notice_duration);
        Self {
            instance,
            api,
            lines,
            flags,
            notice,
        }
    }

    pub fn flags(&self) -> ControllerFlags {
        *self.flags.borrow()
    }

    /// Receiver notified on every `processing`/`show_error` change.
    pub fn subscribe(&self) -> watch::Receiver<ControllerFlags> {
        self.flags.subscribe()
    }

    pub fn lines(&self) -> &CartLines {
        &self.lines
    }

    /// Add one unit of `variant_id` to the cart.
    pub async fn activate(&self, variant_id: &VariantId) -> ToggleOutcome {
        let Some(slot) = self.acquire() else {
            debug!(instance = %self.instance, variant = %variant_id, "activate ignored; mutation in flight");
            return ToggleOutcome::Busy;
        };

        self.run(slot, CartLineChange::add_one(variant_id.clone()))
            .await
    }

    /// Remove the whole cart line holding `variant_id`.
    ///
    /// No-op when the variant is not in the cart.
    pub async fn deactivate(&self, variant_id: &VariantId) -> ToggleOutcome {
        let line = self
            .lines
            .with(|lines| find_line(variant_id, lines).cloned());
        let Some(line) = line else {
            debug!(instance = %self.instance, variant = %variant_id, "deactivate ignored; no cart line");
            return ToggleOutcome::NotInCart;
        };

        let Some(slot) = self.acquire() else {
            debug!(instance = %self.instance, variant = %variant_id, "deactivate ignored; mutation in flight");
            return ToggleOutcome::Busy;
        };

        self.run(slot, CartLineChange::remove(line.id, line.quantity))
            .await
    }

    /// Checkbox handler: checked adds, unchecked removes.
    pub async fn toggle(&self, checked: bool, variant_id: &VariantId) -> ToggleOutcome {
        if checked {
            self.activate(variant_id).await
        } else {
            self.deactivate(variant_id).await
        }
    }

    fn acquire(&self) -> Option<ProcessingSlot> {
        let acquired = self.flags.send_if_modified(|f| {
            if f.processing {
                false
            } else {
                f.processing = true;
                true
            }
        });
        acquired.then(|| ProcessingSlot {
            flags: self.flags.clone(),
        })
    }

    async fn run(&self, slot: ProcessingSlot, change: CartLineChange) -> ToggleOutcome {
        let kind = change.kind();
        debug!(instance = %self.instance, kind, "issuing cart change");

        let result = self.api.apply_cart_lines_change(change).await;
        drop(slot);

        match result {
            CartChangeResult::Success => {
                info!(instance = %self.instance, kind, "cart change applied");
                ToggleOutcome::Applied
            }
            CartChangeResult::Error { message } => {
                error!(instance = %self.instance, kind, error = %message, "cart change rejected");
                self.notice.show();
                ToggleOutcome::Failed { message }
            }
        }
    }
}
