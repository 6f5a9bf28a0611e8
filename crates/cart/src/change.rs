//! Cart mutation requests and the host seam that applies them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use offerkit_core::{CartLineId, VariantId};

/// A single cart mutation, in the host's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartLineChange {
    #[serde(rename_all = "camelCase")]
    AddCartLine {
        merchandise_id: VariantId,
        quantity: u32,
    },
    RemoveCartLine { id: CartLineId, quantity: u32 },
}

impl CartLineChange {
    /// Add one unit of `variant_id`.
    pub fn add_one(variant_id: VariantId) -> Self {
        Self::AddCartLine {
            merchandise_id: variant_id,
            quantity: 1,
        }
    }

    /// Remove `quantity` units from line `id`.
    pub fn remove(id: CartLineId, quantity: u32) -> Self {
        Self::RemoveCartLine { id, quantity }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CartLineChange::AddCartLine { .. } => "addCartLine",
            CartLineChange::RemoveCartLine { .. } => "removeCartLine",
        }
    }
}

/// Tagged mutation result reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CartChangeResult {
    Success,
    Error { message: String },
}

/// Cart mutation capability provided by the host runtime.
///
/// The host applies the change and republishes the cart lines; callers must
/// not assume the new lines are visible when this returns.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn apply_cart_lines_change(&self, change: CartLineChange) -> CartChangeResult;
}
