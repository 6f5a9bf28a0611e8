//! `offerkit-core`: shared building blocks for the checkout offer widget.
//!
//! This crate contains **pure** primitives (no host IO): identifiers, the
//! price amount value object, configuration and the error model.

pub mod amount;
pub mod config;
pub mod error;
pub mod id;

pub use amount::Amount;
pub use config::OfferConfig;
pub use error::OfferError;
pub use id::{CartLineId, InstanceId, ProductId, VariantId};
