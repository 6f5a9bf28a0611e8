//! Cart side of the offer widget.
//!
//! The host's cart is the single source of truth. This crate only:
//! - derives whether the offer is in the cart from the live line list
//! - issues add/remove mutations one at a time
//! - turns mutation failures into a short-lived notice flag

pub mod change;
pub mod controller;
pub mod flags;
pub mod in_memory;
pub mod line;
pub mod notice;
pub mod snapshot;

pub use change::{CartApi, CartChangeResult, CartLineChange};
pub use controller::{CartSyncController, ToggleOutcome};
pub use flags::ControllerFlags;
pub use in_memory::{CartGate, InMemoryCart};
pub use line::{CartLine, Merchandise, OfferState, derive_offer_state, find_line};
pub use notice::NoticeManager;
pub use snapshot::{CartLines, CartPublisher};
