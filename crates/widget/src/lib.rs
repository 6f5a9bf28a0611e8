//! `offerkit-widget`
//!
//! **Responsibility:** checkout cross-sell widget composition.
//!
//! Mounting resolves the offer product once. Every render re-derives the
//! view from the host's latest cart lines and the controller flags; nothing
//! about the cart is cached here.

pub mod localization;
pub mod view;
pub mod widget;

pub use localization::{Localization, SymbolCurrency};
pub use view::{ERROR_BANNER_TEXT, OfferCard, OfferView, SKELETON_HEADING};
pub use widget::OfferWidget;
