//! View model handed to the host's component library.

use serde::Serialize;

pub const SKELETON_HEADING: &str = "You might also like";

pub const ERROR_BANNER_TEXT: &str = "There was an issue updating your cart. Please try again.";

/// What the widget should display for the current render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum OfferView {
    /// Catalog query in flight: skeleton with a disabled button.
    Loading { heading: String },
    /// No offer product; render nothing.
    Hidden,
    Offer(OfferCard),
}

impl OfferView {
    pub(crate) fn loading() -> Self {
        OfferView::Loading {
            heading: SKELETON_HEADING.to_string(),
        }
    }

    pub fn card(&self) -> Option<&OfferCard> {
        match self {
            OfferView::Offer(card) => Some(card),
            _ => None,
        }
    }
}

/// The insurance toggle card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferCard {
    pub headline: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub price: String,
    /// Checkbox state: the offer variant is in the cart.
    pub checked: bool,
    /// Checkbox disabled while a cart change is in flight.
    pub disabled: bool,
    pub error_banner: Option<String>,
}

pub(crate) fn headline(price: &str) -> String {
    format!("Add Insurance to your order? Just {price} extra!")
}
