//! Cart lines and offer membership.

use serde::{Deserialize, Serialize};

use offerkit_catalog::CatalogProduct;
use offerkit_core::{CartLineId, VariantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchandise {
    pub id: VariantId,
}

/// One host-owned cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub merchandise: Merchandise,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(id: impl Into<String>, merchandise_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: CartLineId::new(id),
            merchandise: Merchandise {
                id: VariantId::new(merchandise_id),
            },
            quantity,
        }
    }

    pub fn merchandise_id(&self) -> &VariantId {
        &self.merchandise.id
    }
}

/// Whether the offer product is currently in the cart.
///
/// Derived on every render, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferState {
    Absent,
    /// Carries what a removal needs.
    Present { line_id: CartLineId, quantity: u32 },
}

impl OfferState {
    pub fn is_present(&self) -> bool {
        matches!(self, OfferState::Present { .. })
    }
}

/// First line whose merchandise is `variant_id`.
pub fn find_line<'a>(variant_id: &VariantId, lines: &'a [CartLine]) -> Option<&'a CartLine> {
    lines.iter().find(|line| line.merchandise_id() == variant_id)
}

/// Membership of the offer's canonical variant in `lines`.
pub fn derive_offer_state(offer: &CatalogProduct, lines: &[CartLine]) -> OfferState {
    match find_line(offer.variant_id(), lines) {
        Some(line) => OfferState::Present {
            line_id: line.id.clone(),
            quantity: line.quantity,
        },
        None => OfferState::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerkit_catalog::ProductVariant;
    use offerkit_core::{Amount, ProductId};
    use proptest::prelude::*;

    fn offer(variant: &str) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new("P1"),
            title: "Shipping Insurance".to_string(),
            handle: "shipping-insurance".to_string(),
            description: None,
            image_url: None,
            variant: ProductVariant {
                id: VariantId::new(variant),
                price: Amount::parse("2.00").unwrap(),
            },
        }
    }

    #[test]
    fn present_when_variant_is_in_cart() {
        let lines = vec![CartLine::new("L0", "V0", 2), CartLine::new("L1", "V1", 1)];
        assert_eq!(
            derive_offer_state(&offer("V1"), &lines),
            OfferState::Present {
                line_id: CartLineId::new("L1"),
                quantity: 1
            }
        );
    }

    #[test]
    fn absent_for_empty_cart() {
        assert_eq!(derive_offer_state(&offer("V1"), &[]), OfferState::Absent);
    }

    #[test]
    fn decodes_host_line_shape() {
        let line: CartLine = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/CartLine/1",
            "merchandise": { "id": "gid://shopify/ProductVariant/9" },
            "quantity": 3
        }))
        .unwrap();
        assert_eq!(line.merchandise_id().as_str(), "gid://shopify/ProductVariant/9");
        assert_eq!(line.quantity, 3);
    }

    fn arb_lines() -> impl Strategy<Value = Vec<CartLine>> {
        prop::collection::vec((0u8..6, 1u32..5), 0..12).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (v, q))| CartLine::new(format!("L{i}"), format!("V{v}"), q))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        /// Property: present iff some line carries the offer variant.
        #[test]
        fn present_iff_variant_matches(lines in arb_lines(), target in 0u8..6) {
            let variant = format!("V{target}");
            let state = derive_offer_state(&offer(&variant), &lines);
            let expected = lines.iter().any(|l| l.merchandise_id().as_str() == variant);
            prop_assert_eq!(state.is_present(), expected);
        }

        /// Property: a present state points at the first matching line.
        #[test]
        fn present_carries_first_matching_line(lines in arb_lines(), target in 0u8..6) {
            let variant = format!("V{target}");
            if let OfferState::Present { line_id, quantity } = derive_offer_state(&offer(&variant), &lines) {
                let first = lines.iter().find(|l| l.merchandise_id().as_str() == variant).unwrap();
                prop_assert_eq!(&line_id, &first.id);
                prop_assert_eq!(quantity, first.quantity);
            }
        }
    }
}
