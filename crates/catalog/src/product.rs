//! Catalog product model and its wire shape.

use serde::{Deserialize, Serialize};

use offerkit_core::{Amount, ProductId, VariantId};

/// The canonical purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub price: Amount,
}

/// Immutable snapshot of a catalog product, fetched once per mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub variant: ProductVariant,
}

impl CatalogProduct {
    pub fn variant_id(&self) -> &VariantId {
        &self.variant.id
    }
}

// Wire shape of the products query response:
// `{ data: { products: { nodes: [ { id, title, handle, description,
//   images: { nodes: [{ url }] }, variants: { nodes: [{ id, price: { amount } }] } } ] } } }`

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsResponse {
    pub data: Option<ProductsData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    pub products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductNode {
    id: ProductId,
    title: String,
    handle: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Option<Connection<ImageNode>>,
    variants: Connection<VariantNode>,
}

#[derive(Debug, Deserialize)]
struct ImageNode {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VariantNode {
    id: VariantId,
    price: PriceNode,
}

#[derive(Debug, Deserialize)]
struct PriceNode {
    amount: Amount,
}

impl ProductNode {
    pub(crate) fn handle(&self) -> &str {
        &self.handle
    }

    /// Convert to the domain model. Products without a variant cannot be
    /// offered and yield `None`.
    pub(crate) fn into_product(self) -> Option<CatalogProduct> {
        let variant = self.variants.nodes.into_iter().next()?;
        let image_url = self
            .images
            .and_then(|images| images.nodes.into_iter().next())
            .map(|image| image.url);

        Some(CatalogProduct {
            id: self.id,
            title: self.title,
            handle: self.handle,
            description: self.description.filter(|d| !d.is_empty()),
            image_url,
            variant: ProductVariant {
                id: variant.id,
                price: variant.price.amount,
            },
        })
    }
}

/// Render a product back into the wire shape (used by in-memory hosts).
pub(crate) fn to_wire(product: &CatalogProduct) -> serde_json::Value {
    let images: Vec<serde_json::Value> = product
        .image_url
        .iter()
        .map(|url| serde_json::json!({ "url": url }))
        .collect();

    serde_json::json!({
        "id": product.id,
        "title": product.title,
        "handle": product.handle,
        "description": product.description.clone().unwrap_or_default(),
        "images": { "nodes": images },
        "variants": { "nodes": [
            { "id": product.variant.id, "price": { "amount": product.variant.price } }
        ] },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_first_image_and_variant() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "title": "Shipping Insurance",
            "handle": "shipping-insurance",
            "description": "Covers loss and damage",
            "images": { "nodes": [{ "url": "https://cdn.example/a.png" }, { "url": "https://cdn.example/b.png" }] },
            "variants": { "nodes": [{ "id": "gid://shopify/ProductVariant/11", "price": { "amount": "2.50" } }] }
        }))
        .unwrap();

        let product = node.into_product().unwrap();
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example/a.png"));
        assert_eq!(product.variant_id().as_str(), "gid://shopify/ProductVariant/11");
        assert_eq!(product.variant.price.as_str(), "2.50");
    }

    #[test]
    fn product_without_variant_is_dropped() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/2",
            "title": "Gift card",
            "handle": "gift-card",
            "images": { "nodes": [] },
            "variants": { "nodes": [] }
        }))
        .unwrap();

        assert!(node.into_product().is_none());
    }

    #[test]
    fn empty_description_and_missing_images_become_none() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/3",
            "title": "Insurance",
            "handle": "shipping-insurance",
            "description": "",
            "variants": { "nodes": [{ "id": "V3", "price": { "amount": 1 } }] }
        }))
        .unwrap();

        let product = node.into_product().unwrap();
        assert_eq!(product.description, None);
        assert_eq!(product.image_url, None);
    }
}
