//! Catalog resolver: one bounded query, one offer product.
//!
//! Products beyond the first page are never considered. A target that only
//! exists past the page boundary is simply not offered.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info};

use offerkit_core::OfferConfig;

use crate::product::{CatalogProduct, ProductsResponse};
use crate::source::{CatalogError, CatalogSource, PRODUCTS_QUERY};

/// Observable resolver state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverState {
    /// True from invocation until the query settles.
    pub loading: bool,
    /// Either exactly the offer product or empty.
    pub products: Vec<CatalogProduct>,
}

impl ResolverState {
    /// The product to offer; the resolver never yields more than one.
    pub fn offer_product(&self) -> Option<&CatalogProduct> {
        self.products.first()
    }
}

pub struct CatalogResolver {
    source: Arc<dyn CatalogSource>,
    target_handle: String,
    page_size: u32,
    state: watch::Sender<ResolverState>,
}

impl CatalogResolver {
    pub fn new(source: Arc<dyn CatalogSource>, config: &OfferConfig) -> Self {
        Self {
            source,
            target_handle: config.target_handle.clone(),
            page_size: config.page_size,
            state: watch::Sender::new(ResolverState::default()),
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever `loading` or the result list changes.
    pub fn subscribe(&self) -> watch::Receiver<ResolverState> {
        self.state.subscribe()
    }

    /// Issue the catalog query and select the offer product.
    ///
    /// Never fails: a query error is logged and treated as "no product found".
    pub async fn resolve(&self) -> Option<CatalogProduct> {
        self.state.send_modify(|s| s.loading = true);

        let products = match self.fetch().await {
            Ok(Some(product)) => {
                info!(handle = %product.handle, product_id = %product.id, "offer product resolved");
                vec![product]
            }
            Ok(None) => {
                debug!(
                    handle = %self.target_handle,
                    page_size = self.page_size,
                    "offer product not found in catalog page"
                );
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "catalog query failed; offer will not render");
                Vec::new()
            }
        };

        let product = products.first().cloned();
        self.state.send_modify(|s| {
            s.products = products;
            s.loading = false;
        });
        product
    }

    async fn fetch(&self) -> Result<Option<CatalogProduct>, CatalogError> {
        let variables = serde_json::json!({ "first": self.page_size });
        let body = self.source.query(PRODUCTS_QUERY, variables).await?;

        let response: ProductsResponse =
            serde_json::from_value(body).map_err(|e| CatalogError::Decode(e.to_string()))?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(CatalogError::GraphQl(messages.join("; ")));
        }

        let data = response
            .data
            .ok_or_else(|| CatalogError::Decode("missing data".to_string()))?;

        Ok(data
            .products
            .nodes
            .into_iter()
            .find(|node| node.handle() == self.target_handle)
            .and_then(|node| node.into_product()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::StaticCatalog;
    use crate::product::ProductVariant;
    use offerkit_core::{Amount, ProductId, VariantId};

    fn product(handle: &str) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(format!("gid://shopify/Product/{handle}")),
            title: handle.to_string(),
            handle: handle.to_string(),
            description: None,
            image_url: None,
            variant: ProductVariant {
                id: VariantId::new(format!("gid://shopify/ProductVariant/{handle}")),
                price: Amount::parse("2.00").unwrap(),
            },
        }
    }

    fn resolver(catalog: Arc<StaticCatalog>) -> CatalogResolver {
        CatalogResolver::new(catalog, &OfferConfig::default())
    }

    #[tokio::test]
    async fn selects_only_the_target_handle() {
        let catalog = Arc::new(StaticCatalog::new(vec![
            product("a"),
            product("shipping-insurance"),
            product("c"),
        ]));
        let resolver = resolver(catalog);

        let resolved = resolver.resolve().await.unwrap();
        assert_eq!(resolved.handle, "shipping-insurance");

        let state = resolver.state();
        assert!(!state.loading);
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.products[0].handle, "shipping-insurance");
    }

    #[tokio::test]
    async fn issues_one_query_with_configured_page_size() {
        let catalog = Arc::new(StaticCatalog::new(vec![product("shipping-insurance")]));
        let resolver = resolver(catalog.clone());
        resolver.resolve().await;

        let calls = catalog.recorded_variables();
        assert_eq!(calls, vec![serde_json::json!({ "first": 20 })]);
    }

    #[tokio::test]
    async fn target_beyond_page_boundary_is_not_offered() {
        let mut products: Vec<CatalogProduct> =
            (0..20).map(|i| product(&format!("filler-{i}"))).collect();
        products.push(product("shipping-insurance"));

        let resolver = resolver(Arc::new(StaticCatalog::new(products)));
        assert!(resolver.resolve().await.is_none());
        assert!(resolver.state().products.is_empty());
    }

    #[tokio::test]
    async fn query_failure_yields_empty_result() {
        let catalog = Arc::new(StaticCatalog::failing(CatalogError::Transport(
            "connection reset".to_string(),
        )));
        let resolver = resolver(catalog);

        assert!(resolver.resolve().await.is_none());
        assert_eq!(resolver.state(), ResolverState::default());
    }

    #[tokio::test]
    async fn graphql_errors_yield_empty_result() {
        let catalog = Arc::new(StaticCatalog::with_response(serde_json::json!({
            "data": null,
            "errors": [{ "message": "Throttled" }]
        })));
        let resolver = resolver(catalog);

        assert!(resolver.resolve().await.is_none());
        assert!(!resolver.state().loading);
    }

    #[tokio::test]
    async fn loading_is_true_while_query_is_pending() {
        let catalog = Arc::new(StaticCatalog::new(vec![product("shipping-insurance")]));
        let gate = catalog.hold();
        let resolver = Arc::new(resolver(catalog));
        let mut rx = resolver.subscribe();

        let task = tokio::spawn({
            let resolver = resolver.clone();
            async move { resolver.resolve().await }
        });

        rx.wait_for(|s| s.loading).await.unwrap();
        assert!(resolver.state().products.is_empty());

        gate.release();
        let resolved = task.await.unwrap();
        assert!(resolved.is_some());
        assert!(!resolver.state().loading);
    }
}
