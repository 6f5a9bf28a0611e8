//! Offer widget: resolver + cart sync controller + view derivation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use offerkit_cart::{CartApi, CartLines, CartSyncController, derive_offer_state};
use offerkit_catalog::{CatalogResolver, CatalogSource, ResolverState};
use offerkit_core::{InstanceId, OfferConfig};

use crate::localization::Localization;
use crate::view::{ERROR_BANNER_TEXT, OfferCard, OfferView, headline};

/// One mounted widget instance.
///
/// Dropping it tears down the notice timer.
pub struct OfferWidget {
    instance: InstanceId,
    placeholder_image_url: String,
    mounted: AtomicBool,
    resolver: CatalogResolver,
    controller: CartSyncController,
    i18n: Arc<dyn Localization>,
}

impl OfferWidget {
    pub fn new(
        config: &OfferConfig,
        catalog: Arc<dyn CatalogSource>,
        cart_api: Arc<dyn CartApi>,
        lines: CartLines,
        i18n: Arc<dyn Localization>,
    ) -> Self {
        let instance = InstanceId::new();
        Self {
            instance,
            placeholder_image_url: config.placeholder_image_url.clone(),
            mounted: AtomicBool::new(false),
            resolver: CatalogResolver::new(catalog, config),
            controller: CartSyncController::new(instance, cart_api, lines, config.notice_duration),
            i18n,
        }
    }

    pub fn resolver(&self) -> &CatalogResolver {
        &self.resolver
    }

    pub fn controller(&self) -> &CartSyncController {
        &self.controller
    }

    /// Resolve the offer product. Only the first call queries the catalog.
    pub async fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!(instance = %self.instance, "already mounted; catalog not queried again");
            return;
        }
        info!(instance = %self.instance, "mounting offer widget");
        self.resolver.resolve().await;
    }

    /// Derive the view from the latest resolver state, cart lines and flags.
    pub fn render(&self) -> OfferView {
        let resolved: ResolverState = self.resolver.state();
        if resolved.loading {
            return OfferView::loading();
        }
        let Some(product) = resolved.offer_product() else {
            return OfferView::Hidden;
        };

        let state = self
            .controller
            .lines()
            .with(|lines| derive_offer_state(product, lines));
        let flags = self.controller.flags();
        let price = self.i18n.format_currency(&product.variant.price);

        OfferView::Offer(OfferCard {
            headline: headline(&price),
            title: product.title.clone(),
            description: product.description.clone(),
            image_url: product
                .image_url
                .clone()
                .unwrap_or_else(|| self.placeholder_image_url.clone()),
            price,
            checked: state.is_present(),
            disabled: flags.processing,
            error_banner: flags.show_error.then(|| ERROR_BANNER_TEXT.to_string()),
        })
    }

    /// Checkbox change from the shopper.
    pub async fn on_toggle(&self, checked: bool) {
        let variant_id = match self.resolver.state().offer_product() {
            Some(product) => product.variant_id().clone(),
            None => {
                debug!(instance = %self.instance, "toggle ignored; no offer product");
                return;
            }
        };

        let outcome = self.controller.toggle(checked, &variant_id).await;
        debug!(instance = %self.instance, checked, ?outcome, "toggle settled");
    }
}
