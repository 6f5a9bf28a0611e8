use std::sync::Arc;

use anyhow::Context;

use offerkit_cart::{CartLine, InMemoryCart};
use offerkit_catalog::{CatalogProduct, ProductVariant, StaticCatalog};
use offerkit_core::{Amount, OfferConfig, ProductId, VariantId};
use offerkit_widget::{OfferView, OfferWidget, SymbolCurrency};

fn demo_catalog(target_handle: &str) -> anyhow::Result<Vec<CatalogProduct>> {
    let product = |handle: &str, title: &str, price: &str| -> anyhow::Result<CatalogProduct> {
        Ok(CatalogProduct {
            id: ProductId::new(format!("gid://shopify/Product/{handle}")),
            title: title.to_string(),
            handle: handle.to_string(),
            description: Some(format!("{title} for your order")),
            image_url: None,
            variant: ProductVariant {
                id: VariantId::new(format!("gid://shopify/ProductVariant/{handle}")),
                price: Amount::parse(price)?,
            },
        })
    };

    Ok(vec![
        product("gift-wrap", "Gift Wrap", "4.00")?,
        product(target_handle, "Shipping Insurance", "2.50")?,
        product("sticker-pack", "Sticker Pack", "1")?,
    ])
}

fn print_view(label: &str, view: &OfferView) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(view).context("serialize view")?;
    println!("--- {label}\n{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    offerkit_observability::init();

    let config = OfferConfig::from_env().context("load OFFERKIT_* configuration")?;
    tracing::info!(handle = %config.target_handle, page_size = config.page_size, "starting demo");

    let catalog = Arc::new(StaticCatalog::new(demo_catalog(&config.target_handle)?));
    let cart = Arc::new(InMemoryCart::new(vec![CartLine::new(
        "gid://shopify/CartLine/1",
        "gid://shopify/ProductVariant/t-shirt",
        1,
    )]));

    let widget = OfferWidget::new(
        &config,
        catalog,
        cart.clone(),
        cart.lines(),
        Arc::new(SymbolCurrency::new("$")),
    );

    widget.mount().await;
    print_view("mounted", &widget.render())?;

    widget.on_toggle(true).await;
    print_view("insurance added", &widget.render())?;

    cart.fail_next("Cart is locked");
    widget.on_toggle(false).await;
    print_view("removal rejected", &widget.render())?;

    widget.on_toggle(false).await;
    print_view("insurance removed", &widget.render())?;

    Ok(())
}
