//! Widget configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OfferError;

/// Handle of the catalog product the widget offers.
pub const DEFAULT_TARGET_HANDLE: &str = "shipping-insurance";

/// Number of catalog products fetched when resolving the offer.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// How long a failure notice stays visible.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Image shown when the offer product has none.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://cdn.shopify.com/s/files/1/0533/2089/files/placeholder-images-image_medium.png?format=webp&v=1530129081";

/// Offer widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferConfig {
    /// Handle of the product to offer (exact match).
    pub target_handle: String,
    /// Catalog page size; products beyond the first page are never considered.
    pub page_size: u32,
    /// Visibility window of the failure notice.
    pub notice_duration: Duration,
    pub placeholder_image_url: String,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            target_handle: DEFAULT_TARGET_HANDLE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            notice_duration: DEFAULT_NOTICE_DURATION,
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

impl OfferConfig {
    pub fn with_target_handle(mut self, handle: impl Into<String>) -> Self {
        self.target_handle = handle.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub fn with_placeholder_image_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image_url = url.into();
        self
    }

    /// Load configuration from `OFFERKIT_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, OfferError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`OfferConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OfferError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(handle) = lookup("OFFERKIT_TARGET_HANDLE") {
            config.target_handle = handle;
        }
        if let Some(raw) = lookup("OFFERKIT_PAGE_SIZE") {
            config.page_size = raw
                .trim()
                .parse()
                .map_err(|e| OfferError::config(format!("OFFERKIT_PAGE_SIZE: {e}")))?;
        }
        if let Some(raw) = lookup("OFFERKIT_NOTICE_MS") {
            let ms: u64 = raw
                .trim()
                .parse()
                .map_err(|e| OfferError::config(format!("OFFERKIT_NOTICE_MS: {e}")))?;
            config.notice_duration = Duration::from_millis(ms);
        }
        if let Some(url) = lookup("OFFERKIT_PLACEHOLDER_IMAGE") {
            config.placeholder_image_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), OfferError> {
        if self.target_handle.trim().is_empty() {
            return Err(OfferError::config("target handle must not be empty"));
        }
        if self.page_size == 0 {
            return Err(OfferError::config("page size must be at least 1"));
        }
        Ok(())
    }
}
