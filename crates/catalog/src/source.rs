//! Host seam for catalog queries.

use async_trait::async_trait;
use thiserror::Error;

/// Products query sent to the host storefront API.
pub const PRODUCTS_QUERY: &str = r#"query ($first: Int!) {
  products(first: $first) {
    nodes {
      id
      title
      handle
      description
      images(first: 1) {
        nodes {
          url
        }
      }
      variants(first: 1) {
        nodes {
          id
          price {
            amount
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The host could not complete the request (network, auth, ...).
    #[error("catalog transport error: {0}")]
    Transport(String),
    /// The query ran but the API reported errors.
    #[error("catalog query failed: {0}")]
    GraphQl(String),
    /// The response did not have the expected shape.
    #[error("catalog response malformed: {0}")]
    Decode(String),
}

/// Storefront query capability provided by the host runtime.
///
/// The host owns transport and authentication; implementations return the raw
/// JSON response body.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, CatalogError>;
}
