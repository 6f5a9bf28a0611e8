//! In-memory catalog for tests/dev.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::product::{CatalogProduct, to_wire};
use crate::source::{CatalogError, CatalogSource};

enum Reply {
    Products(Vec<CatalogProduct>),
    Raw(serde_json::Value),
    Fail(CatalogError),
}

/// Catalog source answering from a fixed product list.
///
/// - Honors the `first` variable like the storefront API
/// - Records every variables object it receives
/// - Can hold queries until released, to observe in-flight state
pub struct StaticCatalog {
    reply: Reply,
    calls: Mutex<Vec<serde_json::Value>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

/// Releases a query held by [`StaticCatalog::hold`].
pub struct CatalogGate(Arc<Notify>);

impl CatalogGate {
    pub fn release(&self) {
        self.0.notify_one();
    }
}

impl StaticCatalog {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self::with_reply(Reply::Products(products))
    }

    /// Answer every query with the given raw response body.
    pub fn with_response(body: serde_json::Value) -> Self {
        Self::with_reply(Reply::Raw(body))
    }

    pub fn failing(error: CatalogError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    /// Make the next query wait until the returned gate is released.
    pub fn hold(&self) -> CatalogGate {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner) = Some(notify.clone());
        CatalogGate(notify)
    }

    pub fn recorded_variables(&self) -> Vec<serde_json::Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn query(
        &self,
        _query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, CatalogError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(variables.clone());

        let gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match &self.reply {
            Reply::Products(products) => {
                let first = variables
                    .get("first")
                    .and_then(|v| v.as_u64())
                    .map(|n| n as usize)
                    .unwrap_or(products.len());
                let nodes: Vec<serde_json::Value> =
                    products.iter().take(first).map(to_wire).collect();
                Ok(serde_json::json!({ "data": { "products": { "nodes": nodes } } }))
            }
            Reply::Raw(body) => Ok(body.clone()),
            Reply::Fail(error) => Err(error.clone()),
        }
    }
}
