//! Catalog side of the offer widget.
//!
//! Fetches one bounded page of catalog products from the host and selects the
//! single configured offer product by handle.

pub mod in_memory;
pub mod product;
pub mod resolver;
pub mod source;

pub use in_memory::{CatalogGate, StaticCatalog};
pub use product::{CatalogProduct, ProductVariant};
pub use resolver::{CatalogResolver, ResolverState};
pub use source::{CatalogError, CatalogSource, PRODUCTS_QUERY};
