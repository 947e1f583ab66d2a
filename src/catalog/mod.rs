//! Catalog data: what a product is, where it is cached, and how it is fetched.
//!
//! - [`types`] - `Product` and `Category` as they arrive over the wire
//! - [`repository`] - the shared cache the listing page reads and appends to
//! - [`client`] - single-shot GETs against the catalog API

mod client;
mod repository;
mod types;

pub use client::{CatalogClient, FetchError, DEFAULT_BASE_URL, DEFAULT_PRODUCT_LIMIT};
pub use repository::{CatalogRepository, InMemoryCatalog};
pub use types::{Category, Product, ProductPage};
