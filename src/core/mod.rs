//! Catalog service and output rendering.

pub mod render;
pub mod service;

pub use service::CatalogService;
