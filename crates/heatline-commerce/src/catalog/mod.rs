//! Catalog module.
//!
//! Part records plus the pagination/filter/search query engine.

mod part;
mod query;
mod service;

pub use part::{NewPart, PartRecord};
pub use query::{PartFilter, PartListQuery};
pub use service::Catalog;
