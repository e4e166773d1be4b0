//! Catalog and shopping-cart domain logic for Heatline.
//!
//! This crate is the core of the boiler spare-parts storefront backend:
//!
//! - **Catalog**: part records, pagination/filter query engine, search
//! - **Cart**: per-user cart lines with snapshot pricing
//! - **Store**: repository traits with in-memory and SQL-backed variants
//! - **Api**: request/response shapes for the HTTP boundary
//!
//! # Example
//!
//! ```rust,ignore
//! use heatline_commerce::prelude::*;
//!
//! let parts = MemoryPartStore::new();
//! parts.insert(gas_valve)?;
//!
//! let catalog = Catalog::new(parts.clone());
//! let page = catalog.search_by_string("valve")?;
//! println!("{} matches", page.count);
//!
//! let ledger = CartLedger::new(parts, MemoryCartStore::new(), users);
//! let line = ledger.add(user_id, part_id)?;
//! assert_eq!(line.count, 1);
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod page;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use page::{Page, PageRequest};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::page::{Page, PageRequest};

    // Catalog
    pub use crate::catalog::{Catalog, NewPart, PartFilter, PartListQuery, PartRecord};

    // Cart
    pub use crate::cart::{CartLedger, CartLine, CountUpdate, NewCartLine, TotalPriceUpdate};

    // Store
    pub use crate::store::{
        CartStore, MemoryCartStore, MemoryPartStore, PartStore, SqlCartStore, SqlPartStore,
        UserLookup,
    };
}
