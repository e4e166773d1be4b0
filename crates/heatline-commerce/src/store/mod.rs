//! Store capability traits and their variants.
//!
//! The catalog and cart own plain value structs; persistence sits behind
//! these narrow repository traits so call sites never see an active-record
//! surface. Two variants exist: SQL-backed for the Spin runtime and
//! in-memory for tests.

mod memory;
mod sql;

pub use memory::{MemoryCartStore, MemoryPartStore};
pub use sql::{SqlCartStore, SqlPartStore};

use crate::cart::{CartLine, NewCartLine};
use crate::catalog::{NewPart, PartFilter, PartRecord};
use crate::error::CommerceError;
use crate::ids::{CartLineId, PartId, UserId};
use crate::page::{Page, PageRequest};

/// Persisted catalog rows.
///
/// The browse surface is read-only; seeding goes through `insert`, and
/// there is deliberately no update/delete.
pub trait PartStore {
    /// Keyed lookup.
    fn get(&self, id: PartId) -> Result<Option<PartRecord>, CommerceError>;

    /// Exact-name lookup; the lowest id wins when names collide.
    fn get_by_name(&self, name: &str) -> Result<Option<PartRecord>, CommerceError>;

    /// Filtered, paginated scan ordered by id ascending.
    ///
    /// The returned `count` is the total number of matches ignoring
    /// pagination.
    fn list(
        &self,
        filter: &PartFilter,
        page: PageRequest,
    ) -> Result<Page<PartRecord>, CommerceError>;

    /// Case-insensitive substring search on the part name.
    fn search(&self, text: &str, page: PageRequest) -> Result<Page<PartRecord>, CommerceError> {
        self.list(&PartFilter::search(text), page)
    }

    /// Insert a new part; the store assigns id and timestamps.
    fn insert(&self, part: NewPart) -> Result<PartRecord, CommerceError>;
}

/// Persisted cart lines.
pub trait CartStore {
    /// All lines for a user, ordered by id ascending.
    fn list_for_user(&self, user: UserId) -> Result<Vec<CartLine>, CommerceError>;

    /// Keyed lookup.
    fn get(&self, id: CartLineId) -> Result<Option<CartLine>, CommerceError>;

    /// Insert a new line; the store assigns id and timestamps.
    fn insert(&self, line: NewCartLine) -> Result<CartLine, CommerceError>;

    /// Set the quantity on a line. Fails with `CartLineNotFound` when the
    /// line does not exist.
    fn set_count(&self, id: CartLineId, count: i64) -> Result<(), CommerceError>;

    /// Set the total on a line. Fails with `CartLineNotFound` when the
    /// line does not exist.
    fn set_total_price(&self, id: CartLineId, total: f64) -> Result<(), CommerceError>;

    /// Delete one line; returns whether a line was actually removed.
    fn delete(&self, id: CartLineId) -> Result<bool, CommerceError>;

    /// Delete every line for a user; returns how many were removed.
    fn delete_for_user(&self, user: UserId) -> Result<u64, CommerceError>;
}

/// The external Session/User boundary, as seen by the cart ledger.
///
/// Implemented by the auth crate's user registry; the ledger only needs
/// to confirm an identity exists and to resolve a username.
pub trait UserLookup {
    /// Check whether the user id resolves to a known user.
    fn contains(&self, id: UserId) -> bool;

    /// Resolve a username to its user id.
    fn resolve(&self, username: &str) -> Option<UserId>;
}
