//! Cart ledger.

use crate::cart::{CartLine, CountUpdate, NewCartLine, TotalPriceUpdate};
use crate::error::CommerceError;
use crate::ids::{CartLineId, PartId, UserId};
use crate::store::{CartStore, PartStore, UserLookup};

/// Per-user shopping cart operations.
///
/// The ledger owns no state of its own; it composes a part store (the
/// snapshot source), a cart store (the owned rows), and the user boundary,
/// which is passed in explicitly rather than read from ambient session
/// state.
#[derive(Debug, Clone)]
pub struct CartLedger<P, C, U> {
    parts: P,
    lines: C,
    users: U,
}

impl<P, C, U> CartLedger<P, C, U>
where
    P: PartStore,
    C: CartStore,
    U: UserLookup,
{
    /// Create a ledger over the given stores and user boundary.
    pub fn new(parts: P, lines: C, users: U) -> Self {
        Self { parts, lines, users }
    }

    /// All cart lines for a user, ordered by id ascending.
    pub fn find_all(&self, user_id: UserId) -> Result<Vec<CartLine>, CommerceError> {
        self.lines.list_for_user(user_id)
    }

    /// Add a part to a user's cart.
    ///
    /// Verifies the user resolves, snapshots the part's current
    /// manufacturer/price/stock/name/first-image into a fresh line with
    /// `count = 1` and `total_price = price`. No (user, part) dedup is
    /// performed: repeated adds create duplicate lines, matching the
    /// observed contract. Callers needing exactly-once semantics must
    /// de-duplicate themselves.
    pub fn add(&self, user_id: UserId, part_id: PartId) -> Result<CartLine, CommerceError> {
        if !self.users.contains(user_id) {
            return Err(CommerceError::UserNotFound(user_id.to_string()));
        }
        self.insert_snapshot(user_id, part_id)
    }

    /// Add a part to the cart of the user with the given username.
    ///
    /// Same contract as [`add`](Self::add); the username is resolved
    /// through the user boundary first.
    pub fn add_for_username(
        &self,
        username: &str,
        part_id: PartId,
    ) -> Result<CartLine, CommerceError> {
        let user_id = self
            .users
            .resolve(username)
            .ok_or_else(|| CommerceError::UserNotFound(username.to_string()))?;
        self.insert_snapshot(user_id, part_id)
    }

    fn insert_snapshot(
        &self,
        user_id: UserId,
        part_id: PartId,
    ) -> Result<CartLine, CommerceError> {
        let part = self
            .parts
            .get(part_id)?
            .ok_or_else(|| CommerceError::PartNotFound(part_id.to_string()))?;
        self.lines.insert(NewCartLine::snapshot(user_id, &part))
    }

    /// Set the quantity on a line, returning `{count}`.
    ///
    /// This does NOT recompute `total_price`: the observed contract is a
    /// two-step protocol in which the caller follows up with
    /// [`update_total_price`](Self::update_total_price), and the line is
    /// transiently inconsistent between the two calls. Preserved as-is;
    /// see DESIGN.md.
    pub fn update_count(
        &self,
        new_count: i64,
        line_id: CartLineId,
    ) -> Result<CountUpdate, CommerceError> {
        if new_count < 1 {
            return Err(CommerceError::InvalidQuantity(new_count));
        }
        self.lines.set_count(line_id, new_count)?;
        Ok(CountUpdate { count: new_count })
    }

    /// Set the line total, returning `{total_price}`.
    pub fn update_total_price(
        &self,
        new_total: f64,
        line_id: CartLineId,
    ) -> Result<TotalPriceUpdate, CommerceError> {
        if new_total < 0.0 {
            return Err(CommerceError::InvalidArgument(format!(
                "total_price must not be negative, got {new_total}"
            )));
        }
        self.lines.set_total_price(line_id, new_total)?;
        Ok(TotalPriceUpdate {
            total_price: new_total,
        })
    }

    /// Delete one line by its own id.
    ///
    /// Idempotent: removing a line that does not exist is a no-op and
    /// returns `false`.
    pub fn remove(&self, line_id: CartLineId) -> Result<bool, CommerceError> {
        self.lines.delete(line_id)
    }

    /// Delete every line for the user; returns how many were removed.
    ///
    /// Idempotent: an empty cart yields 0.
    pub fn remove_all(&self, user_id: UserId) -> Result<u64, CommerceError> {
        self.lines.delete_for_user(user_id)
    }
}
