//! In-memory store variants.
//!
//! Shared-state stores for tests and local development. Clones share the
//! same underlying rows, so a catalog and a ledger built over clones see
//! each other's writes.

use crate::cart::{CartLine, NewCartLine};
use crate::catalog::{NewPart, PartFilter, PartRecord};
use crate::error::CommerceError;
use crate::ids::{CartLineId, PartId, UserId};
use crate::page::{Page, PageRequest};
use crate::store::{CartStore, PartStore};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory part store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPartStore {
    inner: Arc<PartsInner>,
}

#[derive(Debug, Default)]
struct PartsInner {
    rows: RwLock<Vec<PartRecord>>,
    next_id: AtomicI64,
}

impl MemoryPartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the price of a stored part.
    ///
    /// Maintenance/seed helper; the browse surface itself never mutates
    /// parts, which is why this lives on the variant and not the trait.
    pub fn set_price(&self, id: PartId, price: f64) -> Result<(), CommerceError> {
        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        let part = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CommerceError::PartNotFound(id.to_string()))?;
        part.price = price;
        part.updated_at = current_timestamp();
        Ok(())
    }
}

impl PartStore for MemoryPartStore {
    fn get(&self, id: PartId) -> Result<Option<PartRecord>, CommerceError> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    fn get_by_name(&self, name: &str) -> Result<Option<PartRecord>, CommerceError> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .iter()
            .filter(|p| p.name == name)
            .min_by_key(|p| p.id)
            .cloned())
    }

    fn list(
        &self,
        filter: &PartFilter,
        page: PageRequest,
    ) -> Result<Page<PartRecord>, CommerceError> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        let mut matches: Vec<PartRecord> =
            rows.iter().filter(|p| filter.matches(p)).cloned().collect();
        matches.sort_by_key(|p| p.id);

        let count = matches.len() as i64;
        let slice = matches
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(Page::new(count, slice))
    }

    fn insert(&self, part: NewPart) -> Result<PartRecord, CommerceError> {
        let id = PartId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = part.into_record(id, current_timestamp());
        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        rows.push(record.clone());
        Ok(record)
    }
}

/// In-memory cart store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    inner: Arc<CartInner>,
}

#[derive(Debug, Default)]
struct CartInner {
    rows: RwLock<Vec<CartLine>>,
    next_id: AtomicI64,
}

impl MemoryCartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_line<R>(
        &self,
        id: CartLineId,
        apply: impl FnOnce(&mut CartLine) -> R,
    ) -> Result<R, CommerceError> {
        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        let line = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CommerceError::CartLineNotFound(id.to_string()))?;
        let result = apply(line);
        line.updated_at = current_timestamp();
        Ok(result)
    }
}

impl CartStore for MemoryCartStore {
    fn list_for_user(&self, user: UserId) -> Result<Vec<CartLine>, CommerceError> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        let mut lines: Vec<CartLine> =
            rows.iter().filter(|l| l.user_id == user).cloned().collect();
        lines.sort_by_key(|l| l.id);
        Ok(lines)
    }

    fn get(&self, id: CartLineId) -> Result<Option<CartLine>, CommerceError> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().find(|l| l.id == id).cloned())
    }

    fn insert(&self, line: NewCartLine) -> Result<CartLine, CommerceError> {
        let id = CartLineId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let line = line.into_line(id, current_timestamp());
        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        rows.push(line.clone());
        Ok(line)
    }

    fn set_count(&self, id: CartLineId, count: i64) -> Result<(), CommerceError> {
        self.with_line(id, |line| line.count = count)
    }

    fn set_total_price(&self, id: CartLineId, total: f64) -> Result<(), CommerceError> {
        self.with_line(id, |line| line.total_price = total)
    }

    fn delete(&self, id: CartLineId) -> Result<bool, CommerceError> {
        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        let before = rows.len();
        rows.retain(|l| l.id != id);
        Ok(rows.len() < before)
    }

    fn delete_for_user(&self, user: UserId) -> Result<u64, CommerceError> {
        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        let before = rows.len();
        rows.retain(|l| l.user_id != user);
        Ok((before - rows.len()) as u64)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_part(name: &str) -> NewPart {
        NewPart {
            boiler_manufacturer: "Henry".to_string(),
            price: 100.0,
            parts_manufacturer: "Azure".to_string(),
            vendor_code: format!("vc-{name}"),
            name: name.to_string(),
            description: String::new(),
            images: "[]".to_string(),
            in_stock: 1,
            bestsellers: false,
            is_new: false,
            popularity: 0,
            compatibility: String::new(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = MemoryPartStore::new();
        let a = store.insert(new_part("a")).unwrap();
        let b = store.insert(new_part("b")).unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryPartStore::new();
        let clone = store.clone();
        store.insert(new_part("a")).unwrap();
        assert!(clone.get(PartId::new(1)).unwrap().is_some());
    }

    #[test]
    fn test_list_slices_after_count() {
        let store = MemoryPartStore::new();
        for i in 0..7 {
            store.insert(new_part(&format!("p{i}"))).unwrap();
        }
        let page = store
            .list(
                &PartFilter::default(),
                PageRequest { limit: 3, offset: 5 },
            )
            .unwrap();
        assert_eq!(page.count, 7);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].id.value(), 6);
    }

    #[test]
    fn test_cart_store_round_trip() {
        let parts = MemoryPartStore::new();
        let part = parts.insert(new_part("a")).unwrap();
        let carts = MemoryCartStore::new();

        let line = carts
            .insert(NewCartLine::snapshot(UserId::new(1), &part))
            .unwrap();
        assert_eq!(line.id.value(), 1);
        assert_eq!(carts.list_for_user(UserId::new(1)).unwrap().len(), 1);

        carts.set_count(line.id, 4).unwrap();
        assert_eq!(carts.get(line.id).unwrap().unwrap().count, 4);

        assert!(carts.delete(line.id).unwrap());
        assert!(carts.get(line.id).unwrap().is_none());
    }

    #[test]
    fn test_cart_store_missing_line_errors() {
        let carts = MemoryCartStore::new();
        assert!(carts.set_count(CartLineId::new(9), 1).is_err());
        assert!(carts.set_total_price(CartLineId::new(9), 1.0).is_err());
    }
}
