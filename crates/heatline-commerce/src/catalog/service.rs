//! Catalog query engine.

use crate::catalog::{PartFilter, PartListQuery, PartRecord};
use crate::error::CommerceError;
use crate::ids::PartId;
use crate::page::{Page, PageRequest};
use crate::store::PartStore;

/// Read-only catalog browse/search surface over a part store.
///
/// Every listing returns the `{count, rows}` page shape with `count`
/// independent of pagination, rows ordered by id ascending.
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: PartStore> Catalog<S> {
    /// Create a catalog over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Paginated, filtered listing from raw query input.
    ///
    /// Absent/non-numeric pagination strings fall back to defaults;
    /// negative numerics are rejected. Unknown filter keys never reach
    /// this method (the query type ignores them).
    pub fn paginate_and_filter(
        &self,
        query: &PartListQuery,
    ) -> Result<Page<PartRecord>, CommerceError> {
        let (filter, page) = query.parse()?;
        self.store.list(&filter, page)
    }

    /// Keyed lookup of a single part.
    pub fn find_one(&self, id: PartId) -> Result<PartRecord, CommerceError> {
        self.store
            .get(id)?
            .ok_or_else(|| CommerceError::PartNotFound(id.to_string()))
    }

    /// Listing restricted to bestseller rows.
    pub fn bestsellers(&self) -> Result<Page<PartRecord>, CommerceError> {
        self.store
            .list(&PartFilter::bestsellers(), PageRequest::default())
    }

    /// Listing restricted to new-arrival rows.
    pub fn newest(&self) -> Result<Page<PartRecord>, CommerceError> {
        self.store.list(&PartFilter::newest(), PageRequest::default())
    }

    /// Case-insensitive substring search on the part name.
    ///
    /// An empty search string matches everything.
    pub fn search_by_string(&self, text: &str) -> Result<Page<PartRecord>, CommerceError> {
        self.store.search(text, PageRequest::default())
    }

    /// Exact-name lookup.
    ///
    /// When several parts share the name, the lowest id wins, so repeated
    /// calls always return the same record.
    pub fn find_one_by_name(&self, name: &str) -> Result<PartRecord, CommerceError> {
        self.store
            .get_by_name(name)?
            .ok_or_else(|| CommerceError::PartNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewPart;
    use crate::store::MemoryPartStore;

    fn new_part(name: &str, boiler: &str, bestsellers: bool, is_new: bool) -> NewPart {
        NewPart {
            boiler_manufacturer: boiler.to_string(),
            price: 100.0,
            parts_manufacturer: "Azure".to_string(),
            vendor_code: format!("vc-{name}"),
            name: name.to_string(),
            description: format!("{name} description"),
            images: r#"["https://img.example/a.jpg"]"#.to_string(),
            in_stock: 3,
            bestsellers,
            is_new,
            popularity: 10,
            compatibility: String::new(),
        }
    }

    fn seeded_catalog() -> Catalog<MemoryPartStore> {
        let store = MemoryPartStore::new();
        store.insert(new_part("Gas valve", "Henry", true, false)).unwrap();
        store.insert(new_part("Burner", "Henry", false, true)).unwrap();
        store.insert(new_part("Pump", "Vaillant", true, false)).unwrap();
        store.insert(new_part("Heat exchanger", "Vaillant", false, false)).unwrap();
        store.insert(new_part("Valve seat", "Henry", false, true)).unwrap();
        Catalog::new(store)
    }

    #[test]
    fn test_paginate_count_ignores_pagination() {
        let catalog = seeded_catalog();
        let query = PartListQuery {
            limit: Some("2".to_string()),
            ..PartListQuery::default()
        };
        let page = catalog.paginate_and_filter(&query).unwrap();
        assert_eq!(page.count, 5);
        assert_eq!(page.rows.len(), 2);
    }

    #[test]
    fn test_rows_are_contiguous_slice_by_id() {
        let catalog = seeded_catalog();
        let first = catalog
            .paginate_and_filter(&PartListQuery {
                limit: Some("2".to_string()),
                offset: Some("0".to_string()),
                ..PartListQuery::default()
            })
            .unwrap();
        let second = catalog
            .paginate_and_filter(&PartListQuery {
                limit: Some("2".to_string()),
                offset: Some("2".to_string()),
                ..PartListQuery::default()
            })
            .unwrap();

        let first_ids: Vec<i64> = first.rows.iter().map(|p| p.id.value()).collect();
        let second_ids: Vec<i64> = second.rows.iter().map(|p| p.id.value()).collect();
        assert_eq!(first_ids, vec![1, 2]);
        assert_eq!(second_ids, vec![3, 4]);
    }

    #[test]
    fn test_filter_by_manufacturer() {
        let catalog = seeded_catalog();
        let query = PartListQuery {
            boiler_manufacturer: Some("Henry".to_string()),
            ..PartListQuery::default()
        };
        let page = catalog.paginate_and_filter(&query).unwrap();
        assert_eq!(page.count, 3);
        assert!(page.rows.iter().all(|p| p.boiler_manufacturer == "Henry"));
    }

    #[test]
    fn test_find_one() {
        let catalog = seeded_catalog();
        let part = catalog.find_one(PartId::new(3)).unwrap();
        assert_eq!(part.id.value(), 3);

        let err = catalog.find_one(PartId::new(999)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_bestsellers_all_flagged() {
        let catalog = seeded_catalog();
        let page = catalog.bestsellers().unwrap();
        assert_eq!(page.count, 2);
        assert!(page.rows.iter().all(|p| p.bestsellers));
    }

    #[test]
    fn test_newest_all_flagged() {
        let catalog = seeded_catalog();
        let page = catalog.newest().unwrap();
        assert_eq!(page.count, 2);
        assert!(page.rows.iter().all(|p| p.is_new));
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = seeded_catalog();
        let page = catalog.search_by_string("VALVE").unwrap();
        assert_eq!(page.count, 2);
        assert!(page
            .rows
            .iter()
            .all(|p| p.name.to_lowercase().contains("valve")));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let catalog = seeded_catalog();
        let page = catalog.search_by_string("").unwrap();
        assert_eq!(page.count, 5);
    }

    #[test]
    fn test_find_one_by_name_deterministic_on_duplicates() {
        let store = MemoryPartStore::new();
        store.insert(new_part("Gas valve", "Henry", false, false)).unwrap();
        store.insert(new_part("Gas valve", "Vaillant", false, false)).unwrap();
        let catalog = Catalog::new(store);

        let first = catalog.find_one_by_name("Gas valve").unwrap();
        let second = catalog.find_one_by_name("Gas valve").unwrap();
        assert_eq!(first.id.value(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_one_by_name_not_found() {
        let catalog = seeded_catalog();
        assert!(catalog.find_one_by_name("Flux capacitor").unwrap_err().is_not_found());
    }
}
