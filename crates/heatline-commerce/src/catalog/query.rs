//! Catalog query input and filters.

use crate::catalog::PartRecord;
use crate::error::CommerceError;
use crate::page::PageRequest;
use serde::Deserialize;

/// Raw query-string input for the paginated catalog listing.
///
/// All values arrive as strings; unknown query keys are ignored (serde
/// skips fields this struct does not declare).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartListQuery {
    /// Requested page size, as sent.
    pub limit: Option<String>,
    /// Requested offset, as sent.
    pub offset: Option<String>,
    /// Equality filter on the boiler manufacturer column.
    pub boiler_manufacturer: Option<String>,
    /// Equality filter on the parts manufacturer column.
    pub parts_manufacturer: Option<String>,
}

impl PartListQuery {
    /// Validate the raw input into a filter and a page request.
    pub fn parse(&self) -> Result<(PartFilter, PageRequest), CommerceError> {
        let page = PageRequest::from_raw(self.limit.as_deref(), self.offset.as_deref())?;
        let filter = PartFilter {
            boiler_manufacturer: self.boiler_manufacturer.clone(),
            parts_manufacturer: self.parts_manufacturer.clone(),
            ..PartFilter::default()
        };
        Ok((filter, page))
    }
}

/// A composed filter over part records.
///
/// Equality filters plus a case-insensitive name substring; an empty
/// filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartFilter {
    /// Equality on `boiler_manufacturer`.
    pub boiler_manufacturer: Option<String>,
    /// Equality on `parts_manufacturer`.
    pub parts_manufacturer: Option<String>,
    /// Restrict to bestseller rows.
    pub bestsellers: Option<bool>,
    /// Restrict to new-arrival rows.
    pub is_new: Option<bool>,
    /// Case-insensitive substring match on `name`.
    pub name_contains: Option<String>,
}

impl PartFilter {
    /// Filter for the bestsellers listing.
    pub fn bestsellers() -> Self {
        Self {
            bestsellers: Some(true),
            ..Self::default()
        }
    }

    /// Filter for the new-arrivals listing.
    pub fn newest() -> Self {
        Self {
            is_new: Some(true),
            ..Self::default()
        }
    }

    /// Filter for a substring search on the part name.
    ///
    /// An empty needle matches everything, consistent with no-filter
    /// semantics.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            name_contains: Some(text.into()),
            ..Self::default()
        }
    }

    /// Check if no criteria are set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, part: &PartRecord) -> bool {
        if let Some(bm) = &self.boiler_manufacturer {
            if &part.boiler_manufacturer != bm {
                return false;
            }
        }
        if let Some(pm) = &self.parts_manufacturer {
            if &part.parts_manufacturer != pm {
                return false;
            }
        }
        if let Some(flag) = self.bestsellers {
            if part.bestsellers != flag {
                return false;
            }
        }
        if let Some(flag) = self.is_new {
            if part.is_new != flag {
                return false;
            }
        }
        if let Some(needle) = &self.name_contains {
            if !part
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Build the SQL WHERE clause and its parameter list.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(bm) = &self.boiler_manufacturer {
            clauses.push("boiler_manufacturer = ?".to_string());
            values.push(bm.clone());
        }
        if let Some(pm) = &self.parts_manufacturer {
            clauses.push("parts_manufacturer = ?".to_string());
            values.push(pm.clone());
        }
        if let Some(flag) = self.bestsellers {
            clauses.push(format!("bestsellers = {}", flag as i64));
        }
        if let Some(flag) = self.is_new {
            clauses.push(format!("new = {}", flag as i64));
        }
        if let Some(needle) = &self.name_contains {
            clauses.push("LOWER(name) LIKE ?".to_string());
            values.push(format!("%{}%", needle.to_lowercase()));
        }

        if clauses.is_empty() {
            return ("1=1".to_string(), vec![]);
        }

        (clauses.join(" AND "), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PartId;

    fn part(name: &str, boiler: &str, bestsellers: bool, is_new: bool) -> PartRecord {
        PartRecord {
            id: PartId::new(1),
            boiler_manufacturer: boiler.to_string(),
            price: 100.0,
            parts_manufacturer: "Azure".to_string(),
            vendor_code: "vc".to_string(),
            name: name.to_string(),
            description: String::new(),
            images: "[]".to_string(),
            in_stock: 1,
            bestsellers,
            is_new,
            popularity: 0,
            compatibility: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_parse_defaults_and_filters() {
        let query = PartListQuery {
            limit: Some("5".to_string()),
            offset: None,
            boiler_manufacturer: Some("Henry".to_string()),
            parts_manufacturer: None,
        };
        let (filter, page) = query.parse().unwrap();
        assert_eq!(page.limit, 5);
        assert_eq!(page.offset, 0);
        assert_eq!(filter.boiler_manufacturer.as_deref(), Some("Henry"));
        assert!(filter.parts_manufacturer.is_none());
    }

    #[test]
    fn test_unknown_query_keys_are_ignored() {
        let json = serde_json::json!({
            "limit": "10",
            "offset": "0",
            "priceFrom": "100",
            "sortBy": "cheap",
        });
        let query: PartListQuery = serde_json::from_value(json).unwrap();
        assert_eq!(query.limit.as_deref(), Some("10"));
        let (filter, _) = query.parse().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PartFilter::default();
        assert!(filter.matches(&part("Gas valve", "Henry", false, false)));
    }

    #[test]
    fn test_equality_filters() {
        let mut filter = PartFilter::default();
        filter.boiler_manufacturer = Some("Henry".to_string());
        assert!(filter.matches(&part("x", "Henry", false, false)));
        assert!(!filter.matches(&part("x", "Vaillant", false, false)));
    }

    #[test]
    fn test_flag_filters() {
        assert!(PartFilter::bestsellers().matches(&part("x", "h", true, false)));
        assert!(!PartFilter::bestsellers().matches(&part("x", "h", false, false)));
        assert!(PartFilter::newest().matches(&part("x", "h", false, true)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = PartFilter::search("GAS");
        assert!(filter.matches(&part("Gas valve", "h", false, false)));
        assert!(!filter.matches(&part("Burner", "h", false, false)));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let filter = PartFilter::search("");
        assert!(filter.matches(&part("anything", "h", false, false)));
    }

    #[test]
    fn test_where_clause_empty() {
        let (clause, values) = PartFilter::default().where_clause();
        assert_eq!(clause, "1=1");
        assert!(values.is_empty());
    }

    #[test]
    fn test_where_clause_composition() {
        let filter = PartFilter {
            boiler_manufacturer: Some("Henry".to_string()),
            bestsellers: Some(true),
            name_contains: Some("Valve".to_string()),
            ..PartFilter::default()
        };
        let (clause, values) = filter.where_clause();
        assert!(clause.contains("boiler_manufacturer = ?"));
        assert!(clause.contains("bestsellers = 1"));
        assert!(clause.contains("LOWER(name) LIKE ?"));
        assert_eq!(values, vec!["Henry".to_string(), "%valve%".to_string()]);
    }
}
