//! Cart line types.

use crate::catalog::PartRecord;
use crate::ids::{CartLineId, PartId, UserId};
use serde::{Deserialize, Serialize};

/// One line item in a user's shopping cart.
///
/// The part attributes are a snapshot taken when the line was created; a
/// later change to the part record does not flow into existing lines.
/// `total_price` is maintained by the caller protocol (see
/// [`CartLedger::update_count`](crate::cart::CartLedger::update_count)),
/// not derived by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: CartLineId,
    /// Owning user.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Referenced part.
    #[serde(rename = "partId")]
    pub part_id: PartId,
    /// Snapshot: boiler manufacturer at add time.
    pub boiler_manufacturer: String,
    /// Snapshot: parts manufacturer at add time.
    pub parts_manufacturer: String,
    /// Snapshot: unit price at add time.
    pub price: f64,
    /// Snapshot: stock level at add time.
    pub in_stock: i64,
    /// Snapshot: first image URL at add time.
    pub image: String,
    /// Snapshot: part name at add time.
    pub name: String,
    /// Quantity, positive, defaults to 1.
    pub count: i64,
    /// Line total as last set by the caller.
    pub total_price: f64,
    /// Unix timestamp of creation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Unix timestamp of last update.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// Insertion shape for a cart line; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    pub user_id: UserId,
    pub part_id: PartId,
    pub boiler_manufacturer: String,
    pub parts_manufacturer: String,
    pub price: f64,
    pub in_stock: i64,
    pub image: String,
    pub name: String,
    pub count: i64,
    pub total_price: f64,
}

impl NewCartLine {
    /// Snapshot a part into a fresh line for the given user.
    ///
    /// `count` starts at 1 and `total_price` at the unit price.
    pub fn snapshot(user_id: UserId, part: &PartRecord) -> Self {
        Self {
            user_id,
            part_id: part.id,
            boiler_manufacturer: part.boiler_manufacturer.clone(),
            parts_manufacturer: part.parts_manufacturer.clone(),
            price: part.price,
            in_stock: part.in_stock,
            image: part.first_image().unwrap_or_default(),
            name: part.name.clone(),
            count: 1,
            total_price: part.price,
        }
    }

    /// Materialize a line once the store has assigned an id.
    pub fn into_line(self, id: CartLineId, now: i64) -> CartLine {
        CartLine {
            id,
            user_id: self.user_id,
            part_id: self.part_id,
            boiler_manufacturer: self.boiler_manufacturer,
            parts_manufacturer: self.parts_manufacturer,
            price: self.price,
            in_stock: self.in_stock,
            image: self.image,
            name: self.name,
            count: self.count,
            total_price: self.total_price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Result shape of a count update: `{count}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountUpdate {
    /// The count as stored.
    pub count: i64,
}

/// Result shape of a total-price update: `{total_price}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TotalPriceUpdate {
    /// The total as stored.
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_part() -> PartRecord {
        PartRecord {
            id: PartId::new(3),
            boiler_manufacturer: "Henry".to_string(),
            price: 5105.0,
            parts_manufacturer: "Azure".to_string(),
            vendor_code: "vc".to_string(),
            name: "Gas valve".to_string(),
            description: String::new(),
            images: r#"["https://img.example/1.jpg","https://img.example/2.jpg"]"#.to_string(),
            in_stock: 4,
            bestsellers: false,
            is_new: false,
            popularity: 0,
            compatibility: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_snapshot_copies_part_fields() {
        let new_line = NewCartLine::snapshot(UserId::new(1), &sample_part());
        assert_eq!(new_line.part_id, PartId::new(3));
        assert_eq!(new_line.price, 5105.0);
        assert_eq!(new_line.name, "Gas valve");
        assert_eq!(new_line.image, "https://img.example/1.jpg");
        assert_eq!(new_line.count, 1);
        assert_eq!(new_line.total_price, 5105.0);
    }

    #[test]
    fn test_wire_shape_field_names() {
        let line = NewCartLine::snapshot(UserId::new(1), &sample_part())
            .into_line(CartLineId::new(1), 1_684_000_000);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["partId"], 3);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("user_id").is_none());
        assert_eq!(json["total_price"], 5105.0);
    }
}
