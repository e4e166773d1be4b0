//! Part record types.

use crate::ids::PartId;
use serde::{Deserialize, Serialize};

/// A catalog entry for a boiler spare part.
///
/// Field names mirror the persisted row shape; `images` is kept as the
/// JSON-encoded array string it is stored as.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartRecord {
    /// Unique part identifier.
    pub id: PartId,
    /// Manufacturer of the boiler this part fits.
    pub boiler_manufacturer: String,
    /// Price in store currency.
    pub price: f64,
    /// Manufacturer of the part itself.
    pub parts_manufacturer: String,
    /// Vendor article code.
    pub vendor_code: String,
    /// Part name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// JSON-encoded array of image URLs.
    pub images: String,
    /// Units currently in stock.
    pub in_stock: i64,
    /// Bestseller flag.
    pub bestsellers: bool,
    /// New-arrival flag.
    #[serde(rename = "new")]
    pub is_new: bool,
    /// Popularity ranking hint.
    pub popularity: i64,
    /// Compatibility notes.
    pub compatibility: String,
    /// Unix timestamp of creation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Unix timestamp of last update.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl PartRecord {
    /// Parse the serialized image list.
    ///
    /// A malformed or empty `images` column yields an empty list rather
    /// than an error; browse paths should not fail on bad seed data.
    pub fn image_urls(&self) -> Vec<String> {
        serde_json::from_str(&self.images).unwrap_or_default()
    }

    /// First image URL, if any.
    pub fn first_image(&self) -> Option<String> {
        self.image_urls().into_iter().next()
    }

    /// Check if the part has units in stock.
    pub fn is_in_stock(&self) -> bool {
        self.in_stock > 0
    }
}

/// Insertion shape for a part; the store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPart {
    pub boiler_manufacturer: String,
    pub price: f64,
    pub parts_manufacturer: String,
    pub vendor_code: String,
    pub name: String,
    pub description: String,
    /// JSON-encoded array of image URLs.
    pub images: String,
    pub in_stock: i64,
    pub bestsellers: bool,
    #[serde(rename = "new")]
    pub is_new: bool,
    pub popularity: i64,
    pub compatibility: String,
}

impl NewPart {
    /// Materialize a record once the store has assigned an id.
    pub fn into_record(self, id: PartId, now: i64) -> PartRecord {
        PartRecord {
            id,
            boiler_manufacturer: self.boiler_manufacturer,
            price: self.price,
            parts_manufacturer: self.parts_manufacturer,
            vendor_code: self.vendor_code,
            name: self.name,
            description: self.description,
            images: self.images,
            in_stock: self.in_stock,
            bestsellers: self.bestsellers,
            is_new: self.is_new,
            popularity: self.popularity,
            compatibility: self.compatibility,
            created_at: now,
            updated_at: now,
        }
    }
}
