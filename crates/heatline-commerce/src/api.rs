//! Wire shapes for the HTTP boundary.
//!
//! Routing, guards, and cookies live outside this crate; what is fixed
//! here is the JSON the endpoints exchange. List endpoints answer with
//! [`Page`](crate::page::Page), single-part endpoints with
//! [`PartRecord`](crate::catalog::PartRecord), and the cart endpoints use
//! the bodies below.

use serde::{Deserialize, Serialize};

/// Body of `POST /boiler-parts/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// Substring to match against part names.
    pub search: String,
}

/// Body of `POST /boiler-parts/name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FindByNameRequest {
    /// Exact part name to look up.
    pub name: String,
}

/// Body of `POST /shopping-cart/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddToCartRequest {
    /// Username of the cart owner.
    pub username: String,
    /// Part to add.
    #[serde(rename = "partId")]
    pub part_id: i64,
}

/// Body of `PATCH /shopping-cart/count/:id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCountRequest {
    /// New quantity for the line.
    pub count: i64,
}

/// Body of `PATCH /shopping-cart/total-price/:id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UpdateTotalPriceRequest {
    /// New total for the line.
    pub total_price: f64,
}
