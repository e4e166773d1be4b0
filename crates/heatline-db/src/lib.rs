//! Type-safe SQLite database layer for Heatline.
//!
//! Provides a small, ergonomic API over Spin's SQLite database with typed
//! query results. The catalog and cart tables are plain text/numeric rows,
//! so the value model is deliberately limited to null, integer, real, and
//! text.
//!
//! # Example
//!
//! ```rust,ignore
//! use heatline_db::{Db, params};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct PartRow {
//!     id: i64,
//!     name: String,
//!     price: f64,
//! }
//!
//! let db = Db::open_default()?;
//!
//! db.execute(
//!     "INSERT INTO boiler_parts (name, price) VALUES (?, ?)",
//!     params!["Gas valve", 5105.0],
//! )?;
//!
//! let rows: Vec<PartRow> = db.query_as(
//!     "SELECT id, name, price FROM boiler_parts WHERE price < ?",
//!     params![10000.0],
//! )?;
//! ```

mod db;
mod error;
mod types;

pub use db::Db;
pub use error::DbError;
pub use types::{QueryResult, Row, Value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{params, Db, DbError, QueryResult, Row, Value};
}

/// Create a parameter list for SQL queries.
///
/// # Example
///
/// ```rust,ignore
/// use heatline_db::params;
///
/// let params = params!["Gas valve", 42, 3.14];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
