//! SQL-backed store variants.
//!
//! Parameterized statements over the `boiler_parts` and `cart` tables.
//! SQLite has no boolean storage class, so flag columns travel through
//! integer-typed row structs before becoming domain records.

use crate::cart::{CartLine, NewCartLine};
use crate::catalog::{NewPart, PartFilter, PartRecord};
use crate::error::CommerceError;
use crate::ids::{CartLineId, PartId, UserId};
use crate::page::{Page, PageRequest};
use crate::store::{CartStore, PartStore};
use heatline_db::{params, Db, Value};
use serde::Deserialize;

/// SQL-backed part store.
pub struct SqlPartStore {
    db: Db,
}

impl SqlPartStore {
    /// Create a store over an open database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Open the default database.
    pub fn open_default() -> Result<Self, CommerceError> {
        Ok(Self::new(Db::open_default()?))
    }

    /// Create the `boiler_parts` table if it does not exist.
    pub fn ensure_schema(&self) -> Result<(), CommerceError> {
        self.db.execute(
            "CREATE TABLE IF NOT EXISTS boiler_parts (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             boiler_manufacturer TEXT NOT NULL, \
             price REAL NOT NULL, \
             parts_manufacturer TEXT NOT NULL, \
             vendor_code TEXT NOT NULL, \
             name TEXT NOT NULL, \
             description TEXT NOT NULL, \
             images TEXT NOT NULL, \
             in_stock INTEGER NOT NULL, \
             bestsellers INTEGER NOT NULL, \
             new INTEGER NOT NULL, \
             popularity INTEGER NOT NULL, \
             compatibility TEXT NOT NULL, \
             createdAt INTEGER NOT NULL, \
             updatedAt INTEGER NOT NULL)",
            params![],
        )?;
        Ok(())
    }
}

impl PartStore for SqlPartStore {
    fn get(&self, id: PartId) -> Result<Option<PartRecord>, CommerceError> {
        let row: Option<PartRow> = self.db.query_optional(
            "SELECT * FROM boiler_parts WHERE id = ?",
            params![id.value()],
        )?;
        Ok(row.map(Into::into))
    }

    fn get_by_name(&self, name: &str) -> Result<Option<PartRecord>, CommerceError> {
        let row: Option<PartRow> = self.db.query_optional(
            "SELECT * FROM boiler_parts WHERE name = ? ORDER BY id ASC LIMIT 1",
            params![name],
        )?;
        Ok(row.map(Into::into))
    }

    fn list(
        &self,
        filter: &PartFilter,
        page: PageRequest,
    ) -> Result<Page<PartRecord>, CommerceError> {
        let (count_sql, count_params) = part_count_sql(filter);
        let count = self
            .db
            .query_optional::<CountRow>(&count_sql, &to_params(count_params))?
            .map(|r| r.count)
            .unwrap_or(0);

        let (select_sql, select_params) = part_select_sql(filter, page);
        let rows: Vec<PartRow> = self.db.query_as(&select_sql, &to_params(select_params))?;

        Ok(Page::new(count, rows.into_iter().map(Into::into).collect()))
    }

    fn insert(&self, part: NewPart) -> Result<PartRecord, CommerceError> {
        let now = current_timestamp();
        self.db.execute(
            "INSERT INTO boiler_parts (\
             boiler_manufacturer, price, parts_manufacturer, vendor_code, \
             name, description, images, in_stock, bestsellers, new, \
             popularity, compatibility, createdAt, updatedAt) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                part.boiler_manufacturer.clone(),
                part.price,
                part.parts_manufacturer.clone(),
                part.vendor_code.clone(),
                part.name.clone(),
                part.description.clone(),
                part.images.clone(),
                part.in_stock,
                part.bestsellers,
                part.is_new,
                part.popularity,
                part.compatibility.clone(),
                now,
                now,
            ],
        )?;
        let id = last_insert_id(&self.db)?;
        Ok(part.into_record(PartId::new(id), now))
    }
}

/// SQL-backed cart store.
pub struct SqlCartStore {
    db: Db,
}

impl SqlCartStore {
    /// Create a store over an open database handle.
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Open the default database.
    pub fn open_default() -> Result<Self, CommerceError> {
        Ok(Self::new(Db::open_default()?))
    }

    /// Create the `cart` table if it does not exist.
    pub fn ensure_schema(&self) -> Result<(), CommerceError> {
        self.db.execute(
            "CREATE TABLE IF NOT EXISTS cart (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             userId INTEGER NOT NULL, \
             partId INTEGER NOT NULL, \
             boiler_manufacturer TEXT NOT NULL, \
             parts_manufacturer TEXT NOT NULL, \
             price REAL NOT NULL, \
             in_stock INTEGER NOT NULL, \
             image TEXT NOT NULL, \
             name TEXT NOT NULL, \
             count INTEGER NOT NULL, \
             total_price REAL NOT NULL, \
             createdAt INTEGER NOT NULL, \
             updatedAt INTEGER NOT NULL)",
            params![],
        )?;
        Ok(())
    }

    fn exists(&self, id: CartLineId) -> Result<bool, CommerceError> {
        let row: Option<IdRow> = self
            .db
            .query_optional("SELECT id FROM cart WHERE id = ?", params![id.value()])?;
        Ok(row.is_some())
    }

    fn require(&self, id: CartLineId) -> Result<(), CommerceError> {
        if self.exists(id)? {
            Ok(())
        } else {
            Err(CommerceError::CartLineNotFound(id.to_string()))
        }
    }
}

impl CartStore for SqlCartStore {
    fn list_for_user(&self, user: UserId) -> Result<Vec<CartLine>, CommerceError> {
        let rows: Vec<CartRow> = self.db.query_as(
            "SELECT * FROM cart WHERE userId = ? ORDER BY id ASC",
            params![user.value()],
        )?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get(&self, id: CartLineId) -> Result<Option<CartLine>, CommerceError> {
        let row: Option<CartRow> = self
            .db
            .query_optional("SELECT * FROM cart WHERE id = ?", params![id.value()])?;
        Ok(row.map(Into::into))
    }

    fn insert(&self, line: NewCartLine) -> Result<CartLine, CommerceError> {
        let now = current_timestamp();
        self.db.execute(
            "INSERT INTO cart (\
             userId, partId, boiler_manufacturer, parts_manufacturer, \
             price, in_stock, image, name, count, total_price, \
             createdAt, updatedAt) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                line.user_id.value(),
                line.part_id.value(),
                line.boiler_manufacturer.clone(),
                line.parts_manufacturer.clone(),
                line.price,
                line.in_stock,
                line.image.clone(),
                line.name.clone(),
                line.count,
                line.total_price,
                now,
                now,
            ],
        )?;
        let id = last_insert_id(&self.db)?;
        Ok(line.into_line(CartLineId::new(id), now))
    }

    fn set_count(&self, id: CartLineId, count: i64) -> Result<(), CommerceError> {
        self.require(id)?;
        self.db.execute(
            "UPDATE cart SET count = ?, updatedAt = ? WHERE id = ?",
            params![count, current_timestamp(), id.value()],
        )?;
        Ok(())
    }

    fn set_total_price(&self, id: CartLineId, total: f64) -> Result<(), CommerceError> {
        self.require(id)?;
        self.db.execute(
            "UPDATE cart SET total_price = ?, updatedAt = ? WHERE id = ?",
            params![total, current_timestamp(), id.value()],
        )?;
        Ok(())
    }

    fn delete(&self, id: CartLineId) -> Result<bool, CommerceError> {
        let existed = self.exists(id)?;
        if existed {
            self.db
                .execute("DELETE FROM cart WHERE id = ?", params![id.value()])?;
        }
        Ok(existed)
    }

    fn delete_for_user(&self, user: UserId) -> Result<u64, CommerceError> {
        let count = self
            .db
            .query_optional::<CountRow>(
                "SELECT COUNT(*) AS count FROM cart WHERE userId = ?",
                params![user.value()],
            )?
            .map(|r| r.count)
            .unwrap_or(0);
        self.db
            .execute("DELETE FROM cart WHERE userId = ?", params![user.value()])?;
        Ok(count as u64)
    }
}

/// Build the paged SELECT for a part filter.
fn part_select_sql(filter: &PartFilter, page: PageRequest) -> (String, Vec<String>) {
    let (where_clause, values) = filter.where_clause();
    let sql = format!(
        "SELECT * FROM boiler_parts WHERE {} ORDER BY id ASC LIMIT {} OFFSET {}",
        where_clause, page.limit, page.offset
    );
    (sql, values)
}

/// Build the total-count query for a part filter.
fn part_count_sql(filter: &PartFilter) -> (String, Vec<String>) {
    let (where_clause, values) = filter.where_clause();
    let sql = format!(
        "SELECT COUNT(*) AS count FROM boiler_parts WHERE {}",
        where_clause
    );
    (sql, values)
}

fn to_params(values: Vec<String>) -> Vec<Value> {
    values.into_iter().map(Value::from).collect()
}

fn last_insert_id(db: &Db) -> Result<i64, CommerceError> {
    let row: Option<IdRow> = db.query_optional("SELECT last_insert_rowid() AS id", params![])?;
    row.map(|r| r.id)
        .ok_or_else(|| CommerceError::DatabaseError("no row id after insert".to_string()))
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

/// Database shape of a part row; flags are integers.
#[derive(Debug, Deserialize)]
struct PartRow {
    id: i64,
    boiler_manufacturer: String,
    price: f64,
    parts_manufacturer: String,
    vendor_code: String,
    name: String,
    description: String,
    images: String,
    in_stock: i64,
    bestsellers: i64,
    #[serde(rename = "new")]
    is_new: i64,
    popularity: i64,
    compatibility: String,
    #[serde(rename = "createdAt")]
    created_at: i64,
    #[serde(rename = "updatedAt")]
    updated_at: i64,
}

impl From<PartRow> for PartRecord {
    fn from(row: PartRow) -> Self {
        PartRecord {
            id: PartId::new(row.id),
            boiler_manufacturer: row.boiler_manufacturer,
            price: row.price,
            parts_manufacturer: row.parts_manufacturer,
            vendor_code: row.vendor_code,
            name: row.name,
            description: row.description,
            images: row.images,
            in_stock: row.in_stock,
            bestsellers: row.bestsellers != 0,
            is_new: row.is_new != 0,
            popularity: row.popularity,
            compatibility: row.compatibility,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database shape of a cart row.
#[derive(Debug, Deserialize)]
struct CartRow {
    id: i64,
    #[serde(rename = "userId")]
    user_id: i64,
    #[serde(rename = "partId")]
    part_id: i64,
    boiler_manufacturer: String,
    parts_manufacturer: String,
    price: f64,
    in_stock: i64,
    image: String,
    name: String,
    count: i64,
    total_price: f64,
    #[serde(rename = "createdAt")]
    created_at: i64,
    #[serde(rename = "updatedAt")]
    updated_at: i64,
}

impl From<CartRow> for CartLine {
    fn from(row: CartRow) -> Self {
        CartLine {
            id: CartLineId::new(row.id),
            user_id: UserId::new(row.user_id),
            part_id: PartId::new(row.part_id),
            boiler_manufacturer: row.boiler_manufacturer,
            parts_manufacturer: row.parts_manufacturer,
            price: row.price,
            in_stock: row.in_stock,
            image: row.image,
            name: row.name,
            count: row.count,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
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
