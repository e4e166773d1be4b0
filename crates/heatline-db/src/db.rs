//! Database connection and query execution.

use crate::{DbError, QueryResult, Value};
#[cfg(target_arch = "wasm32")]
use crate::Row;
use serde::de::DeserializeOwned;

/// SQLite database connection.
///
/// On `wasm32` this wraps Spin's SQLite connection; native builds get inert
/// stubs so the typed stores can be developed and unit-tested without a
/// running Spin host.
pub struct Db {
    #[cfg(target_arch = "wasm32")]
    conn: spin_sdk::sqlite::Connection,
    #[cfg(not(target_arch = "wasm32"))]
    _phantom: std::marker::PhantomData<()>,
}

#[cfg(target_arch = "wasm32")]
impl Db {
    /// Open the default SQLite database.
    pub fn open_default() -> Result<Self, DbError> {
        let conn = spin_sdk::sqlite::Connection::open_default()
            .map_err(|e| DbError::OpenError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open a named SQLite database.
    pub fn open(name: &str) -> Result<Self, DbError> {
        let conn = spin_sdk::sqlite::Connection::open(name)
            .map_err(|e| DbError::OpenError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Execute a SQL statement that doesn't return rows.
    ///
    /// Use this for INSERT, UPDATE, DELETE, CREATE TABLE, etc.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<(), DbError> {
        self.conn
            .execute(sql, Self::to_spin_params(params).as_slice())
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(())
    }

    /// Execute a SQL query and return raw results.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        let result = self
            .conn
            .execute(sql, Self::to_spin_params(params).as_slice())
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let columns: Vec<String> = result.columns.iter().map(|c| c.to_string()).collect();

        let rows: Vec<Row> = result
            .rows
            .iter()
            .map(|row| {
                let values: Vec<Value> = row
                    .values
                    .iter()
                    .map(|v| match v {
                        spin_sdk::sqlite::Value::Null => Value::Null,
                        spin_sdk::sqlite::Value::Integer(i) => Value::Integer(*i),
                        spin_sdk::sqlite::Value::Real(f) => Value::Real(*f),
                        spin_sdk::sqlite::Value::Text(s) => Value::Text(s.clone()),
                        // Catalog and cart tables carry no blob columns.
                        spin_sdk::sqlite::Value::Blob(_) => Value::Null,
                    })
                    .collect();
                Row::new(columns.clone(), values)
            })
            .collect();

        Ok(QueryResult::new(columns, rows))
    }

    fn to_spin_params(params: &[Value]) -> Vec<spin_sdk::sqlite::Value> {
        params
            .iter()
            .map(|v| match v {
                Value::Null => spin_sdk::sqlite::Value::Null,
                Value::Integer(i) => spin_sdk::sqlite::Value::Integer(*i),
                Value::Real(f) => spin_sdk::sqlite::Value::Real(*f),
                Value::Text(s) => spin_sdk::sqlite::Value::Text(s.clone()),
            })
            .collect()
    }
}

// Non-WASM stubs for development/testing.
#[cfg(not(target_arch = "wasm32"))]
impl Db {
    /// Open the default SQLite database.
    pub fn open_default() -> Result<Self, DbError> {
        Ok(Self {
            _phantom: std::marker::PhantomData,
        })
    }

    /// Open a named SQLite database.
    pub fn open(_name: &str) -> Result<Self, DbError> {
        Ok(Self {
            _phantom: std::marker::PhantomData,
        })
    }

    /// Execute a SQL statement that doesn't return rows.
    pub fn execute(&self, _sql: &str, _params: &[Value]) -> Result<(), DbError> {
        Ok(())
    }

    /// Execute a SQL query and return raw results.
    pub fn query(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult, DbError> {
        Ok(QueryResult::new(vec![], vec![]))
    }
}

impl Db {
    /// Execute a SQL query and deserialize results into a vector.
    pub fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        let result = self.query(sql, params)?;
        result.deserialize_all()
    }

    /// Execute a SQL query and return an optional single row.
    ///
    /// Returns `None` if no rows are returned.
    pub fn query_optional<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<T>, DbError> {
        let result = self.query(sql, params)?;
        match result.first() {
            Some(row) => Ok(Some(row.deserialize()?)),
            None => Ok(None),
        }
    }
}
