//! Data store seam: typed tables of JSON rows with filtering, ordering and
//! limits. The app always runs on PostgreSQL; the in-memory store exists
//! for unit and integration tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A row as it crosses the store boundary.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    NocRequests,
    Applications,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::NocRequests => "noc_requests",
            Table::Applications => "applications",
        }
    }

    /// Columns a caller may filter, order or write by.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Profiles => &[
                "id",
                "name",
                "email",
                "phone",
                "department",
                "role",
                "avatar_url",
                "created_at",
                "updated_at",
            ],
            Table::NocRequests => &[
                "id",
                "student_id",
                "student_name",
                "student_email",
                "company",
                "role_title",
                "start_date",
                "duration_weeks",
                "notes",
                "status",
                "reviewer_id",
                "reviewer_note",
                "created_at",
                "updated_at",
            ],
            Table::Applications => &[
                "id",
                "student_id",
                "student_name",
                "company",
                "position",
                "applied_on",
                "status",
                "note",
                "created_at",
                "updated_at",
            ],
        }
    }

    /// Columns that must be unique across rows.
    pub fn unique_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Profiles => &["id", "email"],
            Table::NocRequests | Table::Applications => &["id"],
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    fn check_column(&self, column: &str) -> Result<(), StoreError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(StoreError::Invalid(format!(
                "unknown column '{column}' on {}",
                self.name()
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

/// Equality filters, one optional ordering and an optional limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(&'static str, Value)>,
    pub order: Option<Order>,
    pub limit: Option<i64>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push((column, value.into()));
        self
    }

    pub fn order_asc(mut self, column: &'static str) -> Self {
        self.order = Some(Order {
            column,
            descending: false,
        });
        self
    }

    pub fn order_desc(mut self, column: &'static str) -> Self {
        self.order = Some(Order {
            column,
            descending: true,
        });
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject columns the table does not have.
    pub fn check(&self, table: Table) -> Result<(), StoreError> {
        for (column, _) in &self.filters {
            table.check_column(column)?;
        }
        if let Some(order) = &self.order {
            table.check_column(order.column)?;
        }
        if matches!(self.limit, Some(n) if n < 0) {
            return Err(StoreError::Invalid("limit must not be negative".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data store unreachable: {0}")]
    Network(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("no matching row in {table}")]
    NotFound { table: &'static str },
    #[error("invalid data: {0}")]
    Invalid(String),
}

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Rows matching every filter, ordered and limited as requested.
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Insert a row and return it as stored.
    async fn insert(&self, table: Table, row: Row) -> Result<Value, StoreError>;

    /// Apply `changes` to the row with `id` and return it as stored.
    async fn update(&self, table: Table, id: Uuid, changes: Row) -> Result<Value, StoreError> {
        self.update_where(table, id, &Query::new(), changes)
            .await?
            .ok_or(StoreError::NotFound {
                table: table.name(),
            })
    }

    /// Apply `changes` to the row with `id` only if it also matches every
    /// filter in `expected`, checked in the same write. `None` when no row
    /// matched.
    async fn update_where(
        &self,
        table: Table,
        id: Uuid,
        expected: &Query,
        changes: Row,
    ) -> Result<Option<Value>, StoreError>;

    async fn count(&self, table: Table, query: &Query) -> Result<i64, StoreError> {
        let rows = self.select(table, query).await?;
        Ok(rows.len() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError>;
}

pub fn now_timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Fill `id` and both timestamps on a row about to be inserted.
pub fn stamp_new(table: Table, mut row: Row) -> Result<Row, StoreError> {
    for column in row.keys() {
        table.check_column(column)?;
    }
    if !row.get("id").is_some_and(|id| !id.is_null()) {
        row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    let now = now_timestamp();
    row.insert("created_at".to_string(), now.clone());
    row.insert("updated_at".to_string(), now);
    Ok(row)
}

/// Validate an update and bump `updated_at`. `id` and `created_at` are
/// never rewritten.
pub fn stamp_update(table: Table, mut changes: Row) -> Result<Row, StoreError> {
    changes.remove("id");
    changes.remove("created_at");
    for column in changes.keys() {
        table.check_column(column)?;
    }
    changes.insert("updated_at".to_string(), now_timestamp());
    Ok(changes)
}

/// Decode a stored row into a domain type.
pub fn from_row<T: DeserializeOwned>(table: Table, row: Value) -> Result<T, StoreError> {
    serde_json::from_value(row)
        .map_err(|e| StoreError::Invalid(format!("malformed {} row: {e}", table.name())))
}

/// Serialize a domain value into a row.
pub fn to_row<T: serde::Serialize>(value: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::Invalid("row must be a JSON object".to_string())),
        Err(e) => Err(StoreError::Invalid(e.to_string())),
    }
}
