use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{stamp_new, stamp_update, DataStore, Query, Row, StoreError, Table};

/// Process-local store. Writes are serialized by the lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a network error until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    fn reachable(&self) -> Result<(), StoreError> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            Err(StoreError::Network("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

fn field<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn conflicts(table: Table, rows: &[Row], candidate: &Row, skip_id: Option<&Value>) -> Option<&'static str> {
    table.unique_columns().iter().copied().find(|column| {
        let value = field(candidate, column);
        !value.is_null()
            && rows.iter().any(|row| {
                Some(field(row, "id")) != skip_id && field(row, column) == value
            })
    })
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.reachable()?;
        query.check(table)?;

        let tables = self.tables.read().await;
        let rows = tables.get(&table).map(Vec::as_slice).unwrap_or_default();

        // Newest insert first so equal sort keys keep the latest row on top
        // for descending orders.
        let mut matched: Vec<&Row> = rows
            .iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|(column, value)| field(row, column) == value)
            })
            .collect();

        if let Some(order) = query.order {
            if order.descending {
                matched.reverse();
                matched.sort_by(|a, b| compare(field(b, order.column), field(a, order.column)));
            } else {
                matched.sort_by(|a, b| compare(field(a, order.column), field(b, order.column)));
            }
        }

        let limit = query.limit.map(|n| n as usize).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .take(limit)
            .map(|row| Value::Object(row.clone()))
            .collect())
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Value, StoreError> {
        self.reachable()?;
        let row = stamp_new(table, row)?;

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        if let Some(column) = conflicts(table, rows, &row, None) {
            return Err(StoreError::Invalid(format!(
                "duplicate value for {}.{column}",
                table.name()
            )));
        }
        rows.push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update_where(
        &self,
        table: Table,
        id: Uuid,
        expected: &Query,
        changes: Row,
    ) -> Result<Option<Value>, StoreError> {
        self.reachable()?;
        expected.check(table)?;
        let changes = stamp_update(table, changes)?;
        let id = Value::String(id.to_string());

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        let Some(index) = rows.iter().position(|row| {
            field(row, "id") == &id
                && expected
                    .filters
                    .iter()
                    .all(|(column, value)| field(row, column) == value)
        }) else {
            return Ok(None);
        };

        let mut updated = rows[index].clone();
        updated.extend(changes);
        if let Some(column) = conflicts(table, rows, &updated, Some(&id)) {
            return Err(StoreError::Invalid(format!(
                "duplicate value for {}.{column}",
                table.name()
            )));
        }
        rows[index] = updated.clone();
        Ok(Some(Value::Object(updated)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.reachable()
    }
}
