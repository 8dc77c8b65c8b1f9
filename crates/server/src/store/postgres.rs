use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{stamp_new, stamp_update, DataStore, Query, Row, StoreError, Table};

/// PostgreSQL store. Rows travel as JSONB (`to_jsonb` out,
/// `jsonb_populate_record` in), so one code path serves every table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound { table: "unknown" },
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
                if code == "42501" {
                    StoreError::Permission(db_err.message().to_string())
                } else if code.starts_with("22") || code.starts_with("23") {
                    StoreError::Invalid(db_err.message().to_string())
                } else {
                    StoreError::Network(err.to_string())
                }
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnNotFound(_) => StoreError::Invalid(err.to_string()),
            _ => StoreError::Network(err.to_string()),
        }
    }
}

/// Equality conditions for the query's filters against alias `t`. Column
/// names come from the table's whitelist; values are bound as JSONB from
/// `$first` on.
fn conditions(query: &Query, first: usize) -> Vec<String> {
    query
        .filters
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("to_jsonb(t) -> '{column}' = ${}", first + i))
        .collect()
}

fn where_clause(query: &Query, first: usize) -> String {
    if query.filters.is_empty() {
        return String::new();
    }
    format!(" WHERE {}", conditions(query, first).join(" AND "))
}

/// `UPDATE` guarded by the id and any expected column values.
fn update_sql(table: Table, changes: &Row, expected: &Query) -> String {
    let assignments: Vec<String> = changes
        .keys()
        .map(|column| format!("{column} = r.{column}"))
        .collect();
    let mut guards = vec!["t.id = $2".to_string()];
    guards.extend(conditions(expected, 3));
    format!(
        "UPDATE {} AS t SET {} \
         FROM jsonb_populate_record(NULL::{}, $1) AS r \
         WHERE {} \
         RETURNING to_jsonb(t.*)",
        table.name(),
        assignments.join(", "),
        table.name(),
        guards.join(" AND ")
    )
}

fn order_clause(query: &Query) -> String {
    match query.order {
        Some(order) => format!(
            " ORDER BY t.{} {}",
            order.column,
            if order.descending { "DESC" } else { "ASC" }
        ),
        None => String::new(),
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError> {
        query.check(table)?;

        let mut sql = format!(
            "SELECT to_jsonb(t) FROM {} t{}{}",
            table.name(),
            where_clause(query, 1),
            order_clause(query)
        );
        if query.limit.is_some() {
            sql.push_str(&format!(" LIMIT ${}", query.filters.len() + 1));
        }

        let mut q = sqlx::query_scalar::<_, Value>(&sql);
        for (_, value) in &query.filters {
            q = q.bind(value);
        }
        if let Some(limit) = query.limit {
            q = q.bind(limit);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Value, StoreError> {
        let row = stamp_new(table, row)?;
        let sql = format!(
            "INSERT INTO {t} SELECT * FROM jsonb_populate_record(NULL::{t}, $1) \
             RETURNING to_jsonb({t}.*)",
            t = table.name()
        );

        Ok(sqlx::query_scalar::<_, Value>(&sql)
            .bind(Value::Object(row))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_where(
        &self,
        table: Table,
        id: Uuid,
        expected: &Query,
        changes: Row,
    ) -> Result<Option<Value>, StoreError> {
        expected.check(table)?;
        let changes = stamp_update(table, changes)?;
        let sql = update_sql(table, &changes, expected);

        let mut q = sqlx::query_scalar::<_, Value>(&sql)
            .bind(Value::Object(changes))
            .bind(id);
        for (_, value) in &expected.filters {
            q = q.bind(value);
        }
        Ok(q.fetch_optional(&self.pool).await?)
    }

    async fn count(&self, table: Table, query: &Query) -> Result<i64, StoreError> {
        query.check(table)?;
        let sql = format!(
            "SELECT COUNT(*) FROM {} t{}",
            table.name(),
            where_clause(query, 1)
        );
        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        for (_, value) in &query.filters {
            q = q.bind(value);
        }
        Ok(q.fetch_one(&self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
