//! Descriptor-driven persistence.
//!
//! Every record type declares its table, its non-id columns in order, and a
//! way to read those columns out as scalar values. `save`, `insert`, and
//! `update` are generic over that descriptor and assemble parameterized SQL
//! with `QueryBuilder`. Column lists are compile-time constants, never user
//! input; only values are bound.

use sqlx::query_builder::Separated;
use sqlx::sqlite::SqlitePool;
use sqlx::{QueryBuilder, Sqlite};

use crate::error::{Result, StoreError};

/// A scalar bound into a generated statement.
///
/// SQLite stores everything the board needs as INTEGER or TEXT; `Null`
/// covers the absent parent reference on root replies.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        match v {
            Some(i) => Value::Integer(i),
            None => Value::Null,
        }
    }
}

/// Table mapping for one record type.
///
/// `COLUMNS` excludes the identity column and fixes the order `values()`
/// must follow. Every listed column is written on every insert and update -
/// the "persist whatever fields are present" contract, made static.
pub trait Entity {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Store-assigned identity; `None` until the first insert.
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    /// Current column values, one per `COLUMNS` entry, same order.
    fn values(&self) -> Vec<Value>;
}

/// Insert when the record has no identity yet, update otherwise.
///
/// `insert` always assigns the rowid back onto the record, so saving the
/// same record twice yields one row: the second call is an update.
pub async fn save<E: Entity>(pool: &SqlitePool, record: &mut E) -> Result<()> {
    match record.id() {
        None => insert(pool, record).await,
        Some(_) => update(pool, record).await,
    }
}

/// `INSERT INTO <table> (<columns>) VALUES (?, ...)`, binding `values()`
/// positionally, then read back the rowid the store assigned.
pub async fn insert<E: Entity>(pool: &SqlitePool, record: &mut E) -> Result<()> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO ");
    qb.push(E::TABLE).push(" (");
    {
        let mut columns = qb.separated(", ");
        for column in E::COLUMNS {
            columns.push(*column);
        }
    }
    qb.push(") VALUES (");
    {
        let mut binds = qb.separated(", ");
        for value in record.values() {
            bind_value(&mut binds, value);
        }
    }
    qb.push(")");

    tracing::debug!(table = E::TABLE, sql = qb.sql(), "insert");
    let result = qb.build().execute(pool).await?;
    record.set_id(result.last_insert_rowid());
    Ok(())
}

/// `UPDATE <table> SET col = ?, ... WHERE id = ?`.
///
/// Fails with [`StoreError::MissingId`] on a record that was never inserted.
pub async fn update<E: Entity>(pool: &SqlitePool, record: &E) -> Result<()> {
    let id = record.id().ok_or(StoreError::MissingId { table: E::TABLE })?;

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE ");
    qb.push(E::TABLE).push(" SET ");
    {
        let mut assignments = qb.separated(", ");
        for (column, value) in E::COLUMNS.iter().zip(record.values()) {
            assignments.push(*column);
            assignments.push_unseparated(" = ");
            bind_value_unseparated(&mut assignments, value);
        }
    }
    qb.push(" WHERE id = ").push_bind(id);

    tracing::debug!(table = E::TABLE, sql = qb.sql(), "update");
    qb.build().execute(pool).await?;
    Ok(())
}

fn bind_value(binds: &mut Separated<'_, '_, Sqlite, &'static str>, value: Value) {
    match value {
        Value::Integer(i) => binds.push_bind(i),
        Value::Text(s) => binds.push_bind(s),
        Value::Null => binds.push_bind(None::<i64>),
    };
}

fn bind_value_unseparated(binds: &mut Separated<'_, '_, Sqlite, &'static str>, value: Value) {
    match value {
        Value::Integer(i) => binds.push_bind_unseparated(i),
        Value::Text(s) => binds.push_bind_unseparated(s),
        Value::Null => binds.push_bind_unseparated(None::<i64>),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::db::repos::User;
    use crate::db::Store;
    use tempfile::tempdir;

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(7), Value::Integer(7));
        assert_eq!(Value::from(Some(7)), Value::Integer(7));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from("hi"), Value::Text("hi".to_owned()));
    }

    #[tokio::test]
    async fn insert_assigns_id() {
        let dir = tempdir().unwrap();
        let store = Store::open(&StoreConfig::at(dir.path().join("test.db")))
            .await
            .unwrap();

        let mut user = User::new("Kari", "Nordmann");
        assert_eq!(user.id, None);

        save(store.pool(), &mut user).await.unwrap();
        assert!(user.id.is_some());
    }

    #[tokio::test]
    async fn save_twice_updates_in_place() {
        let dir = tempdir().unwrap();
        let store = Store::open(&StoreConfig::at(dir.path().join("test.db")))
            .await
            .unwrap();

        let mut user = User::new("Kari", "Nordmann");
        save(store.pool(), &mut user).await.unwrap();
        let id = user.id;

        user.lname = "Hansen".to_owned();
        save(store.pool(), &mut user).await.unwrap();

        assert_eq!(user.id, id);
        let all = store.users().all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].lname, "Hansen");
    }

    #[tokio::test]
    async fn update_without_id_is_an_error() {
        let dir = tempdir().unwrap();
        let store = Store::open(&StoreConfig::at(dir.path().join("test.db")))
            .await
            .unwrap();

        let user = User::new("Kari", "Nordmann");
        let err = update(store.pool(), &user).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingId { table: "users" }));
    }
}
