// Generic CRUD over any SqlEntity
// Statements are built from the entity's table/columns; every value is bound.

use crate::entity::SqlEntity;
use crate::error::map_sqlx_error;
use schoolhouse_core::domain::{Column, DomainError, Draft, FieldValue, Filter, Link};
use schoolhouse_core::error::{AppError, Result};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Row, Sqlite, SqliteConnection};
use tracing::debug;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

pub(crate) fn bind_value(query: SqliteQuery<'_>, value: FieldValue) -> SqliteQuery<'_> {
    match value {
        FieldValue::Null => query.bind(None::<String>),
        FieldValue::Text(v) => query.bind(v),
        FieldValue::Integer(v) => query.bind(v),
        FieldValue::Bool(v) => query.bind(v),
        FieldValue::Date(v) => query.bind(v),
        FieldValue::Time(v) => query.bind(v),
    }
}

fn quoted(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}

/// Validate, then INSERT ... RETURNING the key
pub(crate) async fn insert<E: SqlEntity>(
    conn: &mut SqliteConnection,
    draft: &E::Draft,
) -> Result<E::Id> {
    draft.validate()?;

    let kind = E::KIND;
    let values = draft.values();
    let columns: Vec<String> = values.iter().map(|(c, _)| quoted(c)).collect();
    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(kind.table()),
        columns.join(", "),
        placeholders,
        quoted(kind.key_column())
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in values {
        query = bind_value(query, value);
    }

    let row = query.fetch_one(&mut *conn).await.map_err(map_sqlx_error)?;
    let id = E::decode_id(&row).map_err(map_sqlx_error)?;

    debug!(table = kind.table(), %id, "Row inserted");
    Ok(id)
}

/// Rows matching every filter condition, ordered by key
pub(crate) async fn select<E: SqlEntity>(
    conn: &mut SqliteConnection,
    filter: &Filter<E::Field>,
) -> Result<Vec<E>> {
    let kind = E::KIND;
    let mut sql = format!("SELECT * FROM {}", quoted(kind.table()));

    if !filter.is_empty() {
        let predicates: Vec<String> = filter
            .conditions()
            .iter()
            .map(|(field, value)| {
                if value.is_null() {
                    format!("{} IS NULL", quoted(field.column()))
                } else {
                    format!("{} = ?", quoted(field.column()))
                }
            })
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY {}", quoted(kind.key_column())));

    let mut query = sqlx::query(&sql);
    for (_, value) in filter.conditions() {
        if !value.is_null() {
            query = bind_value(query, value.clone());
        }
    }

    let rows = query.fetch_all(&mut *conn).await.map_err(map_sqlx_error)?;
    rows.iter()
        .map(|row| E::decode(row).map_err(map_sqlx_error))
        .collect()
}

pub(crate) async fn get<E: SqlEntity>(conn: &mut SqliteConnection, id: &E::Id) -> Result<Option<E>> {
    let kind = E::KIND;
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?",
        quoted(kind.table()),
        quoted(kind.key_column())
    );

    let row = bind_value(sqlx::query(&sql), id.clone().into())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    row.map(|r| E::decode(&r).map_err(map_sqlx_error)).transpose()
}

/// Full-row update; the key itself is never rewritten
///
/// Natural-key drafts carry their own key, which must match `id`.
pub(crate) async fn update<E: SqlEntity>(
    conn: &mut SqliteConnection,
    id: &E::Id,
    draft: &E::Draft,
) -> Result<()> {
    draft.validate()?;

    let kind = E::KIND;
    let (keys, values): (Vec<_>, Vec<_>) = draft
        .values()
        .into_iter()
        .partition(|(column, _)| *column == kind.key_column());

    if !kind.has_surrogate_key() {
        let current: FieldValue = id.clone().into();
        if keys.iter().any(|(_, key)| *key != current) {
            return Err(DomainError::InvalidValue {
                field: kind.key_column(),
                reason: format!("{} {} cannot change its key through an update", kind, id),
            }
            .into());
        }
    }

    let assignments: Vec<String> = values
        .iter()
        .map(|(c, _)| format!("{} = ?", quoted(c)))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(kind.table()),
        assignments.join(", "),
        quoted(kind.key_column())
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in values {
        query = bind_value(query, value);
    }
    query = bind_value(query, id.clone().into());

    let result = query.execute(&mut *conn).await.map_err(map_sqlx_error)?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} {}", kind, id)));
    }

    debug!(table = kind.table(), %id, "Row updated");
    Ok(())
}

/// Delete one row unless another row still references it
pub(crate) async fn delete<E: SqlEntity>(conn: &mut SqliteConnection, id: &E::Id) -> Result<()> {
    let kind = E::KIND;

    for (table, column) in kind.dependents() {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?",
            quoted(table),
            quoted(column)
        );
        let row = bind_value(sqlx::query(&sql), id.clone().into())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let count: i64 = row.try_get(0).map_err(map_sqlx_error)?;

        if count > 0 {
            return Err(AppError::ReferentialIntegrity {
                entity: kind.to_string(),
                id: id.to_string(),
                dependent: format!("{}.{} ({} rows)", table, column, count),
            });
        }
    }

    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(kind.table()),
        quoted(kind.key_column())
    );
    let result = bind_value(sqlx::query(&sql), id.clone().into())
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} {}", kind, id)));
    }

    debug!(table = kind.table(), %id, "Row deleted");
    Ok(())
}

/// Insert a join row; returns false only when `if_absent` skipped an existing pair
pub(crate) async fn insert_link(
    conn: &mut SqliteConnection,
    link: &Link,
    if_absent: bool,
) -> Result<bool> {
    let [(a, x), (b, y)] = link.columns();
    let sql = format!(
        "INSERT INTO {} ({}, {}) VALUES (?, ?){}",
        quoted(link.table()),
        quoted(a),
        quoted(b),
        if if_absent { " ON CONFLICT DO NOTHING" } else { "" }
    );

    let result = sqlx::query(&sql)
        .bind(x)
        .bind(y)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    Ok(result.rows_affected() == 1)
}

pub(crate) async fn delete_link(conn: &mut SqliteConnection, link: &Link) -> Result<()> {
    let [(a, x), (b, y)] = link.columns();
    let sql = format!(
        "DELETE FROM {} WHERE {} = ? AND {} = ?",
        quoted(link.table()),
        quoted(a),
        quoted(b)
    );

    let result = sqlx::query(&sql)
        .bind(x)
        .bind(y)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(link.to_string()));
    }
    Ok(())
}
