// src/db/listing.rs
use crate::domain::ListingRecord;
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OptionalExtension};

/// The app only ever manages row 1.
const LISTING_ID: i64 = 1;

fn data_columns() -> Vec<&'static str> {
    ListingRecord::TEXT_FIELDS
        .iter()
        .chain(ListingRecord::INT_FIELDS)
        .copied()
        .collect()
}

fn sql_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

pub fn load_listing(conn: &Connection) -> Result<Option<ListingRecord>, ServerError> {
    let cols = data_columns();
    let sql = format!(
        "select id, {}, images, is_active, created_at, updated_at from listing where id = ?",
        cols.join(", ")
    );

    conn.query_row(&sql, [LISTING_ID], |row| {
        let mut record = ListingRecord {
            id: Some(row.get(0)?),
            ..Default::default()
        };
        for (i, name) in cols.iter().enumerate() {
            let idx = i + 1;
            if let Some(slot) = record.int_mut(name) {
                *slot = row.get(idx)?;
            } else if let Some(slot) = record.text_mut(name) {
                *slot = row.get(idx)?;
            }
        }

        let n = cols.len();
        let images: String = row.get(n + 1)?;
        record.images = serde_json::from_str(&images).unwrap_or_default();
        record.is_active = row.get(n + 2)?;
        record.created_at = row.get(n + 3)?;
        record.updated_at = row.get(n + 4)?;
        Ok(record)
    })
    .optional()
    .map_err(|e| ServerError::DbError(format!("load listing failed: {e}")))
}

/// The stored listing, or an empty draft if none exists yet.
pub fn load_or_default(conn: &Connection) -> Result<ListingRecord, ServerError> {
    Ok(load_listing(conn)?.unwrap_or_default())
}

/// Insert-or-replace the whole row in one statement (last writer wins).
pub fn save_listing(
    conn: &Connection,
    record: &ListingRecord,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    let cols = data_columns();

    let mut values: Vec<SqlValue> = Vec::with_capacity(cols.len() + 5);
    values.push(SqlValue::Integer(LISTING_ID));
    for name in &cols {
        if let Some(v) = record.int(name) {
            values.push(SqlValue::Integer(v));
        } else {
            let text = record.text(name).unwrap_or_default();
            values.push(SqlValue::Text(text.to_string()));
        }
    }
    let images = serde_json::to_string(&record.images)
        .map_err(|e| ServerError::DbError(format!("encode images failed: {e}")))?;
    values.push(SqlValue::Text(images));
    values.push(SqlValue::Integer(record.is_active as i64));
    values.push(SqlValue::Text(sql_timestamp(record.created_at.unwrap_or(now))));
    values.push(SqlValue::Text(sql_timestamp(now)));

    let all_cols: Vec<&str> = std::iter::once("id")
        .chain(cols.iter().copied())
        .chain(["images", "is_active", "created_at", "updated_at"])
        .collect();
    let placeholders = vec!["?"; all_cols.len()].join(", ");
    let updates = all_cols
        .iter()
        .filter(|c| !matches!(**c, "id" | "created_at"))
        .map(|c| format!("{c} = excluded.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "insert into listing ({}) values ({placeholders}) on conflict(id) do update set {updates}",
        all_cols.join(", ")
    );

    conn.execute(&sql, params_from_iter(values))
        .map_err(|e| ServerError::DbError(format!("save listing failed: {e}")))?;
    Ok(())
}

pub fn delete_listing(conn: &Connection) -> Result<usize, ServerError> {
    conn.execute("delete from listing", [])
        .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))
}
