//! Generic record persistence.
//!
//! The free functions work on any `&Connection` and are what the tests
//! exercise against in-memory databases. [`DataService`] wraps them with a
//! pooled connection per call; each call is its own commit.
//!
//! Empty results are `Ok(vec![])` / `Ok(None)`; failures are `Err`, so
//! callers can tell "nothing stored" from "could not read".

use super::records::{Record, SortDescriptor};
use super::Database;
use crate::errors::{AppError, AppResult, DatabaseError};
use chrono::Utc;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

fn column_list<T: Record>() -> String {
    T::COLUMNS.join(", ")
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate_sort<T: Record>(sort: &SortDescriptor) -> AppResult<()> {
    if T::COLUMNS.contains(&sort.field) {
        Ok(())
    } else {
        Err(DatabaseError::Custom(format!(
            "Cannot sort {} by unknown field '{}'",
            T::TABLE,
            sort.field
        ))
        .into())
    }
}

/// Inserts a record, or overwrites the stored copy with the same id.
///
/// # Errors
///
/// Returns `DatabaseError::Save` if the write fails or violates a constraint.
pub fn save_record<T: Record>(conn: &Connection, record: &T) -> AppResult<()> {
    debug!("Saving record {} in {}", record.record_id(), T::TABLE);

    let updates = T::COLUMNS[1..]
        .iter()
        .map(|column| format!("{column} = excluded.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
        T::TABLE,
        column_list::<T>(),
        placeholders(T::COLUMNS.len()),
        updates
    );

    conn.prepare_cached(&sql)
        .and_then(|mut stmt| stmt.execute(params_from_iter(record.to_values())))
        .map_err(|source| DatabaseError::Save {
            table: T::TABLE,
            source,
        })?;

    Ok(())
}

/// Returns every record of `T` in the given order.
///
/// Ties keep insertion order.
///
/// # Errors
///
/// Returns `DatabaseError::Custom` for a sort field that is not a column, and
/// `DatabaseError::Fetch` if the query or row decoding fails.
pub fn fetch_records<T: Record>(conn: &Connection, sort: &SortDescriptor) -> AppResult<Vec<T>> {
    validate_sort::<T>(sort)?;

    let sql = format!(
        "SELECT {} FROM {} {}",
        column_list::<T>(),
        T::TABLE,
        sort.order_by_clause()
    );
    let fetch_error = |source| DatabaseError::Fetch {
        table: T::TABLE,
        source,
    };

    let mut stmt = conn.prepare_cached(&sql).map_err(fetch_error)?;
    let rows = stmt
        .query_map([], |row| T::from_row(row))
        .map_err(fetch_error)?;

    let records = rows
        .collect::<Result<Vec<T>, _>>()
        .map_err(fetch_error)?;

    debug!("Fetched {} records from {}", records.len(), T::TABLE);
    Ok(records)
}

/// Returns the record with `id`, or `None` if it is not stored.
///
/// # Errors
///
/// Returns `DatabaseError::Fetch` if the query or row decoding fails.
pub fn fetch_record<T: Record>(conn: &Connection, id: Uuid) -> AppResult<Option<T>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        column_list::<T>(),
        T::TABLE
    );

    conn.prepare_cached(&sql)
        .and_then(|mut stmt| {
            stmt.query_row([id.to_string()], |row| T::from_row(row))
                .optional()
        })
        .map_err(|source| {
            DatabaseError::Fetch {
                table: T::TABLE,
                source,
            }
            .into()
        })
}

/// Writes pending in-place changes of a stored record.
///
/// The record's `updated_at`, if it has one, is advanced to now first.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no record with this id is stored, or
/// `DatabaseError::Save` if the write fails.
pub fn update_record<T: Record>(conn: &Connection, record: &mut T) -> AppResult<()> {
    record.mark_updated(Utc::now());

    let assignments = T::COLUMNS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, column)| format!("{} = ?{}", column, idx + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {} SET {} WHERE id = ?1", T::TABLE, assignments);

    let rows_affected = conn
        .prepare_cached(&sql)
        .and_then(|mut stmt| stmt.execute(params_from_iter(record.to_values())))
        .map_err(|source| DatabaseError::Save {
            table: T::TABLE,
            source,
        })?;

    if rows_affected == 0 {
        return Err(not_found::<T>(record.record_id()));
    }

    debug!("Updated record {} in {}", record.record_id(), T::TABLE);
    Ok(())
}

/// Removes the record with `id`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no such record is stored, or
/// `DatabaseError::Delete` if the delete fails.
pub fn delete_record<T: Record>(conn: &Connection, id: Uuid) -> AppResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);

    let rows_affected = conn
        .prepare_cached(&sql)
        .and_then(|mut stmt| stmt.execute([id.to_string()]))
        .map_err(|source| DatabaseError::Delete {
            table: T::TABLE,
            source,
        })?;

    if rows_affected == 0 {
        return Err(not_found::<T>(id));
    }

    debug!("Deleted record {} from {}", id, T::TABLE);
    Ok(())
}

fn not_found<T: Record>(id: Uuid) -> AppError {
    DatabaseError::NotFound(format!("{} with id {}", T::TABLE, id)).into()
}

/// The persistence gateway: CRUD for every record type over a pooled database.
///
/// Construct one and pass it to whatever needs storage.
#[derive(Clone)]
pub struct DataService {
    db: Database,
}

impl DataService {
    pub fn new(db: Database) -> Self {
        DataService { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Inserts or updates `record` and commits.
    pub fn save<T: Record>(&self, record: &T) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        save_record(&conn, record)?;
        info!("Saved {} {}", T::TABLE, record.record_id());
        Ok(())
    }

    /// Every record of `T` in its default order.
    pub fn fetch_all<T: Record>(&self) -> AppResult<Vec<T>> {
        self.fetch_all_sorted(T::default_sort())
    }

    /// Every record of `T` in the given order.
    pub fn fetch_all_sorted<T: Record>(&self, sort: SortDescriptor) -> AppResult<Vec<T>> {
        let conn = self.db.get_conn()?;
        fetch_records(&conn, &sort)
    }

    /// The record with `id`, if stored.
    pub fn fetch<T: Record>(&self, id: Uuid) -> AppResult<Option<T>> {
        let conn = self.db.get_conn()?;
        fetch_record(&conn, id)
    }

    /// Like [`DataService::fetch`], but a missing record is an error.
    pub fn require<T: Record>(&self, id: Uuid) -> AppResult<T> {
        self.fetch(id)?.ok_or_else(|| not_found::<T>(id))
    }

    /// The oldest record of `T`, if any.
    pub fn fetch_first<T: Record>(&self) -> AppResult<Option<T>> {
        let records: Vec<T> = self.fetch_all_sorted(SortDescriptor::ascending("created_at"))?;
        Ok(records.into_iter().next())
    }

    /// Commits in-place changes to a stored record.
    pub fn update<T: Record>(&self, record: &mut T) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        update_record(&conn, record)?;
        info!("Updated {} {}", T::TABLE, record.record_id());
        Ok(())
    }

    /// Removes a stored record and commits.
    pub fn delete<T: Record>(&self, record: &T) -> AppResult<()> {
        self.delete_by_id::<T>(record.record_id())
    }

    /// Removes the record of type `T` with `id` and commits.
    pub fn delete_by_id<T: Record>(&self, id: Uuid) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        delete_record::<T>(&conn, id)?;
        info!("Deleted {} {}", T::TABLE, id);
        Ok(())
    }
}
