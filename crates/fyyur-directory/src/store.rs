//! Store helpers shared by the venue, artist and show operations.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, QueryFilter, QuerySelect, Select, TransactionError, TransactionTrait,
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use fyyur_db::entities::show;

use crate::error::{DirectoryError, Result};
use crate::timeline::{self, Timestamp};

/// Runs `work` inside a single transaction.
///
/// The transaction commits when `work` succeeds and rolls back on any error;
/// either way the connection goes back to the pool. Store failures are logged
/// with their cause before being surfaced as `PersistenceFailed`.
pub(crate) async fn in_transaction<T, F>(
    db: &DatabaseConnection,
    operation: &'static str,
    work: F,
) -> Result<T>
where
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>>
        + Send,
    T: Send,
{
    match db.transaction::<_, T, DirectoryError>(work).await {
        Ok(value) => Ok(value),
        Err(TransactionError::Connection(cause)) => Err(persistence_failed(operation, cause)),
        Err(TransactionError::Transaction(DirectoryError::PersistenceFailed(cause))) => {
            Err(persistence_failed(operation, cause))
        }
        Err(TransactionError::Transaction(err)) => {
            tracing::debug!(operation, error = %err, "write rejected, rolled back");
            Err(err)
        }
    }
}

/// Logs a store failure and wraps it.
pub(crate) fn persistence_failed(operation: &'static str, cause: DbErr) -> DirectoryError {
    tracing::error!(operation, error = %cause, "store operation failed, rolled back");
    DirectoryError::PersistenceFailed(cause)
}

/// Escapes LIKE wildcards and lower-cases `term` into a "contains" pattern.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring match of `column` against `term`.
pub(crate) fn name_contains<C>(column: C, term: &str) -> SimpleExpr
where
    C: ColumnTrait + IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

/// Rows of `select` whose name contains `term`, ignoring case.
///
/// SQLite's `lower()` and `LIKE` only fold ASCII, so on SQLite the rows are
/// fetched in order and matched here; other backends match in SQL.
pub(crate) async fn search_by_name<E, C>(
    db: &DatabaseConnection,
    select: Select<E>,
    column: C,
    term: &str,
    name_of: impl Fn(&E::Model) -> &str,
    operation: &'static str,
) -> Result<Vec<E::Model>>
where
    E: EntityTrait,
    C: ColumnTrait + IntoColumnRef,
{
    if db.get_database_backend() != DbBackend::Sqlite {
        return select
            .filter(name_contains(column, term))
            .all(db)
            .await
            .map_err(|e| persistence_failed(operation, e));
    }

    let needle = term.to_lowercase();
    let rows = select
        .all(db)
        .await
        .map_err(|e| persistence_failed(operation, e))?;
    Ok(rows
        .into_iter()
        .filter(|row| name_of(row).to_lowercase().contains(&needle))
        .collect())
}

/// Most ids bound into a single `IN (...)` list.
pub(crate) const ID_BATCH: usize = 1000;

/// Which side of a show owns the upcoming count.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ShowOwner {
    Venue,
    Artist,
}

impl ShowOwner {
    fn column(self) -> show::Column {
        match self {
            Self::Venue => show::Column::VenueId,
            Self::Artist => show::Column::ArtistId,
        }
    }
}

/// Upcoming-show counts for the given owners.
///
/// Only `(owner, start_time)` pairs are loaded, with the ids bound in
/// batches of [`ID_BATCH`].
pub(crate) async fn upcoming_counts(
    db: &DatabaseConnection,
    owner: ShowOwner,
    owner_ids: Vec<i32>,
    now: &Timestamp,
) -> Result<HashMap<i32, u64>> {
    upcoming_counts_in_batches(db, owner, &owner_ids, now, ID_BATCH).await
}

async fn upcoming_counts_in_batches(
    db: &DatabaseConnection,
    owner: ShowOwner,
    owner_ids: &[i32],
    now: &Timestamp,
    batch: usize,
) -> Result<HashMap<i32, u64>> {
    let mut starts: Vec<(i32, Timestamp)> = Vec::new();
    for ids in owner_ids.chunks(batch) {
        let rows = show::Entity::find()
            .select_only()
            .column(owner.column())
            .column(show::Column::StartTime)
            .filter(owner.column().is_in(ids.iter().copied()))
            .into_tuple::<(i32, Timestamp)>()
            .all(db)
            .await
            .map_err(|e| persistence_failed("count upcoming shows", e))?;
        starts.extend(rows);
    }

    Ok(timeline::count_upcoming(starts, now))
}
