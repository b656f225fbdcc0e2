//! Database initialization for the application's SQLite schema.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::transaction::{TransactionKind, create_table};

/// Create the tables for the domain models if they do not already exist.
///
/// The income and expense tables are created inside a single exclusive
/// transaction so a half-initialized schema is never left behind.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_table(TransactionKind::Income, &transaction)?;
    create_table(TransactionKind::Expense, &transaction)?;

    transaction.commit()?;

    Ok(())
}
