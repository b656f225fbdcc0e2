//! Defines the core data models and database queries for income and expense records.

use std::fmt::{self, Display};

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A dated, categorised monetary record, either an income or an expense.
///
/// The ID and creation timestamp are assigned by the server when the record
/// is inserted, see [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the record.
    pub id: TransactionId,
    /// A short label identifying the record.
    pub title: String,
    /// The amount of money earned or spent.
    ///
    /// Amounts are entered as positive numbers; whether a record adds to or
    /// subtracts from the balance is decided by the table it is stored in.
    pub amount: f64,
    /// The date the money was earned or spent.
    pub date: Date,
    /// The category the record belongs to.
    pub category: String,
    /// Free-form text describing the record.
    pub description: String,
    /// When the record was created on the server. Always UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The client-supplied fields for creating a [Transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// A short label identifying the record.
    pub title: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// The date the money was earned or spent.
    pub date: Date,
    /// The category the record belongs to.
    pub category: String,
    /// Free-form text describing the record.
    #[serde(default)]
    pub description: String,
}

/// Selects which of the two record tables an operation applies to.
///
/// Income and expense records share a schema but are stored and managed
/// independently, each in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money earned, stored in the `income` table.
    Income,
    /// Money spent, stored in the `expense` table.
    Expense,
}

impl TransactionKind {
    /// The name of the SQL table holding records of this kind.
    pub fn table(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The capitalised name used in client-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

// ============================================================================
// DATABASE
// ============================================================================

/// Create the table for records of `kind` if it does not already exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_table(kind: TransactionKind, connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS \"{0}\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
            kind.table()
        ),
        (),
    )?;

    // Index used by the list queries, which sort on creation time.
    connection.execute(
        &format!(
            "CREATE INDEX IF NOT EXISTS idx_{0}_created_at ON \"{0}\"(created_at)",
            kind.table()
        ),
        (),
    )?;

    Ok(())
}

/// Insert a new record of `kind` into the database, assigning its ID and
/// creation timestamp.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    kind: TransactionKind,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let created_at = OffsetDateTime::now_utc();

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"{}\" (title, amount, date, category, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, amount, date, category, description, created_at",
            kind.table()
        ))?
        .query_one(
            (
                new_transaction.title,
                new_transaction.amount,
                new_transaction.date,
                new_transaction.category,
                new_transaction.description,
                created_at,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve every record of `kind`, most recently created first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions(
    kind: TransactionKind,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    // Sort by creation time, and then ID to keep the order stable when
    // records were created within the same clock tick.
    connection
        .prepare(&format!(
            "SELECT id, title, amount, date, category, description, created_at
             FROM \"{}\" ORDER BY created_at DESC, id DESC",
            kind.table()
        ))?
        .query_map([], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

type RowsAffected = usize;

/// Delete the record of `kind` with `id`.
///
/// Returns the number of rows deleted; zero means no record had the given ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    kind: TransactionKind,
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            &format!("DELETE FROM \"{}\" WHERE id = :id", kind.table()),
            &[(":id", &id)],
        )
        .map_err(|error| error.into())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::{UtcOffset, macros::date};

    use crate::db::initialize;

    use super::{
        NewTransaction, TransactionKind, create_transaction, delete_transaction, get_transactions,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_transaction(title: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            title: title.to_owned(),
            amount,
            date: date!(2026 - 07 - 15),
            category: "other".to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(
            TransactionKind::Income,
            new_transaction("Salary", amount),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert!(transaction.id > 0);
                assert_eq!(transaction.title, "Salary");
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.date, date!(2026 - 07 - 15));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_assigns_utc_timestamp() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            TransactionKind::Expense,
            new_transaction("Groceries", 45.6),
            &conn,
        )
        .unwrap();

        assert_eq!(transaction.created_at.offset(), UtcOffset::UTC);
    }

    #[test]
    fn kinds_are_stored_independently() {
        let conn = get_test_connection();

        create_transaction(TransactionKind::Income, new_transaction("Salary", 100.0), &conn)
            .unwrap();

        let expenses = get_transactions(TransactionKind::Expense, &conn).unwrap();
        assert!(
            expenses.is_empty(),
            "an income record must not appear in the expense table"
        );
        assert_eq!(get_transactions(TransactionKind::Income, &conn).unwrap().len(), 1);
    }

    #[test]
    fn list_returns_newest_first() {
        let conn = get_test_connection();
        for i in 1..=3 {
            create_transaction(
                TransactionKind::Income,
                new_transaction(&format!("income #{i}"), i as f64),
                &conn,
            )
            .unwrap();
        }

        let got = get_transactions(TransactionKind::Income, &conn).unwrap();

        let ids: Vec<_> = got.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn delete_removes_record() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            TransactionKind::Expense,
            new_transaction("Takeaways", 24.5),
            &conn,
        )
        .unwrap();

        let rows_affected =
            delete_transaction(TransactionKind::Expense, transaction.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert!(get_transactions(TransactionKind::Expense, &conn)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn delete_missing_record_affects_no_rows() {
        let conn = get_test_connection();

        let rows_affected = delete_transaction(TransactionKind::Income, 999, &conn).unwrap();

        assert_eq!(rows_affected, 0);
    }
}

#[cfg(test)]
mod serde_tests {
    use time::macros::datetime;

    use super::Transaction;

    // The wire format the client and server agree on: dates as YYYY-MM-DD,
    // timestamps as RFC 3339.
    #[test]
    fn serializes_dates_in_wire_format() {
        let transaction = Transaction {
            id: 1,
            title: "Salary".to_owned(),
            amount: 2600.0,
            date: time::macros::date!(2026 - 08 - 01),
            category: "salary".to_owned(),
            description: String::new(),
            created_at: datetime!(2026-08-01 09:30:00 UTC),
        };

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["date"], "2026-08-01");

        let created_at = json["created_at"].as_str().unwrap();
        assert!(
            created_at.starts_with("2026-08-01T09:30:00"),
            "created_at must be RFC 3339, got {created_at}"
        );
    }
}
