//! Defines the endpoints for listing income and expense records.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{TransactionKind, core::get_transactions},
};

/// The state needed to list income or expense records.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing all income records, most recently created first.
pub async fn get_incomes_endpoint(State(state): State<ListTransactionsState>) -> Response {
    list_transactions_response(TransactionKind::Income, &state)
}

/// A route handler for listing all expense records, most recently created first.
pub async fn get_expenses_endpoint(State(state): State<ListTransactionsState>) -> Response {
    list_transactions_response(TransactionKind::Expense, &state)
}

fn list_transactions_response(kind: TransactionKind, state: &ListTransactionsState) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_transactions(kind, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("could not list {kind} records: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{NewTransaction, Transaction, TransactionKind, create_transaction},
    };

    use super::{ListTransactionsState, get_incomes_endpoint};

    fn get_test_state() -> ListTransactionsState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ListTransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn lists_all_incomes() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (title, amount) in [("Salary", 2600.0), ("Dividends", 120.5)] {
                create_transaction(
                    TransactionKind::Income,
                    NewTransaction {
                        title: title.to_owned(),
                        amount,
                        date: date!(2026 - 07 - 01),
                        category: "other".to_owned(),
                        description: String::new(),
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        let response = get_incomes_endpoint(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let incomes: Vec<Transaction> = serde_json::from_slice(&body).unwrap();
        assert_eq!(incomes.len(), 2);
        assert_eq!(incomes[0].title, "Dividends", "newest record should be first");
    }

    #[tokio::test]
    async fn lists_nothing_when_empty() {
        let state = get_test_state();

        let response = get_incomes_endpoint(State(state)).await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let incomes: Vec<Transaction> = serde_json::from_slice(&body).unwrap();
        assert!(incomes.is_empty());
    }
}
