//! Defines the endpoints for creating income and expense records.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{NewTransaction, TransactionKind, core::create_transaction},
};

/// The state needed to create an income or expense record.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new income record.
///
/// Responds with `201 Created` and the created record on success.
pub async fn create_income_endpoint(
    State(state): State<CreateTransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    create_transaction_response(TransactionKind::Income, new_transaction, &state)
}

/// A route handler for creating a new expense record.
///
/// Responds with `201 Created` and the created record on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateTransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    create_transaction_response(TransactionKind::Expense, new_transaction, &state)
}

fn create_transaction_response(
    kind: TransactionKind,
    new_transaction: NewTransaction,
    state: &CreateTransactionState,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_transaction(kind, new_transaction, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => {
            tracing::error!("could not create {kind} record: {error}");
            error.into_response()
        }
    }
}
