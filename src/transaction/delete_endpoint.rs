//! Defines the endpoints for deleting income and expense records.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{TransactionKind, core::delete_transaction},
};

/// The state needed to delete an income or expense record.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an income record by its ID.
///
/// Responds with a JSON acknowledgement, or a 404 with a JSON message if no
/// record has the given ID.
pub async fn delete_income_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    delete_transaction_response(TransactionKind::Income, transaction_id, &state)
}

/// A route handler for deleting an expense record by its ID.
///
/// Responds with a JSON acknowledgement, or a 404 with a JSON message if no
/// record has the given ID.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    delete_transaction_response(TransactionKind::Expense, transaction_id, &state)
}

fn delete_transaction_response(
    kind: TransactionKind,
    transaction_id: TransactionId,
    state: &DeleteTransactionState,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_transaction(kind, transaction_id, &connection) {
        Ok(0) => Error::DeleteMissingTransaction.into_response(),
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("{} deleted", kind.label()),
            })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not delete {kind} record {transaction_id}: {error}");
            error.into_response()
        }
    }
}
