//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/v1/delete-income/{transaction_id}',
//! use [format_endpoint].

use crate::database_id::TransactionId;

/// The route to create an income record.
pub const ADD_INCOME: &str = "/api/v1/add-income";
/// The route to list all income records.
pub const GET_INCOMES: &str = "/api/v1/get-incomes";
/// The route to delete an income record by its ID.
pub const DELETE_INCOME: &str = "/api/v1/delete-income/{transaction_id}";
/// The route to create an expense record.
pub const ADD_EXPENSE: &str = "/api/v1/add-expense";
/// The route to list all expense records.
pub const GET_EXPENSES: &str = "/api/v1/get-expenses";
/// The route to delete an expense record by its ID.
pub const DELETE_EXPENSE: &str = "/api/v1/delete-expense/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. This
/// function assumes that an endpoint path only contains ASCII characters and
/// a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: TransactionId) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
