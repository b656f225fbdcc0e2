//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    transaction::{
        create_expense_endpoint, create_income_endpoint, delete_expense_endpoint,
        delete_income_endpoint, get_expenses_endpoint, get_incomes_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ADD_INCOME, post(create_income_endpoint))
        .route(endpoints::GET_INCOMES, get(get_incomes_endpoint))
        .route(endpoints::DELETE_INCOME, delete(delete_income_endpoint))
        .route(endpoints::ADD_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::GET_EXPENSES, get(get_expenses_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Respond with a JSON 404 for routes that do not exist.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": "The requested resource could not be found",
        })),
    )
        .into_response()
}

#[cfg(test)]
mod api_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, endpoints, endpoints::format_endpoint, transaction::Transaction};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection).expect("Could not initialize database.");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn income_create_list_delete_cycle() {
        let server = get_test_server();

        let response = server
            .post(endpoints::ADD_INCOME)
            .json(&json!({
                "title": "Salary",
                "amount": 2600.0,
                "date": "2026-07-01",
                "category": "salary",
                "description": "July pay",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Transaction = response.json();
        assert_eq!(created.title, "Salary");
        assert_eq!(created.amount, 2600.0);

        let response = server.get(endpoints::GET_INCOMES).await;
        response.assert_status_ok();
        let incomes: Vec<Transaction> = response.json();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].id, created.id);

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_INCOME, created.id))
            .await;
        response.assert_status_ok();

        let incomes: Vec<Transaction> = server.get(endpoints::GET_INCOMES).await.json();
        assert!(incomes.is_empty());
    }

    #[tokio::test]
    async fn expense_routes_do_not_touch_incomes() {
        let server = get_test_server();

        server
            .post(endpoints::ADD_EXPENSE)
            .json(&json!({
                "title": "Groceries",
                "amount": 85.3,
                "date": "2026-07-02",
                "category": "groceries",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let incomes: Vec<Transaction> = server.get(endpoints::GET_INCOMES).await.json();
        assert!(incomes.is_empty());

        let expenses: Vec<Transaction> = server.get(endpoints::GET_EXPENSES).await.json();
        assert_eq!(expenses.len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_record_responds_with_message() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_EXPENSE, 999))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert!(
            body["message"].is_string(),
            "error responses must carry a message field"
        );
    }

    #[tokio::test]
    async fn unknown_route_responds_with_json_404() {
        let server = get_test_server();

        let response = server.get("/api/v1/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let server = get_test_server();

        let response = server
            .post(endpoints::ADD_INCOME)
            .json(&json!({ "title": "No amount" }))
            .await;

        assert!(
            response.status_code().is_client_error(),
            "incomplete records must not be accepted"
        );

        let incomes: Vec<Transaction> = server.get(endpoints::GET_INCOMES).await.json();
        assert!(incomes.is_empty());
    }
}
