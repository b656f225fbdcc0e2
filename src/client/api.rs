//! A thin typed HTTP client for the income and expense API.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    database_id::TransactionId,
    endpoints,
    transaction::{NewTransaction, Transaction},
};

/// An error from a single API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server responded with an error status and, if it reported one, a
    /// human-readable message.
    #[error("{}", .message.as_deref().unwrap_or("the server reported an error"))]
    Server {
        /// The HTTP status code of the response.
        status: StatusCode,
        /// The `message` field of the response body, if one was present.
        message: Option<String>,
    },

    /// The request could not be sent or the response body could not be read.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// The server-provided message, if the server reported one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            ApiError::Request(_) => None,
        }
    }
}

/// The `message` field carried by API error responses.
///
/// Bodies without the field are tolerated; the caller falls back to a generic
/// message.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// A typed wrapper over the REST API, one method per route.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`,
    /// e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: Client::new(),
        }
    }

    /// Create an income record on the server.
    ///
    /// # Errors
    /// Returns an [ApiError] if the request fails or the server responds with
    /// an error status.
    pub async fn add_income(&self, new_transaction: &NewTransaction) -> Result<Transaction, ApiError> {
        self.create_transaction(endpoints::ADD_INCOME, new_transaction)
            .await
    }

    /// Fetch every income record, most recently created first.
    ///
    /// # Errors
    /// Returns an [ApiError] if the request fails or the server responds with
    /// an error status.
    pub async fn get_incomes(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_transactions(endpoints::GET_INCOMES).await
    }

    /// Delete the income record with `id`.
    ///
    /// # Errors
    /// Returns an [ApiError] if the request fails or the server responds with
    /// an error status, including when no record has the given ID.
    pub async fn delete_income(&self, id: TransactionId) -> Result<(), ApiError> {
        self.delete_transaction(&endpoints::format_endpoint(endpoints::DELETE_INCOME, id))
            .await
    }

    /// Create an expense record on the server.
    ///
    /// # Errors
    /// Returns an [ApiError] if the request fails or the server responds with
    /// an error status.
    pub async fn add_expense(&self, new_transaction: &NewTransaction) -> Result<Transaction, ApiError> {
        self.create_transaction(endpoints::ADD_EXPENSE, new_transaction)
            .await
    }

    /// Fetch every expense record, most recently created first.
    ///
    /// # Errors
    /// Returns an [ApiError] if the request fails or the server responds with
    /// an error status.
    pub async fn get_expenses(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_transactions(endpoints::GET_EXPENSES).await
    }

    /// Delete the expense record with `id`.
    ///
    /// # Errors
    /// Returns an [ApiError] if the request fails or the server responds with
    /// an error status, including when no record has the given ID.
    pub async fn delete_expense(&self, id: TransactionId) -> Result<(), ApiError> {
        self.delete_transaction(&endpoints::format_endpoint(endpoints::DELETE_EXPENSE, id))
            .await
    }

    async fn create_transaction(
        &self,
        path: &str,
        new_transaction: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(new_transaction)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_response(status, response).await)
        }
    }

    async fn get_transactions(&self, path: &str) -> Result<Vec<Transaction>, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_response(status, response).await)
        }
    }

    async fn delete_transaction(&self, path: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.url(path)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_response(status, response).await)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        ApiError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{ApiClient, ApiError, ErrorBody};

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = ApiClient::new("http://localhost:3000/");

        assert_eq!(
            client.url("/api/v1/get-incomes"),
            "http://localhost:3000/api/v1/get-incomes"
        );
    }

    #[test]
    fn error_body_message_is_optional() {
        let with_message: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(with_message.message.as_deref(), Some("nope"));

        let without_message: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(without_message.message.is_none());
    }

    #[test]
    fn server_error_displays_message() {
        let error = ApiError::Server {
            status: StatusCode::NOT_FOUND,
            message: Some("The record could not be found".to_owned()),
        };

        assert_eq!(error.to_string(), "The record could not be found");
        assert_eq!(
            error.server_message(),
            Some("The record could not be found")
        );
    }
}
