//! The in-memory view of income and expense records for a session.
//!
//! [Ledger] holds client-side copies of the two server collections and
//! derives totals, the balance, and the recent history from them on demand.
//! The collections are a cache of server truth, never the source of truth:
//! every successful mutation is followed by a full re-fetch of the affected
//! collection rather than a local patch, so displayed state can only ever be
//! stale, not divergent.

use crate::{
    client::{
        api::{ApiClient, ApiError},
        input::TransactionInput,
    },
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction},
};

/// The maximum number of records returned by [Ledger::transaction_history].
pub const TRANSACTION_HISTORY_LIMIT: usize = 3;

/// The single authoritative in-memory view of transactions for a session.
///
/// A `Ledger` is owned by one logical context and shared by reference with
/// the code that renders it; all mutation goes through its own operations.
/// Collections start empty; call [Ledger::refresh] to populate them.
#[derive(Debug)]
pub struct Ledger {
    api: ApiClient,
    incomes: Vec<Transaction>,
    expenses: Vec<Transaction>,
    error: Option<String>,
}

impl Ledger {
    /// Create an empty ledger backed by the API served at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(ApiClient::new(base_url))
    }

    /// Create an empty ledger backed by `api`.
    pub fn with_client(api: ApiClient) -> Self {
        Self {
            api,
            incomes: Vec::new(),
            expenses: Vec::new(),
            error: None,
        }
    }

    /// The income records from the last successful fetch.
    pub fn incomes(&self) -> &[Transaction] {
        &self.incomes
    }

    /// The expense records from the last successful fetch.
    pub fn expenses(&self) -> &[Transaction] {
        &self.expenses
    }

    /// The message of the last failed operation, if it has not been cleared.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear the stored error message.
    ///
    /// Call this when the user edits an input, so a stale message does not
    /// linger next to a corrected form.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Fetch both collections from the server.
    pub async fn refresh(&mut self) {
        self.get_incomes().await;
        self.get_expenses().await;
    }

    /// Validate form `input` and, if it passes, create an income record.
    ///
    /// A submission that fails validation never reaches the network; the
    /// validation message is stored in the error slot instead.
    pub async fn submit_income(&mut self, input: &TransactionInput) {
        match input.validate() {
            Ok(new_transaction) => self.add_income(new_transaction).await,
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// Validate form `input` and, if it passes, create an expense record.
    ///
    /// A submission that fails validation never reaches the network; the
    /// validation message is stored in the error slot instead.
    pub async fn submit_expense(&mut self, input: &TransactionInput) {
        match input.validate() {
            Ok(new_transaction) => self.add_expense(new_transaction).await,
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// Create an income record on the server, then re-fetch the income
    /// collection.
    ///
    /// On failure the collection is left untouched; the record only shows up
    /// once a fetch confirms the server stored it.
    pub async fn add_income(&mut self, new_transaction: NewTransaction) {
        match self.api.add_income(&new_transaction).await {
            Ok(_) => self.get_incomes().await,
            Err(error) => self.set_error(error, "An error occurred while adding income"),
        }
    }

    /// Replace the income collection with the server's current records.
    ///
    /// On failure the previous collection is kept: stale, but consistent
    /// with the last known server state.
    pub async fn get_incomes(&mut self) {
        match self.api.get_incomes().await {
            Ok(incomes) => {
                self.incomes = incomes;
                self.error = None;
            }
            Err(error) => self.set_error(error, "An error occurred while fetching incomes"),
        }
    }

    /// Delete an income record, then re-fetch the income collection.
    ///
    /// On failure the record stays in the collection until the next
    /// successful fetch.
    pub async fn delete_income(&mut self, id: TransactionId) {
        match self.api.delete_income(id).await {
            Ok(()) => self.get_incomes().await,
            Err(error) => self.set_error(error, "An error occurred while deleting income"),
        }
    }

    /// Create an expense record on the server, then re-fetch the expense
    /// collection.
    ///
    /// On failure the collection is left untouched; the record only shows up
    /// once a fetch confirms the server stored it.
    pub async fn add_expense(&mut self, new_transaction: NewTransaction) {
        match self.api.add_expense(&new_transaction).await {
            Ok(_) => self.get_expenses().await,
            Err(error) => self.set_error(error, "An error occurred while adding expense"),
        }
    }

    /// Replace the expense collection with the server's current records.
    ///
    /// On failure the previous collection is kept: stale, but consistent
    /// with the last known server state.
    pub async fn get_expenses(&mut self) {
        match self.api.get_expenses().await {
            Ok(expenses) => {
                self.expenses = expenses;
                self.error = None;
            }
            Err(error) => self.set_error(error, "An error occurred while fetching expenses"),
        }
    }

    /// Delete an expense record, then re-fetch the expense collection.
    ///
    /// On failure the record stays in the collection until the next
    /// successful fetch.
    pub async fn delete_expense(&mut self, id: TransactionId) {
        match self.api.delete_expense(id).await {
            Ok(()) => self.get_expenses().await,
            Err(error) => self.set_error(error, "An error occurred while deleting expense"),
        }
    }

    /// The sum of all income amounts. Zero when the collection is empty.
    pub fn total_income(&self) -> f64 {
        sum_amounts(&self.incomes)
    }

    /// The sum of all expense amounts. Zero when the collection is empty.
    pub fn total_expenses(&self) -> f64 {
        sum_amounts(&self.expenses)
    }

    /// The total balance, income minus expenses.
    ///
    /// Negative when more was spent than earned.
    pub fn total_balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    /// The most recently created records across both collections.
    ///
    /// Returns at most [TRANSACTION_HISTORY_LIMIT] records, newest first.
    /// The order of records created at the same instant is unspecified.
    pub fn transaction_history(&self) -> Vec<&Transaction> {
        let mut history: Vec<&Transaction> =
            self.incomes.iter().chain(self.expenses.iter()).collect();

        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history.truncate(TRANSACTION_HISTORY_LIMIT);

        history
    }

    fn set_error(&mut self, error: ApiError, fallback: &str) {
        tracing::warn!("api request failed: {error}");

        let message = match error.server_message() {
            Some(message) => message.to_owned(),
            None => fallback.to_owned(),
        };

        self.error = Some(message);
    }
}

fn sum_amounts(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum()
}
