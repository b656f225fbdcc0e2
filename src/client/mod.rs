//! The client-side aggregation and synchronization layer.
//!
//! This module keeps a session's in-memory view of income and expense
//! records consistent with the server: every successful create or delete is
//! followed by a full re-fetch of the affected collection, and all derived
//! values (totals, balance, history) are recomputed from the collections
//! rather than stored.
//!
//! - [ApiClient] wraps the REST API, one typed method per route
//! - [Ledger] owns the collections, the error slot, and the derivations
//! - [TransactionInput] validates raw form fields before anything is sent

mod api;
mod input;
mod ledger;

pub use api::{ApiClient, ApiError};
pub use input::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, TransactionInput, ValidationError};
pub use ledger::{Ledger, TRANSACTION_HISTORY_LIMIT};
