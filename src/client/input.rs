//! Raw form input for a new record and its validation.
//!
//! Validation happens at entry: a submission that fails here never reaches
//! the network, and the server does not re-validate.

use time::Date;

use crate::transaction::NewTransaction;

/// The category options offered for income entries.
pub const INCOME_CATEGORIES: [&str; 8] = [
    "salary",
    "freelancing",
    "investments",
    "stocks",
    "bitcoin",
    "bank",
    "youtube",
    "other",
];

/// The category options offered for expense entries.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "education",
    "groceries",
    "health",
    "subscriptions",
    "takeaways",
    "clothing",
    "travelling",
    "other",
];

/// The raw field values of an income or expense entry form.
///
/// Values are kept exactly as entered; nothing is parsed until
/// [TransactionInput::validate] is called on submission.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionInput {
    /// The entered title.
    pub title: String,
    /// The entered amount, unparsed.
    pub amount: String,
    /// The picked date, if one has been picked.
    pub date: Option<Date>,
    /// The selected category.
    pub category: String,
    /// The entered description. May be left empty.
    pub description: String,
}

/// Why a form submission was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("Please fill in all fields")]
    MissingField,

    /// The amount was not a number, or was not greater than zero.
    #[error("Please enter a valid positive number for the amount")]
    InvalidAmount,
}

impl TransactionInput {
    /// Check the entered values and convert them into a [NewTransaction].
    ///
    /// Title, amount, date, and category are required; the description may be
    /// left empty. The amount must parse as a number greater than zero.
    ///
    /// # Errors
    /// Returns a [ValidationError] describing the first problem found.
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        if self.title.trim().is_empty()
            || self.amount.trim().is_empty()
            || self.category.is_empty()
        {
            return Err(ValidationError::MissingField);
        }

        let Some(date) = self.date else {
            return Err(ValidationError::MissingField);
        };

        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAmount)?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }

        Ok(NewTransaction {
            title: self.title.trim().to_owned(),
            amount,
            date,
            category: self.category.clone(),
            description: self.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{TransactionInput, ValidationError};

    fn valid_input() -> TransactionInput {
        TransactionInput {
            title: "Groceries".to_owned(),
            amount: "85.30".to_owned(),
            date: Some(date!(2026 - 07 - 02)),
            category: "groceries".to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn valid_input_passes() {
        let new_transaction = valid_input().validate().unwrap();

        assert_eq!(new_transaction.title, "Groceries");
        assert_eq!(new_transaction.amount, 85.3);
        assert_eq!(new_transaction.date, date!(2026 - 07 - 02));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let input = TransactionInput {
            amount: "-5".to_owned(),
            ..valid_input()
        };

        assert_eq!(input.validate(), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let input = TransactionInput {
            amount: "abc".to_owned(),
            ..valid_input()
        };

        assert_eq!(input.validate(), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let input = TransactionInput {
            amount: "0".to_owned(),
            ..valid_input()
        };

        assert_eq!(input.validate(), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn missing_title_is_rejected() {
        let input = TransactionInput {
            title: "  ".to_owned(),
            ..valid_input()
        };

        assert_eq!(input.validate(), Err(ValidationError::MissingField));
    }

    #[test]
    fn missing_date_is_rejected() {
        let input = TransactionInput {
            date: None,
            ..valid_input()
        };

        assert_eq!(input.validate(), Err(ValidationError::MissingField));
    }

    #[test]
    fn description_may_be_empty() {
        assert!(valid_input().validate().is_ok());
    }
}
