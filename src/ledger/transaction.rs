use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// A single recorded income or expense event.
///
/// Field names mirror the legacy stored JSON, so ledgers written by earlier
/// versions of the tracker load unchanged (`kind` round-trips as `"type"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Contribution of this transaction to the running balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields for a transaction that has not been recorded yet.
/// The store assigns the id and defaults the date at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub kind: TransactionKind,
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            kind,
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(self.amount.to_string()));
        }
        Ok(())
    }
}

/// Parses a user-typed amount string into a positive finite number.
pub fn parse_amount(input: &str) -> Result<f64, LedgerError> {
    let parsed: f64 = input
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(input.to_string()))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(LedgerError::InvalidAmount(input.to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn stored_json_keeps_legacy_field_names() {
        let txn = Transaction {
            id: 1717200000000,
            description: "Groceries".into(),
            amount: 42.5,
            category: "Food".into(),
            kind: TransactionKind::Expense,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-06-01");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn draft_validation_rejects_blank_description() {
        let draft = TransactionDraft::new("   ", 10.0, "Food", TransactionKind::Expense);
        assert!(matches!(
            draft.validate(),
            Err(crate::errors::LedgerError::EmptyDescription)
        ));
    }

    #[test]
    fn draft_validation_rejects_non_positive_amounts() {
        for amount in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let draft = TransactionDraft::new("Lunch", amount, "Food", TransactionKind::Expense);
            assert!(
                matches!(
                    draft.validate(),
                    Err(crate::errors::LedgerError::InvalidAmount(_))
                ),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn parse_amount_accepts_decimal_input() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), 12.5);
        assert!(parse_amount("zero").is_err());
        assert!(parse_amount("-5").is_err());
    }
}
