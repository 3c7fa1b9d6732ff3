//! Expense record primitives.
//!
//! A record is created once from a validated draft and never mutated; the
//! only other lifecycle event is deletion by id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, MoneyCents, ResultEngine};

/// One user-entered transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    #[serde(rename = "amount_minor")]
    pub amount: MoneyCents,
    pub description: String,
    pub category: Category,
    /// Calendar date of the expense, user-chosen and independent of
    /// `created_at`.
    pub date: NaiveDate,
    /// Insertion timestamp. Used only for recency ordering.
    pub created_at: DateTime<Utc>,
}

/// User input for a new record, before validation.
#[derive(Clone, Debug)]
pub struct ExpenseDraft {
    pub amount: MoneyCents,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Validates a draft and assigns `id`/`created_at`.
    ///
    /// Rejects negative amounts and blank descriptions; these never reach the
    /// report operations.
    pub fn create(draft: ExpenseDraft, now: DateTime<Utc>) -> ResultEngine<Self> {
        if draft.amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }
        if draft.description.trim().is_empty() {
            return Err(EngineError::MissingField("description".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
            date: draft.date,
            created_at: now,
        })
    }

    /// `YYYY-MM` key used for monthly grouping.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ExpenseDraft {
        ExpenseDraft {
            amount: MoneyCents::new(1000),
            description: "lunch".to_string(),
            category: Category::FoodAndDining,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[test]
    fn create_assigns_id_and_timestamp() {
        let now = Utc::now();
        let record = ExpenseRecord::create(draft(), now).unwrap();
        assert_eq!(record.created_at, now);
        assert_eq!(record.amount.cents(), 1000);
        assert_eq!(record.month_key(), "2024-01");
    }

    #[test]
    fn create_rejects_negative_amount() {
        let mut bad = draft();
        bad.amount = MoneyCents::new(-1);
        assert!(matches!(
            ExpenseRecord::create(bad, Utc::now()),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn create_rejects_blank_description() {
        let mut bad = draft();
        bad.description = "   ".to_string();
        assert_eq!(
            ExpenseRecord::create(bad, Utc::now()),
            Err(EngineError::MissingField("description".to_string()))
        );
    }

    #[test]
    fn serde_uses_minor_units_and_iso_date() {
        let record = ExpenseRecord::create(draft(), Utc::now()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["amount_minor"], 1000);
        assert_eq!(json["date"], "2024-01-05");
        let back: ExpenseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
