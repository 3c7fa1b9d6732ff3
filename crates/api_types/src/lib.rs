use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod expense {
    use super::*;

    /// Request body for creating an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        /// Amount in integer minor units; must be >= 0.
        pub amount_minor: i64,
        pub description: String,
        /// Category display name; unknown names fold into "Other".
        pub category: String,
        /// ISO `YYYY-MM-DD`.
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: Uuid,
    }

    /// One record as returned by every listing endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub category: String,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }

    /// A date-scoped subset plus its total.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FilteredExpenses {
        pub expenses: Vec<ExpenseView>,
        pub total_minor: i64,
    }

    /// Distinct dates/months/years present in the snapshot, most recent
    /// first. Drives the selection controls of the filtered views.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FilterOptions {
        pub dates: Vec<NaiveDate>,
        pub months: Vec<String>,
        pub years: Vec<i32>,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryEntry {
        pub category: String,
        pub total_minor: i64,
        /// Share of total spend, 0..=100.
        pub percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthEntry {
        /// `YYYY-MM`.
        pub month: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Report {
        pub total_minor: i64,
        pub transaction_count: usize,
        pub daily_average_minor: i64,
        /// Month-over-month change in percent; 0 without a prior month.
        pub monthly_trend_pct: f64,
        pub top_categories: Vec<CategoryEntry>,
        pub monthly_series: Vec<MonthEntry>,
    }
}

pub mod chat {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatAsk {
        pub question: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub reply: String,
    }
}

pub mod feature {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeatureRequestNew {
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeatureRequestAck {
        pub success: bool,
    }
}
