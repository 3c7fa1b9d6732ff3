//! Chat-context summarizer.
//!
//! Turns the expense snapshot into the bounded text block that travels with
//! every generation request. All numbers come from the report operations so
//! the summary can never disagree with the dashboards.

use std::fmt::Write;

use engine::{ExpenseRecord, report};

/// How many recent records (by expense date) the context includes.
const RECENT_IN_CONTEXT: usize = 10;

pub fn expense_context(records: &[ExpenseRecord]) -> String {
    if records.is_empty() {
        return "No expenses have been recorded yet.".to_string();
    }

    let total = report::total_spend(records);
    let breakdown = report::category_breakdown(records);
    let recent = report::recent_by_date(records, RECENT_IN_CONTEXT);

    let mut out = String::new();
    let _ = writeln!(out, "Expense Summary:");
    let _ = writeln!(out, "- Total expenses: {total}");
    let _ = writeln!(out, "- Number of transactions: {}", records.len());
    let _ = writeln!(out, "- Categories breakdown:");
    for entry in &breakdown {
        let _ = writeln!(out, "  - {}: {}", entry.category, entry.total);
    }
    let _ = writeln!(out, "- Recent expenses:");
    for record in recent {
        let _ = writeln!(
            out,
            "  - {} | {} | {} | {}",
            record.date, record.category, record.description, record.amount
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use engine::{Category, ExpenseDraft, MoneyCents};

    use super::*;

    fn record(amount: i64, category: Category, date: (i32, u32, u32)) -> ExpenseRecord {
        ExpenseRecord::create(
            ExpenseDraft {
                amount: MoneyCents::new(amount),
                description: "something".to_string(),
                category,
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn empty_snapshot_has_fixed_message() {
        assert_eq!(expense_context(&[]), "No expenses have been recorded yet.");
    }

    #[test]
    fn context_reports_totals_and_breakdown() {
        let records = vec![
            record(150_00, Category::FoodAndDining, (2024, 1, 5)),
            record(200_00, Category::Travel, (2024, 2, 1)),
        ];
        let context = expense_context(&records);

        assert!(context.contains("Total expenses: ₹350.00"));
        assert!(context.contains("Number of transactions: 2"));
        assert!(context.contains("Travel: ₹200.00"));
        assert!(context.contains("Food & Dining: ₹150.00"));
    }

    #[test]
    fn recent_section_orders_by_expense_date() {
        let records = vec![
            record(10_00, Category::Groceries, (2024, 1, 1)),
            record(20_00, Category::Groceries, (2024, 3, 1)),
        ];
        let context = expense_context(&records);
        let newer = context.find("2024-03-01").unwrap();
        let older = context.find("2024-01-01").unwrap();
        assert!(newer < older);
    }
}
