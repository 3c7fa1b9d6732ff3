//! Pure aggregation over an expense snapshot.
//!
//! Every operation here takes an immutable slice of records, allocates fresh
//! output and is defined for the empty snapshot. Calendar grouping always
//! keys on [`ExpenseRecord::date`]; recency views key on `created_at`. The
//! two orderings are distinct and must not be conflated.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{Category, ExpenseRecord, MoneyCents};

/// How many entries the top-categories view returns at most.
pub const TOP_CATEGORIES: usize = 5;

/// Per-category summed spend with its share of the total.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: MoneyCents,
    /// `total / total_spend * 100`; `0.0` when the snapshot total is zero.
    pub percentage: f64,
}

/// Summed spend for one `YYYY-MM` month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthTotal {
    pub month: String,
    pub total: MoneyCents,
}

/// Sum of all amounts in the snapshot. Empty input sums to zero.
pub fn total_spend(records: &[ExpenseRecord]) -> MoneyCents {
    records.iter().map(|record| record.amount).sum()
}

/// Groups by category and ranks by summed amount, descending.
///
/// Ties keep the order in which the categories first appear in the snapshot
/// (the sort is stable over first-occurrence accumulation order).
pub fn category_breakdown(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut groups: Vec<(Category, MoneyCents)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(category, _)| *category == record.category) {
            Some((_, total)) => *total += record.amount,
            None => groups.push((record.category, record.amount)),
        }
    }
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let grand_total = total_spend(records);
    groups
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            percentage: total.percent_of(grand_total),
        })
        .collect()
}

/// The `n` biggest spending categories (see [`TOP_CATEGORIES`]).
pub fn top_categories(records: &[ExpenseRecord], n: usize) -> Vec<CategoryTotal> {
    let mut ranked = category_breakdown(records);
    ranked.truncate(n);
    ranked
}

/// Monthly totals sorted ascending by `YYYY-MM` key.
///
/// Lexicographic order on the key equals chronological order for this
/// format.
pub fn monthly_series(records: &[ExpenseRecord]) -> Vec<MonthTotal> {
    let mut months: BTreeMap<String, MoneyCents> = BTreeMap::new();
    for record in records {
        *months.entry(record.month_key()).or_insert(MoneyCents::ZERO) += record.amount;
    }
    months
        .into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

/// Percentage change between the two most recent months in the data.
///
/// Returns `0.0` when there is no previous month, and also when the previous
/// month's total is exactly zero: with no prior baseline the ratio is
/// undefined and reporting a flat trend beats propagating infinities.
pub fn monthly_trend(records: &[ExpenseRecord]) -> f64 {
    let series = monthly_series(records);
    let [.., previous, current] = series.as_slice() else {
        return 0.0;
    };
    if previous.total.is_zero() {
        return 0.0;
    }
    (current.total.cents() - previous.total.cents()) as f64 / previous.total.cents() as f64 * 100.0
}

/// Records whose date equals `day`, in snapshot order.
pub fn on_day(records: &[ExpenseRecord], day: NaiveDate) -> Vec<&ExpenseRecord> {
    records.iter().filter(|record| record.date == day).collect()
}

/// Records whose date falls in the given `YYYY-MM` month, in snapshot order.
pub fn in_month<'a>(records: &'a [ExpenseRecord], month: &str) -> Vec<&'a ExpenseRecord> {
    records
        .iter()
        .filter(|record| record.month_key() == month)
        .collect()
}

/// Records whose date falls in `year`, in snapshot order.
pub fn in_year(records: &[ExpenseRecord], year: i32) -> Vec<&ExpenseRecord> {
    use chrono::Datelike;
    records
        .iter()
        .filter(|record| record.date.year() == year)
        .collect()
}

/// Distinct dates present in the snapshot, most recent first.
pub fn available_dates(records: &[ExpenseRecord]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = records.iter().map(|record| record.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();
    dates
}

/// Distinct `YYYY-MM` keys present in the snapshot, most recent first.
pub fn available_months(records: &[ExpenseRecord]) -> Vec<String> {
    let mut months: Vec<String> = records.iter().map(ExpenseRecord::month_key).collect();
    months.sort_unstable();
    months.dedup();
    months.reverse();
    months
}

/// Distinct years present in the snapshot, most recent first.
pub fn available_years(records: &[ExpenseRecord]) -> Vec<i32> {
    use chrono::Datelike;
    let mut years: Vec<i32> = records.iter().map(|record| record.date.year()).collect();
    years.sort_unstable();
    years.dedup();
    years.reverse();
    years
}

/// Number of distinct dates that have at least one record.
pub fn distinct_date_count(records: &[ExpenseRecord]) -> usize {
    available_dates(records).len()
}

/// Total spend divided by the number of distinct dates with records, rounded
/// to the nearest minor unit. Not a calendar-span average: only days that
/// actually have a record count.
pub fn daily_average(records: &[ExpenseRecord]) -> MoneyCents {
    let days = distinct_date_count(records).max(1);
    total_spend(records).div_round(days as i64)
}

/// Up to `n` records by insertion recency (`created_at` descending).
pub fn recent_by_creation(records: &[ExpenseRecord], n: usize) -> Vec<&ExpenseRecord> {
    let mut recent: Vec<&ExpenseRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(n);
    recent
}

/// Up to `n` records by expense date descending. Used by the chat-context
/// summary, which reports "recent" in calendar terms.
pub fn recent_by_date(records: &[ExpenseRecord], n: usize) -> Vec<&ExpenseRecord> {
    let mut recent: Vec<&ExpenseRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(n);
    recent
}
