//! Report API endpoint.

use api_types::report::{CategoryEntry, MonthEntry, Report};
use axum::{Json, extract::State};
use engine::report;

use crate::{ServerError, server::ServerState};

/// Computes the dashboard report from the current snapshot.
pub async fn get_report(State(state): State<ServerState>) -> Result<Json<Report>, ServerError> {
    let records = state.store.read().await.load()?;

    let top_categories = report::top_categories(&records, report::TOP_CATEGORIES)
        .into_iter()
        .map(|entry| CategoryEntry {
            category: entry.category.to_string(),
            total_minor: entry.total.cents(),
            percentage: entry.percentage,
        })
        .collect();

    let monthly_series = report::monthly_series(&records)
        .into_iter()
        .map(|entry| MonthEntry {
            month: entry.month,
            total_minor: entry.total.cents(),
        })
        .collect();

    Ok(Json(Report {
        total_minor: report::total_spend(&records).cents(),
        transaction_count: records.len(),
        daily_average_minor: report::daily_average(&records).cents(),
        monthly_trend_pct: report::monthly_trend(&records),
        top_categories,
        monthly_series,
    }))
}
