//! Expense CRUD and date-scoped listing endpoints.

use api_types::expense::{
    ExpenseCreated, ExpenseListResponse, ExpenseNew, ExpenseView, FilterOptions, FilteredExpenses,
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{NaiveDate, Utc};
use engine::{Category, ExpenseDraft, ExpenseRecord, MoneyCents, report};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn view(record: &ExpenseRecord) -> ExpenseView {
    ExpenseView {
        id: record.id,
        amount_minor: record.amount.cents(),
        description: record.description.clone(),
        category: record.category.to_string(),
        date: record.date,
        created_at: record.created_at,
    }
}

fn filtered(subset: Vec<&ExpenseRecord>) -> FilteredExpenses {
    let total_minor: i64 = subset.iter().map(|record| record.amount.cents()).sum();
    FilteredExpenses {
        expenses: subset.into_iter().map(view).collect(),
        total_minor,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<ExpenseCreated>, ServerError> {
    let record = ExpenseRecord::create(
        ExpenseDraft {
            amount: MoneyCents::new(payload.amount_minor),
            description: payload.description,
            category: Category::parse(&payload.category),
            date: payload.date,
        },
        Utc::now(),
    )?;
    let id = record.id;

    // Write lock held across load-modify-save: the snapshot is replaced
    // wholesale and concurrent writers would race otherwise.
    let store = state.store.write().await;
    let mut records = store.load()?;
    records.push(record);
    store.save(&records)?;

    Ok(Json(ExpenseCreated { id }))
}

/// Full snapshot, newest insertion first.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let records = state.store.read().await.load()?;
    let expenses = report::recent_by_creation(&records, records.len())
        .into_iter()
        .map(view)
        .collect();
    Ok(Json(ExpenseListResponse { expenses }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let store = state.store.write().await;
    let mut records = store.load()?;

    let before = records.len();
    records.retain(|record| record.id != id);
    if records.len() == before {
        return Err(ServerError::NotFound("expense not exists".to_string()));
    }
    store.save(&records)?;

    let expenses = report::recent_by_creation(&records, records.len())
        .into_iter()
        .map(view)
        .collect();
    Ok(Json(ExpenseListResponse { expenses }))
}

/// Distinct dates/months/years for the selection controls.
pub async fn filters(
    State(state): State<ServerState>,
) -> Result<Json<FilterOptions>, ServerError> {
    let records = state.store.read().await.load()?;
    Ok(Json(FilterOptions {
        dates: report::available_dates(&records),
        months: report::available_months(&records),
        years: report::available_years(&records),
    }))
}

pub async fn by_day(
    State(state): State<ServerState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<FilteredExpenses>, ServerError> {
    let records = state.store.read().await.load()?;
    Ok(Json(filtered(report::on_day(&records, date))))
}

pub async fn by_month(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<FilteredExpenses>, ServerError> {
    // Keys are compared verbatim; reject anything that is not a real month.
    if NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_err() {
        return Err(ServerError::Generic(format!("invalid month: {month}")));
    }
    let records = state.store.read().await.load()?;
    Ok(Json(filtered(report::in_month(&records, &month))))
}

pub async fn by_year(
    State(state): State<ServerState>,
    Path(year): Path<i32>,
) -> Result<Json<FilteredExpenses>, ServerError> {
    let records = state.store.read().await.load()?;
    Ok(Json(filtered(report::in_year(&records, year))))
}
