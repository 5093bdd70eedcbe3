use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Serialize;
use serde_json::json;

use crate::error::LedgerError;
use crate::middleware::json_body::JsonBody;
use crate::middleware::session::CurrentUser;
use crate::server::router::LedgerState;
use crate::types::{Money, Sale, SaleSubmission, SalesTotals};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub username: String,
    pub total_revenue: Money,
    pub total_quantity: i64,
    /// Default value for the sale form's date field.
    pub today: String,
}

/// POST /sales
pub async fn submit_sale(
    State(state): State<LedgerState>,
    _user: CurrentUser,
    JsonBody(submission): JsonBody<SaleSubmission>,
) -> Result<Response, LedgerError> {
    let sale = state.ledger.record_submission(&submission).await?;
    let message = format!(
        "Sale of {} x {} recorded! Revenue: ${}",
        sale.quantity, sale.item_name, sale.revenue
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": message, "sale": sale })),
    )
        .into_response())
}

/// GET /sales/totals
pub async fn totals(
    State(state): State<LedgerState>,
    _user: CurrentUser,
) -> Result<Json<SalesTotals>, LedgerError> {
    Ok(Json(state.ledger.totals().await?))
}

/// GET /sales -> newest first.
pub async fn history(
    State(state): State<LedgerState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Sale>>, LedgerError> {
    Ok(Json(state.ledger.history().await?))
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<LedgerState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, LedgerError> {
    let totals = state.ledger.totals().await?;
    Ok(Json(Dashboard {
        username: user.username,
        total_revenue: totals.total_revenue,
        total_quantity: totals.total_quantity,
        today: Local::now().date_naive().format("%Y-%m-%d").to_string(),
    }))
}
