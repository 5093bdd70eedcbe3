use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde_json::json;

use crate::error::LedgerError;
use crate::middleware::json_body::JsonBody;
use crate::server::router::LedgerState;
use crate::types::Credentials;

/// POST /register
pub async fn register(
    State(state): State<LedgerState>,
    JsonBody(creds): JsonBody<Credentials>,
) -> Result<Response, LedgerError> {
    let user = state
        .accounts
        .register(&creds.username, &creds.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created successfully! You can now log in.",
            "username": user.username,
        })),
    )
        .into_response())
}

/// POST /login -> sets the private session cookie on success.
pub async fn login(
    State(state): State<LedgerState>,
    jar: PrivateCookieJar,
    JsonBody(creds): JsonBody<Credentials>,
) -> Result<Response, LedgerError> {
    let user = state
        .accounts
        .authenticate(&creds.username, &creds.password)
        .await?;
    let jar = jar.add(state.session.build_cookie(&user.username));
    Ok((
        jar,
        Json(json!({
            "message": format!("Welcome back, {}!", user.username),
            "username": user.username,
        })),
    )
        .into_response())
}

/// POST /logout -> always succeeds, clearing any session.
pub async fn logout(State(state): State<LedgerState>, jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = jar.remove(state.session.clear_cookie());
    (jar, Json(json!({ "message": "You have been logged out." })))
}
