// handlers/oauth.rs - sign-in redirect and provider callback

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::state::AuthRoutesState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// GET /auth/google/sign-in - send the browser to the provider consent screen
pub async fn sign_in(State(state): State<AuthRoutesState>) -> Redirect {
    let url = state.identity.auth_code_url(&state.oauth_state);
    Redirect::temporary(&url)
}

/// GET /auth/google/callback?code=...
///
/// Exchanges the authorization code and returns `{"token": "..."}`. Any failure
/// sends the caller back to `/`.
pub async fn callback(State(state): State<AuthRoutesState>, Query(query): Query<CallbackQuery>) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("OAuth callback without code");
        return Redirect::temporary("/").into_response();
    };

    match state.identity.exchange_code(&code).await {
        Ok(token) => Json(json!({ "token": token })).into_response(),
        Err(e) => {
            tracing::warn!("OAuth code exchange failed: {}", e);
            Redirect::temporary("/").into_response()
        }
    }
}
