use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::auth::{AuthUser, IdentityProvider};

/// Where callers go when the identity provider cannot be reached
pub const SIGN_IN_PATH: &str = "/auth/google/sign-in";

const BEARER: &str = "Bearer";

/// Authentication gate.
///
/// Resolves the bearer credential through the identity provider and injects
/// the resulting `AuthUser` into request extensions:
/// - provider unreachable: 307 to the sign-in entry point
/// - error payload or unexpected shape: 401 with an empty body
pub async fn authenticate(
    State(identity): State<Arc<dyn IdentityProvider>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_token(request.headers()) {
        Some(token) => token,
        None => {
            tracing::debug!("Rejected request without Authorization header");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    let body = match identity.user_info(&token).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Identity provider call failed: {}", e);
            return Redirect::temporary(SIGN_IN_PATH).into_response();
        }
    };

    let Some(user) = AuthUser::from_user_info(&body) else {
        tracing::warn!("Identity provider rejected credential");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    tracing::debug!("Authenticated user {} <{}>", user.id, user.email);
    request.extensions_mut().insert(user);

    next.run(request).await
}

/// Authorization header value, with an optional `Bearer` scheme removed.
/// The scheme matches case-insensitively; a bare scheme carries no credential.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.get(..BEARER.len()) {
        Some(scheme)
            if scheme.eq_ignore_ascii_case(BEARER)
                && raw[BEARER.len()..].chars().next().map_or(true, char::is_whitespace) =>
        {
            raw[BEARER.len()..].trim()
        }
        _ => raw,
    };

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
