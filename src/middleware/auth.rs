//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    constants::authority,
    error::AppError,
    services::AuthService,
    state::AppState,
};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub authority: i32,
}

impl AuthenticatedUser {
    /// Reject callers below the privileged authority level
    pub fn require_privileged(&self) -> Result<(), AppError> {
        if self.authority >= authority::PRIVILEGED {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }

    /// Reject callers without normal authority
    pub fn require_normal(&self) -> Result<(), AppError> {
        if self.authority >= authority::NORMAL {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolve the bearer token, if any, into an [`AuthenticatedUser`].
///
/// Never rejects; handlers that need a user ask for the extractor.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);

    if let Some(token) = token {
        match AuthService::verify_token(&token, &state.config().jwt.secret) {
            Ok(claims) => match claims.sub.parse::<i32>() {
                Ok(id) => {
                    request.extensions_mut().insert(AuthenticatedUser {
                        id,
                        username: claims.username,
                        authority: claims.authority,
                    });
                }
                Err(_) => debug!(sub = %claims.sub, "Invalid user ID in token"),
            },
            Err(e) => {
                debug!(path = %request.uri().path(), error = ?e, "Token verification failed");
            }
        }
    }

    next.run(request).await
}
