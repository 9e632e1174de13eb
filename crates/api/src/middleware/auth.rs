use crate::handlers::auth::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use nutriguide_auth::{AuthService, Claims};
use nutriguide_tenant::TenantContext;
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated user context. This is the ambient tenant identity the
/// data layer binds connections to.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Extract and validate JWT from Authorization header
pub fn extract_bearer_token(
    headers: &HeaderMap,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "missing_auth_header",
                    "Authorization header is required",
                )),
            )
        })?
        .to_str()
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "invalid_auth_header",
                    "Invalid Authorization header format",
                )),
            )
        })?;

    if !auth_header.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(
                "invalid_auth_scheme",
                "Authorization header must use Bearer scheme",
            )),
        ));
    }

    Ok(auth_header[7..].to_string())
}

/// Validate an access token and reject revoked ones.
pub async fn validate_token(
    auth_service: &AuthService,
    token: &str,
) -> Result<Claims, (StatusCode, Json<ErrorResponse>)> {
    let claims = auth_service.jwt.validate_access_token(token).map_err(|e| {
        tracing::debug!("Token validation failed: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("invalid_token", &e.to_string())),
        )
    })?;

    let revoked = auth_service.is_revoked(&claims.jti).await.map_err(|e| {
        tracing::error!("Revocation check failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("internal_error", "Revocation check failed")),
        )
    })?;

    if revoked {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("token_revoked", "Token has been revoked")),
        ));
    }

    Ok(claims)
}

/// Middleware to require authentication
pub async fn require_auth(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_bearer_token(&headers)?;
    let claims = validate_token(&state.auth_service, &token).await?;

    let user_id = claims.user_id().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("invalid_token", "Invalid user ID in token")),
        )
    })?;

    // Add user and tenant context to request extensions
    request.extensions_mut().insert(AuthUser {
        user_id,
        email: claims.email.clone(),
    });
    request.extensions_mut().insert(TenantContext::new(user_id));

    Ok(next.run(request).await)
}
