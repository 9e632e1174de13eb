use crate::middleware::auth::{extract_bearer_token, AuthUser};
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use nutriguide_auth::{AuthError, AuthResponse, LoginRequest, RefreshTokenRequest};
use nutriguide_models::user::{NewUser, UpdateProfile, UserProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_error(err: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
        AuthError::InvalidToken(_) | AuthError::TokenExpired | AuthError::TokenRevoked => {
            (StatusCode::UNAUTHORIZED, "invalid_token")
        }
        AuthError::UserInactive => (StatusCode::FORBIDDEN, "account_inactive"),
        AuthError::AlreadyExists(_) => (StatusCode::CONFLICT, "already_exists"),
        AuthError::NotFound(_) => (StatusCode::BAD_REQUEST, "account_not_found"),
        AuthError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        _ => {
            tracing::error!("Auth error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };
    (status, Json(ErrorResponse::new(code, &err.to_string())))
}

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.auth_service.register(request).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(e) => Err(auth_error(e)),
    }
}

/// Login with email and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .login(request)
        .await
        .map(Json)
        .map_err(auth_error)
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub credential: String,
}

/// Login with a Google ID token; the account must already exist
pub async fn google_login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GoogleLoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .login_with_google(&request.credential)
        .await
        .map(Json)
        .map_err(auth_error)
}

/// Exchange a refresh token for a new token pair
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .refresh(request)
        .await
        .map(Json)
        .map_err(auth_error)
}

/// Revoke the presented token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_bearer_token(&headers)?;
    state
        .auth_service
        .logout(&token)
        .await
        .map_err(auth_error)?;

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

/// Current user's profile
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .me(auth_user.user_id)
        .await
        .map(|user| Json(UserResponse { user }))
        .map_err(auth_error)
}

/// Update profile fields; BMI and the calorie target are recomputed
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(request): Json<UpdateProfile>,
) -> Result<Json<UserResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .update_profile(auth_user.user_id, request)
        .await
        .map(|user| Json(UserResponse { user }))
        .map_err(auth_error)
}

/// Deactivate the current account
pub async fn deactivate_account(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .auth_service
        .deactivate_account(auth_user.user_id)
        .await
        .map_err(auth_error)?;

    Ok(Json(MessageResponse {
        message: "Account deactivated".to_string(),
    }))
}
