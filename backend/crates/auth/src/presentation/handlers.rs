//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use std::sync::Arc;

use platform::bearer::extract_bearer;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::user::CurrentUser;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::access_token::AccessToken;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UserResponse,
};

/// Shared state for auth handlers and the bearer guard
#[derive(Clone)]
pub struct AuthAppState<U, T>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub tokens: Arc<T>,
    pub config: Arc<AuthConfig>,
}

impl<U, T> AuthAppState<U, T>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    pub fn new(users: U, tokens: T, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<U, T>(
    State(state): State<AuthAppState<U, T>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.users.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            username: req.username,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<U, T>(
    State(state): State<AuthAppState<U, T>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse::bearer(output.access_token.into_inner())))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
///
/// Only the header shape is checked; an unknown token still logs out.
pub async fn logout<U, T>(
    State(state): State<AuthAppState<U, T>>,
    headers: HeaderMap,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let token = extract_bearer(&headers)
        .map(AccessToken::from_presented)
        .ok_or(AuthError::MissingToken)?;

    LogoutUseCase::new(state.tokens.clone())
        .execute(&token)
        .await?;

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /auth/me (behind the bearer guard)
pub async fn me(user: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
