//! Auth Middleware
//!
//! Bearer guard for protected routes, and the [`CurrentUser`] extractor it
//! feeds.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use platform::bearer::extract_bearer;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::user::CurrentUser;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::access_token::AccessToken;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Reject the request unless it carries `Authorization: Bearer <token>` for a
/// live token whose user still exists.
///
/// Install with `axum::middleware::from_fn_with_state(state, require_bearer_auth::<U, T>)`.
pub async fn require_bearer_auth<U, T>(
    State(state): State<AuthAppState<U, T>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let token = extract_bearer(req.headers()).map(AccessToken::from_presented);

    let current_user = AuthenticateUseCase::new(state.users.clone(), state.tokens.clone())
        .execute(token)
        .await?;

    tracing::debug!(user_id = %current_user.id, "Bearer token accepted");

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
