//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::{TokenStore, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer_auth;

/// Routes for `/auth`: register, login, logout, and the guarded `/me`.
pub fn auth_router<U, T>(state: AuthAppState<U, T>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth::<U, T>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<U, T>))
        .route("/login", post(handlers::login::<U, T>))
        .route("/logout", post(handlers::logout::<U, T>))
        .merge(protected)
        .with_state(state)
}
