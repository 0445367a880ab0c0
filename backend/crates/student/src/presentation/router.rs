//! Student Router

use auth::{AuthAppState, TokenStore, UserRepository, require_bearer_auth};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use platform::cache::CacheStore;

use crate::domain::repository::StudentRepository;
use crate::presentation::handlers::{self, StudentAppState};

/// Routes for `/student`. All of them require a bearer token.
pub fn student_router<R, C, U, T>(state: StudentAppState<R, C>, auth: AuthAppState<U, T>) -> Router
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/create", post(handlers::create_student::<R, C>))
        .route("/by_faculty", get(handlers::by_faculty::<R, C>))
        .route("/unique_courses", get(handlers::unique_courses::<R, C>))
        .route("/average_grade", get(handlers::average_grade::<R, C>))
        .route("/low_grade", get(handlers::low_grade::<R, C>))
        .route("/import_csv", post(handlers::import_csv::<R, C>))
        .route("/import_csv_bg", post(handlers::import_csv_bg::<R, C>))
        .route("/delete_bg", delete(handlers::delete_bg::<R, C>))
        .route(
            "/{id}",
            get(handlers::get_student::<R, C>)
                .put(handlers::update_student::<R, C>)
                .delete(handlers::delete_student::<R, C>),
        )
        .route_layer(middleware::from_fn_with_state(
            auth,
            require_bearer_auth::<U, T>,
        ))
        .with_state(state)
}
