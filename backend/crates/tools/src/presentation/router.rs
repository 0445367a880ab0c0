//! Tools Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::ContactStore;
use crate::presentation::handlers::{self, ToolsAppState};

/// `/calculator`, `/expression`, and `/contact` routes. None require auth.
pub fn tools_router<S>(state: ToolsAppState<S>) -> Router
where
    S: ContactStore + Send + Sync + 'static,
{
    let calculator = Router::new()
        .route("/add", get(handlers::add))
        .route("/subtract", get(handlers::subtract))
        .route("/multiply", get(handlers::multiply))
        .route("/divide", get(handlers::divide));

    let expression = Router::new()
        .route("/get", get(handlers::get_expression::<S>))
        .route("/component", post(handlers::add_component::<S>))
        .route("/full", post(handlers::set_full_expression::<S>))
        .route("/evaluate", post(handlers::evaluate_expression::<S>));

    let contact = Router::new()
        .route("/basic", post(handlers::contact_basic::<S>))
        .route("/extended", post(handlers::contact_extended::<S>))
        .route("/multiple", post(handlers::contact_multiple::<S>));

    Router::new()
        .nest("/calculator", calculator)
        .nest("/expression", expression)
        .nest("/contact", contact)
        .with_state(state)
}
