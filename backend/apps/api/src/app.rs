//! Router Composition

use auth::{
    AuthAppState, MemoryAuthRepository, MemoryTokenStore, PgAuthRepository, TokenStore,
    UserRepository, auth_router,
};
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use platform::cache::CacheStore;
use sqlx::PgPool;
use student::{
    MemoryStudentRepository, PgStudentRepository, StudentAppState, StudentRepository,
    student_router,
};
use tools::{ContactStore, JsonFileContactStore, ToolsAppState, tools_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::config::AppConfig;

/// Mount every bounded context on one router.
///
/// `/auth` and `/student` share the same user and token stores; the tool
/// routes live at the root and are public.
pub fn build_router<U, T, R, C, S>(
    auth: AuthAppState<U, T>,
    students: StudentAppState<R, C>,
    tools: ToolsAppState<S>,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
    S: ContactStore + Send + Sync + 'static,
{
    Router::new()
        .nest("/auth", auth_router(auth.clone()))
        .nest("/student", student_router(students, auth))
        .merge(tools_router(tools))
}

/// Build the application on PostgreSQL when a pool is given, otherwise on
/// in-memory repositories. Tokens always live in process memory.
pub fn build_app<C>(config: &AppConfig, pool: Option<PgPool>, cache: C) -> Router
where
    C: CacheStore + Send + Sync + 'static,
{
    let tools = ToolsAppState::new(JsonFileContactStore::new(
        config.tools_config().contact_storage_dir,
    ));

    match pool {
        Some(pool) => build_router(
            AuthAppState::new(
                PgAuthRepository::new(pool.clone()),
                MemoryTokenStore::new(),
                config.auth_config(),
            ),
            StudentAppState::new(PgStudentRepository::new(pool), cache, config.student_config()),
            tools,
        ),
        None => build_router(
            AuthAppState::new(
                MemoryAuthRepository::new(),
                MemoryTokenStore::new(),
                config.auth_config(),
            ),
            StudentAppState::new(
                MemoryStudentRepository::new(),
                cache,
                config.student_config(),
            ),
            tools,
        ),
    }
}

/// CORS for the configured frontend origins. Unparseable origins are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-session-id"),
        ]))
        .allow_credentials(true)
}
