// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{self, admin, health, quiz},
    state::AppState,
    utils::auth::admin_middleware,
};

/// Assembles the main application router.
///
/// * Public quiz routes under `/api/quiz` and the `/health` liveness check.
/// * Admin routes under `/api/admin`, mounted only when an admin token is configured.
/// * Global middleware (Trace, CORS) and JSON 404 / 405 fallbacks.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origin);

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::get_questions))
        .route("/submit", post(quiz::submit_quiz));

    let mut router: Router<AppState> = Router::new()
        .route("/health", get(health::health))
        .nest("/api/quiz", quiz_routes);

    if state.config.admin_token.is_some() {
        let admin_routes = Router::new()
            .route(
                "/questions",
                post(admin::create_question).delete(admin::clear_questions),
            )
            .route("/questions/{id}", get(admin::get_question))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                admin_middleware,
            ));
        router = router.nest("/api/admin", admin_routes);
    }

    router
        // Must follow every route and nest it should cover.
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
            cors
        }
    }
}
