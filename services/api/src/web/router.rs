//! services/api/src/web/router.rs
//!
//! Binds every handler to its route and applies the cross-origin, tracing and
//! authentication layers.

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::web::{
    auth::{issue_token_handler, logout_handler},
    bookings::{book_tutor_handler, my_booked_tutors_handler},
    middleware::require_auth,
    rest::root_handler,
    state::AppState,
    tutorials::{
        add_review_handler, add_tutorial_handler, delete_tutorial_handler,
        find_categories_handler, find_tutorials_handler, find_tutors_by_category_handler,
        my_tutorials_handler, stats_handler, tutor_by_id_handler, update_tutorial_handler,
    },
};

/// Credentialed requests are only accepted from the configured origins.
pub fn cors_layer(state: &AppState) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.config.allowed_origins.clone()))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
}

/// Builds the complete application router.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes: Router<Arc<AppState>> = Router::new()
        .route("/", get(root_handler))
        .route("/findTutorials", get(find_tutorials_handler))
        .route("/findCategories", get(find_categories_handler))
        .route("/findTutors/{category}", get(find_tutors_by_category_handler))
        .route("/tutor/{id}", get(tutor_by_id_handler))
        .route("/myTutorials", get(my_tutorials_handler))
        .route("/stats", get(stats_handler))
        .route("/addTutorial", post(add_tutorial_handler))
        .route("/bookTutor", post(book_tutor_handler))
        .route("/addReview", post(add_review_handler))
        .route("/jwt", post(issue_token_handler))
        .route("/logout", post(logout_handler))
        .route("/updateTutorial/{id}", put(update_tutorial_handler))
        .route("/deleteTutorial/{id}", delete(delete_tutorial_handler));

    // Protected routes (auth required)
    let protected_routes: Router<Arc<AppState>> = Router::new()
        .route("/myBookedTutors", get(my_booked_tutors_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let cors = cors_layer(&app_state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
