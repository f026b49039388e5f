use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/dashboard", get(handlers::dashboard))
        .route("/tracker", get(handlers::tracker))
        .route("/tracker/add", post(handlers::tracker_add))
        .route("/tracker/reset", post(handlers::tracker_reset))
        .route("/analytics", get(handlers::analytics))
        .route("/api/behaviors", get(handlers::get_behaviors).post(handlers::add_behavior))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
