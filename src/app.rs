use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/intake", post(handlers::submit_intake))
        .route("/goal", post(handlers::submit_goal))
        .route("/api/today", get(handlers::get_today))
        .route("/api/history", get(handlers::get_history))
        .route("/api/intake", post(handlers::post_intake))
        .route("/api/goal", get(handlers::get_goal).post(handlers::post_goal))
        .route("/api/tip", get(handlers::get_tip))
        .with_state(state)
}
