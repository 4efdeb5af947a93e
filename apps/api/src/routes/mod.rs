pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::intake::handlers as intake;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(matching::handle_get_catalog))
        // Intake
        .route("/api/v1/profiles", post(intake::handle_submit_profile))
        .route(
            "/api/v1/profiles/extract",
            post(intake::handle_extract_profile),
        )
        .route(
            "/api/v1/profiles/:telegram_id",
            get(intake::handle_get_profile),
        )
        // Recommendations
        .route(
            "/api/v1/recommendations/:telegram_id",
            get(matching::handle_recommendations),
        )
        // Old paths kept for deployed bots; they answer with the v1 bodies,
        // not the old `id`/`user_data`/`uni` shapes.
        .route("/api/profile", post(intake::handle_submit_profile))
        .route(
            "/api/recommendations/:telegram_id",
            get(matching::handle_recommendations),
        )
        .with_state(state)
}
