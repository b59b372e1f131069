use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/registros", post(handlers::submit_form))
        .route(
            "/api/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/catalog", get(handlers::get_catalog))
        .with_state(state)
}
