use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::countries::handlers;
use crate::features::countries::services::CountryService;

/// Create routes for the countries feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CountryService>) -> Router {
    Router::new()
        .route("/api/countries", get(handlers::list_countries))
        .route("/api/countries/{code}", get(handlers::get_country))
        .with_state(service)
}
