use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::visited_countries::handlers;
use crate::features::visited_countries::services::VisitedCountryService;

/// Create routes for the visited-countries feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<VisitedCountryService>) -> Router {
    Router::new()
        .route(
            "/api/visited-countries",
            get(handlers::list_visited_countries),
        )
        .route(
            "/api/visited-countries/codes",
            get(handlers::list_visited_country_codes),
        )
        .with_state(service)
}
