use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::diaries::handlers;
use crate::features::diaries::services::DiaryService;

/// Create routes for the diaries feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<DiaryService>) -> Router {
    Router::new()
        .route(
            "/api/diaries",
            get(handlers::list_diaries).post(handlers::create_diary),
        )
        .route(
            "/api/diaries/{id}",
            get(handlers::get_diary)
                .patch(handlers::update_diary)
                .delete(handlers::delete_diary),
        )
        .with_state(service)
}
