pub mod buckets;
pub mod objects;
pub mod server;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the console router / 构建路由
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/", get(buckets::index))
        .route("/create_bucket", post(buckets::create_bucket))
        .route("/view_bucket/:bucket_name", get(buckets::view_bucket))
        .route("/delete_bucket", post(buckets::delete_bucket))
        .route("/upload", get(objects::upload_form).post(objects::upload_file))
        // Mutating GET routes, kept for link compatibility
        .route("/delete/:bucket_name/:filename", get(objects::delete_file))
        .route("/copy/:bucket_name/:filename", get(objects::copy_file))
        .route("/move/:bucket_name/:filename/:new_folder", get(objects::move_file))
        .layer(DefaultBodyLimit::disable()) // No size limit
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
