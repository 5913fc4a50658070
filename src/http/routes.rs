use axum::{routing::get, routing::patch, routing::post, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn comments() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/comments/:id",
            patch(handlers::update_comment).delete(handlers::delete_comment),
        )
}

pub fn likes() -> Router<AppState> {
    Router::new().route("/likes", post(handlers::upsert_like))
}
