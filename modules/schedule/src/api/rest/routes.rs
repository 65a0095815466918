use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the HTTP surface with the domain service attached as an extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/users", post(handlers::create_user))
        .route("/api/users/{telegram_id}", get(handlers::get_user))
        .route(
            "/api/schedule",
            post(handlers::create_schedule_item).get(handlers::list_schedule),
        )
        .route(
            "/api/schedule/{id}",
            get(handlers::get_schedule_item)
                .put(handlers::update_schedule_item)
                .delete(handlers::delete_schedule_item),
        )
        .layer(Extension(service))
}
