//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState,
    customer::{create_purchase_endpoint, get_customer_endpoint},
    endpoints,
    error::ErrorMessage,
    purchase::{delete_purchase_endpoint, edit_purchase_endpoint},
};

/// Return a router with all the app's routes.
///
/// Every route accepts cross-origin requests from any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::CUSTOMER, get(get_customer_endpoint))
        .route(endpoints::CUSTOMER_PURCHASE, post(create_purchase_endpoint))
        .route(
            endpoints::PURCHASE,
            put(edit_purchase_endpoint).delete(delete_purchase_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(build_cors_layer())
        .with_state(state)
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorMessage::new("Not found."))).into_response()
}
