pub mod appresult;
pub mod booking;
pub mod config;
pub mod contact;
pub mod db;
pub mod dispatch;
pub mod payload;
pub mod res;
pub mod validate;

use axum::{
    extract::FromRef,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub use appresult::{ApiResponse, AppError, AppResult, Created};
pub use config::Config;
pub use db::Store;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Store,
}

/// The whole http surface: one endpoint at `api_path` taking `book` and `contact` actions.
pub fn router(state: AppState, api_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(
            api_path,
            post(dispatch::dispatch).fallback(dispatch::method_not_allowed),
        )
        .with_state(state)
        .layer(cors)
        // cors only lists methods and headers on preflights; every response carries them
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
}
