pub mod todos;

use std::{any::Any, path::Path};

use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::http::types::ApiError;

/// Full application: health probe, the todo API, and the browser UI from `public_dir`
/// for any GET/HEAD the API does not claim. Everything else is a JSON 404.
pub fn app(router: Router, public_dir: impl AsRef<Path>) -> Router {
    let assets = ServeDir::new(public_dir.as_ref())
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(todos::not_found.into_service());

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .fallback_service(assets)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(SetResponseHeaderLayer::if_not_present(header::CACHE_CONTROL, HeaderValue::from_static("no-store")))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal error".to_string()
    };
    ApiError::Internal(message).into_response()
}
