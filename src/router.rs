//! HTTP route table and cross-cutting layers.

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use http::{header, HeaderName, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{Config, CorsConfig},
    error::Result,
    handlers,
    middleware::{expose_error_detail, require_store},
    state::AppState,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the `/api` router with CORS, tracing and request ids.
///
/// Data routes sit behind `require_store`; `/api/health` does not.
pub fn build_router(state: AppState, config: &Config) -> Result<Router> {
    let data_routes = Router::new()
        .route(
            "/contact",
            get(handlers::list_contacts).post(handlers::submit_contact),
        )
        .route(
            "/contact/{id}",
            put(handlers::update_contact).delete(handlers::delete_contact),
        )
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/projects/{id}",
            put(handlers::update_project).delete(handlers::delete_project),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user).put(handlers::update_user),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_store));

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(data_routes);

    let mut app = Router::new().nest("/api", api_routes).with_state(state);

    if config.is_development() {
        tracing::warn!("Development mode: internal error details are included in responses");
        app = app.layer(middleware::from_fn(expose_error_detail));
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let app = app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<axum::body::Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                },
            ))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(cors_layer(&config.cors)?),
    );

    Ok(app)
}

/// CORS restricted to the configured origins, with credentials.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim()).map_err(|e| {
                config::ConfigError::Message(format!("invalid CORS origin {:?}: {}", origin, e))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
