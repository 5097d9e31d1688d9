//! Development-mode error details
//!
//! Server errors are rendered with a generic message. When the service runs
//! with `app.environment = development` this layer copies the internal error
//! text into the body as `detail`.

use axum::{
    body::{self, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use http::header;

use crate::error::ErrorDetail;

/// Upper bound on error bodies rewritten by this layer.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

pub async fn expose_error_detail(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match body::to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Could not buffer error body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut json: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(json) => json,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    if let Some(object) = json.as_object_mut() {
        object.insert("detail".to_string(), serde_json::Value::String(detail));
    }

    let rewritten = match serde_json::to_vec(&json) {
        Ok(rewritten) => rewritten,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(rewritten))
}
