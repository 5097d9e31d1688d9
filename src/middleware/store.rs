//! Document store availability middleware
//!
//! Runs a health check for every data route and hands the connected store
//! to handlers through request extensions. Requests never reach a handler
//! while the store is unreachable.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    database::{check_health, ConnectedStore, StoreStatus},
    error::{Error, Result},
    state::AppState,
};

/// Middleware gating data routes on store availability
///
/// # Behavior
/// 1. Runs `check_health` against the configured store (if any)
/// 2. On `Connected`, inserts [`ConnectedStore`] into request extensions
/// 3. On `Unavailable`, returns 503 without calling the handler
///
/// # Usage
/// ```ignore
/// Router::new()
///     .route("/contact", get(list_contacts))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_store))
/// ```
pub async fn require_store(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let status = check_health(state.store.as_deref()).await;

    let store = match (status, state.store) {
        (StoreStatus::Connected, Some(store)) => store,
        _ => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejecting request: document store unavailable",
            );
            return Err(Error::Unavailable(
                "Database connection is not available".to_string(),
            ));
        }
    };

    request.extensions_mut().insert(ConnectedStore(store));
    Ok(next.run(request).await)
}
