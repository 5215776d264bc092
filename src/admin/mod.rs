//! Operator admin API.
//!
//! # Endpoints
//! - `POST /api/db/disable-primary`: force SECONDARY, suspend monitor
//! - `POST /api/db/enable-primary`: restore PRIMARY, resume monitor
//! - `GET /api/db/status`: current routing key and monitor state
//! - `GET /admin/status`: liveness and version
//!
//! Every endpoint requires `Authorization: Bearer <api_key>`.

pub mod auth;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Request},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AdminConfig;
use crate::control::OverrideControl;
use self::auth::admin_auth_middleware;
use self::handlers::*;

/// Shared state for admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub control: OverrideControl,
    pub api_key: Arc<str>,
}

/// Tags each admin request with a UUID v4 `x-request-id`.
#[derive(Clone, Copy, Default)]
pub struct AdminRequestId;

impl MakeRequestId for AdminRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

#[allow(deprecated)]
pub fn setup_admin_router(control: OverrideControl, config: &AdminConfig) -> Router {
    let state = AdminState {
        control,
        api_key: Arc::from(config.api_key.as_str()),
    };

    Router::new()
        .route("/api/db/disable-primary", post(disable_primary))
        .route("/api/db/enable-primary", post(enable_primary))
        .route("/api/db/status", get(get_routing))
        .route("/admin/status", get(get_status))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(AdminRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs))),
        )
}
