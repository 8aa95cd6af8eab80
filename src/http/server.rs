//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single fallback handler, so every
//!   request target form (origin, absolute, asterisk) reaches it
//! - Wire up middleware (request ID, tracing, body timeout, CORS origin)
//! - Log, classify and answer every request
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::RequestBodyTimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{LimitsConfig, MockConfig};
use crate::http::auth::handle_auth_request;
use crate::http::request::{read_declared_body, request_id, IncomingRequest, UuidRequestId};
use crate::http::response::{local_now, TemplateTable};
use crate::observability::metrics;
use crate::routing::{Category, Classifier, Verb};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub templates: Arc<TemplateTable>,
    pub limits: LimitsConfig,
}

impl AppState {
    /// State with the standard rule and template tables.
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            classifier: Arc::new(Classifier::standard()),
            templates: Arc::new(TemplateTable::standard()),
            limits,
        }
    }
}

/// HTTP server for the mock game backend.
pub struct MockServer {
    router: Router,
    config: MockConfig,
}

impl MockServer {
    /// Create a new server with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        let state = AppState::new(config.limits.clone());
        let router = Self::build_router(&config.limits, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A body that stalls past `request_timeout_secs` fails the read and is
    /// treated as empty, so the request is still answered 200.
    pub fn build_router(limits: &LimitsConfig, state: AppState) -> Router {
        Router::new()
            .fallback(mock_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(SetResponseHeaderLayer::if_not_present(
                        header::ACCESS_CONTROL_ALLOW_ORIGIN,
                        HeaderValue::from_static("*"),
                    ))
                    .layer(RequestBodyTimeoutLayer::new(Duration::from_secs(
                        limits.request_timeout_secs,
                    ))),
            )
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on the given listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_body_size = self.config.limits.max_body_size,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }
}

/// Catch-all handler: log, classify, render.
async fn mock_handler(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers());

    let Some(verb) = Verb::from_method(request.method()) else {
        tracing::warn!(
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri(),
            client = %client_addr,
            "Unsupported method"
        );
        return (StatusCode::NOT_IMPLEMENTED, "Unsupported method").into_response();
    };

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let (parts, body) = request.into_parts();
    let mut incoming = IncomingRequest::new(verb, target, &parts.headers, client_addr);
    incoming.log(&request_id);

    if verb == Verb::Post {
        incoming.body =
            read_declared_body(body, &parts.headers, state.limits.max_body_size, &request_id).await;
        incoming.log_body(&request_id);
    }

    let category = state.classifier.classify(verb, &incoming.target);
    tracing::info!(
        request_id = %request_id,
        category = %category,
        path = %incoming.path(),
        "{}",
        category.description()
    );

    let now = local_now();
    let rendered = match category {
        Category::AuthRequest => {
            handle_auth_request(&incoming.body, &state.templates, now, &request_id)
        }
        other => state.templates.render(other, now),
    };

    metrics::record_request(verb.as_str(), category.as_str(), start_time);
    rendered.into_response()
}
