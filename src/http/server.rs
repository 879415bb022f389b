//! Dashboard HTTP server.
//!
//! # Responsibilities
//! - Create the Axum router with the page and JSON handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Run one evaluation cycle per page load
//! - Apply reloaded configuration without a restart

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::{ApiClient, ClientError, Envelope, Fetch, HEALTH_PATH, TASKS_PATH};
use crate::config::DashboardConfig;
use crate::http::render;
use crate::http::request_id::MakeRequestUuid;
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::posture::{self, PostureReport};

/// Everything a handler needs, swapped as a unit on config reload.
#[derive(Debug)]
pub struct Runtime {
    pub config: DashboardConfig,
    pub client: ApiClient,
}

impl Runtime {
    pub fn new(config: DashboardConfig) -> Result<Self, ClientError> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self { config, client })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<Runtime>>,
}

impl AppState {
    /// Replace the runtime for subsequent requests. In-flight requests keep the old one.
    pub fn apply_config(&self, config: DashboardConfig) -> Result<(), ClientError> {
        let runtime = Runtime::new(config)?;
        tracing::info!(base_url = %runtime.client.base_url(), "Applied new configuration");
        self.inner.store(Arc::new(runtime));
        Ok(())
    }
}

/// HTTP server for the posture dashboard.
pub struct DashboardServer {
    router: Router,
    state: AppState,
}

impl DashboardServer {
    /// Create a new dashboard server with the given configuration.
    pub fn new(config: DashboardConfig) -> Result<Self, ClientError> {
        let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(Runtime::new(config)?)),
        };

        let router = Self::build_router(request_timeout, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/api/health", get(api_health))
            .route("/api/tasks", get(api_tasks))
            .route("/api/security", get(api_security))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// The router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, applying configs from `config_updates`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<DashboardConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Dashboard server starting");

        let state = self.state.clone();
        let reload = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = state.apply_config(config) {
                    tracing::error!(error = %e, "Rejected reloaded configuration");
                }
            }
        });

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await;

        reload.abort();
        tracing::info!("Dashboard server stopped");
        result
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let runtime = state.inner.load_full();
    let (health, tasks, report) = tokio::join!(
        runtime.client.get_json(HEALTH_PATH),
        runtime.client.get_json(TASKS_PATH),
        posture::collect(&runtime.client),
    );

    Html(render::dashboard_page(
        runtime.client.base_url(),
        &health,
        &tasks,
        &report,
    ))
}

async fn api_health(State(state): State<AppState>) -> Json<Envelope> {
    let runtime = state.inner.load_full();
    Json(runtime.client.get_json(HEALTH_PATH).await)
}

async fn api_tasks(State(state): State<AppState>) -> Json<Envelope> {
    let runtime = state.inner.load_full();
    Json(runtime.client.get_json(TASKS_PATH).await)
}

async fn api_security(State(state): State<AppState>) -> Json<PostureReport> {
    let runtime = state.inner.load_full();
    Json(posture::collect(&runtime.client).await)
}
