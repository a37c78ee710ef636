use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use platform_api::{ApiError, ApiResult};
use products_hr::{Employee, EmployeeId, EmployeePatch, EmployeeStore, HrError, NewEmployee};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EmployeeStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: EmployeeStore, config: AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Fresh state for `config`: seeded with the demo employees when enabled.
    pub fn from_config(config: AppConfig) -> Self {
        let store = if config.seed_demo_data {
            EmployeeStore::seeded()
        } else {
            EmployeeStore::new()
        };
        Self::new(store, config)
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee directory listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    let cors = cors_layer(&state.config.cors_allowed_origins);
    let api = Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        );
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[instrument(name = "employees.list", skip_all)]
async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.store.list().await)
}

#[instrument(name = "employees.get", skip(state))]
async fn get_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Employee>> {
    let id = parse_id(&raw_id)?;
    let employee = state.store.get(id).await.map_err(hr_error)?;
    Ok(Json(employee))
}

#[instrument(name = "employees.create", skip_all)]
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(payload) = payload.map_err(json_error)?;
    let employee = state.store.create(payload).await.map_err(hr_error)?;
    info!(employee_id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

#[instrument(name = "employees.update", skip(state, payload))]
async fn update_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = payload.map_err(json_error)?;
    let employee = state.store.update(id, patch).await.map_err(hr_error)?;
    info!(employee_id = id, "employee updated");
    Ok(Json(employee))
}

#[instrument(name = "employees.delete", skip(state))]
async fn delete_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Employee>> {
    let id = parse_id(&raw_id)?;
    let employee = state.store.delete(id).await.map_err(hr_error)?;
    info!(employee_id = id, "employee deleted");
    Ok(Json(employee))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        employees: state.store.len().await,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    employees: usize,
    version: &'static str,
}

/// Ids are plain decimal digits; anything else can never name an employee.
fn parse_id(raw: &str) -> ApiResult<EmployeeId> {
    raw.bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| raw.parse::<EmployeeId>().ok())
        .flatten()
        .ok_or_else(|| ApiError::not_found(format!("employee {raw} not found")))
}

fn hr_error(err: HrError) -> ApiError {
    if err.is_invalid_input() {
        ApiError::invalid_input(err.to_string())
    } else {
        ApiError::not_found(err.to_string())
    }
}

fn json_error(rejection: JsonRejection) -> ApiError {
    ApiError::invalid_input(rejection.body_text())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}
