//! Employee directory HTTP service.
//!
//! Exposes an [`EmployeeStore`](products_hr::EmployeeStore) under `/api/employees`.
//! The binary in `main.rs` wires configuration, tracing and the CLI around it.

pub mod config;
pub mod http;

pub use config::AppConfig;
pub use http::{AppState, ServeConfig, build_router, serve};
