//! Client data proxy for the employee directory API.
//!
//! [`EmployeeClient`] turns each call into exactly one HTTP request against
//! `/api/employees` and reports every failure, whatever its cause, as a
//! [`ClientError`] naming the action that failed. It keeps no state beyond
//! the underlying connection pool: no caching, no retries.

pub mod client;
pub mod error;

pub use client::EmployeeClient;
pub use error::{Action, ClientError, ClientResult};
