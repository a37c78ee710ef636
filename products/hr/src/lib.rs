//! HR module: the employee directory.
//!
//! [`EmployeeStore`] owns the authoritative, insertion-ordered collection of
//! [`Employee`] records. It is constructed once per process and handed to
//! whoever serves it; nothing in this crate is global.

pub mod error;
pub mod model;
pub mod search;
pub mod store;

pub use error::{HrError, HrResult};
pub use model::{Employee, EmployeeId, EmployeePatch, NewEmployee, Patch};
pub use store::EmployeeStore;
