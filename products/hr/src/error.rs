use thiserror::Error;

use crate::model::EmployeeId;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    #[error("employee {0} not found")]
    NotFound(EmployeeId),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid hireDate `{0}`, expected YYYY-MM-DD")]
    InvalidHireDate(String),
}

impl HrError {
    /// True for errors caused by the caller's payload rather than a lookup.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::MissingFields(_) | Self::InvalidHireDate(_))
    }
}
