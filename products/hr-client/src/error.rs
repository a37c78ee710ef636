use std::fmt;

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// The operation a [`ClientError`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::List => "load employees",
            Action::Get => "fetch employee",
            Action::Create => "create employee",
            Action::Update => "update employee",
            Action::Delete => "delete employee",
        })
    }
}

/// Any failed proxy call: error status, unreachable server or bad body alike.
#[derive(Debug, Error)]
#[error("failed to {action}: {reason}")]
pub struct ClientError {
    action: Action,
    reason: String,
}

impl ClientError {
    pub(crate) fn new(action: Action, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_action() {
        let err = ClientError::new(Action::Delete, "404 Not Found: employee 9 not found");
        assert_eq!(
            err.to_string(),
            "failed to delete employee: 404 Not Found: employee 9 not found"
        );
        assert_eq!(err.action(), Action::Delete);
    }
}
