use thiserror::Error;

/// A transition that could not be applied to a component's view-state.
///
/// Every variant is recoverable: callers log it and leave the state as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{kind} '{id}' not found")]
    Missing { kind: &'static str, id: String },

    #[error("{kind} index {index} out of range (0..{len})")]
    OutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid promo code '{0}'")]
    InvalidPromo(String),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please fill in all required fields correctly ({} flagged)", .0.len())]
    Validation(Vec<&'static str>),

    #[error("A submission is already in progress")]
    Busy,
}

impl StateError {
    pub fn missing(kind: &'static str, id: impl ToString) -> Self {
        Self::Missing {
            kind,
            id: id.to_string(),
        }
    }
}

/// Failures of the same-device preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for key '{key}' is not valid: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not find a data directory")]
    NoDataDir,
}

/// Failures reported by an async submission port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Service unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_counts_fields() {
        let err = StateError::Validation(vec!["first-name", "email"]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields correctly (2 flagged)"
        );
    }

    #[test]
    fn test_missing_message() {
        let err = StateError::missing("cart item", 7);
        assert_eq!(err.to_string(), "cart item '7' not found");
    }
}
