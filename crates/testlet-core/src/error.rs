//! Assertion failure taxonomy

use thiserror::Error;

/// Default message raised when an expected throw never happened
pub const EXPECTED_THROW_MESSAGE: &str = "Function was expected to throw an error";

/// Error value raised by a failing assertion
///
/// Every variant carries a pre-formatted message (and, for the deep
/// comparison, the slot path it fired at); there is no further structured
/// payload. Nothing is recovered inside the library - failures propagate
/// straight to the runner that invoked the assertion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssertError {
    /// Generic boolean or comparison failure
    #[error("{0}")]
    Failure(String),

    /// Two scalars compared unequal during equality or deep comparison
    #[error("Value mismatch at '{path}': {left} != {right}")]
    ValueMismatch {
        path: String,
        left: String,
        right: String,
    },

    /// The driving structure has a slot the other side lacks (forward pass)
    #[error("Missing slot '{path}'")]
    MissingSlot { path: String },

    /// The driving structure has a slot the other side lacks (backward pass)
    #[error("Extra slot '{path}'")]
    ExtraSlot { path: String },

    /// The deep comparison descended past its depth bound
    #[error("Cyclic reference detected at '{path}'")]
    CyclicReference { path: String },

    /// The function under test completed without raising
    #[error("{0}")]
    ExpectedThrow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_preformatted() {
        let err = AssertError::ValueMismatch {
            path: "config.port".to_string(),
            left: "8080".to_string(),
            right: "8123".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Value mismatch at 'config.port': 8080 != 8123"
        );

        assert_eq!(
            AssertError::MissingSlot {
                path: "user.name".to_string()
            }
            .to_string(),
            "Missing slot 'user.name'"
        );

        assert_eq!(
            AssertError::ExpectedThrow(EXPECTED_THROW_MESSAGE.to_string()).to_string(),
            "Function was expected to throw an error"
        );
    }
}
