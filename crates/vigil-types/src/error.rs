//! Unified error code interface.
//!
//! Error types across the vigil crates implement [`ErrorCode`] so that
//! logging and callers get stable, machine-readable codes regardless of
//! which crate produced the error.
//!
//! # Example
//!
//! ```
//! use vigil_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum StoreError {
//!     Unreachable,
//!     Corrupt,
//! }
//!
//! impl ErrorCode for StoreError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Unreachable => "STORE_UNREACHABLE",
//!             Self::Corrupt => "STORE_CORRUPT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Unreachable)
//!     }
//! }
//!
//! assert_eq!(StoreError::Unreachable.code(), "STORE_UNREACHABLE");
//! assert!(StoreError::Unreachable.is_recoverable());
//! ```

/// Stable, machine-readable error codes.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, prefixed per domain: `"CONFIG_WRITE"`,
///   `"PROVIDER_FETCH"`
/// - **Stable**: codes are an API contract and must not change once defined
///
/// # Recoverability
///
/// An error is recoverable when retrying may succeed or the user can take
/// corrective action (transient I/O, unreachable remote). Malformed input
/// and serialization bugs are not.
pub trait ErrorCode {
    /// Returns the machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns whether retrying or user action can resolve the error.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code is UPPER_SNAKE_CASE with the expected prefix.
///
/// Test helper; panics with a descriptive message on violation.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Validates every variant of an error enum at once.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl ErrorCode for TestError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "TEST_TRANSIENT",
                Self::Permanent => "TEST_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn trait_contract() {
        assert_eq!(TestError::Transient.code(), "TEST_TRANSIENT");
        assert!(TestError::Transient.is_recoverable());
        assert!(!TestError::Permanent.is_recoverable());
    }

    #[test]
    fn validates_all_variants() {
        assert_error_codes(&[TestError::Transient, TestError::Permanent], "TEST_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn rejects_wrong_prefix() {
        assert_error_code(&TestError::Transient, "OTHER_");
    }

    #[test]
    fn snake_case_rules() {
        assert!(is_upper_snake_case("CONFIG_WRITE"));
        assert!(is_upper_snake_case("A_1"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("config_write"));
        assert!(!is_upper_snake_case("_CONFIG"));
        assert!(!is_upper_snake_case("CONFIG__WRITE"));
    }
}
