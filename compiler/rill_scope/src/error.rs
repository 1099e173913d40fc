//! Internal-consistency errors.

use std::fmt;

/// Fatal contract violation inside the scope engine.
///
/// Ordinary queries never fail; these arise only when the parser drives
/// registration/recovery calls out of the required order, and they must
/// abort the compilation rather than produce a silent empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Lambda recovery was requested with no pending lambda registration.
    LambdaUnderflow,
    /// A pending lambda's composed key was absent from the registry.
    MissingLambda(String),
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::LambdaUnderflow => write!(
                f,
                "internal: lambda recovery requested with no pending lambda \
                 (registration and recovery ran out of stack order)"
            ),
            ScopeError::MissingLambda(key) => write!(
                f,
                "internal: pending lambda `{}` is missing from the function registry",
                key
            ),
        }
    }
}

impl std::error::Error for ScopeError {}
