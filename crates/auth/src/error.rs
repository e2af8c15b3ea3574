//! Authorization error taxonomy.

use thiserror::Error;

/// Result type used across the authorization pipeline.
pub type AuthResult<T> = Result<T, AuthError>;

/// Everything that can end an authorization pipeline early.
///
/// The variants fall into three groups. Credential failures mean the caller
/// never proved who it is; definite denials mean identity was proven and
/// access was refused; `ResourceCheckError` is indeterminate (the ownership
/// lookup could not answer). Response mapping works on the groups, never on
/// individual variants, so a rejected caller cannot tell which check turned
/// it away. Definite denials must never be retried automatically; an
/// indeterminate outcome may be.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Header absent, scheme not `Bearer`, or empty token payload.
    #[error("missing or malformed credential")]
    MissingOrMalformedCredential,

    /// Signature mismatch or malformed token structure.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The token's validity window has elapsed.
    #[error("token expired")]
    ExpiredToken,

    /// The named claim is absent from a validated payload.
    #[error("claim not found: {0}")]
    ClaimNotFound(String),

    /// The principal holds none of the roles mapped to the action.
    #[error("insufficient role for action '{0}'")]
    InsufficientRole(String),

    /// The principal holds none of the permissions the action accepts.
    #[error("insufficient permission for action '{0}'")]
    InsufficientPermission(String),

    /// The ownership predicate answered "no".
    #[error("resource check failed")]
    ResourceCheckFailed,

    /// The ownership predicate errored or timed out.
    #[error("resource check error: {0}")]
    ResourceCheckError(String),
}

impl AuthError {
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn claim_not_found(name: impl Into<String>) -> Self {
        Self::ClaimNotFound(name.into())
    }

    pub fn insufficient_role(action: impl Into<String>) -> Self {
        Self::InsufficientRole(action.into())
    }

    pub fn insufficient_permission(action: impl Into<String>) -> Self {
        Self::InsufficientPermission(action.into())
    }

    pub fn resource_check_error(msg: impl Into<String>) -> Self {
        Self::ResourceCheckError(msg.into())
    }

    /// Credential/claim failures: the request never authenticated.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingOrMalformedCredential
                | Self::InvalidToken(_)
                | Self::ExpiredToken
                | Self::ClaimNotFound(_)
        )
    }

    /// Definite denials: authenticated, but access refused.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::InsufficientRole(_) | Self::InsufficientPermission(_) | Self::ResourceCheckFailed
        )
    }

    /// Indeterminate outcome: the decision could not be completed.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::ResourceCheckError(_))
    }
}
