use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use keyward_auth::AuthError;
use keyward_users::UserServiceError;

/// Map an authorization outcome to its response group.
///
/// The bodies are fixed per group: a credential failure and a definite
/// denial each produce one generic body, whichever check turned the caller
/// away, so responses leak nothing about the privilege configuration. The
/// precise reason goes to the log instead. Only the indeterminate outcome
/// is visibly different (503), so clients can tell "denied" from "could not
/// decide" and retry the latter.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    tracing::debug!(reason = %err, "authorization pipeline rejected request");

    if err.is_credential_failure() {
        json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication required",
        )
    } else if err.is_denial() {
        json_error(StatusCode::FORBIDDEN, "forbidden", "access denied")
    } else {
        json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "authorization_unavailable",
            "authorization could not be completed",
        )
    }
}

pub fn user_service_error_to_response(err: UserServiceError) -> axum::response::Response {
    match err {
        UserServiceError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        UserServiceError::DuplicateEmail => {
            json_error(StatusCode::CONFLICT, "conflict", "email already registered")
        }
        UserServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        UserServiceError::StoreUnavailable(msg) => {
            tracing::error!(reason = %msg, "user store unavailable");
            json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                "user store unavailable",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
