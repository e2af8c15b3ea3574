use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use keyward_users::NewUser;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::{authz, locale};

pub fn router() -> Router {
    Router::new()
        .route("/create", post(create_user))
        .route("/load", get(load_user))
}

#[tracing::instrument(name = "user_create", skip_all, fields(locale = tracing::field::Empty))]
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    record_locale(&headers);

    let input = NewUser {
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
    };

    match services.users.create_user(input).await {
        Ok(record) => (StatusCode::CREATED, Json(dto::user_to_json(record))).into_response(),
        Err(e) => errors::user_service_error_to_response(e),
    }
}

#[tracing::instrument(name = "user_load", skip_all, fields(locale = tracing::field::Empty))]
pub async fn load_user(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    record_locale(&headers);

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let policy = authz::load_user_policy();
    let (_proof, email) = match authz::authorize_request(&services, authorization, &policy).await {
        Ok(outcome) => outcome,
        Err(e) => return errors::auth_error_to_response(e),
    };

    // 404 only in the race where the record vanishes between the ownership
    // check and this load.
    match services.users.load_user(&email).await {
        Ok(record) => (StatusCode::OK, Json(dto::user_to_json(record))).into_response(),
        Err(e) => errors::user_service_error_to_response(e),
    }
}

fn record_locale(headers: &HeaderMap) {
    let resolved = locale::resolve(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );
    tracing::Span::current().record("locale", resolved.as_str());
}
