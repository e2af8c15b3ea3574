//! API-side authorization glue: the per-request pipeline.
//!
//! Runs the three stages in order — credential extraction, claim
//! verification, layered evaluation — so a handler makes exactly one call
//! and either receives a proven subject or maps the failure to a response.

use keyward_auth::{
    extract_bearer_token, AccessPolicy, Action, AuthError, Authorized, Permission, Principal, Role,
};
use keyward_core::Email;
use keyward_users::UserDirectory;

use crate::app::services::AppServices;

/// Policy guarding `GET /v1/user/load`.
pub fn load_user_policy() -> AccessPolicy {
    AccessPolicy {
        action: Action::new("LOAD.USER"),
        required_permissions: vec![Permission::new("read:user"), Permission::new("edit:user")],
    }
}

/// Run the full authorization pipeline for one request.
///
/// The ownership check is "the subject's account exists in the user
/// directory". On success the resolved subject address comes back with the
/// proof, so the handler can load the record without re-parsing claims.
pub async fn authorize_request(
    services: &AppServices,
    authorization_header: Option<&str>,
    policy: &AccessPolicy,
) -> Result<(Authorized, Email), AuthError> {
    let token = extract_bearer_token(authorization_header)?;
    let claims = services.claim_reader.read_claims(token)?;

    // Presence is the claim reader's business; well-formedness is ours.
    let subject = claims.string_claim("email")?;
    let email = Email::parse(&subject)
        .map_err(|_| AuthError::invalid_token("email claim is not a well-formed address"))?;

    let principal = Principal {
        subject: email.to_string(),
        roles: claims
            .string_list("roles")
            .into_iter()
            .map(Role::new)
            .collect(),
        permissions: claims
            .string_list("permissions")
            .into_iter()
            .map(Permission::new)
            .collect(),
    };

    let directory = &services.directory;
    let proof = services
        .evaluator
        .evaluate(&principal, policy, || directory.email_exists(&email))
        .await?;

    Ok((proof, email))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::{json, Value};

    use keyward_users::{NewUser, UserDirectory};

    use crate::app::services::build_services;
    use crate::app::AppConfig;

    use super::*;

    const SECRET: &str = "test-secret";

    fn services() -> AppServices {
        build_services(&AppConfig {
            jwt_secret: SECRET.to_string(),
            ownership_check_timeout: std::time::Duration::from_millis(200),
        })
    }

    fn mint(claims: Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn full_claims(email: &str) -> Value {
        json!({
            "email": email,
            "roles": ["administrator"],
            "permissions": ["read:user"],
            "exp": Utc::now().timestamp() + 600,
        })
    }

    async fn register(services: &AppServices, email: &str) {
        services
            .users
            .create_user(NewUser {
                email: email.to_string(),
                first_name: "Alice".to_string(),
                last_name: "Smith".to_string(),
                phone: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn full_pipeline_authorizes_a_registered_administrator() {
        let services = services();
        register(&services, "a@b.com").await;

        let header = format!("Bearer {}", mint(full_claims("a@b.com")));
        let (_proof, email) =
            authorize_request(&services, Some(&header), &load_user_policy())
                .await
                .unwrap();

        assert_eq!(email.as_str(), "a@b.com");
    }

    #[tokio::test]
    async fn absent_header_never_reaches_claim_validation() {
        let services = services();

        let err = authorize_request(&services, None, &load_user_policy())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::MissingOrMalformedCredential);
    }

    #[tokio::test]
    async fn token_without_email_claim_is_claim_not_found() {
        let services = services();
        let header = format!(
            "Bearer {}",
            mint(json!({
                "roles": ["administrator"],
                "exp": Utc::now().timestamp() + 600,
            }))
        );

        let err = authorize_request(&services, Some(&header), &load_user_policy())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::claim_not_found("email"));
    }

    #[tokio::test]
    async fn garbage_email_claim_is_a_credential_failure() {
        let services = services();
        let header = format!("Bearer {}", mint(full_claims("not-an-address")));

        let err = authorize_request(&services, Some(&header), &load_user_policy())
            .await
            .unwrap_err();

        assert!(err.is_credential_failure(), "{err:?}");
    }

    #[tokio::test]
    async fn unknown_role_is_denied_before_the_directory_is_consulted() {
        let services = services();
        let mut claims = full_claims("a@b.com");
        claims["roles"] = json!(["intruder"]);
        let header = format!("Bearer {}", mint(claims));

        let err = authorize_request(&services, Some(&header), &load_user_policy())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::insufficient_role("LOAD.USER"));
    }

    #[tokio::test]
    async fn unregistered_subject_fails_the_ownership_check() {
        let services = services();
        let header = format!("Bearer {}", mint(full_claims("ghost@example.com")));

        let err = authorize_request(&services, Some(&header), &load_user_policy())
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::ResourceCheckFailed);
    }

    #[tokio::test]
    async fn ownership_consults_the_live_directory() {
        let services = services();
        let header = format!("Bearer {}", mint(full_claims("a@b.com")));

        // Denied while unregistered, authorized once the account exists.
        assert_eq!(
            authorize_request(&services, Some(&header), &load_user_policy())
                .await
                .unwrap_err(),
            AuthError::ResourceCheckFailed
        );

        register(&services, "a@b.com").await;
        assert!(services
            .directory
            .email_exists(&Email::parse("a@b.com").unwrap())
            .await
            .unwrap());
        assert!(
            authorize_request(&services, Some(&header), &load_user_policy())
                .await
                .is_ok()
        );
    }
}
