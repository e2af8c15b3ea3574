//! Token validation and claim reading.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use crate::error::AuthError;

/// Claims from a token whose signature and validity window have been
/// checked.
///
/// Values of this type only exist on the far side of verification, so
/// holding one is the license to trust its contents. Claim values are
/// strings at this layer; semantic parsing (e.g. into an email address)
/// stays with the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    claims: Map<String, Value>,
}

impl VerifiedClaims {
    /// Wrap a payload that has already been signature- and expiry-checked.
    ///
    /// Claim readers call this after verification; anything else calling it
    /// is asserting that verification happened elsewhere.
    pub fn from_trusted(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Raw claim value, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// The named claim as a string value.
    ///
    /// A claim that is absent, or whose JSON value is not a string, reports
    /// as `ClaimNotFound`.
    pub fn string_claim(&self, name: &str) -> Result<String, AuthError> {
        match self.claims.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(AuthError::claim_not_found(name)),
        }
    }

    /// A claim holding several string values.
    ///
    /// Accepts a JSON array of strings or a single comma/space-separated
    /// string (both shapes appear in tokens from common issuers). An absent
    /// claim is an empty list.
    pub fn string_list(&self, name: &str) -> Vec<String> {
        match self.claims.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) => s
                .split([',', ' '])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Stateless token verification plus claim lookup.
///
/// Implementations own the signature algorithm and claim schema; call sites
/// depend only on this trait, so either can be swapped without touching
/// them.
pub trait ClaimReader: Send + Sync {
    /// Verify token integrity (signature) and temporal validity (expiry,
    /// not-before) and return the full payload.
    fn read_claims(&self, token: &str) -> Result<VerifiedClaims, AuthError>;

    /// Verify the token and return one named claim as a string.
    fn claim(&self, token: &str, name: &str) -> Result<String, AuthError> {
        self.read_claims(token)?.string_claim(name)
    }
}

/// HMAC-SHA256 claim reader over signed JWTs.
///
/// `exp` is required and enforced; `nbf` is enforced when present. Any
/// non-temporal rejection reports as `InvalidToken` without distinguishing
/// signature problems from structural ones.
pub struct Hs256ClaimReader {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256ClaimReader {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_nbf = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl ClaimReader for Hs256ClaimReader {
    fn read_claims(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            ErrorKind::InvalidSignature => AuthError::invalid_token("signature mismatch"),
            ErrorKind::ImmatureSignature => AuthError::invalid_token("token not yet valid"),
            _ => AuthError::invalid_token(e.to_string()),
        })?;

        Ok(VerifiedClaims::from_trusted(data.claims))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "test-secret";

    fn mint(secret: &str, claims: Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn reader() -> Hs256ClaimReader {
        Hs256ClaimReader::new(SECRET)
    }

    fn fresh_exp() -> i64 {
        Utc::now().timestamp() + 600
    }

    #[test]
    fn valid_token_yields_its_claims() {
        let token = mint(SECRET, json!({ "email": "a@b.com", "exp": fresh_exp() }));

        let claims = reader().read_claims(&token).unwrap();
        assert_eq!(claims.string_claim("email").unwrap(), "a@b.com");
    }

    #[test]
    fn claim_lookup_goes_through_verification() {
        let token = mint(SECRET, json!({ "email": "a@b.com", "exp": fresh_exp() }));

        assert_eq!(reader().claim(&token, "email").unwrap(), "a@b.com");
    }

    #[test]
    fn tampered_signature_is_invalid_token() {
        let token = mint("other-secret", json!({ "email": "a@b.com", "exp": fresh_exp() }));

        let err = reader().read_claims(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)), "{err:?}");
    }

    #[test]
    fn garbage_token_structure_is_invalid_token() {
        let err = reader().read_claims("abc.def.ghi").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)), "{err:?}");
    }

    #[test]
    fn elapsed_validity_window_is_expired_token() {
        // Stay clear of the default leeway (60s).
        let token = mint(
            SECRET,
            json!({ "email": "a@b.com", "exp": Utc::now().timestamp() - 600 }),
        );

        let err = reader().read_claims(&token).unwrap_err();
        assert_eq!(err, AuthError::ExpiredToken);
    }

    #[test]
    fn token_without_expiry_is_invalid() {
        let token = mint(SECRET, json!({ "email": "a@b.com" }));

        let err = reader().read_claims(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)), "{err:?}");
    }

    #[test]
    fn not_yet_valid_token_is_invalid_not_expired() {
        let token = mint(
            SECRET,
            json!({
                "email": "a@b.com",
                "exp": fresh_exp(),
                "nbf": Utc::now().timestamp() + 300,
            }),
        );

        let err = reader().read_claims(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)), "{err:?}");
    }

    #[test]
    fn absent_claim_is_claim_not_found() {
        let token = mint(SECRET, json!({ "email": "a@b.com", "exp": fresh_exp() }));

        let err = reader().claim(&token, "nickname").unwrap_err();
        assert_eq!(err, AuthError::claim_not_found("nickname"));
    }

    #[test]
    fn non_string_claim_is_claim_not_found() {
        let token = mint(SECRET, json!({ "flags": 7, "exp": fresh_exp() }));

        let err = reader().claim(&token, "flags").unwrap_err();
        assert_eq!(err, AuthError::claim_not_found("flags"));
    }

    #[test]
    fn string_list_accepts_arrays_and_delimited_strings() {
        let claims = VerifiedClaims::from_trusted(
            json!({
                "roles": ["administrator", "visitor"],
                "permissions": "read:user, edit:user",
                "scope": "read:user edit:user",
            })
            .as_object()
            .unwrap()
            .clone(),
        );

        assert_eq!(claims.string_list("roles"), vec!["administrator", "visitor"]);
        assert_eq!(claims.string_list("permissions"), vec!["read:user", "edit:user"]);
        assert_eq!(claims.string_list("scope"), vec!["read:user", "edit:user"]);
        assert!(claims.string_list("groups").is_empty());
    }
}
