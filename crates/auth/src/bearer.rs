//! Bearer credential extraction from the `Authorization` header.

use crate::error::AuthError;

const SCHEME: &str = "Bearer ";

/// Extract the bearer token payload from a raw `Authorization` header value.
///
/// The scheme prefix is matched case-insensitively and the remainder is
/// trimmed of surrounding whitespace. An absent header, a different scheme,
/// and an empty remainder all collapse into `MissingOrMalformedCredential`:
/// the caller learns that no usable credential arrived, nothing more.
///
/// Pure parsing; borrows from the input, no side effects.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingOrMalformedCredential)?;

    let scheme = header
        .get(..SCHEME.len())
        .ok_or(AuthError::MissingOrMalformedCredential)?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(AuthError::MissingOrMalformedCredential);
    }

    let token = header[SCHEME.len()..].trim();
    if token.is_empty() {
        return Err(AuthError::MissingOrMalformedCredential);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn extracts_the_token_payload() {
        let token = extract_bearer_token(Some("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        for header in ["bearer tok", "BEARER tok", "BeArEr tok"] {
            assert_eq!(extract_bearer_token(Some(header)).unwrap(), "tok");
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(extract_bearer_token(Some("Bearer   tok  ")).unwrap(), "tok");
    }

    #[test]
    fn absent_header_is_malformed() {
        let err = extract_bearer_token(None).unwrap_err();
        assert_eq!(err, AuthError::MissingOrMalformedCredential);
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        for header in ["Basic abc", "Token abc", "Bearerabc", "bearer-abc"] {
            let err = extract_bearer_token(Some(header)).unwrap_err();
            assert_eq!(err, AuthError::MissingOrMalformedCredential, "{header}");
        }
    }

    #[test]
    fn empty_or_blank_payload_is_malformed() {
        for header in ["", "Bearer", "Bearer ", "Bearer    "] {
            let err = extract_bearer_token(Some(header)).unwrap_err();
            assert_eq!(err, AuthError::MissingOrMalformedCredential, "{header:?}");
        }
    }

    #[test]
    fn multibyte_headers_do_not_panic() {
        assert!(extract_bearer_token(Some("Bëarer tok")).is_err());
        assert!(extract_bearer_token(Some("日本語のヘッダー")).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any header that does not open with the case-insensitive
        /// "Bearer " scheme is rejected, whatever follows.
        #[test]
        fn non_bearer_headers_are_always_rejected(header in "\\PC*") {
            let starts_with_scheme = header
                .get(..SCHEME.len())
                .map(|s| s.eq_ignore_ascii_case(SCHEME))
                .unwrap_or(false);
            prop_assume!(!starts_with_scheme);

            prop_assert_eq!(
                extract_bearer_token(Some(&header)).unwrap_err(),
                AuthError::MissingOrMalformedCredential
            );
        }

        /// Property: a token survives extraction unchanged for any scheme
        /// casing and any amount of surrounding whitespace.
        #[test]
        fn well_formed_headers_round_trip(
            token in "[A-Za-z0-9._~+/-]{1,64}",
            scheme_upper in prop::collection::vec(any::<bool>(), 6),
            pad_left in " {0,4}",
            pad_right in " {0,4}",
        ) {
            let scheme: String = "bearer"
                .chars()
                .zip(scheme_upper)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect();
            let header = format!("{scheme} {pad_left}{token}{pad_right}");

            prop_assert_eq!(extract_bearer_token(Some(&header)).unwrap(), token.as_str());
        }
    }
}
