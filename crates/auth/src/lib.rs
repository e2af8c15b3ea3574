//! `keyward-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: credential
//! extraction and claim reading work on raw strings, and the ownership check
//! reaches the outside world only through a caller-supplied future.

pub mod authorize;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod grants;
pub mod privileges;

pub use authorize::{AccessPolicy, AuthorizationEvaluator, Authorized, Principal};
pub use bearer::extract_bearer_token;
pub use claims::{ClaimReader, Hs256ClaimReader, VerifiedClaims};
pub use error::{AuthError, AuthResult};
pub use grants::{Action, Permission, Role};
pub use privileges::PrivilegeMap;
