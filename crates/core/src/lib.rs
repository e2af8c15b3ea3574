//! `keyward-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no transport or storage
//! concerns): the domain error model, strongly-typed identifiers, and the
//! value objects shared by the other crates.

pub mod email;
pub mod error;
pub mod id;
pub mod value_object;

pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use value_object::ValueObject;
