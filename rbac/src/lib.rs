//! # Sentra RBAC
//!
//! The authorization decision engine: resolves bearer tokens (or
//! already-resolved security contexts) against the identity directory and
//! answers permission and tenant-access questions with fail-closed,
//! short-circuiting semantics.

pub mod engine;
pub mod error;
pub mod principal;

pub use engine::{RbacService, Subject};
pub use error::{AccessError, AccessResult};
pub use principal::BearerTokenSource;
