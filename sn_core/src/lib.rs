//! # Sentra Core
//!
//! Shared security types for services that delegate identity and tenancy
//! decisions to the platform identity directory.
//!
//! This crate provides:
//! - `SecurityContext`: the identity snapshot returned by the directory's
//!   token introspection endpoint
//! - `TenantId`: opaque tenant identifier newtype
//! - Granted-authority extraction from verified token claims

pub mod authorities;
pub mod types;

// Re-export commonly used items for convenience
pub use authorities::{ClaimValue, granted_authorities};
pub use types::{ACCESS_ALL_TENANTS, SecurityContext, TenantId};
