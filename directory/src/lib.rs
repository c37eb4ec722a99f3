//! # Identity Directory Client
//!
//! Contract and HTTP implementation for the platform identity/tenant
//! directory: bearer-token introspection plus the tenant-hierarchy lookups
//! (root, parent, children, ancestors) that tenant access decisions build
//! on. The directory owns all identity and hierarchy state; this crate
//! never caches, retries, or batches on its own.

pub mod client;
pub mod config;
pub mod error;

pub use client::{DirectoryClient, HttpDirectoryClient, create_directory_client};
pub use config::{DirectoryConfig, EndpointConfig, ServerConfig};
pub use error::{DirectoryError, DirectoryResult};
