//! Directory client configuration.
//!
//! Defaults point at the platform identity service as registered with
//! service discovery; hosts override the base URL (or individual endpoint
//! paths) through deserialized settings or environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Service-discovery name the identity service registers under.
pub const DEFAULT_SERVICE_NAME: &str = "identity-service";
/// Context path the identity service mounts its API on.
pub const DEFAULT_CONTEXT_PATH: &str = "/idm";

const DEFAULT_CHECK_TOKEN_PATH: &str = "/v2/check_token";
const DEFAULT_TENANT_ROOT_PATH: &str = "/v2/tenant_hierarchy/root";
const DEFAULT_TENANT_PARENT_PATH: &str = "/v2/tenant_hierarchy/parent";
const DEFAULT_TENANT_CHILDREN_PATH: &str = "/v2/tenant_hierarchy/children";
const DEFAULT_TENANT_ANCESTORS_PATH: &str = "/v2/tenant_hierarchy/ancestors";

const ENV_BASE_URL: &str = "SENTRA_DIRECTORY_URL";
const ENV_CLIENT_ID: &str = "SENTRA_DIRECTORY_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "SENTRA_DIRECTORY_CLIENT_SECRET";
const ENV_TIMEOUT_MS: &str = "SENTRA_DIRECTORY_TIMEOUT_MS";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub server: ServerConfig,
    pub endpoints: EndpointConfig,
    /// Client credentials presented to the directory as HTTP Basic auth.
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Service name registered with service discovery.
    pub name: String,
    /// The service's context path.
    pub context_path: String,
    /// Fully resolved base URL; overrides name/context path when customized.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub check_token: String,
    pub tenant_hierarchy_root: String,
    pub tenant_hierarchy_parent: String,
    pub tenant_hierarchy_children: String,
    pub tenant_hierarchy_ancestors: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            context_path: DEFAULT_CONTEXT_PATH.to_string(),
            base_url: format!("http://{DEFAULT_SERVICE_NAME}{DEFAULT_CONTEXT_PATH}"),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            check_token: DEFAULT_CHECK_TOKEN_PATH.to_string(),
            tenant_hierarchy_root: DEFAULT_TENANT_ROOT_PATH.to_string(),
            tenant_hierarchy_parent: DEFAULT_TENANT_PARENT_PATH.to_string(),
            tenant_hierarchy_children: DEFAULT_TENANT_CHILDREN_PATH.to_string(),
            tenant_hierarchy_ancestors: DEFAULT_TENANT_ANCESTORS_PATH.to_string(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            endpoints: EndpointConfig::default(),
            client_id: None,
            client_secret: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl DirectoryConfig {
    /// Configuration pointing at an explicit base URL, defaults elsewhere.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                base_url: base_url.into(),
                ..ServerConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from `SENTRA_DIRECTORY_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            config.server.base_url = base_url;
        }
        config.client_id = env::var(ENV_CLIENT_ID).ok();
        config.client_secret = env::var(ENV_CLIENT_SECRET).ok();
        config.request_timeout_ms = env::var(ENV_TIMEOUT_MS)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
