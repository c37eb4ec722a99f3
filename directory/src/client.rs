use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, DirectoryResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use sn_core::{SecurityContext, TenantId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Contract for the identity/tenant directory. Every method is a remote
/// call that may fail; callers own retry policy.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Resolve an opaque bearer token into its security context.
    async fn check_token(&self, token: &str) -> DirectoryResult<SecurityContext>;

    /// The single root of the tenant hierarchy.
    async fn get_tenant_root(&self) -> DirectoryResult<TenantId>;

    /// Direct parent of a tenant, `None` when the directory knows of none.
    async fn get_tenant_parent(&self, tenant_id: &TenantId) -> DirectoryResult<Option<TenantId>>;

    /// Direct children of a tenant.
    async fn get_tenant_children(
        &self,
        tenant_id: &TenantId,
    ) -> DirectoryResult<HashSet<TenantId>>;

    /// All transitive ancestors of a tenant, excluding the tenant itself.
    async fn get_tenant_ancestors(
        &self,
        tenant_id: &TenantId,
    ) -> DirectoryResult<HashSet<TenantId>>;
}

pub struct HttpDirectoryClient {
    client: Client,
    config: DirectoryConfig,
}

impl HttpDirectoryClient {
    pub fn new(config: DirectoryConfig) -> DirectoryResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(DirectoryError::Http)?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.server.base_url.trim_end_matches('/'),
            path
        )
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.client_id {
            Some(client_id) => request.basic_auth(client_id, self.config.client_secret.as_deref()),
            None => request,
        }
    }

    /// GET a hierarchy endpoint whose body is a bare tenant id string.
    async fn get_text(&self, path: &str, tenant_id: Option<&TenantId>) -> DirectoryResult<String> {
        let url = self.endpoint(path);
        debug!(url = %url, "Making directory API request");

        let mut request = self.client.get(&url);
        if let Some(tenant_id) = tenant_id {
            request = request.query(&[("tenantId", tenant_id.as_str())]);
        }
        let response = self.authenticated(request).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DirectoryError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    /// GET a hierarchy endpoint whose body is a JSON array of tenant ids.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        tenant_id: &TenantId,
    ) -> DirectoryResult<T> {
        let url = self.endpoint(path);
        debug!(url = %url, "Making directory API request");

        let response = self
            .authenticated(
                self.client
                    .get(&url)
                    .query(&[("tenantId", tenant_id.as_str())]),
            )
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| DirectoryError::Decode(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DirectoryError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn check_token(&self, token: &str) -> DirectoryResult<SecurityContext> {
        let url = self.endpoint(&self.config.endpoints.check_token);
        debug!(url = %url, "Checking token against identity directory");

        let response = self
            .authenticated(self.client.post(&url).query(&[("token", token)]))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => response
                .json::<SecurityContext>()
                .await
                .map_err(|e| DirectoryError::Decode(e.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(DirectoryError::InvalidToken(format!(
                    "check_token returned {}",
                    response.status()
                )))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DirectoryError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    async fn get_tenant_root(&self) -> DirectoryResult<TenantId> {
        let body = self
            .get_text(&self.config.endpoints.tenant_hierarchy_root, None)
            .await?;

        // The hierarchy has exactly one root; a blank body is malformed.
        TenantId::new(body.trim())
            .ok_or_else(|| DirectoryError::Decode("tenant hierarchy root is blank".to_string()))
    }

    async fn get_tenant_parent(&self, tenant_id: &TenantId) -> DirectoryResult<Option<TenantId>> {
        let body = self
            .get_text(&self.config.endpoints.tenant_hierarchy_parent, Some(tenant_id))
            .await?;

        // A blank 2xx body means the directory knows of no parent.
        Ok(TenantId::new(body.trim()))
    }

    async fn get_tenant_children(
        &self,
        tenant_id: &TenantId,
    ) -> DirectoryResult<HashSet<TenantId>> {
        self.get_json(&self.config.endpoints.tenant_hierarchy_children, tenant_id)
            .await
    }

    async fn get_tenant_ancestors(
        &self,
        tenant_id: &TenantId,
    ) -> DirectoryResult<HashSet<TenantId>> {
        self.get_json(&self.config.endpoints.tenant_hierarchy_ancestors, tenant_id)
            .await
    }
}

pub fn create_directory_client(
    config: DirectoryConfig,
) -> DirectoryResult<Arc<dyn DirectoryClient>> {
    Ok(Arc::new(HttpDirectoryClient::new(config)?))
}
