use crate::error::AccessResult;
use directory::DirectoryClient;
use sn_core::{ACCESS_ALL_TENANTS, SecurityContext, TenantId};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// Caller identity for a decision: an opaque bearer token the engine still
/// has to resolve, or a context the host already resolved itself.
///
/// Both modes answer identically; the only difference is whether the engine
/// issues the `check_token` round-trip.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Token(&'a str),
    Context(&'a SecurityContext),
}

/// Authorization decision engine over an identity directory.
///
/// Stateless apart from the injected client: nothing is cached or memoized,
/// so every answer reflects the directory at the time of the call. Directory
/// failures propagate as errors, never as a grant or a denial.
#[derive(Clone)]
pub struct RbacService {
    directory: Arc<dyn DirectoryClient>,
}

impl RbacService {
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self { directory }
    }

    /// Resolve the subject to a context. Free for `Subject::Context`, one
    /// `check_token` round-trip for `Subject::Token`, never reused across
    /// top-level calls.
    async fn resolve<'a>(&self, subject: Subject<'a>) -> AccessResult<Cow<'a, SecurityContext>> {
        match subject {
            Subject::Context(ctx) => Ok(Cow::Borrowed(ctx)),
            Subject::Token(token) => Ok(Cow::Owned(self.directory.check_token(token).await?)),
        }
    }

    /// True iff the subject holds the named permission.
    pub async fn has_permission(
        &self,
        subject: Subject<'_>,
        permission: &str,
    ) -> AccessResult<bool> {
        let ctx = self.resolve(subject).await?;
        Ok(ctx.has_permission(permission))
    }

    /// True iff the subject holds [`ACCESS_ALL_TENANTS`].
    pub async fn has_access_all_tenants_permission(
        &self,
        subject: Subject<'_>,
    ) -> AccessResult<bool> {
        self.has_permission(subject, ACCESS_ALL_TENANTS).await
    }

    /// Whether the tenant exists in the hierarchy: it has a resolvable
    /// parent, or it is the root itself.
    ///
    /// The parent is deliberately not verified to be reachable from the
    /// root; a dangling parent still counts as valid.
    pub async fn is_tenant_id_valid(&self, tenant_id: &TenantId) -> AccessResult<bool> {
        if self.directory.get_tenant_parent(tenant_id).await?.is_some() {
            return Ok(true);
        }
        let root = self.directory.get_tenant_root().await?;
        Ok(*tenant_id == root)
    }

    /// Whether the subject may act on `tenant_id`, directly or through an
    /// ancestor assignment. Checks run in a fixed order and stop at the
    /// first decisive step:
    ///
    /// 1. unknown tenant, denied regardless of permissions
    /// 2. `ACCESS_ALL_TENANTS` held, granted
    /// 3. tenant explicitly assigned, granted without an ancestor fetch
    /// 4. any ancestor of the tenant assigned, granted
    pub async fn has_access_to_tenant(
        &self,
        subject: Subject<'_>,
        tenant_id: &TenantId,
    ) -> AccessResult<bool> {
        if !self.is_tenant_id_valid(tenant_id).await? {
            debug!(tenant_id = %tenant_id, "Tenant not found in hierarchy, denying access");
            return Ok(false);
        }

        let ctx = self.resolve(subject).await?;
        if ctx.has_permission(ACCESS_ALL_TENANTS) {
            debug!(tenant_id = %tenant_id, "Subject holds blanket tenant access");
            return Ok(true);
        }
        if ctx.is_assigned(tenant_id) {
            return Ok(true);
        }

        let ancestors = self.directory.get_tenant_ancestors(tenant_id).await?;
        Ok(ancestors.iter().any(|ancestor| ctx.is_assigned(ancestor)))
    }

    /// Whether the subject may act on every listed tenant. Evaluated in
    /// sequence order, stopping at the first denial; no directory calls are
    /// issued for the remaining tenants. Empty input is vacuously true.
    ///
    /// In token mode each element resolves the token afresh, so a decision
    /// over many tenants observes revocation mid-sequence.
    pub async fn has_access_to_tenants(
        &self,
        subject: Subject<'_>,
        tenant_ids: &[TenantId],
    ) -> AccessResult<bool> {
        for tenant_id in tenant_ids {
            if !self.has_access_to_tenant(subject, tenant_id).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
