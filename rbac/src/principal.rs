use crate::error::AccessResult;

/// Boundary contract for hosts that keep the caller's credentials in
/// request-scoped state (middleware extensions, task-locals, thread-locals).
///
/// The engine never reads ambient state itself. A host implements this over
/// its framework's mechanism, then passes the extracted token down as
/// [`Subject::Token`](crate::Subject::Token).
pub trait BearerTokenSource {
    /// The current caller's bearer token, or
    /// [`AccessError::NoAuthenticatedPrincipal`](crate::AccessError::NoAuthenticatedPrincipal)
    /// when the request carries no recognized bearer principal.
    fn bearer_token(&self) -> AccessResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;

    struct FixedToken(&'static str);

    impl BearerTokenSource for FixedToken {
        fn bearer_token(&self) -> AccessResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct Anonymous;

    impl BearerTokenSource for Anonymous {
        fn bearer_token(&self) -> AccessResult<String> {
            Err(AccessError::NoAuthenticatedPrincipal(
                "no bearer token in request state".to_string(),
            ))
        }
    }

    #[test]
    fn test_token_source_yields_token() {
        let source = FixedToken("tok-abc");
        assert_eq!(source.bearer_token().unwrap(), "tok-abc");
    }

    #[test]
    fn test_anonymous_source_fails_closed() {
        let err = Anonymous.bearer_token().unwrap_err();
        assert!(matches!(err, AccessError::NoAuthenticatedPrincipal(_)));
        assert!(!err.is_retryable());
    }
}
