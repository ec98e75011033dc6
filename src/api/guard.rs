use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::models::{AppState, AuthError, Role, TokenClaims};

/// Authorization requirement of one protected route.
///
/// Layered onto a handler with
/// `middleware::from_fn_with_state(RouteGuard::new(&state, roles), authorize)`.
#[derive(Clone)]
pub struct RouteGuard {
    state: Arc<AppState>,
    required: &'static [Role],
}

impl RouteGuard {
    pub fn new(state: &Arc<AppState>, required: &'static [Role]) -> Self {
        Self {
            state: state.clone(),
            required,
        }
    }

    /// Decides whether a request carrying `headers` may proceed.
    ///
    /// The token is the raw `Authorization` value, without a `Bearer ` prefix.
    pub fn check(&self, headers: &HeaderMap) -> Result<TokenClaims, AuthError> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::NoToken)?;

        let claims = self.state.codec.verify(token, self.state.clock.now())?;

        if !self.required.contains(&claims.sub) {
            return Err(AuthError::Forbidden);
        }
        Ok(claims)
    }
}

/// Forwards the request untouched when the guard allows it, otherwise
/// answers with the error itself.
pub async fn authorize(State(guard): State<RouteGuard>, request: Request, next: Next) -> Response {
    match guard.check(request.headers()) {
        Ok(claims) => {
            debug!(username = %claims.username, role = %claims.sub, "Request authorized");
            next.run(request).await
        }
        Err(e) => {
            warn!(
                reason = e.kind(),
                method = %request.method(),
                path = %request.uri().path(),
                "Request rejected"
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{now, test_state};
    use axum::{
        body::Body,
        handler::Handler,
        http::{HeaderValue, StatusCode},
        middleware,
        routing::delete,
        Router,
    };
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(token).unwrap());
        headers
    }

    #[test]
    fn missing_or_empty_header_has_no_token() {
        let state = test_state();
        let guard = RouteGuard::new(&state, Role::ADMINS);

        assert!(matches!(guard.check(&HeaderMap::new()), Err(AuthError::NoToken)));
        assert!(matches!(guard.check(&headers_with("")), Err(AuthError::NoToken)));
    }

    #[test]
    fn admin_passes_admin_guard() {
        let state = test_state();
        let token = state.issuer.issue("admin", Role::Admin).unwrap();
        let guard = RouteGuard::new(&state, Role::ADMINS);

        let claims = guard.check(&headers_with(&token)).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.sub, Role::Admin);
    }

    #[test]
    fn moderator_is_forbidden_on_admin_guard() {
        let state = test_state();
        let token = state.issuer.issue("moderator", Role::Moderator).unwrap();

        assert!(matches!(
            RouteGuard::new(&state, Role::ADMINS).check(&headers_with(&token)),
            Err(AuthError::Forbidden)
        ));
        assert!(RouteGuard::new(&state, Role::EDITORS)
            .check(&headers_with(&token))
            .is_ok());
    }

    #[test]
    fn bearer_prefix_is_not_stripped() {
        let state = test_state();
        let token = state.issuer.issue("admin", Role::Admin).unwrap();
        let guard = RouteGuard::new(&state, Role::ADMINS);

        let result = guard.check(&headers_with(&format!("Bearer {token}")));
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }

    #[test]
    fn expired_token_is_invalid() {
        let state = test_state();
        let token = state
            .codec
            .sign(&TokenClaims {
                exp: (now() - Duration::minutes(1)).timestamp(),
                iss: "products-api".to_string(),
                sub: Role::Admin,
                username: "admin".to_string(),
            })
            .unwrap();
        let guard = RouteGuard::new(&state, Role::ADMINS);

        let err = guard.check(&headers_with(&token)).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[tokio::test]
    async fn inner_handler_runs_only_when_allowed() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        async fn inner() -> &'static str {
            CALLS.fetch_add(1, Ordering::SeqCst);
            "done"
        }

        let state = test_state();
        let app = Router::new().route(
            "/guarded",
            delete(inner.layer(middleware::from_fn_with_state(
                RouteGuard::new(&state, Role::ADMINS),
                authorize,
            ))),
        );

        let send = |token: Option<String>| {
            let app = app.clone();
            async move {
                let mut builder = axum::http::Request::builder()
                    .method("DELETE")
                    .uri("/guarded");
                if let Some(token) = token {
                    builder = builder.header(AUTHORIZATION, token);
                }
                app.oneshot(builder.body(Body::empty()).unwrap())
                    .await
                    .unwrap()
                    .status()
            }
        };

        let moderator = state.issuer.issue("moderator", Role::Moderator).unwrap();
        let admin = state.issuer.issue("admin", Role::Admin).unwrap();

        assert_eq!(send(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(send(Some("garbage".into())).await, StatusCode::UNAUTHORIZED);
        assert_eq!(send(Some(moderator)).await, StatusCode::UNAUTHORIZED);
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        assert_eq!(send(Some(admin)).await, StatusCode::OK);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }
}
