//! Request-scoped context handed to handlers explicitly.

use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use service::{ServiceError, SessionStore};

use crate::state::ServerState;

/// The caller's session, as identified by the session cookie.
#[derive(Clone)]
pub struct SessionHandle {
    id: Option<String>,
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    pub fn new(id: Option<String>, store: Arc<dyn SessionStore>) -> Self {
        Self { id, store }
    }

    /// Invalidate the session upstream. `Ok(false)` when the request carried no session.
    pub async fn destroy(&self) -> Result<bool, ServiceError> {
        match &self.id {
            Some(id) => {
                self.store.destroy(id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Clone)]
pub struct RequestContext {
    pub session: SessionHandle,
}

#[async_trait]
impl FromRequestParts<ServerState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar
            .get(&state.session.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty());
        Ok(Self { session: SessionHandle::new(id, Arc::clone(&state.sessions)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::mock::MockSessions;

    #[tokio::test]
    async fn destroy_without_cookie_is_noop() {
        let store = Arc::new(MockSessions::new());
        let handle = SessionHandle::new(None, store.clone());
        assert!(!handle.destroy().await.unwrap());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn destroy_forwards_session_id() {
        let store = Arc::new(MockSessions::new());
        let handle = SessionHandle::new(Some("s-1".into()), store.clone());
        assert!(handle.destroy().await.unwrap());
        assert_eq!(store.destroyed().await, vec!["s-1".to_string()]);
    }
}
