use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{ChangeSet, Profile, Settings, Template, TemplateRegistry};
use crate::errors::ServiceError;
use crate::ports::{SessionStore, SettingsService, StackService, TemplateService};

/// Client for the upstream service that owns settings, sessions, templates
/// and stacks. One instance serves every port.
#[derive(Clone, Debug)]
pub struct HttpUpstream {
    client: Client,
    base: Url,
}

impl HttpUpstream {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ServiceError> {
        let base = Url::parse(base_url).map_err(|e| ServiceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base })
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ServiceError> {
        debug!(%url, "upstream GET");
        let resp = self.client.get(url).send().await?;
        let resp = ensure_success(resp).await?;
        resp.json::<T>().await.map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

/// Map a non-2xx answer to `ServiceError::Upstream`, preferring the message
/// the upstream put in its JSON body.
async fn ensure_success(resp: Response) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = upstream_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("upstream error").to_string());
    Err(ServiceError::Upstream { status: status.as_u16(), message })
}

fn upstream_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|k| json.get(k).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[async_trait]
impl SettingsService for HttpUpstream {
    #[instrument(skip(self))]
    async fn get_settings(&self) -> Result<Settings, ServiceError> {
        self.get_json(self.endpoint(&["settings"])?).await
    }
}

#[async_trait]
impl SessionStore for HttpUpstream {
    #[instrument(skip(self, session_id))]
    async fn destroy(&self, session_id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["sessions", session_id])?;
        let resp = self.client.delete(url).send().await?;
        ensure_success(resp).await?;
        debug!("session destroyed upstream");
        Ok(())
    }
}

#[async_trait]
impl TemplateService for HttpUpstream {
    #[instrument(skip(self))]
    async fn load_all(&self) -> Result<Vec<Template>, ServiceError> {
        let mut url = self.endpoint(&["templates"])?;
        url.query_pairs_mut().append_pair("refresh", "true");
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn all_templates(&self) -> Result<Vec<Template>, ServiceError> {
        self.get_json(self.endpoint(&["templates"])?).await
    }

    #[instrument(skip(self))]
    async fn registries(&self) -> Result<Vec<TemplateRegistry>, ServiceError> {
        self.get_json(self.endpoint(&["templates", "registries"])?).await
    }
}

#[async_trait]
impl StackService for HttpUpstream {
    #[instrument(skip(self))]
    async fn profiles(&self, stack_id: &str) -> Result<Vec<Profile>, ServiceError> {
        self.get_json(self.endpoint(&["stacks", stack_id, "profiles"])?).await
    }

    #[instrument(skip(self))]
    async fn detect_changes(&self, stack_id: &str) -> Result<ChangeSet, ServiceError> {
        self.get_json(self.endpoint(&["stacks", stack_id, "changes"])?).await
    }
}
