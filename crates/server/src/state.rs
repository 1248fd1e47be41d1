use std::sync::Arc;

use configs::SessionConfig;
use service::{HttpUpstream, SessionStore, SettingsService, StackService, TemplateService};

/// Capabilities shared by every handler. Holds no per-request state.
#[derive(Clone)]
pub struct ServerState {
    pub settings: Arc<dyn SettingsService>,
    pub sessions: Arc<dyn SessionStore>,
    pub templates: Arc<dyn TemplateService>,
    pub stacks: Arc<dyn StackService>,
    pub session: SessionConfig,
}

impl ServerState {
    /// Back every port with the same upstream client.
    pub fn from_upstream(upstream: Arc<HttpUpstream>, session: SessionConfig) -> Self {
        Self {
            settings: upstream.clone(),
            sessions: upstream.clone(),
            templates: upstream.clone(),
            stacks: upstream,
            session,
        }
    }
}
