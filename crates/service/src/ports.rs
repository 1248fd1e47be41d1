use async_trait::async_trait;

use crate::domain::{ChangeSet, Profile, Settings, Template, TemplateRegistry};
use crate::errors::ServiceError;

/// Read-only access to the settings document.
#[async_trait]
pub trait SettingsService: Send + Sync {
    async fn get_settings(&self) -> Result<Settings, ServiceError>;
}

/// Invalidates sessions created elsewhere (login).
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn destroy(&self, session_id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait TemplateService: Send + Sync {
    /// Refresh from every registry, then return local and remote templates.
    async fn load_all(&self) -> Result<Vec<Template>, ServiceError>;
    /// Templates already known to the service, without a refresh.
    async fn all_templates(&self) -> Result<Vec<Template>, ServiceError>;
    async fn registries(&self) -> Result<Vec<TemplateRegistry>, ServiceError>;
}

#[async_trait]
pub trait StackService: Send + Sync {
    async fn profiles(&self, stack_id: &str) -> Result<Vec<Profile>, ServiceError>;
    async fn detect_changes(&self, stack_id: &str) -> Result<ChangeSet, ServiceError>;
}
