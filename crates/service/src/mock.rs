//! In-memory implementations of the ports for tests and local runs.
//! Each mock can be scripted to fail and counts the calls it receives.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChangeSet, Profile, Settings, Template, TemplateRegistry};
use crate::errors::ServiceError;
use crate::ports::{SessionStore, SettingsService, StackService, TemplateService};

fn scripted<T: Clone>(result: &Result<T, String>) -> Result<T, ServiceError> {
    result.clone().map_err(ServiceError::unavailable)
}

pub struct MockSettings {
    result: Result<Settings, String>,
    calls: AtomicUsize,
}

impl MockSettings {
    pub fn returning(settings: Settings) -> Self {
        Self { result: Ok(settings), calls: AtomicUsize::new(0) }
    }

    pub fn failing(message: &str) -> Self {
        Self { result: Err(message.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsService for MockSettings {
    async fn get_settings(&self) -> Result<Settings, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        scripted(&self.result)
    }
}

#[derive(Default)]
pub struct MockSessions {
    destroyed: Mutex<Vec<String>>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Self::default() }
    }

    /// Session ids destroyed so far, in call order.
    pub async fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().await.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for MockSessions {
    async fn destroy(&self, session_id: &str) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.failure {
            return Err(ServiceError::unavailable(msg.clone()));
        }
        self.destroyed.lock().await.push(session_id.to_string());
        Ok(())
    }
}

pub struct MockTemplates {
    loaded: Result<Vec<Template>, String>,
    all: Result<Vec<Template>, String>,
    registries: Result<Vec<TemplateRegistry>, String>,
}

impl Default for MockTemplates {
    fn default() -> Self {
        Self { loaded: Ok(Vec::new()), all: Ok(Vec::new()), registries: Ok(Vec::new()) }
    }
}

impl MockTemplates {
    /// Serve `templates` from both `load_all` and `all_templates`.
    pub fn with_templates(mut self, templates: Vec<Template>) -> Self {
        self.loaded = Ok(templates.clone());
        self.all = Ok(templates);
        self
    }

    pub fn with_registries(mut self, registries: Vec<TemplateRegistry>) -> Self {
        self.registries = Ok(registries);
        self
    }

    pub fn failing_templates(mut self, message: &str) -> Self {
        self.loaded = Err(message.to_string());
        self.all = Err(message.to_string());
        self
    }

    pub fn failing_registries(mut self, message: &str) -> Self {
        self.registries = Err(message.to_string());
        self
    }
}

#[async_trait]
impl TemplateService for MockTemplates {
    async fn load_all(&self) -> Result<Vec<Template>, ServiceError> {
        scripted(&self.loaded)
    }

    async fn all_templates(&self) -> Result<Vec<Template>, ServiceError> {
        scripted(&self.all)
    }

    async fn registries(&self) -> Result<Vec<TemplateRegistry>, ServiceError> {
        scripted(&self.registries)
    }
}

#[derive(Default)]
pub struct MockStacks {
    profiles: HashMap<String, Vec<Profile>>,
    changes: HashMap<String, ChangeSet>,
    failure: Option<String>,
}

impl MockStacks {
    pub fn with_profiles(mut self, stack_id: &str, profiles: Vec<Profile>) -> Self {
        self.profiles.insert(stack_id.to_string(), profiles);
        self
    }

    pub fn with_changes(mut self, stack_id: &str, changes: ChangeSet) -> Self {
        self.changes.insert(stack_id.to_string(), changes);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Self::default() }
    }

    fn check(&self) -> Result<(), ServiceError> {
        match &self.failure {
            Some(msg) => Err(ServiceError::unavailable(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StackService for MockStacks {
    async fn profiles(&self, stack_id: &str) -> Result<Vec<Profile>, ServiceError> {
        self.check()?;
        self.profiles
            .get(stack_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("stack {stack_id}")))
    }

    async fn detect_changes(&self, stack_id: &str) -> Result<ChangeSet, ServiceError> {
        self.check()?;
        self.changes
            .get(stack_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("stack {stack_id}")))
    }
}
