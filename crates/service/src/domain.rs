use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque settings document owned by the settings service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(pub Map<String, Value>);

impl Settings {
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// `settings.onboarding.completed`; anything but a literal `true` is "not completed".
    pub fn onboarding_completed(&self) -> bool {
        self.0
            .get("onboarding")
            .and_then(|o| o.get("completed"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRegistry {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool { true }

/// Compose profile of a stack, kept exactly as the stack service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(pub Value);

impl Profile {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

impl From<Value> for Profile {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Drift between a stack's deployed state and its definition. The shape
/// belongs to the stack service and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(pub Value);

impl From<Value> for ChangeSet {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
