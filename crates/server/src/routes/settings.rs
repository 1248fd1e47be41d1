use axum::{extract::State, Json};
use common::recover;
use serde::Serialize;
use service::domain::{Settings, Template, TemplateRegistry};
use service::ServiceError;

use crate::errors::PageError;
use crate::outcome::Redirect;
use crate::routes::GENERAL_SETTINGS_PATH;
use crate::state::ServerState;

pub async fn index() -> Redirect {
    Redirect::found(GENERAL_SETTINGS_PATH)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralSettingsPage {
    pub settings: Settings,
}

impl GeneralSettingsPage {
    /// Served when the settings service is down.
    pub fn fallback() -> Self {
        Self { settings: Settings::empty() }
    }
}

pub async fn general(State(state): State<ServerState>) -> Json<GeneralSettingsPage> {
    let page = recover(
        "settings.general",
        async {
            let settings = state.settings.get_settings().await?;
            Ok::<_, ServiceError>(GeneralSettingsPage { settings })
        },
        GeneralSettingsPage::fallback(),
    )
    .await;
    Json(page)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSettingsPage {
    pub settings: Settings,
    pub templates: Vec<Template>,
    pub registries: Vec<TemplateRegistry>,
}

/// Settings are required; templates and registries degrade to empty lists.
pub async fn templates(State(state): State<ServerState>) -> Result<Json<TemplateSettingsPage>, PageError> {
    let (settings, templates, registries) = tokio::join!(
        state.settings.get_settings(),
        recover("settings.templates.templates", state.templates.all_templates(), Vec::new()),
        recover("settings.templates.registries", state.templates.registries(), Vec::new()),
    );
    let settings = settings.map_err(PageError::from_display)?;
    Ok(Json(TemplateSettingsPage { settings, templates, registries }))
}
