use axum::{extract::State, Json};
use common::recover;
use serde::Serialize;
use service::domain::{Template, TemplateRegistry};
use tracing::info;

use crate::state::ServerState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCatalogPage {
    pub templates: Vec<Template>,
    pub registries: Vec<TemplateRegistry>,
}

/// Every branch has a fallback, so the catalog always renders.
pub async fn catalog(State(state): State<ServerState>) -> Json<TemplateCatalogPage> {
    let (templates, registries) = tokio::join!(
        recover("templates.load_all", state.templates.load_all(), Vec::new()),
        recover("templates.registries", state.templates.registries(), Vec::new()),
    );
    info!(templates = templates.len(), registries = registries.len(), "template catalog loaded");
    Json(TemplateCatalogPage { templates, registries })
}
