use axum::extract::State;
use serde::Serialize;
use service::domain::Settings;
use tracing::warn;

use crate::outcome::{Outcome, Redirect};
use crate::routes::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH};
use crate::state::ServerState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsPage {
    pub settings: Settings,
}

/// Fetch settings, or send the visitor back to login with a 303.
async fn load_settings(state: &ServerState) -> Outcome<Settings> {
    match state.settings.get_settings().await {
        Ok(settings) => Outcome::Data(settings),
        Err(e) => {
            warn!(error = %e, "settings unavailable; redirecting to login");
            Redirect::see_other(LOGIN_PATH).into()
        }
    }
}

/// Onboarding pages are only shown until onboarding is completed.
fn unless_completed(settings: Settings, completed_target: &str) -> Outcome<SettingsPage> {
    if settings.onboarding_completed() {
        return Redirect::found(completed_target).into();
    }
    Outcome::Data(SettingsPage { settings })
}

async fn onboarding_step(state: &ServerState, completed_target: &str) -> Outcome<SettingsPage> {
    load_settings(state)
        .await
        .and_then(|settings| unless_completed(settings, completed_target))
}

pub async fn index(State(state): State<ServerState>) -> Outcome<SettingsPage> {
    onboarding_step(&state, HOME_PATH).await
}

pub async fn welcome(State(state): State<ServerState>) -> Outcome<SettingsPage> {
    onboarding_step(&state, DASHBOARD_PATH).await
}

pub async fn password(State(state): State<ServerState>) -> Outcome<SettingsPage> {
    onboarding_step(&state, DASHBOARD_PATH).await
}
