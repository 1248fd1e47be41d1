use axum::extract::{Path, State};
use common::settle;
use service::domain::{ChangeSet, Profile};
use tracing::error;

use crate::errors::ApiJson;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/stacks/{stack_id}/profiles", tag = "stacks",
    params(("stack_id" = String, Path, description = "Stack identifier")),
    responses(
        (status = 200, description = "Compose profiles of the stack", body = [crate::openapi::ProfileDoc]),
        (status = 500, description = "Upstream failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn profiles(State(state): State<ServerState>, Path(stack_id): Path<String>) -> ApiJson<Vec<Profile>> {
    let settled = settle(state.stacks.profiles(&stack_id)).await;
    if let Some(e) = settled.error() {
        error!(%stack_id, error = %e.message, "get stack profiles failed");
    }
    ApiJson(settled)
}

#[utoipa::path(
    get, path = "/api/stacks/{stack_id}/changes", tag = "stacks",
    params(("stack_id" = String, Path, description = "Stack identifier")),
    responses(
        (status = 200, description = "Detected changes", body = crate::openapi::ChangeSetDoc),
        (status = 500, description = "Upstream failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn changes(State(state): State<ServerState>, Path(stack_id): Path<String>) -> ApiJson<ChangeSet> {
    let settled = settle(state.stacks.detect_changes(&stack_id)).await;
    if let Some(e) = settled.error() {
        error!(%stack_id, error = %e.message, "detect stack changes failed");
    }
    ApiJson(settled)
}
