use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String }

#[derive(ToSchema)]
pub struct ProfileDoc { pub name: String, pub services: Option<Vec<String>> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ChangeSetDoc { pub has_changes: Option<bool> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::stacks::profiles,
        crate::routes::stacks::changes,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            ProfileDoc,
            ChangeSetDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "stacks")
    )
)]
pub struct ApiDoc;
