use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use configs::{DestroyFailurePolicy, SessionConfig};
use serde_json::{json, Value};
use service::domain::{ChangeSet, Settings, Template, TemplateRegistry};
use service::mock::{MockSessions, MockSettings, MockStacks, MockTemplates};
use tower::ServiceExt;

use server::routes;
use server::state::ServerState;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn settings(value: Value) -> Settings {
    serde_json::from_value(value).expect("settings json")
}

fn template(id: &str) -> Template {
    Template { id: id.into(), name: format!("{id} template"), description: None, registry_id: None, is_remote: false }
}

fn registry(id: &str) -> TemplateRegistry {
    TemplateRegistry { id: id.into(), name: "Community".into(), url: "https://registry.example/index.json".into(), enabled: true }
}

struct Fixture {
    settings: Arc<MockSettings>,
    sessions: Arc<MockSessions>,
    templates: Arc<MockTemplates>,
    stacks: Arc<MockStacks>,
    policy: DestroyFailurePolicy,
}

impl Fixture {
    fn new() -> Self {
        Self {
            settings: Arc::new(MockSettings::returning(settings(json!({"onboarding": {"completed": false}})))),
            sessions: Arc::new(MockSessions::new()),
            templates: Arc::new(MockTemplates::default()),
            stacks: Arc::new(MockStacks::default()),
            policy: DestroyFailurePolicy::Redirect,
        }
    }

    fn app(&self) -> Router {
        let state = ServerState {
            settings: self.settings.clone(),
            sessions: self.sessions.clone(),
            templates: self.templates.clone(),
            stacks: self.stacks.clone(),
            session: SessionConfig { cookie_name: "portal_session".into(), on_destroy_failure: self.policy },
        };
        routes::build_router(state, cors())
    }
}

async fn send(app: Router, req: Request<Body>) -> anyhow::Result<Response> {
    Ok(app.oneshot(req).await?)
}

async fn get(app: Router, uri: &str) -> anyhow::Result<Response> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

async fn body_json(resp: Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn location(resp: &Response) -> Option<&str> {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let resp = get(Fixture::new().app(), "/health").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn logout_destroys_session_then_redirects() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, "portal_session=abc123; theme=dark")
        .body(Body::empty())?;
    let resp = send(fx.app(), req).await?;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some("/auth/login"));
    assert_eq!(fx.sessions.destroyed().await, vec!["abc123".to_string()]);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    assert!(cookie.starts_with("portal_session="), "unexpected set-cookie: {cookie}");
    assert!(cookie.contains("Max-Age=0"), "unexpected set-cookie: {cookie}");
    Ok(())
}

#[tokio::test]
async fn logout_without_cookie_still_redirects() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let resp = get(fx.app(), "/auth/logout").await?;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some("/auth/login"));
    assert_eq!(fx.sessions.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn logout_redirects_even_when_destroy_fails() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.sessions = Arc::new(MockSessions::failing("session store offline"));
    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, "portal_session=abc123")
        .body(Body::empty())?;
    let resp = send(fx.app(), req).await?;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some("/auth/login"));
    assert_eq!(fx.sessions.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn logout_abort_policy_surfaces_destroy_failure() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.sessions = Arc::new(MockSessions::failing("session store offline"));
    fx.policy = DestroyFailurePolicy::Abort;
    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::COOKIE, "portal_session=abc123")
        .body(Body::empty())?;
    let resp = send(fx.app(), req).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(
        body_json(resp).await?,
        json!({"error": "logout failed: upstream responded 503: session store offline"})
    );
    Ok(())
}

#[tokio::test]
async fn welcome_redirects_when_onboarding_completed() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.settings = Arc::new(MockSettings::returning(settings(json!({"onboarding": {"completed": true}}))));

    let resp = get(fx.app(), "/onboarding/welcome").await?;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some("/dashboard"));
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    assert!(bytes.is_empty());

    let resp = get(fx.app(), "/onboarding").await?;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some("/"));

    let resp = get(fx.app(), "/onboarding/password").await?;
    assert_eq!(location(&resp), Some("/dashboard"));
    Ok(())
}

#[tokio::test]
async fn welcome_returns_settings_when_pending() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    let raw = json!({"theme": "dark"});
    fx.settings = Arc::new(MockSettings::returning(settings(raw.clone())));

    let resp = get(fx.app(), "/onboarding/welcome").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(location(&resp).is_none());
    assert_eq!(body_json(resp).await?, json!({"settings": raw}));
    Ok(())
}

#[tokio::test]
async fn onboarding_sends_to_login_when_settings_fail() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.settings = Arc::new(MockSettings::failing("unauthorized"));
    let resp = get(fx.app(), "/onboarding/welcome").await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login"));
    Ok(())
}

#[tokio::test]
async fn settings_index_redirects_to_general() -> anyhow::Result<()> {
    let resp = get(Fixture::new().app(), "/settings").await?;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some("/settings/general"));
    Ok(())
}

#[tokio::test]
async fn general_settings_fall_back_to_declared_default() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.settings = Arc::new(MockSettings::failing("settings service down"));
    let resp = get(fx.app(), "/settings/general").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let expected = serde_json::to_value(server::routes::settings::GeneralSettingsPage::fallback())?;
    assert_eq!(body_json(resp).await?, expected);
    assert_eq!(expected, json!({"settings": {}}));
    Ok(())
}

#[tokio::test]
async fn general_settings_pass_through_on_success() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    let raw = json!({"projectsDirectory": "/data/projects", "onboarding": {"completed": true}});
    fx.settings = Arc::new(MockSettings::returning(settings(raw.clone())));
    let resp = get(fx.app(), "/settings/general").await?;
    assert_eq!(body_json(resp).await?, json!({"settings": raw}));
    Ok(())
}

#[tokio::test]
async fn template_settings_degrade_failed_branches_only() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.templates = Arc::new(
        MockTemplates::default()
            .with_templates(vec![template("nginx")])
            .failing_registries("registry index timeout"),
    );
    let resp = get(fx.app(), "/settings/templates").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["templates"][0]["id"], "nginx");
    assert_eq!(body["registries"], json!([]));
    assert_eq!(body["settings"], json!({"onboarding": {"completed": false}}));
    Ok(())
}

#[tokio::test]
async fn template_settings_abort_when_settings_fail() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.settings = Arc::new(MockSettings::failing("settings service down"));
    fx.templates = Arc::new(MockTemplates::default().with_templates(vec![template("nginx")]));
    let resp = get(fx.app(), "/settings/templates").await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await?,
        json!({"error": "upstream responded 503: settings service down"})
    );
    Ok(())
}

#[tokio::test]
async fn catalog_never_fails_with_all_branches_down() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    fx.templates = Arc::new(
        MockTemplates::default()
            .failing_templates("remote fetch failed")
            .failing_registries("registry index timeout"),
    );
    let resp = get(fx.app(), "/templates").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!({"templates": [], "registries": []}));

    fx.templates = Arc::new(
        MockTemplates::default()
            .with_templates(vec![template("redis")])
            .with_registries(vec![registry("r1")]),
    );
    let body = body_json(get(fx.app(), "/templates").await?).await?;
    assert_eq!(body["templates"][0]["id"], "redis");
    assert_eq!(body["registries"][0]["id"], "r1");
    Ok(())
}

#[tokio::test]
async fn stack_endpoints_return_payload_verbatim() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    let profiles = json!([
        {"name": "dev"},
        {"default": true, "name": "prod", "services": ["web", "db"]}
    ]);
    let changes = json!({"changed": ["web"]});
    fx.stacks = Arc::new(
        MockStacks::default()
            .with_profiles("media", serde_json::from_value(profiles.clone())?)
            .with_changes("media", ChangeSet::from(changes.clone())),
    );

    let resp = get(fx.app(), "/api/stacks/media/profiles").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, profiles);

    let resp = get(fx.app(), "/api/stacks/media/changes").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, changes);
    Ok(())
}

#[tokio::test]
async fn stack_endpoints_wrap_failures_in_error_body() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    let resp = get(fx.app(), "/api/stacks/ghost/profiles").await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await?, json!({"error": "not found: stack ghost not found"}));

    fx.stacks = Arc::new(MockStacks::failing("docker daemon unreachable"));
    let resp = get(fx.app(), "/api/stacks/media/changes").await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await?,
        json!({"error": "upstream responded 503: docker daemon unreachable"})
    );
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_stack_endpoints() -> anyhow::Result<()> {
    let resp = get(Fixture::new().app(), "/api-docs/openapi.json").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await?;
    assert!(doc["paths"].get("/api/stacks/{stack_id}/profiles").is_some());
    assert!(doc["paths"].get("/api/stacks/{stack_id}/changes").is_some());
    Ok(())
}
