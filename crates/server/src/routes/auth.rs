use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use configs::DestroyFailurePolicy;
use tracing::{debug, error, info};

use crate::context::RequestContext;
use crate::errors::PageError;
use crate::outcome::Redirect;
use crate::routes::LOGIN_PATH;
use crate::state::ServerState;

/// Destroy the caller's session, drop the cookie and send them to the login page.
///
/// The session is always destroyed before the redirect is built. What happens
/// when the store fails is decided by `session.on_destroy_failure`.
pub async fn logout(
    State(state): State<ServerState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), PageError> {
    match ctx.session.destroy().await {
        Ok(true) => info!("session destroyed"),
        Ok(false) => debug!("logout without a session cookie"),
        Err(e) => match state.session.on_destroy_failure {
            DestroyFailurePolicy::Redirect => {
                error!(error = %e, "session destroy failed; logging out anyway");
            }
            DestroyFailurePolicy::Abort => {
                error!(error = %e, "session destroy failed; logout aborted");
                return Err(PageError(format!("logout failed: {e}")));
            }
        },
    }

    let mut removal = Cookie::from(state.session.cookie_name.clone());
    removal.set_path("/");
    let jar = jar.remove(removal);
    Ok((jar, Redirect::found(LOGIN_PATH)))
}
