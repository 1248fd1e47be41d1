//! Declared-default combinator for loaders that prefer a degraded page over
//! a broken one.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

/// Await `fut`; on failure log it under `source` and return `default`.
pub async fn recover<T, E, F>(source: &str, fut: F, default: T) -> T
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    recover_with(source, fut, || default).await
}

/// Like [`recover`], building the default only when it is needed.
pub async fn recover_with<T, E, F, D>(source: &str, fut: F, make_default: D) -> T
where
    E: Display,
    F: Future<Output = Result<T, E>>,
    D: FnOnce() -> T,
{
    match fut.await {
        Ok(value) => value,
        Err(err) => {
            warn!(%source, error = %err, "upstream call failed; using fallback");
            make_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_keeps_resolved_value() {
        let v = recover("templates", async { Ok::<_, String>(vec!["a"]) }, vec![]).await;
        assert_eq!(v, vec!["a"]);
    }

    #[tokio::test]
    async fn failure_returns_declared_default_exactly() {
        let v = recover("templates", async { Err::<Vec<&str>, _>("down") }, vec!["fallback"]).await;
        assert_eq!(v, vec!["fallback"]);
    }

    #[tokio::test]
    async fn lazy_default_not_built_on_success() {
        let mut built = false;
        let v = recover_with("registries", async { Ok::<_, String>(1) }, || {
            built = true;
            0
        })
        .await;
        assert_eq!(v, 1);
        assert!(!built);
    }
}
