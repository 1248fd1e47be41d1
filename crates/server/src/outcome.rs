//! Page loader results: data for the renderer, or a transfer of control.
//!
//! A redirect is a value, not an unwind. Once a loader produces
//! `Outcome::Redirect`, combinators skip every continuation, so nothing
//! after the redirect decision can run.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    /// 302, plain navigation.
    Found,
    /// 303, forces a GET; used when a guard sends the user back to login.
    SeeOther,
}

impl RedirectStatus {
    pub fn code(self) -> StatusCode {
        match self {
            RedirectStatus::Found => StatusCode::FOUND,
            RedirectStatus::SeeOther => StatusCode::SEE_OTHER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub status: RedirectStatus,
    pub location: String,
}

impl Redirect {
    pub fn found(location: impl Into<String>) -> Self {
        Self { status: RedirectStatus::Found, location: location.into() }
    }

    pub fn see_other(location: impl Into<String>) -> Self {
        Self { status: RedirectStatus::SeeOther, location: location.into() }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        (self.status.code(), [(header::LOCATION, self.location)]).into_response()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Data(T),
    Redirect(Redirect),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Data(data) => Outcome::Data(f(data)),
            Outcome::Redirect(r) => Outcome::Redirect(r),
        }
    }

    /// Continue with `f` only when there is data.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Data(data) => f(data),
            Outcome::Redirect(r) => Outcome::Redirect(r),
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Outcome::Data(_) => None,
            Outcome::Redirect(r) => Some(r),
        }
    }
}

impl<T> From<Redirect> for Outcome<T> {
    fn from(r: Redirect) -> Self {
        Outcome::Redirect(r)
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Data(data) => (StatusCode::OK, Json(data)).into_response(),
            Outcome::Redirect(r) => r.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn continuation_never_runs_after_redirect() {
        let ran = Cell::new(false);
        let out: Outcome<u8> = Redirect::found("/dashboard").into();
        let next = out.and_then(|v| {
            ran.set(true);
            Outcome::Data(v + 1)
        });
        assert!(!ran.get());
        assert_eq!(next, Outcome::Redirect(Redirect::found("/dashboard")));
    }

    #[test]
    fn map_transforms_data_only() {
        assert_eq!(Outcome::Data(2).map(|v| v * 10), Outcome::Data(20));
        let r: Outcome<i32> = Redirect::see_other("/auth/login").into();
        assert_eq!(r.map(|v| v * 10).redirect(), Some(&Redirect::see_other("/auth/login")));
    }

    #[test]
    fn redirect_response_carries_status_and_location() {
        let resp = Redirect::see_other("/auth/login").into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/login");

        let resp = Outcome::<()>::Redirect(Redirect::found("/")).into_response();
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[test]
    fn data_response_is_ok_json() {
        let resp = Outcome::Data(serde_json::json!({"settings": {}})).into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
    }
}
