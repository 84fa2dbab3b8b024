//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::User;
use crate::util::context::SessionContext;

/// Path unauthenticated visitors are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Whether a view guarded by auth should send the visitor to login.
pub fn should_redirect_unauth(user: Option<&User>) -> bool {
    user.is_none()
}

/// Navigate to `/login` if `session` currently has no user.
///
/// Reads the signal tracked, so calling it inside an effect re-runs it on
/// every session change. Returns whether navigation was requested.
pub fn check_unauth_redirect<F>(session: SessionContext, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    let redirect = session.user.with(|user| should_redirect_unauth(user.as_ref()));
    if redirect {
        navigate(LOGIN_PATH, NavigateOptions::default());
    }
    redirect
}

/// Redirect to `/login` whenever the mirrored session has no user.
pub fn install_unauth_redirect<F>(session: SessionContext, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        check_unauth_redirect(session, &navigate);
    });
}
