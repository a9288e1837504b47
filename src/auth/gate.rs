//! Route guard for the login and signup surfaces.
//!
//! Unauthenticated sessions are sent to `/login` from every gated path except
//! the login and signup pages; authenticated sessions are sent from those two
//! pages to the board view at `/`.

/// Path of the sign-in page.
pub const LOGIN_PATH: &str = "/login";
/// Path of the sign-up page.
pub const SIGNUP_PATH: &str = "/signup";
/// Path of the main board view.
pub const HOME_PATH: &str = "/";

const UNGATED_PREFIXES: [&str; 4] = ["/api", "/_next/static", "/_next/image", "/favicon.ico"];

/// Outcome of running a request path through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Serve the requested path.
    Continue,
    /// Redirect to the given path.
    Redirect(&'static str),
}

/// Returns `true` when the gate applies to `path`.
///
/// API routes and static assets bypass the gate. Matching is by plain
/// prefix, so `/apiary` is as ungated as `/api/tasks`.
#[must_use]
pub fn is_gated(path: &str) -> bool {
    !UNGATED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Decides whether a request for `path` proceeds or is redirected.
#[must_use]
pub fn evaluate(path: &str, has_session: bool) -> GateDecision {
    if !is_gated(path) {
        return GateDecision::Continue;
    }
    let is_auth_page = path == LOGIN_PATH || path == SIGNUP_PATH;
    match (has_session, is_auth_page) {
        (false, false) => GateDecision::Redirect(LOGIN_PATH),
        (true, true) => GateDecision::Redirect(HOME_PATH),
        _ => GateDecision::Continue,
    }
}
