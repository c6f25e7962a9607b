//! Route guard middleware.
//!
//! Resolves the session from the `token` cookie once per request, asks the
//! guard what to do with the path, and either redirects (303) or hands the
//! request on with the [`Session`] in its extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use paywallet_core::auth::SESSION_COOKIE;
use paywallet_core::guard::{self, GuardAction};
use paywallet_core::Session;

use crate::state::AppState;

pub async fn route_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let raw_token = jar.get(SESSION_COOKIE).map(|c| c.value());
    let session = Session::resolve(raw_token, &state.verifier);

    match guard::evaluate(request.uri().path(), &session) {
        GuardAction::Allow => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardAction::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), redirect = target, "Route guard redirect");
            Redirect::to(target).into_response()
        }
    }
}
