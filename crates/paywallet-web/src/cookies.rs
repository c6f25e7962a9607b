//! The `token` session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use paywallet_core::auth::SESSION_COOKIE;

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub fn store_token(jar: CookieJar, token: String, secure: bool) -> CookieJar {
    jar.add(session_cookie(token, secure))
}

pub fn clear_token(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
