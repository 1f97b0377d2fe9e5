//! Anonymous session identity.
//!
//! Every visitor gets a random 32-char hex id, kept in the `ctr_session_id`
//! cookie for 60 days. The id only tags analytics events; it is not a
//! credential and collisions are tolerable, so there is no registry and no
//! uniqueness check. A jar that does not persist between runs simply yields
//! a fresh id each time.

use cookie::{Cookie, CookieJar, SameSite};
use rand::RngCore;
use time::{Duration, OffsetDateTime};

/// Cookie holding the anonymous visitor id.
pub const SESSION_COOKIE: &str = "ctr_session_id";

/// Lifetime of the session identity cookie.
pub const SESSION_COOKIE_DAYS: i64 = 60;

/// Default lifetime for every other platform cookie.
pub const DEFAULT_COOKIE_DAYS: i64 = 30;

/// 16 random bytes, lowercase hex.
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);

    hex::encode(bytes)
}

/// Build a cookie the way the platform sets all of its cookies: root path,
/// `SameSite=Lax`, expiry `days` from now.
pub fn build_cookie(name: &str, value: &str, days: i64) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value.to_owned()))
        .path("/")
        .same_site(SameSite::Lax)
        .expires(OffsetDateTime::now_utc() + Duration::days(days))
        .build()
}

/// Return the session id stored in `jar`, minting and persisting one when
/// the cookie is missing or empty. A stored value is trusted as-is.
pub fn get_or_create_session_id(jar: &mut CookieJar) -> String {
    if let Some(existing) = jar.get(SESSION_COOKIE) {
        if !existing.value().is_empty() {
            return existing.value().to_owned();
        }
    }

    let id = generate_session_id();
    jar.add(build_cookie(SESSION_COOKIE, &id, SESSION_COOKIE_DAYS));

    id
}
