use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::helpers::{dark_theme_from_jar, THEME_COOKIE};

/// Flip between the light and dark stylesheet variants.
pub async fn theme_post(jar: CookieJar) -> impl IntoResponse {
    let jar = if dark_theme_from_jar(&jar) {
        jar.remove(Cookie::build(THEME_COOKIE).path("/"))
    } else {
        let cookie = Cookie::build((THEME_COOKIE, "dark"))
            .path("/")
            .max_age(time::Duration::days(365))
            .http_only(true);
        jar.add(cookie)
    };
    (jar, Redirect::to("/"))
}
