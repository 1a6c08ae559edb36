//! Cookie parsing and `Set-Cookie` values.
//!
//! | cookie        | attributes                                             |
//! |---------------|--------------------------------------------------------|
//! | `admin_token` | `HttpOnly; SameSite=Strict; Path=/; Max-Age=<lifetime>` (+ `Secure` in production) |
//! | `cart_id`     | `HttpOnly; SameSite=Lax; Path=/; Max-Age=30 days`      |

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const ADMIN_COOKIE: &str = "admin_token";
pub const CART_COOKIE: &str = "cart_id";

const CART_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Value of the named cookie across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn admin_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{ADMIN_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_admin_session_cookie(secure: bool) -> String {
    admin_session_cookie("", 0, secure)
}

pub fn cart_cookie(cart_id: &str, secure: bool) -> String {
    let mut cookie =
        format!("{CART_COOKIE}={cart_id}; HttpOnly; SameSite=Lax; Path=/; Max-Age={CART_MAX_AGE_SECS}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; admin_token=abc.def.ghi; cart_id=42"),
        );

        assert_eq!(read_cookie(&headers, ADMIN_COOKIE), Some("abc.def.ghi"));
        assert_eq!(read_cookie(&headers, CART_COOKIE), Some("42"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_across_headers_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("admin_token="));
        headers.append(COOKIE, HeaderValue::from_static("cart_id=7"));

        assert_eq!(read_cookie(&headers, ADMIN_COOKIE), None);
        assert_eq!(read_cookie(&headers, CART_COOKIE), Some("7"));
    }

    #[test]
    fn test_admin_cookie_attributes() {
        let cookie = admin_session_cookie("tok", 86400, false);
        assert_eq!(
            cookie,
            "admin_token=tok; HttpOnly; SameSite=Strict; Path=/; Max-Age=86400"
        );
        assert!(admin_session_cookie("tok", 86400, true).ends_with("; Secure"));
        assert!(clear_admin_session_cookie(false).contains("Max-Age=0"));
    }
}
