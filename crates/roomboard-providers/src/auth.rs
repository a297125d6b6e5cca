//! HTTP authentication for calendar sources.
//!
//! Calendar sources authenticate with HTTP Basic only. The header is attached
//! to every request up front rather than after a 401 challenge.

use base64::Engine;

/// Creates a Basic authentication header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encoding() {
        // base64("user:password") = "dXNlcjpwYXNzd29yZA=="
        assert_eq!(basic_auth("user", "password"), "Basic dXNlcjpwYXNzd29yZA==");
    }

    #[test]
    fn basic_auth_empty_credentials() {
        // base64(":") = "Og=="
        assert_eq!(basic_auth("", ""), "Basic Og==");
    }

    #[test]
    fn basic_auth_keeps_colons_in_password() {
        // base64("room:a:b") = "cm9vbTphOmI="
        assert_eq!(basic_auth("room", "a:b"), "Basic cm9vbTphOmI=");
    }
}
