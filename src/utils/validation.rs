use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns the first validation failure for a registration payload, if any.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Option<&'static str> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Some("Please provide all required fields");
    }
    if name.len() < 2 {
        return Some("Name must be at least 2 characters long");
    }
    if !is_valid_email(email) {
        return Some("Please provide a valid email");
    }
    if password.len() < 6 {
        return Some("Password must be at least 6 characters long");
    }
    None
}
