//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Basic email shape check: something@something.tld, no whitespace
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Normalize an email address for storage and matching (trim + lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&normalize_email(email))
}

/// Mask an email address for log output (e.g., a***@example.com)
pub fn mask_email(email: &str) -> String {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
