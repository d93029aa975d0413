//! Phone number utilities

/// Normalize a phone number for directory matching by stripping every
/// non-digit character. `"(11) 99999-0000"` becomes `"11999990000"`.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mask a phone number for log output (e.g., 1199***0000)
pub fn mask_phone(phone: &str) -> String {
    let normalized = normalize_phone(phone);
    if normalized.len() >= 8 {
        format!(
            "{}***{}",
            &normalized[0..4],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "***".to_string()
    }
}
