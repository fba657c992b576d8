// Browsers submit untouched inputs as empty strings
pub fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_airport(code: &str) -> String {
    code.trim().to_uppercase()
}
