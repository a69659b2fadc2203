//! PII detection and masking utilities.
//!
//! Form submissions carry personal data (phone numbers, government IDs, dates
//! of birth). These helpers keep that data out of logs and error metadata.

/// The fully-redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Number of trailing characters left visible by [`mask`].
const VISIBLE_SUFFIX: usize = 4;

/// Checks if a key/field name likely carries personal or secret data.
///
/// Matching ignores case and any non-alphanumeric separators, so
/// `phoneNumber`, `phone_number`, and `PHONE-NUMBER` are all detected.
///
/// # Examples
///
/// ```
/// use regform_shared::is_sensitive_key;
///
/// assert!(is_sensitive_key("phoneNumber"));
/// assert!(is_sensitive_key("gid_text"));
/// assert!(!is_sensitive_key("gidType"));
/// assert!(!is_sensitive_key("failedFields"));
/// ```
pub fn is_sensitive_key(key: &str) -> bool {
    let key: String = key
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    matches!(key.as_str(), "name" | "dob" | "gidtext" | "pan")
        || key.contains("phone")
        || key.contains("mobile")
        || key.contains("aadhar")
        || key.contains("token")
        || key.contains("password")
        || key.contains("secret")
}

/// Mask all but the last four characters of a value.
///
/// Values of four characters or fewer are masked entirely.
///
/// # Examples
///
/// ```
/// use regform_shared::mask;
///
/// assert_eq!(mask("234567890123"), "********0123");
/// assert_eq!(mask("abc"), "***");
/// ```
pub fn mask(value: &str) -> String {
    let total = value.chars().count();
    if total <= VISIBLE_SUFFIX {
        return "*".repeat(total);
    }
    let hidden = total - VISIBLE_SUFFIX;
    value
        .chars()
        .enumerate()
        .map(|(index, ch)| if index < hidden { '*' } else { ch })
        .collect()
}

/// Masks a value if the key is sensitive, otherwise returns it unchanged.
pub fn mask_if_sensitive(key: &str, value: &str) -> String {
    if is_sensitive_key(key) {
        mask(value)
    } else {
        value.to_string()
    }
}
