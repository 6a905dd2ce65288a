//! Form-side input checks, run before anything is sent.

use url::Url;

pub const MIN_CODE_LEN: usize = 5;
pub const MAX_CODE_LEN: usize = 10;

/// True if `input` is an absolute URL with an `http` or `https` scheme.
pub fn validate_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// True if `input` is 5 to 10 characters of ASCII letters, digits, `_` or `-`.
pub fn is_valid_code(input: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&input.len())
        && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
