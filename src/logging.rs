//! Log-safe rendering of session tokens.

use std::fmt;

/// Masked bearer token for logs and `config show`.
///
/// Shows the first 4 characters followed by `***`.
///
/// # Example
/// ```
/// use lesser_dashboard::logging::SensitiveToken;
///
/// let token = "eyJhbGciOiJIUzI1NiJ9.payload";
/// assert_eq!(SensitiveToken::new(token).to_string(), "eyJh***");
/// ```
#[derive(Clone, Debug)]
pub struct SensitiveToken<'a> {
    inner: &'a str,
}

impl<'a> SensitiveToken<'a> {
    pub fn new(token: &'a str) -> Self {
        Self { inner: token }
    }
}

impl<'a> fmt::Display for SensitiveToken<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VISIBLE: usize = 4;
        // Short tokens are hidden entirely
        match self.inner.get(..VISIBLE) {
            Some(prefix) if self.inner.len() > 2 * VISIBLE => write!(f, "{}***", prefix),
            _ => write!(f, "***"),
        }
    }
}

/// Mask an optional token for display
pub fn mask_token(token: Option<&str>) -> Option<String> {
    token.map(|t| SensitiveToken::new(t).to_string())
}
