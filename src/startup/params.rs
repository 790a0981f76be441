//! Parameters the client is launched with.
//!
//! The only one is a password-reset token delivered through the link in
//! the reset e-mail: `…/reset-password?token=…`.

use reqwest::Url;

/// Path of the reset link.
const RESET_PATH: &str = "/reset-password";

/// Base that bare paths are resolved against.
const RELATIVE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupParams {
    /// Token from a reset link, if the client was opened with one.
    pub reset_token: Option<String>,
}

impl StartupParams {
    /// Parse a startup URL or path such as
    /// `http://localhost:3000/reset-password?token=abc`.
    ///
    /// Anything other than the reset path with a non-empty `token`
    /// parameter yields empty params. The query is decoded as a form
    /// (`+` is a space), the way browsers read it.
    pub fn from_url(input: &str) -> Self {
        let Some(url) = parse(input.trim()) else {
            return Self::default();
        };
        if url.path().trim_end_matches('/') != RESET_PATH {
            return Self::default();
        }

        let reset_token = url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self { reset_token }
    }
}

/// Absolute URLs parse as they are; bare paths are joined onto a dummy base.
fn parse(input: &str) -> Option<Url> {
    Url::parse(input)
        .or_else(|_| Url::parse(RELATIVE_BASE).and_then(|base| base.join(input)))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_link() {
        let params = StartupParams::from_url("http://localhost:3000/reset-password?token=abc123");
        assert_eq!(params.reset_token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_bare_path_and_encoded_token() {
        let params = StartupParams::from_url("/reset-password?lang=es&token=a%2Bb");
        assert_eq!(params.reset_token.as_deref(), Some("a+b"));
    }

    #[test]
    fn test_query_is_form_decoded() {
        let params = StartupParams::from_url("http://localhost:3000/reset-password?token=a+b");
        assert_eq!(params.reset_token.as_deref(), Some("a b"));

        let params = StartupParams::from_url("/reset-password/?%74oken=abc#top");
        assert_eq!(params.reset_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_first_token_wins() {
        let params = StartupParams::from_url("/reset-password?token=one&token=two");
        assert_eq!(params.reset_token.as_deref(), Some("one"));
    }

    #[test]
    fn test_token_on_other_path_is_ignored() {
        let params = StartupParams::from_url("http://localhost:3000/?token=abc123");
        assert_eq!(params.reset_token, None);
    }

    #[test]
    fn test_empty_token_is_ignored() {
        assert_eq!(
            StartupParams::from_url("http://localhost:3000/reset-password?token="),
            StartupParams::default()
        );
        assert_eq!(
            StartupParams::from_url("http://localhost:3000/reset-password"),
            StartupParams::default()
        );
    }
}
