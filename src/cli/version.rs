//! Version and usage text.

/// The current version of GastroLog, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("gastrolog {}", VERSION)
}

pub fn usage() -> String {
    format!(
        "{}\n\n\
         Usage: gastrolog [--open <link>]\n\n\
         Options:\n  \
           --open <link>   start from a link, e.g. a password-reset e-mail\n  \
           -V, --version   print the version\n  \
           -h, --help      print this help\n\n\
         Environment:\n  \
           GASTROLOG_API_URL      backend base URL\n  \
           GASTROLOG_TOKEN_PATH   where the session token is kept\n  \
           GASTROLOG_DEBOUNCE_MS  user-search quiet period\n  \
           GASTROLOG_LOG          log filter (default: info)\n\n\
         Type `help` once running for the list of commands.",
        version_line()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_line().starts_with("gastrolog "));
    }

    #[test]
    fn test_usage_mentions_open() {
        assert!(usage().contains("--open <link>"));
    }
}
