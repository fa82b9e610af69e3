//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Strings without `${` are returned unchanged, so bare `$` characters in
/// URLs survive untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_default_falls_back() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_UNSET_BASE");
        }
        let result = expand_env("${DOCSITE_UNSET_BASE:-/}", "base_url").unwrap();
        assert_eq!(result, "/");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSITE_DOCS_HOST", "docs.example.com");
        }
        let result = expand_env("https://${DOCSITE_DOCS_HOST}", "url").unwrap();
        assert_eq!(result, "https://docs.example.com");
        unsafe {
            std::env::remove_var("DOCSITE_DOCS_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSITE_MISSING_URL");
        }
        let err = expand_env("${DOCSITE_MISSING_URL}", "url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("DOCSITE_MISSING_URL"));
        assert!(msg.contains("url"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
