//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // shellexpand's erroring lookup fails before applying `:-` defaults,
    // so required variables are checked here and expansion never errors.
    if let Some(var) = missing_required_var(value) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).into_owned())
}

/// Find the first `${VAR}` reference without a default whose variable is unset.
fn missing_required_var(value: &str) -> Option<&str> {
    let mut rest = value;
    while let Some(open) = rest.find("${") {
        let after = &rest[open + 2..];
        let close = after.find('}')?;
        let reference = &after[..close];
        if !reference.contains(":-") && std::env::var_os(reference).is_none() {
            return Some(reference);
        }
        rest = &after[close + 1..];
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CELLI_TEST_SIMPLE", "hello");
        }
        let result = expand_env("${CELLI_TEST_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("CELLI_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CELLI_TEST_DEFAULT", "hello");
        }
        let result = expand_env("${CELLI_TEST_DEFAULT:-world}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("CELLI_TEST_DEFAULT");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CELLI_TEST_UNSET");
        }
        let result = expand_env("${CELLI_TEST_UNSET:-Anonymous}", "author.name").unwrap();
        assert_eq!(result, "Anonymous");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CELLI_TEST_MISSING");
        }
        let err = expand_env("https://${CELLI_TEST_MISSING}/me", "author.link").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in author.link: ${CELLI_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CELLI_TEST_HOST", "example.com");
        }
        let result = expand_env("https://${CELLI_TEST_HOST}/me.png", "author.avatar").unwrap();
        assert_eq!(result, "https://example.com/me.png");
        unsafe {
            std::env::remove_var("CELLI_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("Email: me@example.com", "author.about").unwrap();
        assert_eq!(result, "Email: me@example.com");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("costs $5", "author.about").unwrap();
        assert_eq!(result, "costs $5");
    }

    #[test]
    fn test_expand_default_then_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CELLI_TEST_MIXED_A");
            std::env::remove_var("CELLI_TEST_MIXED_B");
        }
        let err = expand_env("${CELLI_TEST_MIXED_A:-x}${CELLI_TEST_MIXED_B}", "author.name")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in author.name: ${CELLI_TEST_MIXED_B} not set"
        );

        let result = expand_env("${CELLI_TEST_MIXED_A:-x}", "author.name").unwrap();
        assert_eq!(result, "x");
    }
}
