//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$` (common in
/// directory names on some systems) is never interpreted.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("DOCS_TEST_REPO_ROOT", "/srv/docs");
        }
        let result = expand_env("${DOCS_TEST_REPO_ROOT}/content", "repository.path").unwrap();
        assert_eq!(result, "/srv/docs/content");
        unsafe {
            std::env::remove_var("DOCS_TEST_REPO_ROOT");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCS_TEST_UNSET_DEFAULT");
        }
        let result = expand_env("${DOCS_TEST_UNSET_DEFAULT:-docs}", "repository.path").unwrap();
        assert_eq!(result, "docs");
    }

    #[test]
    fn test_expand_unset_var_is_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCS_TEST_MISSING");
        }
        let err = expand_env("${DOCS_TEST_MISSING}", "repository.path").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCS_TEST_MISSING"));
        assert!(err.to_string().contains("repository.path"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        let result = expand_env("notes/$draft", "repository.path").unwrap();
        assert_eq!(result, "notes/$draft");
    }
}
