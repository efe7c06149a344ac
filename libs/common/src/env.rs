//! Environment variable lookups with defaults
//!
//! Empty variables are treated the same as unset ones, so `FOO=` in a
//! `.env` file falls back to the default.

use std::{env, str::FromStr};

use crate::error::EnvVarError;

/// Read `key`, falling back to `default` when unset or empty
pub fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read and parse `key`, falling back to `default` when unset or empty
///
/// A value that is present but does not parse is an error rather than a
/// silent fallback.
pub fn parse_var_or<T: FromStr>(key: &str, default: T) -> Result<T, EnvVarError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value.trim().parse().map_err(|_| EnvVarError {
            key: key.to_string(),
            value,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_var_or_uses_default_for_missing_and_empty() {
        unsafe {
            env::remove_var("COMMON_TEST_VAR");
        }
        assert_eq!(var_or("COMMON_TEST_VAR", "fallback"), "fallback");

        unsafe {
            env::set_var("COMMON_TEST_VAR", "");
        }
        assert_eq!(var_or("COMMON_TEST_VAR", "fallback"), "fallback");

        unsafe {
            env::set_var("COMMON_TEST_VAR", "value");
        }
        assert_eq!(var_or("COMMON_TEST_VAR", "fallback"), "value");

        unsafe {
            env::remove_var("COMMON_TEST_VAR");
        }
    }

    #[test]
    #[serial]
    fn test_parse_var_or_rejects_garbage() {
        unsafe {
            env::set_var("COMMON_TEST_PORT", "80a");
        }
        let err = parse_var_or::<u16>("COMMON_TEST_PORT", 8080).unwrap_err();
        assert_eq!(err.key, "COMMON_TEST_PORT");
        assert_eq!(err.value, "80a");

        unsafe {
            env::set_var("COMMON_TEST_PORT", "9090");
        }
        assert_eq!(parse_var_or::<u16>("COMMON_TEST_PORT", 8080).unwrap(), 9090);

        unsafe {
            env::remove_var("COMMON_TEST_PORT");
        }
        assert_eq!(parse_var_or::<u16>("COMMON_TEST_PORT", 8080).unwrap(), 8080);
    }
}
