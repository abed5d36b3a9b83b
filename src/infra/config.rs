//! Centralized configuration (environment variables + defaults).
//!
//! Call [`load_dotenv`] first so values from a local `.env` file are visible.

use anyhow::Context;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Loads `.env` from the working directory, if present.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Database URL must be provided (no default).
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// HTTP listen port (`PORT`, default 3000).
pub fn port() -> anyhow::Result<u16> {
    parse_var("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)
}

/// Directory holding the single-page app and its static assets.
pub fn public_dir() -> PathBuf {
    std::env::var("PUBLIC_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR))
}

/// Connection pool size (`DB_MAX_CONNECTIONS`, default 5, at least 1).
pub fn db_max_connections() -> anyhow::Result<u32> {
    let n = parse_var(
        "DB_MAX_CONNECTIONS",
        std::env::var("DB_MAX_CONNECTIONS").ok(),
        DEFAULT_DB_MAX_CONNECTIONS,
    )?;
    Ok(n.max(1))
}

/// Parses an optional raw value, falling back to `default` when it is unset or blank.
fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", key, v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_values_use_the_default() {
        assert_eq!(parse_var("PORT", None, 3000u16).unwrap(), 3000);
        assert_eq!(parse_var("PORT", Some("  ".to_string()), 3000u16).unwrap(), 3000);
    }

    #[test]
    fn values_are_trimmed_and_parsed() {
        assert_eq!(parse_var("PORT", Some(" 8080 ".to_string()), 3000u16).unwrap(), 8080);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = parse_var("PORT", Some("eighty".to_string()), 3000u16).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
