//! Pricing policy file handling.
//!
//! Lookup order: `--config` / `RATECARD_CONFIG`, then
//! `<config dir>/ratecard/policy.toml`, then the built-in standard policy.

use std::fmt;
use std::path::{Path, PathBuf};

use ratecard_core::error::Validate;
use ratecard_core::PricingPolicy;

use crate::error::{CliError, CliResult};

/// Environment variable naming a policy file.
pub const CONFIG_ENV: &str = "RATECARD_CONFIG";

/// Where the active policy came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// Read from a file.
    File(PathBuf),
    /// No file found; built-in defaults.
    BuiltIn,
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => write!(f, "built-in defaults"),
        }
    }
}

/// A validated policy and its origin.
#[derive(Debug, Clone)]
pub struct LoadedPolicy {
    /// The policy.
    pub policy: PricingPolicy,
    /// Where it was read from.
    pub source: PolicySource,
}

/// Default policy file location.
pub fn default_policy_path() -> CliResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(CliError::NoConfigDir)?;
    Ok(base.join("ratecard").join("policy.toml"))
}

/// Loads the active policy.
///
/// An explicit path must exist. The default path is optional.
pub fn load_policy(explicit: Option<&Path>) -> CliResult<LoadedPolicy> {
    if let Some(path) = explicit {
        return read_policy(path).map(|policy| LoadedPolicy {
            policy,
            source: PolicySource::File(path.to_path_buf()),
        });
    }

    match default_policy_path() {
        Ok(path) if path.is_file() => Ok(LoadedPolicy {
            policy: read_policy(&path)?,
            source: PolicySource::File(path),
        }),
        _ => Ok(LoadedPolicy {
            policy: PricingPolicy::default(),
            source: PolicySource::BuiltIn,
        }),
    }
}

/// Reads and validates a policy file. `.json` files are JSON, anything
/// else is TOML.
pub fn read_policy(path: &Path) -> CliResult<PricingPolicy> {
    let content = std::fs::read_to_string(path).map_err(|e| config_error(path, e))?;
    let policy = parse_policy(&content, is_json(path)).map_err(|reason| CliError::Config {
        path: path.to_path_buf(),
        reason,
    })?;
    policy
        .validate_or_error()
        .map_err(|e| config_error(path, e))?;
    Ok(policy)
}

/// Writes a policy file, refusing to clobber unless `force` is set.
pub fn write_policy(path: &Path, policy: &PricingPolicy, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = render_policy(policy, is_json(path))?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "wrote pricing policy");
    Ok(())
}

/// Serializes a policy as JSON or TOML.
pub fn render_policy(policy: &PricingPolicy, json: bool) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(policy)?)
    } else {
        toml::to_string_pretty(policy).map_err(|e| CliError::Serialization(e.to_string()))
    }
}

fn parse_policy(content: &str, json: bool) -> Result<PricingPolicy, String> {
    if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn config_error(path: &Path, err: impl fmt::Display) -> CliError {
    CliError::Config {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratecard_core::RetailInput;
    use rust_decimal_macros::dec;

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        write_policy(&path, &PricingPolicy::device_as_a_service(), false).unwrap();

        let policy = read_policy(&path).unwrap();
        assert_eq!(policy.retail_input, RetailInput::Fractional);
        assert_eq!(policy.subscription_label, "MDaaS");
        assert_eq!(policy.subsidy, dec!(450));
    }

    #[test]
    fn test_json_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{ "name": "promo", "subsidy": 300 }"#).unwrap();

        let loaded = load_policy(Some(&path)).unwrap();
        assert_eq!(loaded.policy.subsidy, dec!(300));
        assert_eq!(loaded.policy.annual_rate, dec!(0.125));
        assert_eq!(loaded.source, PolicySource::File(path));
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        write_policy(&path, &PricingPolicy::default(), false).unwrap();
        assert!(matches!(
            write_policy(&path, &PricingPolicy::default(), false),
            Err(CliError::ConfigExists(_))
        ));
        assert!(write_policy(&path, &PricingPolicy::default(), true).is_ok());
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        std::fs::write(&path, "subscription_term_months = 0\n").unwrap();
        assert!(matches!(read_policy(&path), Err(CliError::Config { .. })));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_policy(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
