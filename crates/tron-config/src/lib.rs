//! Configuration loading for the sender.
//!
//! Configuration is a TOML file with `${VAR}` environment substitution,
//! followed by `TRON_*` environment overrides and validation.

use regex::Regex;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

mod types;

pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "TRON_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<SenderConfig, ConfigError> {
		let file_path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("No configuration file specified".to_string())
		})?;

		if !Path::new(file_path).exists() {
			return Err(ConfigError::FileNotFound(file_path.clone()));
		}

		debug!("Loading configuration from {}", file_path);
		let content = tokio::fs::read_to_string(file_path).await?;
		self.load_from_str(&content)
	}

	/// Parses, overrides and validates configuration from TOML text.
	pub fn load_from_str(&self, content: &str) -> Result<SenderConfig, ConfigError> {
		let substituted = substitute_env_vars(content)?;
		let mut config: SenderConfig =
			toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))?;

		self.apply_env_overrides(&mut config);
		validate_config(&config)?;

		Ok(config)
	}

	fn apply_env_overrides(&self, config: &mut SenderConfig) {
		if let Ok(key) = env::var(format!("{}PRIVATE_KEY", self.env_prefix)) {
			debug!("Overriding private key from environment");
			config.account.private_key = key;
		}

		if let Ok(url) = env::var(format!("{}API_URL", self.env_prefix)) {
			debug!("Overriding API URL from environment");
			config.network.api_url = url;
		}

		if let Ok(key) = env::var(format!("{}API_KEY", self.env_prefix)) {
			debug!("Overriding API key from environment");
			config.network.api_key = Some(key);
		}
	}
}

/// Replaces `${VAR_NAME}` patterns with the variable's value.
///
/// Comment lines are left untouched, so a commented-out placeholder does not
/// require its variable.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([^}]+)\}")
		.map_err(|e| ConfigError::ParseError(format!("Invalid substitution pattern: {}", e)))?;

	let mut result = String::with_capacity(content.len());
	for original in content.lines() {
		let mut line = original.to_string();
		if !original.trim_start().starts_with('#') {
			for cap in re.captures_iter(original) {
				let env_value = env::var(&cap[1])
					.map_err(|_| ConfigError::EnvVarNotFound(cap[1].to_string()))?;
				line = line.replace(&cap[0], &env_value);
			}
		}
		result.push_str(&line);
		result.push('\n');
	}

	Ok(result)
}

/// Loader-level checks. Field formats of the `[network]` and `[account]` tables
/// are validated by the schemas of the provider and signer built from them.
fn validate_config(config: &SenderConfig) -> Result<(), ConfigError> {
	if config.sender.default_fee_limit <= 0 {
		return Err(ConfigError::ValidationError(
			"sender.default_fee_limit must be positive".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn key() -> String {
		"11".repeat(32)
	}

	fn config_text(api_url: &str, private_key: &str) -> String {
		format!(
			r#"
[network]
api_url = "{}"
api_key = "abc"

[account]
private_key = "{}"

[sender]
default_fee_limit = 50000000
"#,
			api_url, private_key
		)
	}

	#[test]
	fn test_parse_with_defaults() {
		let text = format!(
			"[network]\napi_url = \"https://api.trongrid.io\"\n\n[account]\nprivate_key = \"{}\"\n",
			key()
		);
		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_DEFAULTS_")
			.load_from_str(&text)
			.unwrap();
		assert_eq!(config.network.request_timeout_secs, 30);
		assert_eq!(config.network.api_key, None);
		assert_eq!(config.sender.default_fee_limit, 100_000_000);
	}

	#[test]
	fn test_env_substitution() {
		env::set_var("TRON_TEST_SUBST_KEY", key());
		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_SUBST_")
			.load_from_str(&config_text(
				"https://api.trongrid.io",
				"${TRON_TEST_SUBST_KEY}",
			))
			.unwrap();
		assert_eq!(config.account.private_key, key());
	}

	#[test]
	fn test_missing_env_var() {
		let result = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_MISSING_")
			.load_from_str(&config_text(
				"https://api.trongrid.io",
				"${TRON_TEST_DEFINITELY_UNSET}",
			));
		assert!(matches!(result, Err(ConfigError::EnvVarNotFound(v)) if v == "TRON_TEST_DEFINITELY_UNSET"));
	}

	#[test]
	fn test_commented_placeholder_is_ignored() {
		let text = format!(
			"[network]\napi_url = \"https://api.trongrid.io\"\n# api_key = \"${{TRON_TEST_COMMENTED_UNSET}}\"\n\n[account]\nprivate_key = \"{}\"\n",
			key()
		);
		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_COMMENTED_")
			.load_from_str(&text)
			.unwrap();
		assert_eq!(config.network.api_key, None);
	}

	#[test]
	fn test_shipped_config_needs_only_signer_key() {
		env::set_var("TRON_SIGNER_KEY", key());
		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_SHIPPED_")
			.load_from_str(include_str!("../../../config/local.toml"))
			.unwrap();
		assert_eq!(config.network.api_key, None);
		assert_eq!(config.account.private_key, key());
	}

	#[test]
	fn test_env_overrides() {
		env::set_var("TRON_TEST_OVERRIDE_API_URL", "http://localhost:8090");
		env::set_var("TRON_TEST_OVERRIDE_API_KEY", "override");
		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_OVERRIDE_")
			.load_from_str(&config_text("https://api.trongrid.io", &key()))
			.unwrap();
		assert_eq!(config.network.api_url, "http://localhost:8090");
		assert_eq!(config.network.api_key.as_deref(), Some("override"));
	}

	#[test]
	fn test_validation_errors() {
		let loader = ConfigLoader::new().with_env_prefix("TRON_TEST_VALIDATION_");
		let text = config_text("https://node", &key());
		for limit in ["0", "-1"] {
			let text = text.replace(
				"default_fee_limit = 50000000",
				&format!("default_fee_limit = {}", limit),
			);
			assert!(matches!(
				loader.load_from_str(&text),
				Err(ConfigError::ValidationError(_))
			));
		}
	}

	#[test]
	fn test_private_key_not_in_debug_output() {
		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_DEBUG_")
			.load_from_str(&config_text("https://api.trongrid.io", &key()))
			.unwrap();
		assert!(!format!("{:?}", config).contains(&key()));
	}

	#[tokio::test]
	async fn test_load_from_file() {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
		file.write_all(config_text("https://api.trongrid.io", &key()).as_bytes())
			.unwrap();

		let config = ConfigLoader::new()
			.with_env_prefix("TRON_TEST_FILE_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.sender.default_fee_limit, 50_000_000);
	}

	#[tokio::test]
	async fn test_load_missing_file() {
		let result = ConfigLoader::new()
			.with_file("/nonexistent/tron-sender.toml")
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
	}
}
