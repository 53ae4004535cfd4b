//! Configuration validation utilities.
//!
//! Implementations that are built from a TOML table (signers, providers)
//! describe their expected keys with a [`Schema`] and expose it through
//! [`ConfigSchema`], so configuration errors surface before any key material
//! or network client is constructed.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Missing required field: {0}")]
	MissingField(String),
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	String,
	Integer { min: Option<i64>, max: Option<i64> },
	/// Hex string, `0x` prefix optional, with an optional exact byte length.
	Hex { bytes: Option<usize> },
	/// `http://` or `https://` URL.
	Url,
}

/// A field definition with name and type.
#[derive(Debug)]
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
		}
	}
}

/// Schema definition with required and optional fields.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML table against this schema.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			validate_field_type(&field.name, value, &field.field_type)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				validate_field_type(&field.name, value, &field.field_type)?;
			}
		}

		Ok(())
	}
}

fn type_mismatch(field: &str, expected: &str, value: &toml::Value) -> ValidationError {
	ValidationError::TypeMismatch {
		field: field.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	}
}

fn invalid(field: &str, message: String) -> ValidationError {
	ValidationError::InvalidValue {
		field: field.to_string(),
		message,
	}
}

fn validate_field_type(
	field_name: &str,
	value: &toml::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	match expected_type {
		FieldType::String => {
			if !value.is_str() {
				return Err(type_mismatch(field_name, "string", value));
			}
		}
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_integer()
				.ok_or_else(|| type_mismatch(field_name, "integer", value))?;

			if let Some(min_val) = min {
				if int_val < *min_val {
					return Err(invalid(
						field_name,
						format!("Value {} is less than minimum {}", int_val, min_val),
					));
				}
			}

			if let Some(max_val) = max {
				if int_val > *max_val {
					return Err(invalid(
						field_name,
						format!("Value {} is greater than maximum {}", int_val, max_val),
					));
				}
			}
		}
		FieldType::Hex { bytes } => {
			let s = value
				.as_str()
				.ok_or_else(|| type_mismatch(field_name, "hex string", value))?;
			let decoded = hex::decode(s.strip_prefix("0x").unwrap_or(s))
				.map_err(|e| invalid(field_name, format!("Invalid hex: {}", e)))?;

			if let Some(expected) = bytes {
				if decoded.len() != *expected {
					return Err(invalid(
						field_name,
						format!("Expected {} bytes, got {}", expected, decoded.len()),
					));
				}
			}
		}
		FieldType::Url => {
			let s = value
				.as_str()
				.ok_or_else(|| type_mismatch(field_name, "url", value))?;
			if !(s.starts_with("http://") || s.starts_with("https://")) {
				return Err(invalid(
					field_name,
					"URL must start with http:// or https://".to_string(),
				));
			}
		}
	}

	Ok(())
}

/// Trait defining a configuration schema that can validate TOML values.
pub trait ConfigSchema: Send + Sync {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn schema() -> Schema {
		Schema::new(
			vec![
				Field::new("api_url", FieldType::Url),
				Field::new("private_key", FieldType::Hex { bytes: Some(32) }),
			],
			vec![Field::new(
				"request_timeout_secs",
				FieldType::Integer {
					min: Some(1),
					max: Some(300),
				},
			)],
		)
	}

	fn table(s: &str) -> toml::Value {
		toml::from_str(s).unwrap()
	}

	#[test]
	fn test_valid_config() {
		let config = table(&format!(
			"api_url = \"https://api.trongrid.io\"\nprivate_key = \"0x{}\"\n",
			"11".repeat(32)
		));
		assert_eq!(schema().validate(&config), Ok(()));
	}

	#[test]
	fn test_missing_and_mismatched_fields() {
		let config = table("api_url = \"https://api.trongrid.io\"\n");
		assert_eq!(
			schema().validate(&config),
			Err(ValidationError::MissingField("private_key".to_string()))
		);

		let config = table("api_url = 5\nprivate_key = \"00\"\n");
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::TypeMismatch { .. })
		));
	}

	#[test]
	fn test_hex_length_and_url_scheme() {
		let config = table("api_url = \"https://x\"\nprivate_key = \"abcd\"\n");
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "private_key"
		));

		let config = table(&format!(
			"api_url = \"ftp://x\"\nprivate_key = \"{}\"\n",
			"11".repeat(32)
		));
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "api_url"
		));
	}

	#[test]
	fn test_optional_field_range() {
		let base = format!(
			"api_url = \"https://x\"\nprivate_key = \"{}\"\n",
			"11".repeat(32)
		);
		assert_eq!(schema().validate(&table(&base)), Ok(()));

		for timeout in ["0", "301"] {
			let config = table(&format!("{}request_timeout_secs = {}\n", base, timeout));
			assert!(matches!(
				schema().validate(&config),
				Err(ValidationError::InvalidValue { field, .. }) if field == "request_timeout_secs"
			));
		}

		let config = table(&format!("{}request_timeout_secs = \"10\"\n", base));
		assert!(matches!(
			schema().validate(&config),
			Err(ValidationError::TypeMismatch { .. })
		));
	}
}
