//! Configuration types for the sender.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete sender configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenderConfig {
	/// Node endpoint settings
	pub network: NetworkConfig,
	/// Signing key settings
	pub account: AccountConfig,
	/// Defaults applied to outgoing transactions
	#[serde(default)]
	pub sender: SenderSettings,
}

/// Node endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
	/// Base URL of the wallet HTTP API, e.g. `https://api.trongrid.io`
	pub api_url: String,
	/// TronGrid API key sent as `TRON-PRO-API-KEY`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	/// Per-request timeout
	#[serde(default = "default_request_timeout_secs")]
	pub request_timeout_secs: u64,
}

/// Signing key settings.
#[derive(Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Hex-encoded secp256k1 private key
	pub private_key: String,
}

impl fmt::Debug for AccountConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AccountConfig")
			.field("private_key", &"<redacted>")
			.finish()
	}
}

/// Defaults applied to outgoing transactions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenderSettings {
	/// Fee limit in sun used for contract calls that do not set one
	#[serde(default = "default_fee_limit")]
	pub default_fee_limit: i64,
}

impl Default for SenderSettings {
	fn default() -> Self {
		Self {
			default_fee_limit: default_fee_limit(),
		}
	}
}

fn default_request_timeout_secs() -> u64 {
	30
}

/// 100 TRX.
fn default_fee_limit() -> i64 {
	100_000_000
}
