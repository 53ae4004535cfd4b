//! TronGrid / full-node HTTP API provider.
//!
//! Talks to the `/wallet/*` endpoints of a java-tron HTTP API (TronGrid or a
//! self-hosted node) with hex-encoded addresses (`visible = false`).

use crate::{ProviderError, TransactionProvider};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tron_types::{
	Address, ConfigSchema, CreatedTransactionResponse, Field, FieldType, Schema, TransactionId,
	ValidationError,
};

const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transaction object as returned by the wallet endpoints.
#[derive(Debug, Deserialize)]
struct NodeTransaction {
	#[serde(rename = "txID")]
	txid: Option<String>,
	raw_data_hex: Option<String>,
	#[serde(rename = "Error")]
	error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NodeResult {
	#[serde(default)]
	result: bool,
	code: Option<String>,
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TriggerResponse {
	result: Option<NodeResult>,
	transaction: Option<NodeTransaction>,
}

/// Node messages are frequently hex-encoded UTF-8.
fn decode_message(message: &str) -> String {
	hex::decode(message)
		.ok()
		.and_then(|bytes| String::from_utf8(bytes).ok())
		.unwrap_or_else(|| message.to_string())
}

fn describe(result: &NodeResult) -> String {
	match (&result.code, &result.message) {
		(Some(code), Some(message)) => format!("{}: {}", code, decode_message(message)),
		(Some(code), None) => code.clone(),
		(None, Some(message)) => decode_message(message),
		(None, None) => "unknown error".to_string(),
	}
}

impl NodeTransaction {
	fn into_response(self) -> Result<CreatedTransactionResponse, ProviderError> {
		if let Some(error) = self.error {
			return Err(ProviderError::Rejected(error));
		}

		let txid = self
			.txid
			.ok_or_else(|| ProviderError::InvalidResponse("missing txID".to_string()))?
			.parse::<TransactionId>()
			.map_err(|e| ProviderError::InvalidResponse(format!("invalid txID: {}", e)))?;
		let raw_data = self
			.raw_data_hex
			.ok_or_else(|| ProviderError::InvalidResponse("missing raw_data_hex".to_string()))
			.and_then(|raw| {
				hex::decode(raw).map_err(|e| {
					ProviderError::InvalidResponse(format!("invalid raw_data_hex: {}", e))
				})
			})?;

		Ok(CreatedTransactionResponse::new(txid, raw_data))
	}
}

/// HTTP provider for the java-tron wallet API.
pub struct TronGridProvider {
	client: reqwest::Client,
	api_url: String,
}

impl TronGridProvider {
	pub fn new(
		api_url: &str,
		api_key: Option<&str>,
		timeout: Duration,
	) -> Result<Self, ProviderError> {
		let mut headers = HeaderMap::new();
		if let Some(key) = api_key {
			let value = HeaderValue::from_str(key)
				.map_err(|e| ProviderError::InvalidConfig(format!("Invalid API key: {}", e)))?;
			headers.insert(API_KEY_HEADER, value);
		}

		let client = reqwest::Client::builder()
			.default_headers(headers)
			.timeout(timeout)
			.build()
			.map_err(|e| ProviderError::InvalidConfig(format!("Failed to build client: {}", e)))?;

		Ok(Self {
			client,
			api_url: api_url.trim_end_matches('/').to_string(),
		})
	}

	async fn post<T: DeserializeOwned>(
		&self,
		endpoint: &str,
		body: serde_json::Value,
	) -> Result<T, ProviderError> {
		let url = format!("{}/wallet/{}", self.api_url, endpoint);
		tracing::debug!(%url, "Calling node");

		let response = self
			.client
			.post(&url)
			.json(&body)
			.send()
			.await
			.map_err(|e| ProviderError::Network(format!("Request to {} failed: {}", endpoint, e)))?;

		let status = response.status();
		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			return Err(ProviderError::Network(format!(
				"{} returned HTTP {}: {}",
				endpoint, status, text
			)));
		}

		response
			.json::<T>()
			.await
			.map_err(|e| ProviderError::InvalidResponse(format!("{}: {}", endpoint, e)))
	}
}

/// Configuration schema for [`TronGridProvider`].
pub struct TronGridSchema;

impl ConfigSchema for TronGridSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("api_url", FieldType::Url)],
			vec![
				Field::new("api_key", FieldType::String),
				Field::new(
					"request_timeout_secs",
					FieldType::Integer {
						min: Some(1),
						max: Some(600),
					},
				),
			],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl TransactionProvider for TronGridProvider {
	async fn create_transaction(
		&self,
		owner_address: &Address,
		to_address: &Address,
		amount: i64,
	) -> Result<CreatedTransactionResponse, ProviderError> {
		let transaction: NodeTransaction = self
			.post(
				"createtransaction",
				json!({
					"owner_address": owner_address.hex(),
					"to_address": to_address.hex(),
					"amount": amount,
				}),
			)
			.await?;

		transaction.into_response()
	}

	async fn trigger_smart_contract(
		&self,
		owner_address: &Address,
		contract_address: &Address,
		function_selector: &str,
		parameter: &[u8],
		call_value: i64,
		fee_limit: i64,
	) -> Result<CreatedTransactionResponse, ProviderError> {
		let response: TriggerResponse = self
			.post(
				"triggersmartcontract",
				json!({
					"owner_address": owner_address.hex(),
					"contract_address": contract_address.hex(),
					"function_selector": function_selector,
					"parameter": hex::encode(parameter),
					"call_value": call_value,
					"fee_limit": fee_limit,
				}),
			)
			.await?;

		match response.result {
			Some(result) if result.result => {}
			Some(result) => return Err(ProviderError::Rejected(describe(&result))),
			None => {
				return Err(ProviderError::InvalidResponse(
					"missing trigger result".to_string(),
				))
			}
		}

		response
			.transaction
			.ok_or_else(|| ProviderError::InvalidResponse("missing transaction".to_string()))?
			.into_response()
	}

	async fn broadcast_transaction(
		&self,
		signed_transaction: &[u8],
	) -> Result<(), ProviderError> {
		let result: NodeResult = self
			.post(
				"broadcasthex",
				json!({ "transaction": hex::encode(signed_transaction) }),
			)
			.await?;

		if !result.result {
			return Err(ProviderError::Rejected(describe(&result)));
		}

		tracing::info!("Broadcast accepted by node");
		Ok(())
	}
}

/// Creates a TronGrid provider from its TOML table.
pub fn create_provider(
	config: &toml::Value,
) -> Result<Box<dyn TransactionProvider>, ProviderError> {
	TronGridSchema
		.validate(config)
		.map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;

	let api_url = config
		.get("api_url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| ProviderError::InvalidConfig("api_url is required".to_string()))?;
	let api_key = config.get("api_key").and_then(|v| v.as_str());
	let timeout = config
		.get("request_timeout_secs")
		.and_then(|v| v.as_integer())
		.map(|secs| secs as u64)
		.unwrap_or(DEFAULT_TIMEOUT_SECS);

	Ok(Box::new(TronGridProvider::new(
		api_url,
		api_key,
		Duration::from_secs(timeout),
	)?))
}
