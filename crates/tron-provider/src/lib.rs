//! Remote transaction provider.
//!
//! A provider asks a full node to materialise unsigned transactions for a
//! contract call and later broadcasts the signed result. Providers are untrusted:
//! whatever they return is checked against the caller's intent before signing.

use async_trait::async_trait;
use thiserror::Error;
use tron_types::{Address, CreatedTransactionResponse};

pub mod implementations {
	pub mod trongrid;
}

#[derive(Debug, Error)]
pub enum ProviderError {
	/// Transport-level failure reaching the node.
	#[error("Network error: {0}")]
	Network(String),
	/// The node answered but refused the request.
	#[error("Node rejected request: {0}")]
	Rejected(String),
	/// The node's answer could not be understood.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Node-side operations the sender relies on.
#[async_trait]
pub trait TransactionProvider: Send + Sync {
	/// Creates an unsigned TRX transfer.
	async fn create_transaction(
		&self,
		owner_address: &Address,
		to_address: &Address,
		amount: i64,
	) -> Result<CreatedTransactionResponse, ProviderError>;

	/// Creates an unsigned smart-contract call.
	///
	/// `parameter` is the ABI-encoded argument blob, without the method id.
	#[allow(clippy::too_many_arguments)]
	async fn trigger_smart_contract(
		&self,
		owner_address: &Address,
		contract_address: &Address,
		function_selector: &str,
		parameter: &[u8],
		call_value: i64,
		fee_limit: i64,
	) -> Result<CreatedTransactionResponse, ProviderError>;

	/// Broadcasts an encoded signed `protocol.Transaction`.
	async fn broadcast_transaction(&self, signed_transaction: &[u8])
		-> Result<(), ProviderError>;
}
