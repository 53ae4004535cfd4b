//! Signing authority for the sender.
//!
//! The sender never sees key material: it hands a transaction id to a
//! [`SignerInterface`] and attaches whatever signature comes back. Local keys,
//! remote signing services and hardware modules all plug in behind the trait.

use async_trait::async_trait;
use tron_types::{Address, Signature, TransactionId};
use thiserror::Error;

pub mod implementations {
	pub mod local;
}

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Capability that signs 32-byte transaction digests.
#[async_trait]
pub trait SignerInterface: Send + Sync {
	/// Address whose key produces the signatures.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs the transaction id as a raw digest, without message prefixing.
	async fn sign_hash(&self, hash: &TransactionId) -> Result<Signature, AccountError>;
}

/// Thin service wrapper owning the configured signer.
pub struct AccountService {
	signer: Box<dyn SignerInterface>,
}

impl AccountService {
	pub fn new(signer: Box<dyn SignerInterface>) -> Self {
		Self { signer }
	}

	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.signer.address().await
	}

	pub fn signer(&self) -> &dyn SignerInterface {
		self.signer.as_ref()
	}
}
