//! Local private-key signer.
//!
//! Signs with a secp256k1 key held in memory through Alloy's signer. Tron uses
//! the same curve and account hash as EVM chains, so the account address is the
//! Alloy address behind the `0x41` prefix.

use crate::{AccountError, SignerInterface};
use alloy::primitives::{Signature as AlloySignature, B256};
use alloy::signers::{local::PrivateKeySigner, Signer};
use async_trait::async_trait;
use tron_types::{
	Address, ConfigSchema, Field, FieldType, Schema, Signature, TransactionId, ValidationError,
};

/// Signer backed by an in-memory private key.
pub struct LocalSigner {
	signer: PrivateKeySigner,
}

impl LocalSigner {
	/// Creates a signer from a hex-encoded private key, with or without `0x`.
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	pub fn tron_address(&self) -> Address {
		Address::from_evm_bytes(self.signer.address().0.0)
	}
}

/// `r || s || v` with `v` in {27, 28}, the layout nodes accept in `signature[]`.
fn to_signature_bytes(sig: &AlloySignature) -> Signature {
	let mut bytes = Vec::with_capacity(65);
	bytes.extend_from_slice(&sig.r().to_be_bytes::<32>());
	bytes.extend_from_slice(&sig.s().to_be_bytes::<32>());
	bytes.push(if sig.v() { 28 } else { 27 });
	Signature(bytes)
}

/// Configuration schema for [`LocalSigner`].
pub struct LocalSignerSchema;

impl ConfigSchema for LocalSignerSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("private_key", FieldType::Hex { bytes: Some(32) })],
			vec![],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl SignerInterface for LocalSigner {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.tron_address())
	}

	async fn sign_hash(&self, hash: &TransactionId) -> Result<Signature, AccountError> {
		let digest = B256::from(*hash.as_bytes());
		let signature = self
			.signer
			.sign_hash(&digest)
			.await
			.map_err(|e| AccountError::SigningFailed(format!("Failed to sign hash: {}", e)))?;

		tracing::debug!(tx_id = %hash.short(), "Signed transaction id");
		Ok(to_signature_bytes(&signature))
	}
}

/// Creates a local signer from its TOML table (`private_key = "..."`).
pub fn create_signer(config: &toml::Value) -> Result<Box<dyn SignerInterface>, AccountError> {
	LocalSignerSchema
		.validate(config)
		.map_err(|e| AccountError::InvalidConfig(e.to_string()))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.ok_or_else(|| AccountError::InvalidConfig("private_key is required".to_string()))?;

	Ok(Box::new(LocalSigner::new(private_key)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::U256;

	// Well-known development key; never holds funds.
	const KEY: &str = "0xac0974bec39a17e36ba4a4b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[tokio::test]
	async fn test_address_has_tron_prefix() {
		let signer = LocalSigner::new(KEY).unwrap();
		let address = signer.address().await.unwrap();
		assert_eq!(address.hex(), "41f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
	}

	#[tokio::test]
	async fn test_signature_recovers_to_signer() {
		let signer = LocalSigner::new(KEY).unwrap();
		let hash = TransactionId([0x42; 32]);
		let signature = signer.sign_hash(&hash).await.unwrap();

		assert_eq!(signature.0.len(), 65);
		assert!(signature.0[64] == 27 || signature.0[64] == 28);

		let recovered = AlloySignature::new(
			U256::from_be_slice(&signature.0[..32]),
			U256::from_be_slice(&signature.0[32..64]),
			signature.0[64] == 28,
		)
		.recover_address_from_prehash(&B256::from(*hash.as_bytes()))
		.unwrap();
		assert_eq!(Address::from_evm_bytes(recovered.0.0), signer.tron_address());
	}

	#[test]
	fn test_invalid_key() {
		assert!(matches!(
			LocalSigner::new("0x1234"),
			Err(AccountError::InvalidKey(_))
		));
	}

	#[test]
	fn test_create_signer_validates_config() {
		let config: toml::Value = toml::from_str("private_key = \"abcd\"").unwrap();
		assert!(matches!(
			create_signer(&config),
			Err(AccountError::InvalidConfig(_))
		));

		let config: toml::Value = toml::from_str(&format!("private_key = \"{}\"", KEY)).unwrap();
		assert!(create_signer(&config).is_ok());
	}
}
