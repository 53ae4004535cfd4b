//! Integrity check of provider-built transactions.
//!
//! The provider returns both the raw transaction and its id, and the id is what
//! gets signed. Before signing, the id must be the SHA-256 of the raw bytes, and
//! the raw transaction must carry exactly one contract record whose parameter is
//! byte-for-byte the canonical encoding of the contract the caller asked for.

use crate::error::IntegrityError;
use prost::Message;
use sha2::{Digest, Sha256};
use tron_types::protocol::TransactionRaw;
use tron_types::{Contract, TransactionId};

/// A raw transaction that passed the integrity check.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedTransaction {
	/// Decoded form of `raw_bytes`.
	pub raw: TransactionRaw,
	/// The provider's encoding, kept verbatim for reassembly.
	pub raw_bytes: Vec<u8>,
}

/// Transaction id of an encoded raw transaction.
pub fn transaction_id(raw_blob: &[u8]) -> TransactionId {
	let mut hasher = Sha256::new();
	hasher.update(raw_blob);
	TransactionId(hasher.finalize().into())
}

/// Verifies that `raw_blob` encodes exactly `intended` and that `txid` is its id.
pub fn verify(
	raw_blob: &[u8],
	txid: &TransactionId,
	intended: &Contract,
) -> Result<VerifiedTransaction, IntegrityError> {
	let raw = TransactionRaw::decode(raw_blob)
		.map_err(|e| IntegrityError::MalformedResponse(format!("undecodable raw data: {}", e)))?;

	let computed = transaction_id(raw_blob);
	if computed != *txid {
		tracing::warn!(
			tx_id = %txid.short(),
			computed = %computed.short(),
			"Provider transaction id does not match raw data"
		);
		return Err(IntegrityError::AbnormalTransaction(format!(
			"transaction id {} is not the hash of the raw data",
			txid
		)));
	}

	let [record] = raw.contract.as_slice() else {
		tracing::warn!(
			contracts = raw.contract.len(),
			"Provider returned unexpected contract count"
		);
		return Err(IntegrityError::AbnormalTransaction(format!(
			"expected exactly one contract, found {}",
			raw.contract.len()
		)));
	};

	let expected = intended.encode();
	let actual = record
		.parameter
		.as_ref()
		.map(|any| any.value.as_slice())
		.unwrap_or_default();

	if actual != expected.as_slice() {
		let offset = first_difference(actual, &expected);
		tracing::warn!(
			offset,
			expected_len = expected.len(),
			actual_len = actual.len(),
			contract_type = ?intended.contract_type(),
			"Provider transaction does not match requested contract"
		);
		return Err(IntegrityError::AbnormalTransaction(format!(
			"contract parameter differs from request at byte {}",
			offset
		)));
	}

	Ok(VerifiedTransaction {
		raw,
		raw_bytes: raw_blob.to_vec(),
	})
}

/// Offset of the first differing byte; the shorter length if one is a prefix of the other.
fn first_difference(a: &[u8], b: &[u8]) -> usize {
	a.iter()
		.zip(b)
		.position(|(x, y)| x != y)
		.unwrap_or_else(|| a.len().min(b.len()))
}
