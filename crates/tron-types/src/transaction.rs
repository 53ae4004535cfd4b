//! Transaction types exchanged with the remote provider.

use crate::account::TransactionId;
use serde::{Deserialize, Serialize};

/// Unsigned transaction materialised by the remote provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTransactionResponse {
	/// Digest of `raw_data`; this is what the signer signs.
	pub txid: TransactionId,
	/// Encoded `protocol.Transaction.raw`, exactly as the node returned it.
	#[serde(with = "hex_bytes")]
	pub raw_data: Vec<u8>,
}

impl CreatedTransactionResponse {
	pub fn new(txid: TransactionId, raw_data: Vec<u8>) -> Self {
		Self { txid, raw_data }
	}
}

mod hex_bytes {
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&hex::encode(bytes))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
		let s = String::deserialize(deserializer)?;
		hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(serde::de::Error::custom)
	}
}
