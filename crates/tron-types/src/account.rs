//! Account-related types for the sender.
//!
//! This module defines Tron addresses, signatures and transaction identifiers
//! that flow between the signer, the remote provider and the orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a Tron address in bytes, prefix included.
pub const ADDRESS_LENGTH: usize = 21;

/// Prefix byte of mainnet Tron addresses.
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Errors that can occur when parsing account primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountTypeError {
	#[error("Invalid hex: {0}")]
	InvalidHex(String),
	#[error("Invalid length: expected {expected} bytes, got {actual}")]
	InvalidLength { expected: usize, actual: usize },
	#[error("Invalid address prefix: 0x{0:02x}")]
	InvalidPrefix(u8),
}

/// Tron account address.
///
/// Stored as the 21-byte form used on the wire: the `0x41` prefix followed by
/// the 20-byte account hash shared with EVM-style addresses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
	/// Builds an address from a 20-byte account hash.
	pub fn from_evm_bytes(bytes: [u8; 20]) -> Self {
		let mut raw = [0u8; ADDRESS_LENGTH];
		raw[0] = ADDRESS_PREFIX;
		raw[1..].copy_from_slice(&bytes);
		Self(raw)
	}

	/// Parses the wire form of an address.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, AccountTypeError> {
		match bytes.len() {
			ADDRESS_LENGTH => {
				if bytes[0] != ADDRESS_PREFIX {
					return Err(AccountTypeError::InvalidPrefix(bytes[0]));
				}
				let mut raw = [0u8; ADDRESS_LENGTH];
				raw.copy_from_slice(bytes);
				Ok(Self(raw))
			}
			20 => {
				let mut evm = [0u8; 20];
				evm.copy_from_slice(bytes);
				Ok(Self::from_evm_bytes(evm))
			}
			actual => Err(AccountTypeError::InvalidLength {
				expected: ADDRESS_LENGTH,
				actual,
			}),
		}
	}

	/// The 20 bytes without the network prefix, as used in ABI words.
	pub fn evm_bytes(&self) -> &[u8] {
		&self.0[1..]
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Lowercase hex of the full 21 bytes, as TronGrid expects with `visible = false`.
	pub fn hex(&self) -> String {
		hex::encode(self.0)
	}
}

impl FromStr for Address {
	type Err = AccountTypeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(s).map_err(|e| AccountTypeError::InvalidHex(e.to_string()))?;
		Self::from_slice(&bytes)
	}
}

impl TryFrom<String> for Address {
	type Error = AccountTypeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Address> for String {
	fn from(address: Address) -> Self {
		address.hex()
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.hex())
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({})", self.hex())
	}
}

/// Cryptographic signature representation.
///
/// Stores signatures as raw bytes in the recoverable `r || s || v` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<u8>);

impl AsRef<[u8]> for Signature {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

/// Transaction identifier: the 32-byte digest of the raw transaction that gets signed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(pub [u8; 32]);

impl TransactionId {
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	/// Shortened form used in log lines.
	pub fn short(&self) -> String {
		let hash_str = hex::encode(self.0);
		format!("{}..", &hash_str[..8])
	}
}

impl FromStr for TransactionId {
	type Err = AccountTypeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(s).map_err(|e| AccountTypeError::InvalidHex(e.to_string()))?;
		let raw: [u8; 32] =
			bytes
				.as_slice()
				.try_into()
				.map_err(|_| AccountTypeError::InvalidLength {
					expected: 32,
					actual: bytes.len(),
				})?;
		Ok(Self(raw))
	}
}

impl TryFrom<String> for TransactionId {
	type Error = AccountTypeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<TransactionId> for String {
	fn from(id: TransactionId) -> Self {
		hex::encode(id.0)
	}
}

impl fmt::Display for TransactionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&hex::encode(self.0))
	}
}

impl fmt::Debug for TransactionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TransactionId({})", hex::encode(self.0))
	}
}
