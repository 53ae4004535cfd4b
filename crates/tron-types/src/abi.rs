//! Contract method ABI helpers.
//!
//! Encodes and decodes the calldata of the TRC-20 methods the sender builds
//! trigger contracts for. Calldata is `method_id(signature) ++ arguments`, with
//! every argument padded to a 32-byte word.

use crate::account::Address;
use alloy::primitives::U256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Size of an ABI word.
pub const WORD_SIZE: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
	#[error("Invalid ABI: {0}")]
	InvalidAbi(String),
	#[error("Unknown method id: 0x{0}")]
	UnknownMethod(String),
}

/// First four bytes of the keccak256 hash of a method signature.
pub fn method_id(signature: &str) -> [u8; 4] {
	let hash = Keccak256::digest(signature.as_bytes());
	let mut id = [0u8; 4];
	id.copy_from_slice(&hash[..4]);
	id
}

/// Left-pads an address (without network prefix) to an ABI word.
pub fn encode_address(address: &Address) -> [u8; WORD_SIZE] {
	let mut word = [0u8; WORD_SIZE];
	word[12..].copy_from_slice(address.evm_bytes());
	word
}

pub fn encode_uint256(value: U256) -> [u8; WORD_SIZE] {
	value.to_be_bytes::<WORD_SIZE>()
}

/// TRC-20 `approve(address,uint256)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveMethod {
	pub spender: Address,
	pub value: U256,
}

impl ApproveMethod {
	pub const SIGNATURE: &'static str = "approve(address,uint256)";

	pub fn new(spender: Address, value: U256) -> Self {
		Self { spender, value }
	}

	/// Encoded arguments without the method id.
	pub fn arguments(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(2 * WORD_SIZE);
		out.extend_from_slice(&encode_address(&self.spender));
		out.extend_from_slice(&encode_uint256(self.value));
		out
	}
}

/// Decoded contract method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractMethod {
	Approve(ApproveMethod),
}

impl ContractMethod {
	pub fn signature(&self) -> &'static str {
		match self {
			ContractMethod::Approve(_) => ApproveMethod::SIGNATURE,
		}
	}

	pub fn arguments(&self) -> Vec<u8> {
		match self {
			ContractMethod::Approve(approve) => approve.arguments(),
		}
	}

	/// Full calldata: method id followed by the encoded arguments.
	pub fn encoded(&self) -> Vec<u8> {
		let mut out = method_id(self.signature()).to_vec();
		out.extend(self.arguments());
		out
	}
}

/// Builds a typed method from the arguments that follow its method id.
pub trait ContractMethodFactory: Send + Sync {
	fn method_id(&self) -> [u8; 4];
	fn create_method(&self, input_arguments: &[u8]) -> Result<ContractMethod, AbiError>;
}

pub struct ApproveMethodFactory;

impl ContractMethodFactory for ApproveMethodFactory {
	fn method_id(&self) -> [u8; 4] {
		method_id(ApproveMethod::SIGNATURE)
	}

	fn create_method(&self, input_arguments: &[u8]) -> Result<ContractMethod, AbiError> {
		if input_arguments.len() < 2 * WORD_SIZE {
			return Err(AbiError::InvalidAbi(format!(
				"approve expects at least {} bytes of arguments, got {}",
				2 * WORD_SIZE,
				input_arguments.len()
			)));
		}

		let spender = Address::from_slice(&input_arguments[12..32])
			.map_err(|e| AbiError::InvalidAbi(e.to_string()))?;
		let value = U256::from_be_slice(&input_arguments[32..64]);

		Ok(ContractMethod::Approve(ApproveMethod::new(spender, value)))
	}
}

/// Registry resolving calldata to the factory that understands it.
pub struct ContractMethodFactories {
	factories: Vec<Box<dyn ContractMethodFactory>>,
}

impl Default for ContractMethodFactories {
	fn default() -> Self {
		Self {
			factories: vec![Box::new(ApproveMethodFactory)],
		}
	}
}

impl ContractMethodFactories {
	pub fn new() -> Self {
		Self::default()
	}

	/// Decodes calldata, `method_id ++ arguments`, into a typed method.
	pub fn create_method(&self, data: &[u8]) -> Result<ContractMethod, AbiError> {
		if data.len() < 4 {
			return Err(AbiError::InvalidAbi(format!(
				"calldata shorter than a method id: {} bytes",
				data.len()
			)));
		}

		let (id, arguments) = data.split_at(4);
		self.factories
			.iter()
			.find(|factory| factory.method_id() == id)
			.ok_or_else(|| AbiError::UnknownMethod(hex::encode(id)))?
			.create_method(arguments)
	}
}
