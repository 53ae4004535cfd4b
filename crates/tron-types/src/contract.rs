//! Typed contract model.
//!
//! A [`Contract`] describes the on-chain action the caller wants executed. Its
//! canonical protobuf encoding is the reference the integrity check compares the
//! node's transaction against, so encoding is deterministic and side-effect free.

use crate::abi::method_id;
use crate::account::{AccountTypeError, Address};
use crate::protocol::{self, ContractType};
use prost::Message;
use thiserror::Error;

/// Errors that can occur when converting between wire records and contracts.
#[derive(Debug, Error)]
pub enum ContractError {
	/// The record's type tag is valid but has no typed counterpart here.
	#[error("Contract type not supported: {0}")]
	NotSupported(String),
	/// The parameter payload could not be decoded.
	#[error("Failed to decode contract: {0}")]
	Decode(String),
	#[error("Invalid address in contract: {0}")]
	InvalidAddress(#[from] AccountTypeError),
}

/// Native TRX transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferContract {
	pub owner_address: Address,
	pub to_address: Address,
	/// Amount in sun.
	pub amount: i64,
}

impl TransferContract {
	pub fn new(owner_address: Address, to_address: Address, amount: i64) -> Self {
		Self {
			owner_address,
			to_address,
			amount,
		}
	}

	fn to_message(&self) -> protocol::TransferContract {
		protocol::TransferContract {
			owner_address: self.owner_address.as_bytes().to_vec(),
			to_address: self.to_address.as_bytes().to_vec(),
			amount: self.amount,
		}
	}

	fn from_message(message: protocol::TransferContract) -> Result<Self, ContractError> {
		Ok(Self {
			owner_address: Address::from_slice(&message.owner_address)?,
			to_address: Address::from_slice(&message.to_address)?,
			amount: message.amount,
		})
	}
}

/// Smart-contract invocation.
///
/// The node's trigger endpoint takes the selector text and the parameter separately, and the
/// calldata on the wire is derived from them, see [`TriggerSmartContract::data`]. A contract
/// decoded from the wire has neither and carries the node's calldata verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSmartContract {
	pub owner_address: Address,
	pub contract_address: Address,
	pub function_selector: Option<String>,
	pub parameter: Option<Vec<u8>>,
	wire_data: Vec<u8>,
	/// TRX sent along with the call, in sun.
	pub call_value: i64,
	pub call_token_value: i64,
	pub token_id: i64,
	/// Energy fee cap in sun. Not part of the contract encoding.
	pub fee_limit: Option<i64>,
}

impl TriggerSmartContract {
	pub fn new(
		owner_address: Address,
		contract_address: Address,
		function_selector: Option<String>,
		parameter: Option<Vec<u8>>,
		call_value: i64,
	) -> Self {
		Self {
			owner_address,
			contract_address,
			function_selector,
			parameter,
			wire_data: Vec::new(),
			call_value,
			call_token_value: 0,
			token_id: 0,
			fee_limit: None,
		}
	}

	pub fn with_fee_limit(mut self, fee_limit: i64) -> Self {
		self.fee_limit = Some(fee_limit);
		self
	}

	/// Calldata: the method id of `function_selector` followed by `parameter`.
	///
	/// Falls back to the decoded wire calldata only when both are unset.
	pub fn data(&self) -> Vec<u8> {
		if self.function_selector.is_none() && self.parameter.is_none() {
			return self.wire_data.clone();
		}

		let mut data = Vec::new();
		if let Some(selector) = &self.function_selector {
			data.extend_from_slice(&method_id(selector));
		}
		if let Some(parameter) = &self.parameter {
			data.extend_from_slice(parameter);
		}
		data
	}

	fn to_message(&self) -> protocol::TriggerSmartContract {
		protocol::TriggerSmartContract {
			owner_address: self.owner_address.as_bytes().to_vec(),
			contract_address: self.contract_address.as_bytes().to_vec(),
			call_value: self.call_value,
			data: self.data(),
			call_token_value: self.call_token_value,
			token_id: self.token_id,
		}
	}

	fn from_message(message: protocol::TriggerSmartContract) -> Result<Self, ContractError> {
		Ok(Self {
			owner_address: Address::from_slice(&message.owner_address)?,
			contract_address: Address::from_slice(&message.contract_address)?,
			function_selector: None,
			parameter: None,
			wire_data: message.data,
			call_value: message.call_value,
			call_token_value: message.call_token_value,
			token_id: message.token_id,
			fee_limit: None,
		})
	}
}

/// Supported contract variants.
///
/// Adding a variant forces every dispatch site to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contract {
	Transfer(TransferContract),
	TriggerSmartContract(TriggerSmartContract),
}

impl Contract {
	/// Wire type tag of this contract.
	pub fn contract_type(&self) -> ContractType {
		match self {
			Contract::Transfer(_) => ContractType::TransferContract,
			Contract::TriggerSmartContract(_) => ContractType::TriggerSmartContract,
		}
	}

	pub fn owner_address(&self) -> &Address {
		match self {
			Contract::Transfer(transfer) => &transfer.owner_address,
			Contract::TriggerSmartContract(trigger) => &trigger.owner_address,
		}
	}

	/// Canonical protobuf encoding of the contract parameter.
	pub fn encode(&self) -> Vec<u8> {
		match self {
			Contract::Transfer(transfer) => transfer.to_message().encode_to_vec(),
			Contract::TriggerSmartContract(trigger) => trigger.to_message().encode_to_vec(),
		}
	}

	/// Decodes a contract parameter payload of the given type.
	pub fn decode(contract_type: ContractType, bytes: &[u8]) -> Result<Self, ContractError> {
		match contract_type {
			ContractType::TransferContract => {
				let message = protocol::TransferContract::decode(bytes)
					.map_err(|e| ContractError::Decode(e.to_string()))?;
				Ok(Contract::Transfer(TransferContract::from_message(message)?))
			}
			ContractType::TriggerSmartContract => {
				let message = protocol::TriggerSmartContract::decode(bytes)
					.map_err(|e| ContractError::Decode(e.to_string()))?;
				Ok(Contract::TriggerSmartContract(
					TriggerSmartContract::from_message(message)?,
				))
			}
			other => Err(ContractError::NotSupported(format!("{:?}", other))),
		}
	}

	/// Wraps the contract into the record layout the node embeds in a raw transaction.
	pub fn to_record(&self) -> protocol::TransactionContract {
		let contract_type = self.contract_type();
		protocol::TransactionContract {
			contract_type: contract_type as i32,
			parameter: Some(protocol::Any {
				type_url: contract_type.type_url(),
				value: self.encode(),
			}),
			..Default::default()
		}
	}
}

impl From<TransferContract> for Contract {
	fn from(contract: TransferContract) -> Self {
		Contract::Transfer(contract)
	}
}

impl From<TriggerSmartContract> for Contract {
	fn from(contract: TriggerSmartContract) -> Self {
		Contract::TriggerSmartContract(contract)
	}
}

impl TryFrom<&protocol::TransactionContract> for Contract {
	type Error = ContractError;

	fn try_from(record: &protocol::TransactionContract) -> Result<Self, Self::Error> {
		let contract_type = ContractType::try_from(record.contract_type).map_err(|_| {
			ContractError::NotSupported(format!("unknown type {}", record.contract_type))
		})?;
		let value = record
			.parameter
			.as_ref()
			.map(|any| any.value.as_slice())
			.unwrap_or_default();
		Contract::decode(contract_type, value)
	}
}
