//! Wire messages of the node's transaction format.
//!
//! Hand-written `prost` definitions mirroring `core/Tron.proto` and
//! `core/contract/*.proto`. Only the fields the sender reads or writes are
//! declared; undeclared fields are skipped on decode, which is why signed
//! transactions are reassembled from the provider's raw bytes rather than from
//! the decoded [`TransactionRaw`].

/// `google.protobuf.Any`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Any {
	#[prost(string, tag = "1")]
	pub type_url: ::prost::alloc::string::String,
	#[prost(bytes = "vec", tag = "2")]
	pub value: ::prost::alloc::vec::Vec<u8>,
}

/// `protocol.Transaction.Contract`: one embedded contract invocation record.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionContract {
	#[prost(enumeration = "ContractType", tag = "1")]
	pub contract_type: i32,
	#[prost(message, optional, tag = "2")]
	pub parameter: ::core::option::Option<Any>,
	#[prost(bytes = "vec", tag = "3")]
	pub provider: ::prost::alloc::vec::Vec<u8>,
	#[prost(bytes = "vec", tag = "4")]
	pub contract_name: ::prost::alloc::vec::Vec<u8>,
	#[prost(int32, tag = "5")]
	pub permission_id: i32,
}

/// `protocol.Transaction.raw`: the unsigned body whose digest is the transaction id.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionRaw {
	#[prost(bytes = "vec", tag = "1")]
	pub ref_block_bytes: ::prost::alloc::vec::Vec<u8>,
	#[prost(int64, tag = "3")]
	pub ref_block_num: i64,
	#[prost(bytes = "vec", tag = "4")]
	pub ref_block_hash: ::prost::alloc::vec::Vec<u8>,
	#[prost(int64, tag = "8")]
	pub expiration: i64,
	#[prost(bytes = "vec", tag = "10")]
	pub data: ::prost::alloc::vec::Vec<u8>,
	#[prost(message, repeated, tag = "11")]
	pub contract: ::prost::alloc::vec::Vec<TransactionContract>,
	#[prost(bytes = "vec", tag = "12")]
	pub scripts: ::prost::alloc::vec::Vec<u8>,
	#[prost(int64, tag = "14")]
	pub timestamp: i64,
	#[prost(int64, tag = "18")]
	pub fee_limit: i64,
}

/// `protocol.Transaction` with `raw_data` held as opaque bytes.
///
/// Field 1 is a length-delimited message on the wire, so carrying it as bytes
/// produces the same encoding while keeping every byte the node produced.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedTransaction {
	#[prost(bytes = "vec", tag = "1")]
	pub raw_data: ::prost::alloc::vec::Vec<u8>,
	#[prost(bytes = "vec", repeated, tag = "2")]
	pub signature: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

/// `protocol.TransferContract`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferContract {
	#[prost(bytes = "vec", tag = "1")]
	pub owner_address: ::prost::alloc::vec::Vec<u8>,
	#[prost(bytes = "vec", tag = "2")]
	pub to_address: ::prost::alloc::vec::Vec<u8>,
	#[prost(int64, tag = "3")]
	pub amount: i64,
}

/// `protocol.TriggerSmartContract`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TriggerSmartContract {
	#[prost(bytes = "vec", tag = "1")]
	pub owner_address: ::prost::alloc::vec::Vec<u8>,
	#[prost(bytes = "vec", tag = "2")]
	pub contract_address: ::prost::alloc::vec::Vec<u8>,
	#[prost(int64, tag = "3")]
	pub call_value: i64,
	#[prost(bytes = "vec", tag = "4")]
	pub data: ::prost::alloc::vec::Vec<u8>,
	#[prost(int64, tag = "5")]
	pub call_token_value: i64,
	#[prost(int64, tag = "6")]
	pub token_id: i64,
}

/// `protocol.Transaction.Contract.ContractType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ContractType {
	AccountCreateContract = 0,
	TransferContract = 1,
	TransferAssetContract = 2,
	VoteWitnessContract = 4,
	WitnessCreateContract = 5,
	AssetIssueContract = 6,
	AccountUpdateContract = 10,
	FreezeBalanceContract = 11,
	UnfreezeBalanceContract = 12,
	WithdrawBalanceContract = 13,
	CreateSmartContract = 30,
	TriggerSmartContract = 31,
	UpdateSettingContract = 33,
	UpdateEnergyLimitContract = 45,
	AccountPermissionUpdateContract = 46,
	FreezeBalanceV2Contract = 54,
	UnfreezeBalanceV2Contract = 55,
	WithdrawExpireUnfreezeContract = 56,
	DelegateResourceContract = 57,
	UnDelegateResourceContract = 58,
	CancelAllUnfreezeV2Contract = 59,
}

impl ContractType {
	/// Type URL used in the `Any` wrapper of the contract parameter.
	pub fn type_url(&self) -> String {
		format!("type.googleapis.com/protocol.{:?}", self)
	}
}
