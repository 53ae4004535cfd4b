use thiserror::Error;
use tron_account::AccountError;
use tron_provider::ProviderError;
use tron_types::ContractError;

/// Failures of the integrity check on a provider-built transaction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntegrityError {
	#[error("Malformed response: {0}")]
	MalformedResponse(String),

	#[error("Abnormal transaction: {0}")]
	AbnormalTransaction(String),
}

/// Everything that can abort a send.
///
/// Provider and signer failures are passed through untouched.
#[derive(Error, Debug)]
pub enum SendError {
	#[error("Contract not supported: {0}")]
	NotSupportedContract(String),

	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),

	#[error("Abnormal transaction: {0}")]
	AbnormalTransaction(String),

	#[error("Malformed response: {0}")]
	MalformedResponse(String),

	#[error(transparent)]
	Provider(#[from] ProviderError),

	#[error(transparent)]
	Signer(#[from] AccountError),
}

impl From<IntegrityError> for SendError {
	fn from(error: IntegrityError) -> Self {
		match error {
			IntegrityError::MalformedResponse(msg) => SendError::MalformedResponse(msg),
			IntegrityError::AbnormalTransaction(msg) => SendError::AbnormalTransaction(msg),
		}
	}
}

impl From<ContractError> for SendError {
	fn from(error: ContractError) -> Self {
		match error {
			ContractError::NotSupported(name) => SendError::NotSupportedContract(name),
			other => SendError::InvalidParameter(other.to_string()),
		}
	}
}
