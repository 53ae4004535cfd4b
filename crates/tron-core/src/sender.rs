//! Transaction sender.
//!
//! Sequences one send: ask the provider to build the transaction, check it and
//! its id against the requested contract, sign the id, attach the signature and
//! broadcast. Nothing is signed before the integrity check passes and nothing
//! is retried; any failure aborts the whole send.

use crate::error::SendError;
use crate::verifier::verify;
use prost::Message;
use std::sync::Arc;
use tracing::{debug, info};
use tron_account::SignerInterface;
use tron_provider::TransactionProvider;
use tron_types::protocol::{SignedTransaction, TransactionContract};
use tron_types::{Contract, CreatedTransactionResponse};

/// Builds, verifies, signs and broadcasts transactions through a provider.
///
/// Holds no per-send state, so one sender can serve concurrent sends.
#[derive(Clone)]
pub struct TransactionSender {
	provider: Arc<dyn TransactionProvider>,
}

impl TransactionSender {
	pub fn new(provider: Arc<dyn TransactionProvider>) -> Self {
		Self { provider }
	}

	/// Sends `contract`, signed by `signer`.
	///
	/// `fee_limit` applies to smart-contract calls and takes precedence over the
	/// contract's own fee limit. Returns the provider's response once the signed
	/// transaction has been accepted for broadcast.
	pub async fn send(
		&self,
		contract: &Contract,
		signer: &dyn SignerInterface,
		fee_limit: Option<i64>,
	) -> Result<CreatedTransactionResponse, SendError> {
		let created = match contract {
			Contract::Transfer(transfer) => {
				self.provider
					.create_transaction(
						&transfer.owner_address,
						&transfer.to_address,
						transfer.amount,
					)
					.await?
			}
			Contract::TriggerSmartContract(trigger) => {
				let function_selector = trigger.function_selector.as_deref().ok_or_else(|| {
					SendError::InvalidParameter("function selector is required".to_string())
				})?;
				let parameter = trigger.parameter.as_deref().ok_or_else(|| {
					SendError::InvalidParameter("parameter is required".to_string())
				})?;
				let fee_limit = fee_limit.or(trigger.fee_limit).ok_or_else(|| {
					SendError::InvalidParameter("fee limit is required".to_string())
				})?;

				self.provider
					.trigger_smart_contract(
						&trigger.owner_address,
						&trigger.contract_address,
						function_selector,
						parameter,
						trigger.call_value,
						fee_limit,
					)
					.await?
			}
		};
		debug!(tx_id = %created.txid.short(), "Provider created transaction");

		let verified = verify(&created.raw_data, &created.txid, contract)?;

		let signature = signer.sign_hash(&created.txid).await?;

		let signed = SignedTransaction {
			raw_data: verified.raw_bytes,
			signature: vec![signature.0],
		}
		.encode_to_vec();

		self.provider.broadcast_transaction(&signed).await?;
		info!(
			tx_id = %created.txid.short(),
			contract_type = ?contract.contract_type(),
			"Transaction broadcast"
		);

		Ok(created)
	}

	/// Sends a contract given in its wire record form.
	///
	/// Records of types without a typed counterpart fail with
	/// [`SendError::NotSupportedContract`].
	pub async fn send_record(
		&self,
		record: &TransactionContract,
		signer: &dyn SignerInterface,
		fee_limit: Option<i64>,
	) -> Result<CreatedTransactionResponse, SendError> {
		let contract = Contract::try_from(record)?;
		self.send(&contract, signer, fee_limit).await
	}
}
