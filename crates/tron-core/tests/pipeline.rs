//! End-to-end send against a mocked node HTTP API.

use alloy::primitives::U256;
use prost::Message;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tron_account::implementations::local::LocalSigner;
use tron_account::SignerInterface;
use tron_core::{transaction_id, SendError, TransactionSender};
use tron_provider::implementations::trongrid::TronGridProvider;
use tron_types::protocol::{SignedTransaction, TransactionRaw};
use tron_types::{
	Address, ApproveMethod, Contract, ContractMethod, ContractMethodFactories, TransferContract,
	TriggerSmartContract,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "ac0974bec39a17e36ba4a4b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn raw_for(contract: &Contract) -> Vec<u8> {
	TransactionRaw {
		ref_block_bytes: vec![0x6d, 0x1a],
		ref_block_hash: hex::decode("1b2e6fb1c6f0a5b4").unwrap(),
		expiration: 1_700_000_060_000,
		contract: vec![contract.to_record()],
		timestamp: 1_700_000_000_000,
		fee_limit: 0,
		..Default::default()
	}
	.encode_to_vec()
}

async fn mount(server: &MockServer, endpoint: &str, body: serde_json::Value) {
	Mock::given(method("POST"))
		.and(path(format!("/wallet/{}", endpoint)))
		.respond_with(ResponseTemplate::new(200).set_body_json(body))
		.mount(server)
		.await;
}

fn sender(server: &MockServer) -> TransactionSender {
	let provider = TronGridProvider::new(&server.uri(), None, Duration::from_secs(5)).unwrap();
	TransactionSender::new(Arc::new(provider))
}

async fn broadcast_bodies(server: &MockServer) -> Vec<Vec<u8>> {
	server
		.received_requests()
		.await
		.unwrap_or_default()
		.into_iter()
		.filter(|request| request.url.path() == "/wallet/broadcasthex")
		.map(|request| {
			let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
			hex::decode(body["transaction"].as_str().unwrap()).unwrap()
		})
		.collect()
}

#[tokio::test]
async fn transfer_round_trip_through_node_api() {
	let server = MockServer::start().await;
	let signer = LocalSigner::new(KEY).unwrap();
	let owner = signer.address().await.unwrap();
	let contract = Contract::from(TransferContract::new(
		owner,
		Address::from_evm_bytes([0x0b; 20]),
		100,
	));
	let raw = raw_for(&contract);
	let txid = transaction_id(&raw).to_string();

	mount(
		&server,
		"createtransaction",
		json!({ "txID": txid, "raw_data_hex": hex::encode(&raw) }),
	)
	.await;
	mount(&server, "broadcasthex", json!({ "result": true, "txid": txid })).await;

	let response = sender(&server)
		.send(&contract, &signer, None)
		.await
		.unwrap();
	assert_eq!(response.txid.to_string(), txid);

	let bodies = broadcast_bodies(&server).await;
	assert_eq!(bodies.len(), 1);
	let signed = SignedTransaction::decode(bodies[0].as_slice()).unwrap();
	assert_eq!(signed.raw_data, raw);
	assert_eq!(signed.signature.len(), 1);
	assert_eq!(signed.signature[0].len(), 65);
}

#[tokio::test]
async fn approve_call_decodes_back_to_request() {
	let server = MockServer::start().await;
	let signer = LocalSigner::new(KEY).unwrap();
	let owner = signer.address().await.unwrap();
	let method = ContractMethod::Approve(ApproveMethod::new(
		Address::from_evm_bytes([0x22; 20]),
		U256::from(5_000),
	));
	let contract = Contract::from(TriggerSmartContract::new(
		owner,
		Address::from_evm_bytes([0x0c; 20]),
		Some(method.signature().to_string()),
		Some(method.arguments()),
		0,
	));
	let raw = raw_for(&contract);

	mount(
		&server,
		"triggersmartcontract",
		json!({
			"result": { "result": true },
			"transaction": { "txID": transaction_id(&raw).to_string(), "raw_data_hex": hex::encode(&raw) },
		}),
	)
	.await;
	mount(&server, "broadcasthex", json!({ "result": true })).await;

	sender(&server)
		.send(&contract, &signer, Some(30_000_000))
		.await
		.unwrap();

	let bodies = broadcast_bodies(&server).await;
	let signed = SignedTransaction::decode(bodies[0].as_slice()).unwrap();
	let raw = TransactionRaw::decode(signed.raw_data.as_slice()).unwrap();
	let Contract::TriggerSmartContract(sent) = Contract::try_from(&raw.contract[0]).unwrap() else {
		panic!("expected trigger contract");
	};
	assert_eq!(
		ContractMethodFactories::new().create_method(&sent.data()).unwrap(),
		method
	);
}

#[tokio::test]
async fn node_substituting_amount_is_never_signed() {
	let server = MockServer::start().await;
	let signer = LocalSigner::new(KEY).unwrap();
	let owner = signer.address().await.unwrap();
	let to = Address::from_evm_bytes([0x0b; 20]);
	let requested = Contract::from(TransferContract::new(owner, to, 100));
	let substituted = raw_for(&Contract::from(TransferContract::new(owner, to, 100_000_000)));

	mount(
		&server,
		"createtransaction",
		json!({
			"txID": transaction_id(&substituted).to_string(),
			"raw_data_hex": hex::encode(&substituted),
		}),
	)
	.await;
	mount(&server, "broadcasthex", json!({ "result": true })).await;

	let result = sender(&server).send(&requested, &signer, None).await;
	assert!(matches!(result, Err(SendError::AbnormalTransaction(_))));
	assert!(broadcast_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn node_returning_foreign_transaction_id_is_never_signed() {
	let server = MockServer::start().await;
	let signer = LocalSigner::new(KEY).unwrap();
	let owner = signer.address().await.unwrap();
	let contract = Contract::from(TransferContract::new(
		owner,
		Address::from_evm_bytes([0x0b; 20]),
		100,
	));

	mount(
		&server,
		"createtransaction",
		json!({ "txID": "ee".repeat(32), "raw_data_hex": hex::encode(raw_for(&contract)) }),
	)
	.await;
	mount(&server, "broadcasthex", json!({ "result": true })).await;

	let result = sender(&server).send(&contract, &signer, None).await;
	assert!(matches!(result, Err(SendError::AbnormalTransaction(_))));
	assert!(broadcast_bodies(&server).await.is_empty());
}
