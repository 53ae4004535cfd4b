use alloy::primitives::U256;
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tron_account::implementations::local::create_signer;
use tron_account::AccountService;
use tron_config::{ConfigLoader, SenderConfig};
use tron_core::TransactionSender;
use tron_provider::implementations::trongrid::create_provider;
use tron_types::{
	ApproveMethod, Contract, ContractMethod, TransferContract, TriggerSmartContract,
};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	match cli.command {
		Command::Validate => validate_config(&config),
		Command::Address => {
			let account = build_account(&config)?;
			let address = account.get_address().await?;
			info!(%address, "Signer address");
			Ok(())
		}
		command => send(&config, command).await,
	}
}

fn build_account(config: &SenderConfig) -> Result<AccountService> {
	let table = toml::Value::try_from(&config.account).context("Invalid account section")?;
	let signer = create_signer(&table).context("Failed to create signer")?;
	Ok(AccountService::new(signer))
}

fn build_sender(config: &SenderConfig) -> Result<TransactionSender> {
	let table = toml::Value::try_from(&config.network).context("Invalid network section")?;
	let provider = create_provider(&table).context("Failed to create provider")?;
	Ok(TransactionSender::new(Arc::from(provider)))
}

async fn send(config: &SenderConfig, command: Command) -> Result<()> {
	let account = build_account(config)?;
	let sender = build_sender(config)?;
	let owner = account.get_address().await?;
	let default_fee_limit = config.sender.default_fee_limit;

	let (contract, fee_limit) = match command {
		Command::Transfer { to, amount } => (
			Contract::from(TransferContract::new(owner, to, amount)),
			None,
		),
		Command::Trigger {
			contract,
			selector,
			parameter,
			call_value,
			fee_limit,
		} => {
			let parameter = hex::decode(parameter.strip_prefix("0x").unwrap_or(&parameter))
				.context("Parameter must be hex")?;
			(
				Contract::from(TriggerSmartContract::new(
					owner,
					contract,
					Some(selector),
					Some(parameter),
					call_value,
				)),
				Some(fee_limit.unwrap_or(default_fee_limit)),
			)
		}
		Command::Approve {
			contract,
			spender,
			amount,
			fee_limit,
		} => {
			let value: U256 = amount.parse().context("Amount must be a decimal integer")?;
			let method = ContractMethod::Approve(ApproveMethod::new(spender, value));
			(
				Contract::from(TriggerSmartContract::new(
					owner,
					contract,
					Some(method.signature().to_string()),
					Some(method.arguments()),
					0,
				)),
				Some(fee_limit.unwrap_or(default_fee_limit)),
			)
		}
		Command::Address | Command::Validate => anyhow::bail!("not a send command"),
	};

	info!(
		%owner,
		contract_type = ?contract.contract_type(),
		"Sending transaction"
	);
	let response = sender
		.send(&contract, account.signer(), fee_limit)
		.await
		.context("Failed to send transaction")?;

	info!(tx_id = %response.txid, "Transaction sent");
	Ok(())
}

fn validate_config(config: &SenderConfig) -> Result<()> {
	build_account(config)?;
	build_sender(config)?;

	info!("Configuration is valid");
	info!("API URL: {}", config.network.api_url);
	info!("Default fee limit: {} sun", config.sender.default_fee_limit);
	Ok(())
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	Ok(())
}
