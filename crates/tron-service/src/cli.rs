//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tron_types::Address;

#[derive(Parser, Debug)]
#[command(name = "tron-sender")]
#[command(about = "Build, verify, sign and broadcast Tron transactions", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
	/// Path to configuration file
	#[arg(short, long, value_name = "FILE", env = "TRON_CONFIG_FILE", default_value = "config/local.toml")]
	pub config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, env = "TRON_LOG_LEVEL", default_value = "info")]
	pub log_level: String,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Send TRX to an address
	Transfer {
		/// Recipient address, hex
		#[arg(long)]
		to: Address,

		/// Amount in sun
		#[arg(long)]
		amount: i64,
	},

	/// Call a smart contract
	Trigger {
		/// Contract address, hex
		#[arg(long)]
		contract: Address,

		/// Method signature, e.g. `transfer(address,uint256)`
		#[arg(long)]
		selector: String,

		/// ABI-encoded arguments, hex
		#[arg(long, default_value = "")]
		parameter: String,

		/// TRX sent with the call, in sun
		#[arg(long, default_value_t = 0)]
		call_value: i64,

		/// Energy fee cap in sun; defaults to `sender.default_fee_limit`
		#[arg(long)]
		fee_limit: Option<i64>,
	},

	/// Approve a TRC-20 allowance
	Approve {
		/// Token contract address, hex
		#[arg(long)]
		contract: Address,

		/// Spender address, hex
		#[arg(long)]
		spender: Address,

		/// Allowance in token base units, decimal
		#[arg(long)]
		amount: String,

		/// Energy fee cap in sun; defaults to `sender.default_fee_limit`
		#[arg(long)]
		fee_limit: Option<i64>,
	},

	/// Print the signer's address
	Address,

	/// Validate the configuration file
	Validate,
}

#[cfg(test)]
mod tests {
	use super::*;

	const ADDR: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";

	#[test]
	fn test_parse_transfer() {
		let cli = Cli::try_parse_from([
			"tron-sender",
			"--config",
			"sender.toml",
			"transfer",
			"--to",
			ADDR,
			"--amount",
			"100",
		])
		.unwrap();

		assert_eq!(cli.config, PathBuf::from("sender.toml"));
		match cli.command {
			Command::Transfer { to, amount } => {
				assert_eq!(to.hex(), ADDR);
				assert_eq!(amount, 100);
			}
			other => panic!("unexpected command: {:?}", other),
		}
	}

	#[test]
	fn test_parse_trigger_defaults() {
		let cli = Cli::try_parse_from([
			"tron-sender",
			"trigger",
			"--contract",
			ADDR,
			"--selector",
			"transfer(address,uint256)",
		])
		.unwrap();

		match cli.command {
			Command::Trigger {
				parameter,
				call_value,
				fee_limit,
				..
			} => {
				assert_eq!(parameter, "");
				assert_eq!(call_value, 0);
				assert_eq!(fee_limit, None);
			}
			other => panic!("unexpected command: {:?}", other),
		}
	}

	#[test]
	fn test_rejects_bad_address() {
		let result = Cli::try_parse_from(["tron-sender", "transfer", "--to", "xyz", "--amount", "1"]);
		assert!(result.is_err());
	}
}
