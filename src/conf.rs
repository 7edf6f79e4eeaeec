pub mod api;
pub mod btc;
pub mod transfer;

// std
use std::{
	env, fs,
	path::{Path, PathBuf},
	process,
};
// crates.io
use app_dirs2::{AppDataType, AppInfo};
use serde::{Deserialize, Serialize};
// self
use crate::prelude::*;

const APP_INFO: AppInfo = AppInfo { name: "taproot-splitter", author: "taproot-splitter" };
const API_KEY_ENV: &str = "API_KEY";
const DEFAULT_CONF: &str = r#"[btc]
# Network configuration.
# Possible values: "bitcoin", "testnet", "signet", "regtest".
network = "bitcoin"

# Sender secret key, either in WIF or in hex format (optional "0x" prefix).
secret-key = "0x.."

[btc.fee-conf]
# Fee strategy to use for transactions.
# Possible values (sorted from fastest to slowest): "fastest", "half-hour", "hour", "economy", "minimum".
strategy = "fastest"

# Additional fee to add to the recommended fee rate.
extra = 0

# Force set the fee rate.
# force = 1

[api]
# Bearer credential for the UTXO indexer.
# The `API_KEY` environment variable takes precedence over this value.
# api-key = ""

fees-uri = "https://mempool-testnet.fractalbitcoin.io/api/fees/recommended"
utxo-uri = "https://wallet-api-fractalbitcoin.unisat.space/v5/address/btc-utxo"
broadcast-uri = "https://mempool.fractalbitcoin.io/api/tx"

# Payouts, in the order they should appear in the transaction.
# Amounts are in whole coins.
# [[transfer.payouts]]
# address = "bc1p.."
# amount = 0.0005
"#;

#[derive(Debug, Serialize, Deserialize)]
pub struct Conf {
	pub api: api::Conf,
	pub btc: btc::Conf,
	#[serde(default)]
	pub transfer: transfer::Conf,
}
impl Conf {
	pub fn default_path() -> Result<PathBuf> {
		Ok(app_dirs2::app_root(AppDataType::UserConfig, &APP_INFO)?.join("conf.toml"))
	}

	pub fn load_from(path: &Path) -> Result<Self> {
		if path.is_file() {
			Self::from_str_with_env(&fs::read_to_string(path)?, env::var(API_KEY_ENV).ok())
		} else {
			tracing::info!(
				"no configuration file found, \
				use the template to generate a new one, \
				please configure it at {path:?}"
			);
			fs::write(path, DEFAULT_CONF)?;
			process::exit(0);
		}
	}

	// The credential from the environment is read once here and only travels inside `Conf` from
	// then on.
	fn from_str_with_env(s: &str, api_key: Option<String>) -> Result<Self> {
		let mut conf = toml::from_str::<Self>(s)?;

		if let Some(k) = api_key {
			conf.api.api_key = Some(k);
		}
		if conf.api.api_key.as_deref().is_some_and(str::is_empty) {
			conf.api.api_key = None;
		}

		Ok(conf)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chain::btc::api::mempool::FeeType;

	#[test]
	fn default_conf_should_parse() {
		let conf = Conf::from_str_with_env(DEFAULT_CONF, None).unwrap();

		assert_eq!(conf.btc.network, bitcoin::Network::Bitcoin);
		assert_eq!(conf.btc.fee_conf.strategy, FeeType::Fastest);
		assert_eq!(conf.btc.fee_conf.extra, 0);
		assert!(conf.btc.fee_conf.force.is_none());
		assert!(conf.api.api_key.is_none());
		assert_eq!(conf.api.user_agent, "taproot-splitter");
		assert!(conf.transfer.payouts.is_empty());
	}

	#[test]
	fn conf_should_work() {
		let s = r#"
			[btc]
			network = "regtest"
			secret-key = "cVt4o7BGAig1UXywgGSmARhxMdzP5qvQsxKkSsc1XEkw3tDTQFpy"

			[btc.fee-conf]
			strategy = "half-hour"
			force = 3

			[api]
			api-key = "from-file"
			fees-uri = "http://127.0.0.1:3000/fees"
			utxo-uri = "http://127.0.0.1:3000/utxo"
			broadcast-uri = "http://127.0.0.1:3000/tx"

			[[transfer.payouts]]
			address = "bcrt1qa"
			amount = 0.5

			[[transfer.payouts]]
			address = "bcrt1qb"
			amount = 0.00001
		"#;
		let conf = Conf::from_str_with_env(s, None).unwrap();

		assert_eq!(conf.btc.network, bitcoin::Network::Regtest);
		assert_eq!(conf.btc.fee_conf.strategy, FeeType::HalfHour);
		assert_eq!(conf.btc.fee_conf.force, Some(3));
		assert_eq!(conf.api.api_key.as_deref(), Some("from-file"));
		assert_eq!(
			conf.transfer.payouts.iter().map(|p| p.address.as_str()).collect::<Vec<_>>(),
			["bcrt1qa", "bcrt1qb"]
		);
		assert_eq!(conf.transfer.payouts[1].amount, 0.00001);

		let conf = Conf::from_str_with_env(s, Some("from-env".into())).unwrap();

		assert_eq!(conf.api.api_key.as_deref(), Some("from-env"));

		let conf = Conf::from_str_with_env(s, Some(String::new())).unwrap();

		assert!(conf.api.api_key.is_none());
	}

	#[test]
	fn malformed_conf_should_fail() {
		assert!(matches!(
			Conf::from_str_with_env("[btc]\nnetwork = \"moon\"", None),
			Err(Error::Toml(_))
		));
	}
}
