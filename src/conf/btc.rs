// crates.io
use bitcoin::Network;
use serde::{Deserialize, Serialize};
// self
use crate::{
	chain::btc::{api::mempool::*, types::*},
	prelude::*,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Conf {
	#[serde(default)]
	pub fee_conf: FeeConf,
	pub network: Network,
	pub secret_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FeeConf {
	pub extra: Satoshi,
	pub force: Option<Satoshi>,
	pub strategy: FeeType,
}
impl FeeConf {
	pub fn rate(&self, fees: &Fees) -> Result<Satoshi> {
		if let Some(r) = self.force {
			return Ok(r);
		}

		let base = fees.of(self.strategy);

		Ok(base
			.checked_add(self.extra)
			.ok_or(ChainError::FeeOverflow { rate: base, factor: self.extra })?)
	}
}
