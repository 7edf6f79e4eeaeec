// std
use std::str::FromStr;
// crates.io
use bitcoin::{OutPoint, Txid};
use serde::{Deserialize, Serialize};
// self
use crate::prelude::*;

pub type Satoshi = u64;
#[test]
fn max_btc_in_u64_should_work() {
	let max_u64 = Satoshi::MAX;
	let max_btc = 21_000_000_u64 * 100_000_000;

	assert!(max_u64 > max_btc);
}

pub type Index = u32;

#[cfg_attr(test, derive(PartialEq))]
#[derive(Clone, Debug)]
pub struct Utxo {
	pub outpoint: OutPoint,
	pub value: Satoshi,
}
#[cfg(test)]
impl Utxo {
	pub fn new(value: Satoshi) -> Self {
		Self::with_vout(value, 0)
	}

	pub fn with_vout(value: Satoshi, vout: Index) -> Self {
		// Distinct values give distinct txids, which keeps the outpoints unique in tests.
		let txid = Txid::from_str(&format!("{value:064x}")).unwrap();

		Self { outpoint: OutPoint { txid, vout }, value }
	}
}
impl TryFrom<super::api::unisat::Utxo> for Utxo {
	type Error = Error;

	fn try_from(value: super::api::unisat::Utxo) -> Result<Self> {
		let txid = Txid::from_str(&value.txid).map_err(|e| ApiError::UpstreamSchema {
			reason: format!("invalid txid: {e}"),
			body: value.txid.clone(),
		})?;

		Ok(Self { outpoint: OutPoint { txid, vout: value.vout }, value: value.satoshis })
	}
}

/// A destination and the amount, in whole coins, to send there.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payout {
	pub address: String,
	pub amount: f64,
}
