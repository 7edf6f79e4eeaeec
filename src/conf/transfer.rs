// crates.io
use serde::{Deserialize, Serialize};
// self
use crate::chain::btc::types::Payout;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Conf {
	#[serde(default)]
	pub payouts: Vec<Payout>,
}
