// crates.io
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Conf {
	/// Bearer credential for the UTXO indexer.
	#[serde(default)]
	pub api_key: Option<String>,
	pub fees_uri: String,
	pub utxo_uri: String,
	pub broadcast_uri: String,
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
}

fn default_user_agent() -> String {
	"taproot-splitter".into()
}
