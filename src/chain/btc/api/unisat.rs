//! Rust bindings for the address UTXO endpoint of the UniSat wallet API.

// crates.io
use serde::Deserialize;
// self
use super::super::types::*;
use crate::{http::*, prelude::*};

#[derive(Debug)]
pub struct Api<H>
where
	H: Http,
{
	pub http: H,
	pub utxo_uri: String,
}
impl<H> Api<H>
where
	H: Http,
{
	// Get the list of unspent transaction outputs owned by the address.
	pub async fn get_utxos<S>(&self, address: S) -> Result<Vec<Utxo>>
	where
		S: AsRef<str>,
	{
		let res = self
			.http
			.get(format!("{}?address={}", self.utxo_uri, address.as_ref()))
			.await?
			.json::<Envelope<Vec<Utxo>>>()?;

		if res.code != 0 {
			Err(ApiError::Upstream { code: res.code, msg: res.msg.clone() })?;
		}

		let utxos = res.data.ok_or_else(|| ApiError::UpstreamSchema {
			reason: "missing `data`".into(),
			body: res.msg,
		})?;

		tracing::debug!("get_utxos\n{utxos:?}");

		Ok(utxos)
	}
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
	pub code: i64,
	#[serde(default)]
	pub msg: String,
	pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct Utxo {
	pub txid: String,
	pub vout: Index,
	pub satoshis: Satoshi,
	// #[serde(rename = "scriptPk")]
	// pub script_pk: String,
	// #[serde(rename = "addressType")]
	// pub address_type: u32,
	// pub inscriptions: Vec<Inscription>,
	// pub atomicals: Vec<String>,
	// pub runes: Vec<String>,
	// pub pubkey: String,
	// pub height: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::http::mock::MockHttp;

	const UTXO_URI: &str = "https://indexer.test/v5/address/btc-utxo";
	const ADDRESS: &str = "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297";

	fn api(body: &str) -> Api<MockHttp> {
		Api {
			http: MockHttp::default().with_get(&format!("{UTXO_URI}?address={ADDRESS}"), body),
			utxo_uri: UTXO_URI.into(),
		}
	}

	#[tokio::test]
	async fn get_utxos_should_work() {
		let api = api(
			r#"{
				"code": 0,
				"msg": "ok",
				"data": [{
					"txid": "1111111111111111111111111111111111111111111111111111111111111111",
					"vout": 1,
					"satoshis": 100000,
					"scriptPk": "5120a3",
					"addressType": 2,
					"inscriptions": [],
					"runes": [],
					"atomicals": [],
					"pubkey": "",
					"height": 840000
				}]
			}"#,
		);
		let utxos = api.get_utxos(ADDRESS).await.unwrap();

		assert_eq!(utxos.len(), 1);
		assert_eq!(utxos[0].vout, 1);
		assert_eq!(utxos[0].satoshis, 100_000);

		let utxo = crate::chain::btc::types::Utxo::try_from(utxos.into_iter().next().unwrap())
			.unwrap();

		assert_eq!(utxo.value, 100_000);
		assert_eq!(utxo.outpoint.vout, 1);
	}

	#[tokio::test]
	async fn get_utxos_should_surface_upstream_errors() {
		assert!(matches!(
			api(r#"{"code":-1,"msg":"invalid api key","data":null}"#).get_utxos(ADDRESS).await,
			Err(Error::Api(ApiError::Upstream { code: -1, .. }))
		));
		assert!(matches!(
			api(r#"{"code":0,"msg":"ok"}"#).get_utxos(ADDRESS).await,
			Err(Error::Api(ApiError::UpstreamSchema { .. }))
		));
		assert!(matches!(
			api(r#"{"code":0,"msg":"ok","data":[{"txid":"00","vout":0}]}"#)
				.get_utxos(ADDRESS)
				.await,
			Err(Error::Api(ApiError::UpstreamSchema { .. }))
		));
	}

	#[tokio::test]
	async fn bad_txid_should_be_a_schema_error() {
		let utxos = api(r#"{"code":0,"msg":"ok","data":[{"txid":"zz","vout":0,"satoshis":1000}]}"#)
			.get_utxos(ADDRESS)
			.await
			.unwrap();

		assert!(matches!(
			crate::chain::btc::types::Utxo::try_from(utxos.into_iter().next().unwrap()),
			Err(Error::Api(ApiError::UpstreamSchema { .. }))
		));
	}
}
