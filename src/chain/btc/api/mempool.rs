//! Rust bindings for the fee oracle and broadcast endpoints of a
//! [Mempool API](https://mempool.space/docs/api/rest) deployment.

// crates.io
use serde::{Deserialize, Serialize};
// self
use super::super::types::*;
use crate::{http::*, prelude::*};

#[derive(Debug)]
pub struct Api<H>
where
	H: Http,
{
	pub http: H,
	pub fees_uri: String,
	pub broadcast_uri: String,
}
impl<H> Api<H>
where
	H: Http,
{
	// Returns the currently suggested fee rates for new transactions.
	pub async fn get_recommended_fee(&self) -> Result<Fees> {
		let fees = self.http.get(self.fees_uri.as_str()).await?.json::<Fees>()?.validate()?;

		tracing::debug!("get_recommended_fee\n{fees:?}");

		Ok(fees)
	}

	// Broadcast a raw transaction to the network. The transaction should be provided as hex in the
	// request body. The relay answers with the `txid` on success and an error message otherwise,
	// both are handed back untouched.
	pub async fn broadcast<S>(&self, tx_hex: S) -> Result<String>
	where
		S: Into<String>,
	{
		let res = self.http.post(self.broadcast_uri.as_str(), tx_hex.into()).await?.text();

		tracing::debug!("broadcast\n{res}");

		Ok(res)
	}
}

#[cfg_attr(test, derive(PartialEq))]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
	pub economy_fee: Satoshi,
	pub fastest_fee: Satoshi,
	pub half_hour_fee: Satoshi,
	pub hour_fee: Satoshi,
	pub minimum_fee: Satoshi,
}
impl Fees {
	pub fn of(&self, strategy: FeeType) -> Satoshi {
		match strategy {
			FeeType::Economy => self.economy_fee,
			FeeType::Fastest => self.fastest_fee,
			FeeType::HalfHour => self.half_hour_fee,
			FeeType::Hour => self.hour_fee,
			FeeType::Minimum => self.minimum_fee,
		}
	}

	fn validate(self) -> Result<Self> {
		for (name, rate) in [
			("economyFee", self.economy_fee),
			("fastestFee", self.fastest_fee),
			("halfHourFee", self.half_hour_fee),
			("hourFee", self.hour_fee),
			("minimumFee", self.minimum_fee),
		] {
			if rate == 0 {
				Err(ApiError::UpstreamSchema {
					reason: format!("`{name}` must be positive"),
					body: format!("{self:?}"),
				})?;
			}
		}

		Ok(self)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeType {
	Economy,
	#[default]
	Fastest,
	HalfHour,
	Hour,
	Minimum,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::http::mock::MockHttp;

	const FEES_URI: &str = "https://fees.test/api/fees/recommended";
	const BROADCAST_URI: &str = "https://relay.test/api/tx";

	fn api(http: MockHttp) -> Api<MockHttp> {
		Api { http, fees_uri: FEES_URI.into(), broadcast_uri: BROADCAST_URI.into() }
	}

	#[tokio::test]
	async fn get_recommended_fee_should_work() {
		let api = api(MockHttp::default().with_get(
			FEES_URI,
			r#"{"fastestFee":12,"halfHourFee":9,"hourFee":7,"economyFee":3,"minimumFee":1}"#,
		));
		let fees = api.get_recommended_fee().await.unwrap();

		assert_eq!(
			fees,
			Fees { economy_fee: 3, fastest_fee: 12, half_hour_fee: 9, hour_fee: 7, minimum_fee: 1 }
		);
		assert_eq!(fees.of(FeeType::default()), 12);
		assert_eq!(fees.of(FeeType::HalfHour), 9);
		assert_eq!(fees.of(FeeType::Minimum), 1);
	}

	#[tokio::test]
	async fn get_recommended_fee_should_reject_malformed_payloads() {
		for body in [
			r#"{"fastestFee":12}"#,
			r#"{"fastestFee":0,"halfHourFee":9,"hourFee":7,"economyFee":3,"minimumFee":1}"#,
			r#"{"fastestFee":-1,"halfHourFee":9,"hourFee":7,"economyFee":3,"minimumFee":1}"#,
			"Too Many Requests",
		] {
			let api = api(MockHttp::default().with_get(FEES_URI, body));

			assert!(matches!(
				api.get_recommended_fee().await,
				Err(Error::Api(ApiError::UpstreamSchema { .. }))
			));
		}
	}

	#[tokio::test]
	async fn broadcast_should_return_the_relay_response_verbatim() {
		let api = api(
			MockHttp::default().with_post(BROADCAST_URI, "sendrawtransaction RPC error: min relay fee not met"),
		);

		assert_eq!(
			api.broadcast("0200").await.unwrap(),
			"sendrawtransaction RPC error: min relay fee not met"
		);
		assert_eq!(api.http.posted(), [(BROADCAST_URI.to_owned(), "0200".to_owned())]);
	}
}
