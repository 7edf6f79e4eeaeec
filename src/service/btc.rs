// std
use std::path::Path;
// crates.io
use bitcoin::Network;
// self
use crate::{
	chain::btc::{
		api::{mempool, unisat},
		types::*,
		*,
	},
	conf::{btc::FeeConf, Conf},
	gate::Gate,
	http::{Client, Http},
	prelude::*,
};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Outcome {
	/// Relay response, a txid on success or the rejection reason otherwise.
	Broadcast(String),
	Declined,
}

#[derive(Debug)]
pub(super) struct Transfer<H>
where
	H: Http,
{
	fee_api: mempool::Api<H>,
	utxo_api: unisat::Api<H>,
	fee_conf: FeeConf,
	key: TaprootKey,
	network: Network,
	payouts: Vec<Payout>,
}
impl Transfer<Client> {
	pub(super) fn try_from_conf(conf: Conf, path: &Path) -> Result<Self> {
		let Conf { api, btc, transfer } = conf;

		if transfer.payouts.is_empty() {
			Err(ServiceError::NoPayouts { path: path.display().to_string() })?;
		}
		if api.api_key.is_none() {
			tracing::warn!("no api key configured, the UTXO indexer will be queried anonymously");
		}

		let fee_api = mempool::Api {
			http: Client::new(&api.user_agent, None)?,
			fees_uri: api.fees_uri,
			broadcast_uri: api.broadcast_uri,
		};
		let utxo_api = unisat::Api {
			http: Client::new(&api.user_agent, api.api_key)?,
			utxo_uri: api.utxo_uri,
		};
		let key = TaprootKey::from_secret_str(&btc.secret_key, btc.network)?;

		Ok(Self {
			fee_api,
			utxo_api,
			fee_conf: btc.fee_conf,
			key,
			network: btc.network,
			payouts: transfer.payouts,
		})
	}
}
impl<H> Transfer<H>
where
	H: Http,
{
	pub(super) async fn prepare(&self) -> Result<SignedTransfer> {
		let Transfer { fee_api, utxo_api, fee_conf, key, network, payouts } = self;
		let fees = fee_api.get_recommended_fee().await?;

		tracing::info!(
			"recommended fees: economy {}, fastest {}, half hour {}, hour {}, minimum {}",
			fees.economy_fee,
			fees.fastest_fee,
			fees.half_hour_fee,
			fees.hour_fee,
			fees.minimum_fee,
		);
		tracing::info!("sender: {}", key.address);

		let utxos = utxo_api
			.get_utxos(&key.address)
			.await?
			.into_iter()
			.map(TryInto::try_into)
			.collect::<Result<Vec<Utxo>>>()?;

		TransferBuilder {
			network: *network,
			fees: &fees,
			fee_conf,
			sender: key,
			payouts,
			utxos: &utxos,
		}
		.build()
	}

	pub(super) async fn execute<G>(&self, gate: &G) -> Result<Outcome>
	where
		G: Gate,
	{
		let signed = self.prepare().await?;

		tracing::info!(
			"built {} with {} input(s) and {} output(s), fee {}, change {}",
			signed.txid,
			signed.inputs.len(),
			signed.tx.output.len(),
			signed.fee,
			signed.change,
		);

		if !gate.confirm(&signed.hex).await? {
			return Ok(Outcome::Declined);
		}

		Ok(Outcome::Broadcast(self.fee_api.broadcast(signed.hex).await?))
	}
}
