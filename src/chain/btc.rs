pub mod api;

pub mod types;
use types::*;

pub mod util;

// crates.io
use bitcoin::{
	blockdata::{
		locktime::absolute::LockTime,
		transaction::{Transaction, Version},
	},
	consensus,
	key::{Keypair, TapTweak},
	psbt::Psbt,
	secp256k1::{All, Message, Secp256k1},
	sighash::{Prevouts, SighashCache},
	taproot::Signature,
	Address, Amount, Network, NetworkKind, PrivateKey, ScriptBuf, TapSighashType, TxIn, TxOut,
	Txid, Witness, XOnlyPublicKey,
};
use once_cell::sync::Lazy;
// self
use crate::{chain::btc::api::mempool::Fees, conf::btc::FeeConf, prelude::*};

static SECP256K1: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Builds and signs a transaction paying every payout from the sender's Taproot address.
///
/// UTXOs are taken greedily in the order given, the fee is charged on a fixed size estimate and
/// whatever is left goes back to the sender as change.
#[derive(Debug)]
pub struct TransferBuilder<'a> {
	pub network: Network,
	pub fees: &'a Fees,
	pub fee_conf: &'a FeeConf,
	pub sender: &'a TaprootKey,
	pub payouts: &'a [Payout],
	pub utxos: &'a [Utxo],
}
impl TransferBuilder<'_> {
	const LOCK_TIME: LockTime = LockTime::ZERO;
	const VERSION: Version = Version::TWO;

	pub fn build(self) -> Result<SignedTransfer> {
		let Self { network, fees, fee_conf, sender, payouts, utxos } = self;

		if payouts.is_empty() {
			Err(ChainError::EmptyPayouts)?;
		}

		let mut output = payouts
			.iter()
			.map(|p| -> Result<TxOut> {
				let address = util::addr_from_str(&p.address, network)?;
				let value = util::btc_to_sat(p.amount).ok_or_else(|| {
					ChainError::InvalidAmount { address: p.address.clone(), amount: p.amount }
				})?;

				Ok(TxOut { script_pubkey: address.script_pubkey(), value: Amount::from_sat(value) })
			})
			.collect::<Result<Vec<_>>>()?;
		let payout_total = output.iter().zip(payouts).try_fold(0, |total: Satoshi, (o, p)| {
			total.checked_add(o.value.to_sat()).ok_or_else(|| ChainError::InvalidAmount {
				address: p.address.clone(),
				amount: p.amount,
			})
		})?;

		if utxos.is_empty() {
			Err(ChainError::NoUtxoSource { address: sender.address.clone() })?;
		}

		let fee_rate = fee_conf.rate(fees)?;

		tracing::info!("fee rate: {fee_rate}");

		let spendable = util::filter_dust(utxos);

		if spendable.is_empty() {
			let fee = fee_rate.saturating_mul(util::estimate_tx_size(payouts.len(), 1));

			Err(ChainError::InsufficientFunds {
				required: payout_total.saturating_add(fee),
				available: 0,
			})?;
		}

		let (input_value, selected) = util::select_utxos(&spendable, payout_total, payouts.len());
		let size = util::estimate_tx_size(payouts.len(), selected.len());
		let fee = fee_rate
			.checked_mul(size)
			.ok_or(ChainError::FeeOverflow { rate: fee_rate, factor: size })?;
		let spent = payout_total.saturating_add(fee);
		let change = input_value
			.checked_sub(spent)
			.ok_or(ChainError::InsufficientFunds { required: spent, available: input_value })?;

		tracing::info!("selected {} input(s) worth {input_value}", selected.len());

		if change != 0 {
			output.push(TxOut {
				script_pubkey: sender.script_public_key.clone(),
				value: Amount::from_sat(change),
			});
		}

		let input = selected
			.iter()
			.map(|u| TxIn { previous_output: u.outpoint, ..Default::default() })
			.collect::<Vec<_>>();
		let prevouts = selected
			.iter()
			.map(|u| TxOut {
				script_pubkey: sender.script_public_key.clone(),
				value: Amount::from_sat(u.value),
			})
			.collect::<Vec<_>>();
		let unsigned_tx =
			Transaction { version: Self::VERSION, lock_time: Self::LOCK_TIME, input, output };

		tracing::debug!("{unsigned_tx:?}");

		let mut psbt = Psbt::from_unsigned_tx(unsigned_tx).map_err(BitcoinError::Psbt)?;

		for (input, prevout) in psbt.inputs.iter_mut().zip(&prevouts) {
			input.witness_utxo = Some(prevout.clone());
			input.tap_internal_key = Some(sender.internal_key);
		}

		sign(&mut psbt, &prevouts, sender)?;
		finalize(&mut psbt)?;

		let tx = psbt.extract_tx().map_err(BitcoinError::ExtractTx)?;
		let txid = tx.compute_txid();
		let hex = array_bytes::bytes2hex("", consensus::serialize(&tx));

		tracing::info!("tx hex: {hex}");

		Ok(SignedTransfer {
			tx,
			txid,
			hex,
			inputs: selected.into_iter().cloned().collect(),
			fee,
			change,
		})
	}
}

// Every input belongs to the sender, so they are all key-path signed with the same tweaked key.
fn sign(psbt: &mut Psbt, prevouts: &[TxOut], sender: &TaprootKey) -> Result<()> {
	let sighash_type = TapSighashType::Default;
	let mut hasher = SighashCache::new(&psbt.unsigned_tx);

	for (i, input) in psbt.inputs.iter_mut().enumerate() {
		let sighash = hasher
			.taproot_key_spend_signature_hash(i, &Prevouts::All(prevouts), sighash_type)
			.map_err(BitcoinError::SigHashTapRoot)?;
		let msg = Message::from_digest_slice(sighash.as_ref())?;
		let signature = SECP256K1.sign_schnorr(&msg, &sender.keypair);

		input.tap_key_sig = Some(Signature { signature, sighash_type });
	}

	Ok(())
}

// Moves each key-path signature into the final witness and drops the fields a finalized input no
// longer carries.
fn finalize(psbt: &mut Psbt) -> Result<()> {
	for (i, input) in psbt.inputs.iter_mut().enumerate() {
		let sig = input.tap_key_sig.take().ok_or(ChainError::MissingSignature { index: i })?;

		input.final_script_witness = Some(Witness::p2tr_key_spend(&sig));
		input.sighash_type = None;
		input.tap_internal_key = None;
		input.tap_merkle_root = None;
		input.tap_key_origins.clear();
	}

	Ok(())
}

#[derive(Debug)]
pub struct SignedTransfer {
	pub tx: Transaction,
	pub txid: Txid,
	pub hex: String,
	pub inputs: Vec<Utxo>,
	pub fee: Satoshi,
	pub change: Satoshi,
}

#[derive(Debug)]
pub struct TaprootKey {
	/// Tweaked keypair, the one that signs key-path spends.
	pub keypair: Keypair,
	pub internal_key: XOnlyPublicKey,
	pub script_public_key: ScriptBuf,
	pub address: String,
}
impl TaprootKey {
	pub fn from_untweaked_keypair(keypair: Keypair, network: Network) -> Self {
		let (internal_key, _) = keypair.x_only_public_key();
		let address = Address::p2tr(&SECP256K1, internal_key, None, network);
		let keypair = keypair.tap_tweak(&SECP256K1, None).to_inner();
		let script_public_key = address.script_pubkey();

		Self { keypair, internal_key, script_public_key, address: address.to_string() }
	}

	/// Accepts a WIF key, or a 32-byte hex secret with an optional `0x` prefix.
	pub fn from_secret_str(s: &str, network: Network) -> Result<Self> {
		let s = s.trim();
		let hex = s.trim_start_matches("0x");
		let keypair = if hex.len() == 64 {
			Keypair::from_seckey_str(&SECP256K1, hex)?
		} else {
			let key = PrivateKey::from_wif(s).map_err(BitcoinError::FromWif)?;

			if key.network != NetworkKind::from(network) {
				Err(ChainError::NetworkMismatch { key: key.network, network })?;
			}

			Keypair::from_secret_key(&SECP256K1, &key.inner)
		};

		Ok(Self::from_untweaked_keypair(keypair, network))
	}
}
