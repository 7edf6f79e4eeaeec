// self
use crate::chain::btc::types::Satoshi;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	#[error("[chain] no payouts were given")]
	EmptyPayouts,
	#[error("[chain] fee overflows, rate {rate} with {factor}")]
	FeeOverflow { rate: Satoshi, factor: Satoshi },
	#[error("[chain] insufficient funds: required {required}, available {available}")]
	InsufficientFunds { required: Satoshi, available: Satoshi },
	#[error("[chain] invalid payout amount {amount} for {address}")]
	InvalidAmount { address: String, amount: f64 },
	#[error("[chain] input {index} is missing its signature")]
	MissingSignature { index: usize },
	#[error("[chain] key belongs to {key:?} but the target network is {network}")]
	NetworkMismatch { key: bitcoin::NetworkKind, network: bitcoin::Network },
	#[error("[chain] no UTXO found for {address}")]
	NoUtxoSource { address: String },
}
