pub mod api;
pub use api::*;

pub mod chain;
pub use chain::*;

pub mod service;
pub use service::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0}")]
	Eyre(String),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	Join(#[from] tokio::task::JoinError),

	#[error(transparent)]
	AppDirs2(#[from] app_dirs2::AppDirsError),
	#[error(transparent)]
	Bitcoin(#[from] BitcoinError),
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	Secp256k1(#[from] bitcoin::secp256k1::Error),
	#[error(transparent)]
	Toml(#[from] toml::de::Error),

	#[error(transparent)]
	Api(#[from] ApiError),
	#[error(transparent)]
	Chain(#[from] ChainError),
	#[error(transparent)]
	Service(#[from] ServiceError),
}

#[derive(Debug, thiserror::Error)]
pub enum BitcoinError {
	#[error(transparent)]
	ExtractTx(#[from] bitcoin::psbt::ExtractTxError),
	#[error(transparent)]
	FromWif(#[from] bitcoin::key::FromWifError),
	#[error(transparent)]
	Parse(#[from] bitcoin::address::ParseError),
	#[error(transparent)]
	Psbt(#[from] bitcoin::psbt::Error),
	#[error(transparent)]
	SigHashTapRoot(#[from] bitcoin::sighash::TaprootError),
}
