//! Taproot Splitter
//!
//! Splits the funds of a single-key Taproot wallet across several recipients and, once the
//! operator confirms, broadcasts the signed transaction.

#![deny(
	// clippy::all,
	missing_docs,
	unused_crate_dependencies,
	// warnings,
)]

mod chain;
mod conf;
mod error;
mod gate;
mod http;
mod service;

mod prelude {
	pub use crate::error::*;

	pub type Result<T> = std::result::Result<T, Error>;
}

fn main() -> prelude::Result<()> {
	color_eyre::install().map_err(|e| prelude::Error::Eyre(e.to_string()))?;
	tracing_subscriber::fmt::init();

	service::run()
}
