mod btc;

// crates.io
use tokio::runtime::Runtime;
// self
use crate::{conf::Conf, gate::Console, prelude::*};

pub fn run() -> Result<()> {
	let p = Conf::default_path()?;
	let transfer = match Conf::load_from(&p).and_then(|c| btc::Transfer::try_from_conf(c, &p)) {
		Ok(t) => t,
		Err(e) => {
			tracing::error!(
				"an error occurred while parsing the configuration, \
				please check the {p:?}",
			);

			Err(e)?
		},
	};

	match Runtime::new()?.block_on(transfer.execute(&Console))? {
		btc::Outcome::Broadcast(res) => tracing::info!("transaction: {res}"),
		btc::Outcome::Declined => tracing::info!("broadcast cancelled, nothing was sent"),
	}

	Ok(())
}
