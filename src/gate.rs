// std
use std::io::{self, BufRead, Write};
// crates.io
use tokio::task;
// self
use crate::prelude::*;

const PROMPT: &str = "Broadcast this transaction? It can not be taken back once broadcast. \
	Enter 'y' or 'Y' to confirm, anything else cancels: ";

/// Operator approval in front of the broadcast.
pub trait Gate {
	async fn confirm(&self, tx_hex: &str) -> Result<bool>;
}

/// Blocks on stdin for the answer.
#[derive(Debug)]
pub struct Console;
impl Gate for Console {
	async fn confirm(&self, tx_hex: &str) -> Result<bool> {
		let tx_hex = tx_hex.to_owned();

		// The read blocks until the operator answers, keep it off the async workers.
		task::spawn_blocking(move || ask(io::stdin().lock(), io::stdout().lock(), &tx_hex)).await?
	}
}

pub fn ask<R, W>(mut reader: R, mut writer: W, tx_hex: &str) -> Result<bool>
where
	R: BufRead,
	W: Write,
{
	writeln!(writer, "{tx_hex}")?;
	write!(writer, "\x1b[33m{PROMPT}\x1b[39m")?;
	writer.flush()?;

	let mut answer = String::new();

	reader.read_line(&mut answer)?;

	Ok(matches!(answer.trim_end_matches(['\r', '\n']), "y" | "Y"))
}
#[test]
fn ask_should_work() {
	[
		("y\n", true),
		("Y\n", true),
		("y\r\n", true),
		("y", true),
		("yes\n", false),
		(" y\n", false),
		("n\n", false),
		("\n", false),
		("", false),
	]
	.iter()
	.for_each(|&(input, expected)| {
		let mut output = Vec::new();

		assert_eq!(ask(input.as_bytes(), &mut output, "0200").unwrap(), expected, "{input:?}");

		let output = String::from_utf8(output).unwrap();

		assert!(output.starts_with("0200\n"));
		assert!(output.contains(PROMPT));
	});
}
