// crates.io
use bitcoin::{address::NetworkUnchecked, Address, Amount, Network};
// self
use super::types::*;
use crate::prelude::*;

/// Outputs at or below this value cost more to spend than they are worth.
pub const DUST_THRESHOLD: Satoshi = 546;

const TX_OVERHEAD_SIZE: Satoshi = 10;
const OUTPUT_SIZE: Satoshi = 43;
const INPUT_SIZE: Satoshi = 148;

pub fn addr_from_str(s: &str, network: Network) -> Result<Address> {
	Ok(s.parse::<Address<NetworkUnchecked>>()
		.map_err(BitcoinError::Parse)?
		.require_network(network)
		.map_err(BitcoinError::Parse)?)
}

// Whole coins to satoshis. Zero, negative and sub-satoshi amounts are rejected instead of rounded.
pub fn btc_to_sat(amount: f64) -> Option<Satoshi> {
	Amount::from_btc(amount).ok().map(Amount::to_sat).filter(|&s| s != 0)
}
#[test]
fn btc_to_sat_should_work() {
	assert_eq!(btc_to_sat(0.0005), Some(50_000));
	assert_eq!(btc_to_sat(1.5), Some(150_000_000));
	assert_eq!(btc_to_sat(0.00000001), Some(1));
	assert_eq!(btc_to_sat(0.000000015), None);
	assert_eq!(btc_to_sat(0.), None);
	assert_eq!(btc_to_sat(-1.), None);
	assert_eq!(btc_to_sat(f64::INFINITY), None);
}

pub fn filter_dust(utxos: &[Utxo]) -> Vec<&Utxo> {
	utxos.iter().filter(|u| u.value > DUST_THRESHOLD).collect()
}
#[test]
fn filter_dust_should_work() {
	let utxos = vec![Utxo::new(1), Utxo::new(546), Utxo::new(547), Utxo::new(100_000)];

	assert_eq!(filter_dust(&utxos), [&utxos[2], &utxos[3]]);
	assert!(filter_dust(&[]).is_empty());
}

// One output per payout plus a possible change output, on top of the fixed overhead.
pub fn estimate_tx_size(payout_count: usize, input_count: usize) -> Satoshi {
	TX_OVERHEAD_SIZE
		+ (payout_count as Satoshi + 1) * OUTPUT_SIZE
		+ input_count as Satoshi * INPUT_SIZE
}
#[test]
fn estimate_tx_size_should_work() {
	assert_eq!(estimate_tx_size(1, 0), 96);
	assert_eq!(estimate_tx_size(1, 1), 244);
	assert_eq!(estimate_tx_size(3, 2), 10 + 4 * 43 + 2 * 148);
}

// Single forward pass in the given order. A UTXO is taken while the running total is still
// below `target` plus the size estimate for the inputs taken so far.
pub fn select_utxos<'a>(
	utxos: &[&'a Utxo],
	target: Satoshi,
	payout_count: usize,
) -> (Satoshi, Vec<&'a Utxo>) {
	let mut total = 0;
	let mut selected = Vec::new();

	for &utxo in utxos {
		if total >= target.saturating_add(estimate_tx_size(payout_count, selected.len())) {
			break;
		}

		total = total.saturating_add(utxo.value);
		selected.push(utxo);
	}

	(total, selected)
}
#[test]
fn select_utxos_should_work() {
	let utxos = vec![Utxo::new(1_000), Utxo::new(2_000), Utxo::new(3_000), Utxo::new(9_000)];
	let refs = utxos.iter().collect::<Vec<_>>();

	// 1_000 < 500 + 96 is false after the first input, so one is enough.
	let (total, selected) = select_utxos(&refs, 500, 1);
	assert_eq!(total, 1_000);
	assert_eq!(selected, [&utxos[0]]);

	// Needs 2_500 + 96 + 148 * n; taken strictly in the given order.
	let (total, selected) = select_utxos(&refs, 2_500, 1);
	assert_eq!(total, 3_000);
	assert_eq!(selected, [&utxos[0], &utxos[1]]);

	// Never sorts, the large UTXO is only reached last.
	let (total, selected) = select_utxos(&refs, 7_000, 1);
	assert_eq!(total, 15_000);
	assert_eq!(selected, [&utxos[0], &utxos[1], &utxos[2], &utxos[3]]);

	// Exhausting the set returns everything; the caller decides whether it is enough.
	let (total, selected) = select_utxos(&refs, 100_000, 1);
	assert_eq!(total, 15_000);
	assert_eq!(selected.len(), 4);

	let (total, selected) = select_utxos(&[], 1, 1);
	assert_eq!(total, 0);
	assert!(selected.is_empty());
}
#[test]
fn select_utxos_should_stop_at_the_threshold() {
	// With one input taken the threshold is 756 + 244, which the first UTXO reaches exactly.
	let utxos = vec![Utxo::new(1_000), Utxo::new(5_000)];
	let refs = utxos.iter().collect::<Vec<_>>();
	let (total, selected) = select_utxos(&refs, 756, 1);

	assert_eq!(total, 1_000);
	assert_eq!(selected, [&utxos[0]]);

	// One satoshi more and the second UTXO is needed.
	let (total, selected) = select_utxos(&refs, 757, 1);

	assert_eq!(total, 6_000);
	assert_eq!(selected, [&utxos[0], &utxos[1]]);
}
#[test]
fn select_utxos_should_saturate_instead_of_overflowing() {
	let utxos = vec![Utxo::new(Satoshi::MAX), Utxo::with_vout(1, 1)];
	let refs = utxos.iter().collect::<Vec<_>>();
	let (total, selected) = select_utxos(&refs, Satoshi::MAX, 1);

	assert_eq!(total, Satoshi::MAX);
	assert_eq!(selected.len(), 2);
}
