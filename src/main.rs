/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::bank::convert::Converter;
use crate::bank::currency::CurrencyDirectory;
use crate::bank::store::RateStore;
use crate::config::config_file::Config;
use crate::feed::ecb::EcbFeed;
use crate::reports::rate_reporter::RateReporter;
use crate::util::money::Money;
use crate::util::quant::Quant;
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use std::path::Path;

mod bank;
mod config;
mod feed;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "eurofx",
	version = "1.0",
	about = "Currency conversion against the ECB daily reference rates"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Arguments to the command: rate FROM TO, convert AMOUNT FROM TO,
	/// fetch [DEST]
	#[arg(required = false)]
	terms: Vec<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Read the feed from this file instead of the remote source
	#[arg(short)]
	file: Option<String>,

	/// Custom config file location (default: ~/.config/eurofx/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Never touch the network, even if the given feed file is unusable
	#[arg(long)]
	offline: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		match self.command {
			Directive::Rates => {
				if !self.terms.is_empty() {
					bail!("usage: eurofx rates");
				}
			},
			Directive::Rate => {
				if self.terms.len() != 2 {
					bail!("usage: eurofx rate FROM TO");
				}
			},
			Directive::Convert => {
				if self.terms.len() != 3 {
					bail!("usage: eurofx convert AMOUNT FROM TO");
				}
			},
			Directive::Fetch => {
				if self.terms.len() > 1 {
					bail!("usage: eurofx fetch [DEST]");
				}
			},
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Rates,   // table of all rates against the pivot
	Rate,    // single pair rate
	Convert, // convert an amount between currencies
	Fetch,   // download the feed into a local cache file
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	// The config is only consulted when the command line leaves a gap
	// for it to fill
	let config = if args.file.is_none() || args.command == Directive::Fetch {
		Config::load(args.config.as_ref())?
	} else {
		Config::default()
	};
	let feed_config = config.feed.unwrap_or_default();

	let ecb = match &feed_config.url {
		Some(url) => EcbFeed::with_url(url),
		None => EcbFeed::new(),
	};

	if args.command == Directive::Fetch {
		let dest = args
			.terms
			.first()
			.cloned()
			.or(feed_config.cache)
			.ok_or_else(|| {
				anyhow!("no destination; pass a path or set feed.cache in the config")
			})?;
		ecb.save(Path::new(&dest))?;
		println!("Saved rates to {}", dest);
		return Ok(());
	}

	let cache = args.file.clone().or(feed_config.cache);
	let parsed = ecb.load(cache.as_deref().map(Path::new), args.offline)?;

	let mut store = RateStore::new();
	let report = store.ingest(&parsed.entries, parsed.feed_time);
	for warning in &report.warnings {
		println!("warning: {}", warning);
	}

	let currencies = CurrencyDirectory::new();

	match args.command {
		Directive::Rates => RateReporter::new(&store).print_all_rates(),
		Directive::Rate => {
			let rate = store.rate(&args.terms[0], &args.terms[1])?;
			println!("{:.4}", rate);
		},
		Directive::Convert => {
			let converter = Converter::new(&store, &currencies);
			let money =
				major_amount(&args.terms[0], &args.terms[1], &currencies)?;
			let converted = converter.exchange(&money, &args.terms[2])?;
			println!("{}", converter.format(&converted)?);
		},
		Directive::Fetch => unreachable!(),
	}

	Ok(())
}

/// Parses a major-unit decimal amount, e.g. "100.00", into minor units of
/// its currency.
fn major_amount(
	amount: &str,
	currency: &str,
	currencies: &CurrencyDirectory,
) -> Result<Money, Error> {
	let code = currency.to_uppercase();
	let scale = currencies
		.subunit_to_unit(&code)
		.ok_or_else(|| anyhow!("unknown currency: {}", code))?;

	let value = Quant::from_str(amount)?;
	let minor = (value * Quant::from_i128(scale as i128)).round_to_integer();

	Ok(Money::new(minor as i64, &code))
}
