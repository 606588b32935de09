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
use crate::bank::error::RateError;
use crate::util::quant::Quant;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// The pivot currency. The feed publishes every rate against it, and every
/// other pair is derived through it.
pub const EUR: &str = "EUR";

/// Decimal places in every rate returned to callers.
pub const RATE_DECIMAL_PLACES: u32 = 4;

/// A single entry from the reference feed, as delivered by the parser: a
/// currency code and the feed's decimal string for units of that currency
/// per one EUR. Validation happens at ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateEntry {
	pub currency: String,
	pub rate: String,
}

impl RateEntry {
	pub fn new(currency: &str, rate: &str) -> Self {
		Self {
			currency: currency.to_string(),
			rate: rate.to_string(),
		}
	}
}

/// Outcome of one ingestion: how many entries landed, plus one warning per
/// entry that was skipped. The store never logs; the caller decides what
/// to do with these.
#[derive(Debug, Default)]
pub struct IngestReport {
	pub accepted: usize,
	pub warnings: Vec<RateError>,
}

/// The table of EUR-pivoted exchange rates and its feed metadata. Only
/// EUR→X entries are ever stored, unrounded as published; every other pair
/// is derived on demand through the pivot and never cached, so a re-ingest
/// can never leave a stale derived rate behind.
///
/// Ingestion takes `&mut self` and lookups take `&self`, so a holder of
/// the store gets writer exclusivity and consistent reads from the borrow
/// checker. Callers sharing a store across threads wrap it in the usual
/// lock and hold the write guard across the whole ingest call.
#[derive(Debug, Default)]
pub struct RateStore {
	rates: HashMap<String, Quant>,
	rates_updated_at: Option<DateTime<Utc>>,
	last_updated: Option<DateTime<Utc>>,
}

impl RateStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs a parsed feed into the table. Entries are applied in
	/// document order, so a repeated code keeps its last value. Entries
	/// that fail validation are skipped and reported; the rest of the
	/// feed still lands. There is no rollback: a partially processed
	/// feed yields a partially updated table.
	pub fn ingest(
		&mut self,
		entries: &[RateEntry],
		feed_time: DateTime<Utc>,
	) -> IngestReport {
		let mut report = IngestReport::default();

		for entry in entries {
			match validate(entry) {
				Ok((code, rate)) => {
					self.rates.insert(code, rate);
					report.accepted += 1;
				},
				Err(err) => report.warnings.push(err),
			}
		}

		// The pivot's own rate is fixed, whatever the feed said
		self.rates.insert(EUR.to_string(), Quant::one());

		self.rates_updated_at = Some(feed_time);
		self.last_updated = Some(Utc::now());

		report
	}

	/// Returns the rate R such that an amount in `from` times R is the
	/// equivalent amount in `to`, rounded to four decimal places, half
	/// away from zero.
	///
	/// A direct entry only ever exists with the pivot as base; any other
	/// pair divides the two unrounded pivot rates. Only the final value
	/// is rounded.
	pub fn rate(&self, from: &str, to: &str) -> Result<Quant, RateError> {
		let (from, to) = (from.to_uppercase(), to.to_uppercase());

		if from == EUR {
			return Ok(self.pivot_rate(&to)?.round_to(RATE_DECIMAL_PLACES));
		}

		let quote = self.pivot_rate(&to)?;
		let base = self.pivot_rate(&from)?;
		Ok((quote / base).round_to(RATE_DECIMAL_PLACES))
	}

	pub fn contains(&self, code: &str) -> bool {
		self.rates.contains_key(&code.to_uppercase())
	}

	/// All known currency codes, sorted, pivot included.
	pub fn currencies(&self) -> Vec<String> {
		let mut codes: Vec<String> = self.rates.keys().cloned().collect();
		codes.sort();
		codes
	}

	pub fn len(&self) -> usize {
		self.rates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rates.is_empty()
	}

	/// The feed's own "as of" time, from the last ingested document.
	pub fn rates_updated_at(&self) -> Option<DateTime<Utc>> {
		self.rates_updated_at
	}

	/// Wall-clock time the last ingestion completed.
	pub fn last_updated(&self) -> Option<DateTime<Utc>> {
		self.last_updated
	}

	fn pivot_rate(&self, code: &str) -> Result<Quant, RateError> {
		self.rates
			.get(code)
			.copied()
			.ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
	}
}

/// Checks one feed entry: a plausible currency code and a positive decimal
/// rate. Returns the normalized code and parsed rate.
fn validate(entry: &RateEntry) -> Result<(String, Quant), RateError> {
	let code = entry.currency.trim().to_uppercase();
	if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
		return Err(RateError::MalformedRate {
			currency: entry.currency.clone(),
			reason: "invalid currency code".to_string(),
		});
	}

	let rate = Quant::from_str(entry.rate.trim()).map_err(|err| {
		RateError::MalformedRate {
			currency: code.clone(),
			reason: err.to_string(),
		}
	})?;

	if !rate.is_positive() {
		return Err(RateError::MalformedRate {
			currency: code,
			reason: "rate must be positive".to_string(),
		});
	}

	Ok((code, rate))
}
