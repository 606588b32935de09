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
use crate::bank::currency::CurrencyDirectory;
use crate::bank::error::RateError;
use crate::bank::store::RateStore;
use crate::util::money::Money;
use crate::util::quant::Quant;

/// Converts minor-unit amounts between currencies using a rate store and
/// the subunit metadata of a currency directory, both borrowed from the
/// caller. Holds no state of its own.
pub struct Converter<'a> {
	store: &'a RateStore,
	currencies: &'a CurrencyDirectory,
}

impl<'a> Converter<'a> {
	pub fn new(
		store: &'a RateStore,
		currencies: &'a CurrencyDirectory,
	) -> Self {
		Self { store, currencies }
	}

	/// Converts an amount in the minor unit of `from` into the minor unit
	/// of `to`, rounding to the nearest whole minor unit, half away from
	/// zero. Round trips are bounded error, not exact.
	pub fn convert(
		&self,
		amount_minor: i64,
		from: &str,
		to: &str,
	) -> Result<i64, RateError> {
		let (from, to) = (from.to_uppercase(), to.to_uppercase());

		let rate = self.store.rate(&from, &to)?;
		let from_scale = self.subunit(&from)?;
		let to_scale = self.subunit(&to)?;

		let result = Quant::from_i128(amount_minor as i128)
			* Quant::from_frac(to_scale as i128, from_scale as i128)
			* rate;

		Ok(result.round_to_integer() as i64)
	}

	/// Money-in, money-out form of [`Self::convert`].
	pub fn exchange(
		&self,
		money: &Money,
		to: &str,
	) -> Result<Money, RateError> {
		let cents = self.convert(money.cents, &money.currency, to)?;
		Ok(Money::new(cents, to))
	}

	/// Renders a minor-unit amount in major units, with the currency's
	/// natural number of decimal places.
	pub fn format(&self, money: &Money) -> Result<String, RateError> {
		let scale = self.subunit(&money.currency)?;
		let places =
			self.currencies.decimal_places(&money.currency).unwrap_or(0);

		let major = Quant::from_frac(money.cents as i128, scale as i128);
		Ok(format!("{:.*} {}", places as usize, major, money.currency))
	}

	fn subunit(&self, code: &str) -> Result<u32, RateError> {
		self.currencies
			.subunit_to_unit(code)
			.ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::bank::store::RateEntry;
	use chrono::{TimeZone, Utc};

	fn standard_store() -> RateStore {
		let mut store = RateStore::new();
		store.ingest(
			&[
				RateEntry::new("USD", "1.0800"),
				RateEntry::new("JPY", "162.50"),
				RateEntry::new("GBP", "0.8500"),
				RateEntry::new("CHF", "0.9400"),
				RateEntry::new("ZZZ", "3.0"),
			],
			Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap(),
		);
		store
	}

	#[test]
	fn test_convert_between_two_decimal_currencies() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		// 100.00 USD at 1 / 1.08 (0.9259 after rounding)
		assert_eq!(converter.convert(10000, "USD", "EUR").unwrap(), 9259);
	}

	#[test]
	fn test_convert_to_zero_decimal_currency() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		// 100.00 EUR in whole yen
		assert_eq!(converter.convert(10000, "EUR", "JPY").unwrap(), 16250);
	}

	#[test]
	fn test_convert_from_zero_decimal_currency() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		// 16250 yen at the rounded JPY→USD rate of 0.0066
		assert_eq!(converter.convert(16250, "JPY", "USD").unwrap(), 10725);
	}

	#[test]
	fn test_convert_three_decimal_currency() {
		let mut store = standard_store();
		store.ingest(
			&[RateEntry::new("BHD", "0.42")],
			Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap(),
		);
		let mut currencies = CurrencyDirectory::new();
		currencies.set("BHD", 1000);
		let converter = Converter::new(&store, &currencies);

		// 1.00 EUR into mils
		assert_eq!(converter.convert(100, "EUR", "BHD").unwrap(), 420);
	}

	#[test]
	fn test_convert_negative_amount() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		assert_eq!(converter.convert(-10000, "USD", "EUR").unwrap(), -9259);
		assert_eq!(converter.convert(0, "USD", "EUR").unwrap(), 0);
	}

	#[test]
	fn test_round_trip_is_bounded_not_exact() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		for (from, to) in [("USD", "EUR"), ("GBP", "CHF"), ("CHF", "GBP")] {
			let there = converter.convert(10000, from, to).unwrap();
			let back = converter.convert(there, to, from).unwrap();
			assert!(
				(back - 10000).abs() <= 1,
				"{} -> {} -> {} came back as {}",
				from,
				to,
				from,
				back
			);
		}
	}

	#[test]
	fn test_unknown_rate_or_subunit() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		// no rate at all
		assert_eq!(
			converter.convert(100, "XXX", "EUR"),
			Err(RateError::UnknownCurrency("XXX".to_string()))
		);

		// rate present, but no subunit metadata
		assert_eq!(
			converter.convert(100, "ZZZ", "EUR"),
			Err(RateError::UnknownCurrency("ZZZ".to_string()))
		);
	}

	#[test]
	fn test_exchange_wraps_convert() {
		let store = standard_store();
		let currencies = CurrencyDirectory::new();
		let converter = Converter::new(&store, &currencies);

		let money = Money::new(10000, "USD");
		assert_eq!(
			converter.exchange(&money, "EUR").unwrap(),
			Money::new(9259, "EUR")
		);
	}

	#[test]
	fn test_format_in_major_units() {
		let store = standard_store();
		let mut currencies = CurrencyDirectory::new();
		currencies.set("BHD", 1000);
		let converter = Converter::new(&store, &currencies);

		assert_eq!(
			converter.format(&Money::new(9259, "EUR")).unwrap(),
			"92.59 EUR"
		);
		assert_eq!(
			converter.format(&Money::new(16250, "JPY")).unwrap(),
			"16250 JPY"
		);
		assert_eq!(
			converter.format(&Money::new(420, "BHD")).unwrap(),
			"0.420 BHD"
		);
	}
}
