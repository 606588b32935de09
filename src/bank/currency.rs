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
use std::collections::HashMap;

/// Subunit factors for the pivot currency and everything the reference feed
/// has published, past and present. Zero-decimal currencies carry 1.
const DEFAULT_SUBUNITS: &[(&str, u32)] = &[
	("EUR", 100),
	("AUD", 100),
	("BGN", 100),
	("BRL", 100),
	("CAD", 100),
	("CHF", 100),
	("CNY", 100),
	("CZK", 100),
	("DKK", 100),
	("GBP", 100),
	("HKD", 100),
	("HRK", 100),
	("HUF", 100),
	("IDR", 100),
	("ILS", 100),
	("INR", 100),
	("ISK", 1),
	("JPY", 1),
	("KRW", 1),
	("LTL", 100),
	("LVL", 100),
	("MXN", 100),
	("MYR", 100),
	("NOK", 100),
	("NZD", 100),
	("PHP", 100),
	("PLN", 100),
	("RON", 100),
	("RUB", 100),
	("SEK", 100),
	("SGD", 100),
	("THB", 100),
	("TRY", 100),
	("USD", 100),
	("ZAR", 100),
];

/// Currency metadata consumed by the converter: how many minor units make
/// one major unit of each currency. The conversion core reads this but
/// does not own or validate it beyond lookup.
#[derive(Debug)]
pub struct CurrencyDirectory {
	subunits: HashMap<String, u32>,
}

impl CurrencyDirectory {
	pub fn new() -> Self {
		Self {
			subunits: DEFAULT_SUBUNITS
				.iter()
				.map(|(code, factor)| (code.to_string(), *factor))
				.collect(),
		}
	}

	/// Registers or overrides a subunit factor, e.g. 1000 for a
	/// three-decimal currency absent from the defaults.
	pub fn set(&mut self, code: &str, subunit_to_unit: u32) {
		self.subunits
			.insert(code.to_uppercase(), subunit_to_unit);
	}

	pub fn subunit_to_unit(&self, code: &str) -> Option<u32> {
		self.subunits.get(&code.to_uppercase()).copied()
	}

	/// Number of decimal places in the currency's natural rendering,
	/// derived from its subunit factor.
	pub fn decimal_places(&self, code: &str) -> Option<u32> {
		self.subunit_to_unit(code)
			.map(|factor| factor.max(1).ilog10())
	}
}

impl Default for CurrencyDirectory {
	fn default() -> Self {
		Self::new()
	}
}
