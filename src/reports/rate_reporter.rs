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
use crate::bank::store::{RateStore, EUR};
use crate::reports::table::Table;

/// Prints the table of rates against the pivot, one row per quoted
/// currency, plus the feed's own "as of" date.
pub struct RateReporter<'a> {
	store: &'a RateStore,
}

impl<'a> RateReporter<'a> {
	pub fn new(store: &'a RateStore) -> Self {
		Self { store }
	}

	pub fn print_all_rates(&self) {
		let mut table = Table::new(2);
		table.right_align(vec![1]);

		table.add_header(vec!["Currency", "Rate"]);
		table.add_separator();

		for code in self.store.currencies() {
			// the pivot's rate against itself is not worth a row
			if code == EUR {
				continue;
			}

			if let Ok(rate) = self.store.rate(EUR, &code) {
				let rendered = format!("{:.4}", rate);
				table.add_row(vec![code.as_str(), rendered.as_str()]);
			}
		}

		table.print();

		if let Some(stamp) = self.store.rates_updated_at() {
			println!("\nRates as of {}", stamp.format("%Y-%m-%d"));
		}
	}
}
