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

/// Standard table printer for reports that emit a potentially large number
/// of single-line objects. Lines never carry trailing whitespace.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows
			.push(Row::Data(row.into_iter().map(|s| s.to_string()).collect()));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn print(&self) {
		println!();
		for line in self.render() {
			println!("{}", line);
		}
	}

	/// Renders the table into its output lines.
	fn render(&self) -> Vec<String> {
		let mut max_widths = vec![0; self.column_count];

		// Calculate maximum column widths for proper spacing
		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate() {
					max_widths[i] = max_widths[i].max(value.len());
				}
			}
		}

		self.rows
			.iter()
			.map(|row| {
				let line = match row {
					Row::Header(cells) => {
						self.render_centered(&max_widths, cells, " | ")
					},
					Row::Data(cells) => {
						self.render_data(&max_widths, cells, "   ")
					},
					Row::Separator => {
						let total_width = max_widths.iter().sum::<usize>()
							+ 3 * (self.column_count - 1);
						"-".repeat(total_width)
					},
				};
				line.trim_end().to_string()
			})
			.collect()
	}

	fn render_data(
		&self,
		max_widths: &[usize],
		cells: &[String],
		separator: &str,
	) -> String {
		let mut out = String::new();
		for (i, value) in cells.iter().enumerate() {
			if self.right_align[i] {
				out.push_str(&format!(
					"{:>width$}",
					value,
					width = max_widths[i]
				));
			} else {
				out.push_str(&format!(
					"{:<width$}",
					value,
					width = max_widths[i]
				));
			}
			if i < cells.len() - 1 {
				out.push_str(separator);
			}
		}
		out
	}

	fn render_centered(
		&self,
		max_widths: &[usize],
		cells: &[String],
		separator: &str,
	) -> String {
		let mut out = String::new();
		for (i, value) in cells.iter().enumerate() {
			out.push_str(&Table::center_align(value, max_widths[i]));
			if i < cells.len() - 1 {
				out.push_str(separator);
			}
		}
		out
	}

	fn center_align(value: &str, width: usize) -> String {
		if value.len() >= width {
			return value.to_string();
		}
		let total_padding = width - value.len();
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_aligns_columns() {
		let mut table = Table::new(2);
		table.right_align(vec![1]);
		table.add_header(vec!["Currency", "Rate"]);
		table.add_separator();
		table.add_row(vec!["USD", "1.0800"]);
		table.add_row(vec!["KRW", "1462.5000"]);

		assert_eq!(
			table.render(),
			vec![
				"Currency |   Rate",
				"--------------------",
				"USD           1.0800",
				"KRW        1462.5000",
			]
		);
	}

	#[test]
	fn test_no_trailing_whitespace() {
		let mut table = Table::new(2);
		table.add_header(vec!["A", "Bee"]);
		table.add_row(vec!["x", "y"]);

		for line in table.render() {
			assert_eq!(line, line.trim_end());
		}
	}
}
