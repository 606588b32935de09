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
use crate::bank::store::RateEntry;
use crate::feed::error::FeedError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;

/// A reference feed document reduced to what ingestion needs: the rate
/// entries in document order (so a repeated code keeps its last value
/// downstream) and the feed's own "as of" time.
#[derive(Debug)]
pub struct ParsedFeed {
	pub entries: Vec<RateEntry>,
	pub feed_time: DateTime<Utc>,
}

/// Extracts rate entries and the feed timestamp from the daily reference
/// document. The document is a small fixed-shape XML envelope whose only
/// interesting elements are `<Cube currency='X' rate='N'/>` leaves and the
/// `<Cube time='...'>` wrapper around them.
pub struct Parser {
	cube_regex: Regex,
	time_regex: Regex,
}

impl Parser {
	pub fn new() -> Self {
		Self {
			cube_regex: Regex::new(
				r#"<Cube\s+currency=['"]([A-Za-z]{3})['"]\s+rate=['"]([^'"]*)['"]"#,
			)
			.unwrap(),
			time_regex: Regex::new(r#"<Cube\s+time=['"]([^'"]*)['"]"#).unwrap(),
		}
	}

	pub fn parse(&self, document: &str) -> Result<ParsedFeed, FeedError> {
		let entries: Vec<RateEntry> = self
			.cube_regex
			.captures_iter(document)
			.map(|cap| RateEntry::new(&cap[1], &cap[2]))
			.collect();

		if entries.is_empty() {
			return Err(FeedError::Malformed(
				"no rate entries found".to_string(),
			));
		}

		let time = self
			.time_regex
			.captures(document)
			.ok_or_else(|| {
				FeedError::Malformed("no feed timestamp found".to_string())
			})?[1]
			.to_string();

		Ok(ParsedFeed {
			entries,
			feed_time: parse_feed_time(&time)?,
		})
	}
}

impl Default for Parser {
	fn default() -> Self {
		Self::new()
	}
}

/// Parses the feed's timestamp. The daily document stamps a bare date,
/// which resolves to midnight UTC; a full RFC 3339 stamp is accepted too.
pub fn parse_feed_time(input: &str) -> Result<DateTime<Utc>, FeedError> {
	if let Ok(stamp) = DateTime::parse_from_rfc3339(input) {
		return Ok(stamp.with_timezone(&Utc));
	}

	let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|err| {
		FeedError::Malformed(format!("bad feed timestamp {:?}: {}", input, err))
	})?;

	Ok(date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
	<gesmes:subject>Reference rates</gesmes:subject>
	<gesmes:Sender>
		<gesmes:name>European Central Bank</gesmes:name>
	</gesmes:Sender>
	<Cube>
		<Cube time='2024-03-01'>
			<Cube currency='USD' rate='1.0812'/>
			<Cube currency='JPY' rate='162.49'/>
			<Cube currency='GBP' rate='0.85495'/>
		</Cube>
	</Cube>
</gesmes:Envelope>
"#;

	#[test]
	fn test_parses_entries_in_document_order() {
		let feed = Parser::new().parse(SAMPLE).unwrap();
		assert_eq!(
			feed.entries,
			vec![
				RateEntry::new("USD", "1.0812"),
				RateEntry::new("JPY", "162.49"),
				RateEntry::new("GBP", "0.85495"),
			]
		);
	}

	#[test]
	fn test_parses_feed_time() {
		let feed = Parser::new().parse(SAMPLE).unwrap();
		assert_eq!(
			feed.feed_time,
			Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
		);
	}

	#[test]
	fn test_keeps_duplicate_codes() {
		let document = SAMPLE
			.replace("currency='JPY'", "currency='USD'");
		let feed = Parser::new().parse(&document).unwrap();
		// both USD entries survive; the store applies them in order
		assert_eq!(feed.entries[0], RateEntry::new("USD", "1.0812"));
		assert_eq!(feed.entries[1], RateEntry::new("USD", "162.49"));
	}

	#[test]
	fn test_passes_malformed_rates_through() {
		// validation is the store's job, not the parser's
		let document = SAMPLE.replace("1.0812", "-5");
		let feed = Parser::new().parse(&document).unwrap();
		assert_eq!(feed.entries[0], RateEntry::new("USD", "-5"));
	}

	#[test]
	fn test_accepts_double_quoted_attributes() {
		let document = SAMPLE.replace('\'', "\"");
		let feed = Parser::new().parse(&document).unwrap();
		assert_eq!(feed.entries.len(), 3);
	}

	#[test]
	fn test_rejects_document_without_entries() {
		let result = Parser::new().parse("<html>not the feed</html>");
		assert!(matches!(result, Err(FeedError::Malformed(_))));
	}

	#[test]
	fn test_rejects_document_without_timestamp() {
		let document = SAMPLE.replace("time='2024-03-01'", "");
		let result = Parser::new().parse(&document);
		assert!(matches!(result, Err(FeedError::Malformed(_))));
	}

	#[test]
	fn test_feed_time_accepts_rfc3339() {
		let stamp = parse_feed_time("2024-03-01T15:00:00+01:00").unwrap();
		assert_eq!(
			stamp,
			Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap()
		);
	}

	#[test]
	fn test_feed_time_rejects_garbage() {
		assert!(matches!(
			parse_feed_time("yesterday"),
			Err(FeedError::Malformed(_))
		));
	}
}
