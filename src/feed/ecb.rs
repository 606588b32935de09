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
use crate::feed::client::Client;
use crate::feed::error::FeedError;
use crate::feed::parser::{ParsedFeed, Parser};
use std::fs;
use std::path::Path;

pub const ECB_RATES_URL: &str =
	"https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

/// Retrieves the daily reference document from the remote source or a
/// local cache of it. Resolution is an explicit two-stage chain: try the
/// given source first; if its content does not parse, fall back to the
/// canonical remote document. Offline mode never touches the network.
pub struct EcbFeed {
	http: Client,
	parser: Parser,
	url: String,
}

impl EcbFeed {
	pub fn new() -> Self {
		Self::with_url(ECB_RATES_URL)
	}

	pub fn with_url(url: &str) -> Self {
		Self {
			http: Client::new(),
			parser: Parser::new(),
			url: url.to_string(),
		}
	}

	/// Downloads the raw feed document.
	pub fn fetch(&self) -> Result<String, FeedError> {
		self.http.get_text(&self.url)
	}

	/// Downloads the feed and writes it to the given cache location.
	/// Refuses to cache a document that does not parse.
	pub fn save(&self, cache: &Path) -> Result<(), FeedError> {
		let document = self.fetch()?;
		self.parser.parse(&document)?;
		fs::write(cache, document)?;
		Ok(())
	}

	/// Resolves and parses the feed. With a cache path, reads that file
	/// first and falls back to the remote source only when the cached
	/// content is malformed; a missing or unreadable file is an error in
	/// its own right. Without a cache path, goes straight to the remote.
	pub fn load(
		&self,
		cache: Option<&Path>,
		offline: bool,
	) -> Result<ParsedFeed, FeedError> {
		match cache {
			Some(path) => match self.load_from_cache(path) {
				Err(FeedError::Malformed(_)) if !offline => {
					self.load_from_remote()
				},
				other => other,
			},
			None if offline => Err(FeedError::Unavailable(
				"offline, and no cached feed was given".to_string(),
			)),
			None => self.load_from_remote(),
		}
	}

	/// Parses feed content already in hand.
	pub fn parse_str(&self, content: &str) -> Result<ParsedFeed, FeedError> {
		self.parser.parse(content)
	}

	fn load_from_cache(&self, path: &Path) -> Result<ParsedFeed, FeedError> {
		let document = fs::read_to_string(path)?;
		self.parser.parse(&document)
	}

	fn load_from_remote(&self) -> Result<ParsedFeed, FeedError> {
		let document = self.fetch()?;
		self.parser.parse(&document)
	}
}

impl Default for EcbFeed {
	fn default() -> Self {
		Self::new()
	}
}
