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
use crate::feed::error::FeedError;

pub struct Client {
	client: reqwest::blocking::Client,
}

impl Client {
	pub fn new() -> Self {
		Client {
			// the default blocking client carries a 30s timeout
			client: reqwest::blocking::Client::new(),
		}
	}

	/// Sends a GET and returns the response body as text. Errors on
	/// transport failure and on non-2xx response codes.
	pub fn get_text(&self, url: &str) -> Result<String, FeedError> {
		let response = self
			.client
			.get(url)
			.send()
			.map_err(|err| FeedError::Unavailable(err.to_string()))?;

		if !response.status().is_success() {
			return Err(FeedError::Unavailable(format!(
				"request failed with status: {}",
				response.status()
			)));
		}

		response
			.text()
			.map_err(|err| FeedError::Unavailable(err.to_string()))
	}
}

impl Default for Client {
	fn default() -> Self {
		Self::new()
	}
}
