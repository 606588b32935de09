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
use anyhow::{anyhow, Error};
use dirs::home_dir;
use serde::Deserialize;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub feed: Option<Feed>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Feed {
	/// Overrides the remote feed location
	pub url: Option<String>,

	/// Default location of the cached feed document, used when no feed
	/// file is given on the command line
	pub cache: Option<String>,
}

impl Config {
	/// Fetches the config from the given path, or the default path if
	/// none. An absent config at the default path is created empty.
	pub fn load(custom_config_path: Option<&String>) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => {
				let home_dir = home_dir().unwrap_or_else(|| {
					panic!("Unable to determine home directory")
				});
				home_dir.join(".config/eurofx/config.toml")
			},
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(config_path)?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_full_config() {
		let config: Config = toml::from_str(
			r#"
[feed]
url = "https://example.org/eurofxref-daily.xml"
cache = "/var/cache/eurofx/rates.xml"
"#,
		)
		.unwrap();

		let feed = config.feed.unwrap();
		assert_eq!(
			feed.url.as_deref(),
			Some("https://example.org/eurofxref-daily.xml")
		);
		assert_eq!(feed.cache.as_deref(), Some("/var/cache/eurofx/rates.xml"));
	}

	#[test]
	fn test_parse_empty_config() {
		let config: Config = toml::from_str("").unwrap();
		assert!(config.feed.is_none());
	}
}
