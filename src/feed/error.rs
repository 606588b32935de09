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
use thiserror::Error;

/// Failures at the feed boundary. None of these touch the rate table: when
/// the feed cannot be retrieved or read, ingestion simply never runs and
/// the last-known-good rates stay in effect.
#[derive(Debug, Error)]
pub enum FeedError {
	#[error("feed unavailable: {0}")]
	Unavailable(String),

	#[error("malformed feed: {0}")]
	Malformed(String),

	#[error("cache error: {0}")]
	Io(#[from] std::io::Error),
}
