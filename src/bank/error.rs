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

/// Errors surfaced by the rate store and converter. Malformed entries are
/// collected during ingestion rather than aborting it; unknown currencies
/// are fatal to the single lookup that named them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RateError {
	#[error("malformed rate for {currency}: {reason}")]
	MalformedRate { currency: String, reason: String },

	#[error("unknown currency: {0}")]
	UnknownCurrency(String),
}
