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
use anyhow::{bail, Error};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An exact rational number backed by a fraction of u128s. Exchange rates
/// and minor-unit amounts both fit comfortably in that format, which means
/// triangulated rates are always derived from unrounded inputs; rounding
/// happens once, on the final value, half away from zero.
///
/// Automatically simplifies its underlying fractional representation.
#[derive(Clone, Copy, Debug)]
pub struct Quant {
	numerator: u128,
	denominator: u128,

	/// Is always false if the numerator is zero, else is intuitive.
	is_negative: bool,
}

impl Quant {
	/// Cap on digits emitted when no display precision is requested, so
	/// nonterminating fractions cannot spin the formatter.
	const MAX_DISPLAY_DIGITS: u32 = 12;

	pub fn zero() -> Self {
		Self {
			numerator: 0,
			denominator: 1,
			is_negative: false,
		}
	}

	pub fn one() -> Self {
		Self::from_i128(1)
	}

	pub fn from_i128(amount: i128) -> Self {
		Self {
			numerator: amount.unsigned_abs(),
			denominator: 1,
			is_negative: amount < 0,
		}
	}

	pub fn from_frac(numerator: i128, denominator: i128) -> Self {
		if denominator == 0 {
			panic!("Denominator cannot be zero");
		}

		let mut out = Self {
			numerator: numerator.unsigned_abs(),
			denominator: denominator.unsigned_abs(),
			is_negative: (numerator < 0) ^ (denominator < 0),
		};
		if out.numerator == 0 {
			out.is_negative = false;
		}

		out.reduce();
		out
	}

	/// Parses a plain decimal string, e.g. "1.0812" or "-5".
	pub fn from_str(input: &str) -> Result<Self, Error> {
		let is_negative = input.starts_with('-');
		let sanitized = input.trim_start_matches('-');

		let parts: Vec<&str> = sanitized.split('.').collect();

		let (numerator, denominator) = match parts.len() {
			1 => (parts[0].parse::<u128>()?, 1),
			2 => {
				let whole = parts[0].parse::<u128>()?;
				let decimal = parts[1];
				let scale = 10u128.pow(decimal.len() as u32);
				let fractional = decimal.parse::<u128>()?;
				(whole * scale + fractional, scale)
			},
			_ => bail!("Invalid decimal format"),
		};

		let mut out = Self {
			numerator,
			denominator,
			is_negative: is_negative && numerator > 0,
		};
		out.reduce();
		Ok(out)
	}

	pub fn is_positive(&self) -> bool {
		self.numerator > 0 && !self.is_negative
	}

	pub fn abs(&self) -> Self {
		Self {
			is_negative: false,
			..*self
		}
	}

	/// Returns this value rounded to the given number of decimal places,
	/// rounding halves away from zero.
	pub fn round_to(&self, decimal_places: u32) -> Self {
		let scale = 10u128.pow(decimal_places);
		let scaled = self.numerator * scale;
		let quotient = scaled / self.denominator;
		let remainder = scaled % self.denominator;

		let rounded = if remainder * 2 >= self.denominator {
			quotient + 1
		} else {
			quotient
		};

		let mut out = Self {
			numerator: rounded,
			denominator: scale,
			is_negative: self.is_negative && rounded > 0,
		};
		out.reduce();
		out
	}

	/// Rounds to the nearest whole number, halves away from zero.
	pub fn round_to_integer(&self) -> i128 {
		let rounded = self.round_to(0);
		let magnitude = rounded.numerator as i128;
		if rounded.is_negative {
			-magnitude
		} else {
			magnitude
		}
	}

	/// Takes the reciprocal in like terms if possible, else
	/// divides 1 by self.
	pub fn recip(&self) -> Self {
		if self.numerator == 0 {
			Quant::one() / *self
		} else {
			Self {
				numerator: self.denominator,
				denominator: self.numerator,
				..*self
			}
		}
	}

	/// Reduces the underlying fraction as much as possible while still
	/// representing the same value. Called after every operation that
	/// affects the fraction, to guard against overflow.
	fn reduce(&mut self) {
		let gcd = Self::gcd(self.numerator, self.denominator);
		self.numerator /= gcd;
		self.denominator /= gcd;
	}

	/// Implementation of Euclid's algorithm for greatest common divisor
	fn gcd(mut a: u128, mut b: u128) -> u128 {
		while b != 0 {
			let temp = b;
			b = a % b;
			a = temp;
		}
		a
	}
}

impl fmt::Display for Quant {
	/// Renders as a plain decimal. An explicit precision ("{:.4}") emits
	/// exactly that many fractional digits; digits beyond it are truncated,
	/// so values should be rounded before display.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let integer_part = self.numerator / self.denominator;
		let mut remainder = self.numerator % self.denominator;

		let digits = match f.precision() {
			Some(precision) => precision as u32,
			None => Self::MAX_DISPLAY_DIGITS,
		};

		let mut fraction_str = String::new();
		for _ in 0..digits {
			if f.precision().is_none() && remainder == 0 {
				break;
			}
			remainder *= 10;
			let digit = remainder / self.denominator;
			remainder %= self.denominator;
			fraction_str.push(char::from_digit(digit as u32, 10).unwrap());
		}

		let formatted = if fraction_str.is_empty() {
			integer_part.to_string()
		} else {
			format!("{}.{}", integer_part, fraction_str)
		};

		if self.is_negative {
			write!(f, "-{}", formatted)
		} else {
			write!(f, "{}", formatted)
		}
	}
}

// -----------------
// -- BOILERPLATE --
// -----------------

impl Add for Quant {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		if self.numerator == 0 {
			return rhs;
		}
		if rhs.numerator == 0 {
			return self;
		}

		let gcd = Self::gcd(self.denominator, rhs.denominator);
		let lcm = self.denominator / gcd * rhs.denominator;

		let term_a = self.numerator * (lcm / self.denominator);
		let term_b = rhs.numerator * (lcm / rhs.denominator);

		let (numerator, result_is_negative) =
			match (self.is_negative, rhs.is_negative) {
				(true, true) => (term_a + term_b, true),
				(false, false) => (term_a + term_b, false),
				(true, false) => {
					if term_a > term_b {
						(term_a - term_b, true)
					} else {
						(term_b - term_a, false)
					}
				},
				(false, true) => {
					if term_a > term_b {
						(term_a - term_b, false)
					} else {
						(term_b - term_a, true)
					}
				},
			};

		let mut out = Self {
			numerator,
			denominator: lcm,
			is_negative: result_is_negative && numerator > 0,
		};
		out.reduce();
		out
	}
}

impl Sub for Quant {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		self + (-rhs)
	}
}

impl Mul for Quant {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self::Output {
		// cross-reduce first to limit overflow
		let gcd_a = Self::gcd(self.numerator, rhs.denominator);
		let gcd_b = Self::gcd(rhs.numerator, self.denominator);

		let numerator = (self.numerator / gcd_a) * (rhs.numerator / gcd_b);
		let denominator = (self.denominator / gcd_b) * (rhs.denominator / gcd_a);

		let mut out = Self {
			numerator,
			denominator,
			is_negative: numerator > 0 && (self.is_negative ^ rhs.is_negative),
		};
		out.reduce();
		out
	}
}

impl Div for Quant {
	type Output = Self;

	fn div(self, rhs: Self) -> Self::Output {
		if rhs.numerator == 0 {
			panic!("Attempt to divide by zero");
		}

		self * rhs.recip()
	}
}

impl Neg for Quant {
	type Output = Self;

	fn neg(self) -> Self::Output {
		if self.numerator == 0 {
			return self;
		}
		Self {
			is_negative: !self.is_negative,
			..self
		}
	}
}

impl PartialEq for Quant {
	fn eq(&self, other: &Self) -> bool {
		self.numerator * other.denominator == other.numerator * self.denominator
			&& self.is_negative == other.is_negative
	}
}

impl Eq for Quant {}

impl PartialEq<i128> for Quant {
	fn eq(&self, &other: &i128) -> bool {
		let is_other_negative = other < 0;
		let abs_other = other.unsigned_abs();

		self.is_negative == is_other_negative
			&& self.numerator == abs_other * self.denominator
	}
}

impl PartialOrd for Quant {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Quant {
	fn cmp(&self, other: &Self) -> Ordering {
		if self.numerator == 0 && other.numerator == 0 {
			return Ordering::Equal;
		}

		match (self.is_negative, other.is_negative) {
			(true, false) => return Ordering::Less,
			(false, true) => return Ordering::Greater,
			_ => {},
		};

		// limit overflow by reducing both in relation to each other
		let gcd = Self::gcd(self.denominator, other.denominator);
		let lcm = self.denominator / gcd * other.denominator;

		let left = self.numerator * (lcm / self.denominator);
		let right = other.numerator * (lcm / other.denominator);

		if self.is_negative {
			right.cmp(&left)
		} else {
			left.cmp(&right)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod creation {
		use super::*;

		#[test]
		fn test_from_str_integer() {
			let quant = Quant::from_str("162").unwrap();
			assert_eq!(quant.numerator, 162);
			assert_eq!(quant.denominator, 1);
			assert!(!quant.is_negative);
		}

		#[test]
		fn test_from_str_decimal() {
			let quant = Quant::from_str("1.0812").unwrap();
			assert_eq!(quant.numerator, 2703);
			assert_eq!(quant.denominator, 2500);
			assert!(!quant.is_negative);
		}

		#[test]
		fn test_from_str_negative() {
			let quant = Quant::from_str("-5").unwrap();
			assert_eq!(quant.numerator, 5);
			assert!(quant.is_negative);
		}

		#[test]
		fn test_from_str_negative_zero() {
			let quant = Quant::from_str("-0.00").unwrap();
			assert_eq!(quant.numerator, 0);
			assert!(!quant.is_negative);
		}

		#[test]
		fn test_from_str_rejects_garbage() {
			assert!(Quant::from_str("n/a").is_err());
			assert!(Quant::from_str("1.08.12").is_err());
			assert!(Quant::from_str("").is_err());
		}

		#[test]
		fn test_from_frac_reduces() {
			let quant = Quant::from_frac(1625, 10);
			assert_eq!(quant.numerator, 325);
			assert_eq!(quant.denominator, 2);
		}

		#[test]
		#[should_panic(expected = "Denominator cannot be zero")]
		fn test_from_frac_zero_denominator() {
			Quant::from_frac(1, 0);
		}

		#[test]
		fn test_is_positive() {
			assert!(Quant::from_str("0.0001").unwrap().is_positive());
			assert!(!Quant::zero().is_positive());
			assert!(!Quant::from_str("-5").unwrap().is_positive());
		}
	}

	mod math {
		use super::*;

		#[test]
		fn test_mul() {
			let a = Quant::from_frac(2, 3);
			let b = Quant::from_frac(3, 4);
			assert_eq!(a * b, Quant::from_frac(1, 2));
		}

		#[test]
		fn test_mul_signs() {
			let a = Quant::from_frac(-2, 3);
			let b = Quant::from_frac(3, 4);
			assert_eq!(a * b, Quant::from_frac(-1, 2));
			assert_eq!(a * b * b.recip(), a);
		}

		#[test]
		fn test_div() {
			let a = Quant::from_str("162.5").unwrap();
			let b = Quant::from_str("1.08").unwrap();
			assert_eq!(a / b, Quant::from_frac(8125, 54));
		}

		#[test]
		#[should_panic(expected = "Attempt to divide by zero")]
		fn test_div_by_zero() {
			let _ = Quant::one() / Quant::zero();
		}

		#[test]
		fn test_add_sub() {
			let a = Quant::from_frac(1, 2);
			let b = Quant::from_frac(1, 3);
			assert_eq!(a + b, Quant::from_frac(5, 6));
			assert_eq!(a - b, Quant::from_frac(1, 6));
			assert_eq!(b - a, Quant::from_frac(-1, 6));
		}

		#[test]
		fn test_ordering() {
			let a = Quant::from_frac(5, 2);
			let b = Quant::from_frac(10, 4);
			let c = Quant::from_frac(-6, 2);
			assert!(a >= b);
			assert!(c < a);
			assert!(Quant::zero() > c);
		}

		#[test]
		fn test_i128_equality() {
			assert_eq!(Quant::from_frac(10, 2), 5);
			assert_eq!(Quant::zero(), 0);
		}
	}

	mod rounding {
		use super::*;

		#[test]
		fn test_round_to_four_places() {
			// 162.5 / 1.08 = 150.46296296...
			let quant = Quant::from_str("162.5").unwrap()
				/ Quant::from_str("1.08").unwrap();
			assert_eq!(quant.round_to(4), Quant::from_str("150.463").unwrap());
		}

		#[test]
		fn test_round_half_goes_away_from_zero() {
			let quant = Quant::from_str("0.00005").unwrap();
			assert_eq!(quant.round_to(4), Quant::from_str("0.0001").unwrap());

			let quant = Quant::from_str("2.5").unwrap();
			assert_eq!(quant.round_to(0), Quant::from_i128(3));

			let quant = Quant::from_str("-2.5").unwrap();
			assert_eq!(quant.round_to(0), Quant::from_i128(-3));
		}

		#[test]
		fn test_round_below_half_goes_down() {
			let quant = Quant::from_str("0.92592").unwrap();
			assert_eq!(quant.round_to(4), Quant::from_str("0.9259").unwrap());
		}

		#[test]
		fn test_round_to_integer() {
			assert_eq!(
				Quant::from_str("9259.259").unwrap().round_to_integer(),
				9259
			);
			assert_eq!(Quant::from_str("1.5").unwrap().round_to_integer(), 2);
			assert_eq!(Quant::from_str("-1.5").unwrap().round_to_integer(), -2);
			assert_eq!(Quant::zero().round_to_integer(), 0);
		}

		#[test]
		fn test_round_to_zero_clears_sign() {
			let quant = Quant::from_str("-0.00001").unwrap();
			let rounded = quant.round_to(4);
			assert_eq!(rounded, Quant::zero());
			assert!(!rounded.is_negative);
		}
	}

	mod display {
		use super::*;

		#[test]
		fn test_display_plain() {
			assert_eq!(Quant::from_str("1.08").unwrap().to_string(), "1.08");
			assert_eq!(Quant::from_i128(162).to_string(), "162");
			assert_eq!(Quant::from_str("-0.5").unwrap().to_string(), "-0.5");
		}

		#[test]
		fn test_display_fixed_precision() {
			assert_eq!(
				format!("{:.4}", Quant::from_str("1.08").unwrap()),
				"1.0800"
			);
			assert_eq!(format!("{:.2}", Quant::from_frac(9259, 100)), "92.59");
			assert_eq!(format!("{:.0}", Quant::from_i128(16250)), "16250");
		}

		#[test]
		fn test_display_caps_nonterminating() {
			let third = Quant::from_frac(1, 3);
			assert_eq!(third.to_string(), "0.333333333333");
		}
	}
}
