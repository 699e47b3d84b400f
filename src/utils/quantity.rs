// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Exact parsing and ordering of Kubernetes resource quantities.
//!
//! A quantity is `<sign><number><suffix>` where suffix is one of
//! - binary SI: `Ki Mi Gi Ti Pi Ei`
//! - decimal SI: `n u m "" k M G T P E`
//! - decimal exponent: `e<int>` / `E<int>`
//!
//! Values are kept as `mantissa * 10^scale` so no precision is lost; `1Gi`,
//! `1024Mi` and `1073741824` compare equal.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use snafu::{OptionExt, Snafu};
use std::cmp::Ordering;
use std::str::FromStr;

const BINARY_SUFFIXES: [(&str, u32); 6] = [
    ("Ki", 1),
    ("Mi", 2),
    ("Gi", 3),
    ("Ti", 4),
    ("Pi", 5),
    ("Ei", 6),
];

const DECIMAL_SUFFIXES: [(&str, i32); 9] = [
    ("n", -9),
    ("u", -6),
    ("m", -3),
    ("k", 3),
    ("M", 6),
    ("G", 9),
    ("T", 12),
    ("P", 15),
    ("E", 18),
];

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("quantity must not be empty"))]
    Empty,

    #[snafu(display("'{}' is not a valid number", value))]
    InvalidNumber { value: String },

    #[snafu(display("unknown quantity suffix '{}'", suffix))]
    UnknownSuffix { suffix: String },

    #[snafu(display("quantity '{}' is out of range", value))]
    OutOfRange { value: String },
}

/// A quantity in canonical exact form.
///
/// The representation is normalized (no trailing decimal zeros in the
/// mantissa, zero has scale 0), so structural equality is numeric equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExactQuantity {
    mantissa: i128,
    scale: i32,
}

impl ExactQuantity {
    pub const ZERO: ExactQuantity = ExactQuantity {
        mantissa: 0,
        scale: 0,
    };

    pub fn parse(raw: &str) -> Result<Self, Error> {
        let value = raw.trim();
        if value.is_empty() {
            return EmptySnafu.fail();
        }

        let (negative, unsigned) = match value.as_bytes()[0] {
            b'-' => (true, &value[1..]),
            b'+' => (false, &value[1..]),
            _ => (false, value),
        };

        let number_len = unsigned
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(unsigned.len());
        let (number, suffix) = unsigned.split_at(number_len);

        let (mut mantissa, mut scale) = parse_decimal(number).context(InvalidNumberSnafu {
            value: raw.to_string(),
        })?;

        let out_of_range = || OutOfRangeSnafu {
            value: raw.to_string(),
        };

        match parse_suffix(suffix)? {
            Multiplier::Binary(power) => {
                let factor = 1024i128.pow(power);
                mantissa = mantissa.checked_mul(factor).with_context(out_of_range)?;
            }
            Multiplier::Decimal(exponent) => {
                scale = scale.checked_add(exponent).with_context(out_of_range)?;
            }
        }

        if negative {
            mantissa = -mantissa;
        }

        Ok(Self::normalized(mantissa, scale))
    }

    fn normalized(mut mantissa: i128, mut scale: i32) -> Self {
        if mantissa == 0 {
            return Self::ZERO;
        }
        while mantissa % 10 == 0 {
            let Some(next) = scale.checked_add(1) else {
                break;
            };
            mantissa /= 10;
            scale = next;
        }
        Self { mantissa, scale }
    }
}

enum Multiplier {
    Binary(u32),
    Decimal(i32),
}

fn parse_suffix(suffix: &str) -> Result<Multiplier, Error> {
    if suffix.is_empty() {
        return Ok(Multiplier::Decimal(0));
    }
    if let Some((_, power)) = BINARY_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
        return Ok(Multiplier::Binary(*power));
    }
    if let Some((_, exponent)) = DECIMAL_SUFFIXES.iter().find(|(s, _)| *s == suffix) {
        return Ok(Multiplier::Decimal(*exponent));
    }
    // A lone "E" is exa, anything longer starting with e/E is an exponent.
    if let Some(exponent) = suffix
        .strip_prefix('e')
        .or_else(|| suffix.strip_prefix('E'))
        .and_then(|e| e.parse::<i32>().ok())
    {
        return Ok(Multiplier::Decimal(exponent));
    }
    UnknownSuffixSnafu { suffix }.fail()
}

/// Parses `123`, `1.5`, `.5` or `5.` into `(mantissa, scale)`.
fn parse_decimal(number: &str) -> Option<(i128, i32)> {
    let (integer, fraction) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.contains('.') {
        return None;
    }

    let mut mantissa: i128 = 0;
    for digit in integer.bytes().chain(fraction.bytes()) {
        mantissa = mantissa
            .checked_mul(10)?
            .checked_add(i128::from(digit - b'0'))?;
    }
    let scale = -i32::try_from(fraction.len()).ok()?;
    Some((mantissa, scale))
}

impl Ord for ExactQuantity {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.mantissa.signum().cmp(&other.mantissa.signum());
        if by_sign != Ordering::Equal || self.mantissa == 0 {
            return by_sign;
        }
        if self.scale == other.scale {
            return self.mantissa.cmp(&other.mantissa);
        }

        // Bring the operand with the larger scale down to the smaller one.
        let (high, low, flipped) = if self.scale > other.scale {
            (self, other, false)
        } else {
            (other, self, true)
        };
        let diff = u32::try_from(i64::from(high.scale) - i64::from(low.scale)).ok();
        let ordering = match diff
            .and_then(|d| 10i128.checked_pow(d))
            .and_then(|factor| high.mantissa.checked_mul(factor))
        {
            Some(scaled) => scaled.cmp(&low.mantissa),
            // The scaled magnitude exceeds anything representable, so it dominates.
            None if high.mantissa > 0 => Ordering::Greater,
            None => Ordering::Less,
        };

        if flipped { ordering.reverse() } else { ordering }
    }
}

impl PartialOrd for ExactQuantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ExactQuantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&Quantity> for ExactQuantity {
    type Error = Error;

    fn try_from(quantity: &Quantity) -> Result<Self, Self::Error> {
        Self::parse(&quantity.0)
    }
}
