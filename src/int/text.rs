// Copyright 2015 The Ramp Developers
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Decimal and hex text I/O (spec.md §6). Parsing accepts an optional
//! leading sign, an optional `0x`/`0X` prefix selecting hex, and digit
//! groups separated by `_` (never leading, trailing, or doubled).
//! Printing is plain signed decimal via `Display`; `to_hex_string` offers
//! the configurable prefix/padding/case/suffix surface.

use super::Int;
use crate::accum::Accum;
use crate::error::Error;
use crate::sign::Sign;
use std::fmt;
use std::str::FromStr;

const DECIMAL_CHUNK: u32 = 1_000_000_000;
const DECIMAL_CHUNK_DIGITS: usize = 9;

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut chunks = Vec::new();
        let mut acc = Accum::from(self);
        let divisor = Int::from(DECIMAL_CHUNK);
        while !acc.is_zero() {
            let current = acc.to_int();
            let rem = current.checked_rem(&divisor).expect("divisor is non-zero");
            acc.set_div(&current, &divisor).expect("divisor is non-zero");
            let rem: u32 = u32::try_from(&rem.abs()).expect("remainder fits in a u32");
            chunks.push(rem);
        }

        let mut first = true;
        for chunk in chunks.into_iter().rev() {
            if first {
                write!(f, "{}", chunk)?;
                first = false;
            } else {
                write!(f, "{:0width$}", chunk, width = DECIMAL_CHUNK_DIGITS)?;
            }
        }
        Ok(())
    }
}

/// Configures [`Int::to_hex_string`].
pub struct HexFormat {
    pub uppercase: bool,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub min_digits: usize,
}

impl Default for HexFormat {
    fn default() -> HexFormat {
        HexFormat { uppercase: false, prefix: "0x", suffix: "", min_digits: 0 }
    }
}

impl Int {
    /// Hex rendering with a configurable prefix (`0x`, `#`, `[`/`]` style
    /// wrapping via `prefix`/`suffix`, or empty), case, and zero-padded
    /// minimum digit count. The sign goes before the prefix.
    pub fn to_hex_string(&self, format: &HexFormat) -> String {
        let mut digits = String::new();
        for &limb in self.magnitude().iter().rev() {
            digits.push_str(&format!("{:08x}", limb));
        }
        if digits.is_empty() {
            digits.push('0');
        }
        let digits = digits.trim_start_matches('0');
        let mut digits = if digits.is_empty() { "0".to_string() } else { digits.to_string() };
        if digits.len() < format.min_digits {
            let pad = format.min_digits - digits.len();
            digits = "0".repeat(pad) + &digits;
        }
        if format.uppercase {
            digits = digits.to_uppercase();
        }

        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(format.prefix);
        out.push_str(&digits);
        out.push_str(format.suffix);
        out
    }
}

impl FromStr for Int {
    type Err = Error;

    fn from_str(s: &str) -> Result<Int, Error> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(Error::BadFormat("empty input".into()));
        }

        let (negative, rest) = match bytes[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        if rest.is_empty() {
            return Err(Error::BadFormat("no digits after sign".into()));
        }

        let (radix, digit_part) = if rest.len() > 2 && (rest.starts_with("0x") || rest.starts_with("0X")) {
            (16u32, &rest[2..])
        } else {
            (10u32, rest)
        };
        if digit_part.is_empty() {
            return Err(Error::BadFormat("no digits after prefix".into()));
        }

        // A separator is otherwise never adjacent to the sign or prefix,
        // except immediately after the prefix's final character.
        let digit_part = if radix == 16 { digit_part.strip_prefix('_').unwrap_or(digit_part) } else { digit_part };
        let digits = strip_digit_separators(digit_part)?;
        if digits.is_empty() {
            return Err(Error::BadFormat("no digits".into()));
        }

        let mag = match radix {
            16 => parse_hex_magnitude(&digits)?,
            _ => parse_decimal_magnitude(&digits)?,
        };
        let sign = if mag.is_empty() { Sign::NonNegative } else if negative { Sign::Negative } else { Sign::NonNegative };
        Ok(Int::from_sign_mag(sign, mag))
    }
}

fn strip_digit_separators(s: &str) -> Result<String, Error> {
    let chars: Vec<char> = s.chars().collect();
    if chars.first() == Some(&'_') || chars.last() == Some(&'_') {
        return Err(Error::BadFormat("digit separator cannot be leading or trailing".into()));
    }
    let mut out = String::with_capacity(chars.len());
    let mut prev_was_separator = false;
    for &c in &chars {
        if c == '_' {
            if prev_was_separator {
                return Err(Error::BadFormat("digit separators cannot be adjacent".into()));
            }
            prev_was_separator = true;
        } else {
            out.push(c);
            prev_was_separator = false;
        }
    }
    Ok(out)
}

fn parse_decimal_magnitude(digits: &str) -> Result<Vec<u32>, Error> {
    let mut acc = Accum::new();
    let ten = Int::from(10u32);
    for c in digits.chars() {
        let d = c.to_digit(10).ok_or_else(|| Error::BadFormat(format!("invalid decimal digit '{c}'")))?;
        let current = acc.to_int();
        acc.set_mul(&current, &ten);
        let current = acc.to_int();
        acc.set_add(&current, &Int::from(d));
    }
    Ok(acc.to_int().magnitude().to_vec())
}

fn parse_hex_magnitude(digits: &str) -> Result<Vec<u32>, Error> {
    let mut acc = Accum::new();
    let sixteen = Int::from(16u32);
    for c in digits.chars() {
        let d = c.to_digit(16).ok_or_else(|| Error::BadFormat(format!("invalid hex digit '{c}'")))?;
        let current = acc.to_int();
        acc.set_mul(&current, &sixteen);
        let current = acc.to_int();
        acc.set_add(&current, &Int::from(d));
    }
    Ok(acc.to_int().magnitude().to_vec())
}

/// As [`parse_decimal_magnitude`]/[`parse_hex_magnitude`], generalized to an
/// arbitrary radix (2..=36) with no prefix or separator handling -- the
/// engine behind `num_traits::Num::from_str_radix`.
pub(crate) fn parse_magnitude_radix(digits: &str, radix: u32) -> Result<Vec<u32>, Error> {
    let mut acc = Accum::new();
    let base = Int::from(radix);
    for c in digits.chars() {
        let d = c.to_digit(radix).ok_or_else(|| Error::BadFormat(format!("invalid digit '{c}' for radix {radix}")))?;
        let current = acc.to_int();
        acc.set_mul(&current, &base);
        let current = acc.to_int();
        acc.set_add(&current, &Int::from(d));
    }
    Ok(acc.to_int().magnitude().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_roundtrip_through_display_and_from_str() {
        let x = Int::from(-123456789012345i64);
        let s = x.to_string();
        assert_eq!(s.parse::<Int>().unwrap(), x);
    }

    #[test]
    fn large_value_chunks_correctly() {
        let x: Int = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(x.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn hex_parsing_and_printing_roundtrip() {
        let x: Int = "0xDEAD_BEEF".parse().unwrap();
        assert_eq!(x, Int::from(0xDEAD_BEEFu32));
        let format = HexFormat { uppercase: true, ..Default::default() };
        assert_eq!(x.to_hex_string(&format), "0xDEADBEEF");
    }

    #[test]
    fn hex_string_honors_min_digits_and_suffix() {
        let x = Int::from(0xFFu32);
        let format = HexFormat { prefix: "#", suffix: "h", min_digits: 4, uppercase: false };
        assert_eq!(x.to_hex_string(&format), "#00ffh");
    }

    #[test]
    fn rejects_leading_and_trailing_separators() {
        assert!("_123".parse::<Int>().is_err());
        assert!("123_".parse::<Int>().is_err());
        assert!("1__23".parse::<Int>().is_err());
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert!("".parse::<Int>().is_err());
        assert!("abc".parse::<Int>().is_err());
        assert!("-".parse::<Int>().is_err());
    }
}
