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

//! `num_traits`/`num_integer` trait impls, so `Int` can be used generically
//! wherever a caller is coded against those crates rather than directly
//! against this one.

use super::Int;
use crate::error::Error;
use crate::sign::Sign;
use num_integer::Integer;
use num_traits::{Num, One, Signed, Zero};

impl Zero for Int {
    fn zero() -> Int {
        Int::zero()
    }
    fn is_zero(&self) -> bool {
        Int::is_zero(self)
    }
}

impl One for Int {
    fn one() -> Int {
        Int::one()
    }
}

impl Num for Int {
    type FromStrRadixErr = Error;

    fn from_str_radix(s: &str, radix: u32) -> Result<Int, Error> {
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if rest.is_empty() {
            return Err(Error::BadFormat("no digits".into()));
        }
        let mag = super::text::parse_magnitude_radix(rest, radix)?;
        let sign = if mag.is_empty() { Sign::NonNegative } else if negative { Sign::Negative } else { Sign::NonNegative };
        Ok(Int::from_sign_mag(sign, mag))
    }
}

impl Signed for Int {
    fn abs(&self) -> Int {
        Int::abs(self)
    }

    /// `self - other` if `self > other`, else zero.
    fn abs_sub(&self, other: &Int) -> Int {
        if self <= other { Int::zero() } else { self - other }
    }

    fn signum(&self) -> Int {
        if self.is_zero() { Int::zero() } else if self.is_negative() { -Int::one() } else { Int::one() }
    }

    fn is_positive(&self) -> bool {
        Int::is_positive(self)
    }

    fn is_negative(&self) -> bool {
        Int::is_negative(self)
    }
}

impl Integer for Int {
    /// Rounds toward negative infinity, unlike the truncating `/`.
    fn div_floor(&self, other: &Int) -> Int {
        let q = self / other;
        let r = self % other;
        if !r.is_zero() && (r.is_negative() != other.is_negative()) { q - Int::one() } else { q }
    }

    /// `self - other * div_floor(self, other)`: the remainder always takes
    /// the divisor's sign, unlike the truncating `%`.
    fn mod_floor(&self, other: &Int) -> Int {
        let r = self % other;
        if !r.is_zero() && (r.is_negative() != other.is_negative()) { &r + other } else { r }
    }

    fn gcd(&self, other: &Int) -> Int {
        Int::gcd(self, other)
    }

    fn lcm(&self, other: &Int) -> Int {
        if self.is_zero() || other.is_zero() {
            return Int::zero();
        }
        let g = Int::gcd(self, other);
        (self.abs() / &g) * other.abs()
    }

    fn divides(&self, other: &Int) -> bool {
        other.is_multiple_of(self)
    }

    fn is_multiple_of(&self, other: &Int) -> bool {
        (self % other).is_zero()
    }

    fn is_even(&self) -> bool {
        !self.test_bit(0).unwrap_or(false)
    }

    fn is_odd(&self) -> bool {
        self.test_bit(0).unwrap_or(false)
    }

    fn div_rem(&self, other: &Int) -> (Int, Int) {
        (self / other, self % other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_one_match_inherent_constructors() {
        assert_eq!(<Int as Zero>::zero(), Int::zero());
        assert_eq!(<Int as One>::one(), Int::one());
        assert!(Zero::is_zero(&Int::zero()));
    }

    #[test]
    fn from_str_radix_parses_base_36() {
        let x: Int = Num::from_str_radix("-z1", 36).unwrap();
        assert_eq!(x, -(&Int::from(35u32) * &Int::from(36u32) + &Int::from(1u32)));
    }

    #[test]
    fn div_floor_rounds_toward_negative_infinity() {
        assert_eq!(Int::from(-7i64).div_floor(&Int::from(2i64)), Int::from(-4i64));
        assert_eq!(Int::from(7i64).div_floor(&Int::from(-2i64)), Int::from(-4i64));
    }

    #[test]
    fn mod_floor_takes_the_divisors_sign() {
        assert_eq!(Int::from(-7i64).mod_floor(&Int::from(2i64)), Int::from(1i64));
        assert_eq!(Int::from(7i64).mod_floor(&Int::from(-2i64)), Int::from(-1i64));
    }

    #[test]
    fn lcm_and_gcd_agree_with_known_values() {
        assert_eq!(Integer::gcd(&Int::from(54i64), &Int::from(24i64)), Int::from(6i64));
        assert_eq!(Integer::lcm(&Int::from(4i64), &Int::from(6i64)), Int::from(12i64));
    }

    #[test]
    fn even_and_odd_checks() {
        assert!(Int::from(4i64).is_even());
        assert!(Int::from(5i64).is_odd());
    }
}
