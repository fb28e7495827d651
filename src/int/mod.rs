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

//! `Int`: an immutable, arbitrary-precision signed integer. Every
//! operation returns a freshly allocated value sized exactly to its
//! normalized magnitude -- unlike [`crate::accum::Accum`], there is no
//! spare capacity to preserve, since nothing ever mutates an `Int` in
//! place.

pub(crate) mod bitops;
pub mod bytes;
pub mod convert;
mod num_traits_impl;
pub mod ops;
pub mod text;

use crate::accum::Accum;
use crate::error::Error;
use crate::ll;
use crate::sign::Sign;
use std::cmp::Ordering;

#[derive(Clone, Debug)]
pub struct Int {
    sign: Sign,
    mag: Box<[u32]>,
}

impl Int {
    pub(crate) fn from_sign_mag(sign: Sign, mut mag: Vec<u32>) -> Int {
        let len = ll::norm_len(&mag, mag.len());
        mag.truncate(len);
        let sign = if mag.is_empty() { Sign::NonNegative } else { sign };
        Int { sign, mag: mag.into_boxed_slice() }
    }

    pub fn zero() -> Int {
        Int { sign: Sign::NonNegative, mag: Box::new([]) }
    }

    pub fn one() -> Int {
        Int::from_sign_mag(Sign::NonNegative, vec![1])
    }

    pub(crate) fn sign(&self) -> Sign {
        self.sign
    }

    pub(crate) fn magnitude(&self) -> &[u32] {
        &self.mag
    }

    pub fn is_zero(&self) -> bool {
        self.mag.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        !self.mag.is_empty() && !self.sign.is_negative()
    }

    pub fn abs(&self) -> Int {
        Int { sign: Sign::NonNegative, mag: self.mag.clone() }
    }

    pub fn negate(&self) -> Int {
        if self.is_zero() {
            self.clone()
        } else {
            Int { sign: self.sign.negate(), mag: self.mag.clone() }
        }
    }

    pub fn sqr(&self) -> Int {
        let mut acc = Accum::new();
        acc.set_sqr(self);
        acc.to_int()
    }

    /// `self^exp` for a non-negative exponent. `Err(NegativeExponent)` if
    /// `exp` is negative.
    pub fn pow(&self, exp: &Int) -> Result<Int, Error> {
        let mut acc = Accum::new();
        acc.set_pow(self, exp)?;
        Ok(acc.to_int())
    }

    /// Integer square root, `floor(sqrt(self))`, via Newton's method.
    /// `Err(NegativeInput)` if `self` is negative.
    pub fn isqrt(&self) -> Result<Int, Error> {
        if self.is_negative() {
            return Err(Error::NegativeInput);
        }
        if self.is_zero() {
            return Ok(Int::zero());
        }
        let bit_len = self.magnitude_bit_len();
        let mut x = Int::one().shl(((bit_len as i64) + 2) / 2)?;
        loop {
            let y = (&x + &(self / &x)).shr(1)?;
            if y >= x {
                return Ok(x);
            }
            x = y;
        }
    }

    /// `gcd(|self|, |other|)`, always non-negative.
    /// Binary GCD (Stein's algorithm) on magnitudes: strip the common
    /// power of two, then repeatedly strip `b`'s remaining factors of two
    /// and subtract the smaller from the larger, per spec.md 4.2 --
    /// division-free other than by powers of two, unlike Euclid's `%` loop.
    pub fn gcd(&self, other: &Int) -> Int {
        let mut a = self.abs();
        let mut b = other.abs();
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }
        let shift = a
            .count_trailing_zero_bits()
            .unwrap_or(0)
            .min(b.count_trailing_zero_bits().unwrap_or(0));
        a = a.shr(shift as i64).expect("shift amount is non-negative");
        loop {
            let b_trailing = b.count_trailing_zero_bits().unwrap_or(0);
            b = b.shr(b_trailing as i64).expect("shift amount is non-negative");
            if a > b {
                std::mem::swap(&mut a, &mut b);
            }
            b = &b - &a;
            if b.is_zero() {
                break;
            }
        }
        a.shl(shift as i64).expect("shift amount is non-negative")
    }

    /// `n!`, via a balanced product tree over `2..=n` rather than a single
    /// skewed running multiply -- the same preference for balanced operand
    /// sizes that motivates recursing on roughly-equal halves in
    /// [`crate::ll::mul::sqr_karatsuba`].
    pub fn factorial(n: u64) -> Int {
        if n < 2 {
            return Int::one();
        }
        let mut terms: Vec<Int> = (2..=n).map(Int::from).collect();
        while terms.len() > 1 {
            let mut next = Vec::with_capacity(terms.len().div_ceil(2));
            let mut it = terms.into_iter();
            while let Some(a) = it.next() {
                match it.next() {
                    Some(b) => next.push(&a * &b),
                    None => next.push(a),
                }
            }
            terms = next;
        }
        terms.pop().unwrap_or_else(Int::one)
    }

    pub fn magnitude_bit_len(&self) -> usize {
        ll::bit::bit_len(&self.mag, self.mag.len())
    }

    /// First set bit's index in the magnitude, or `None` for zero.
    pub fn count_trailing_zero_bits(&self) -> Option<usize> {
        ll::bit::count_trailing_zero_bits(&self.mag, self.mag.len())
    }

    pub fn magnitude_count_one_bits(&self) -> u32 {
        ll::bit::count_one_bits(&self.mag, self.mag.len())
    }

    /// Two's-complement `testBit`: for a negative value, bits beyond the
    /// magnitude's own length read as set (the infinite sign-extension).
    pub fn test_bit(&self, i: i64) -> Result<bool, Error> {
        if i < 0 {
            return Err(Error::OutOfDomain("bit index must be non-negative".into()));
        }
        Ok(bitops::test_bit(self.sign, &self.mag, i as usize))
    }

    pub fn with_set_bit(&self, i: i64) -> Result<Int, Error> {
        if i < 0 {
            return Err(Error::OutOfDomain("bit index must be non-negative".into()));
        }
        let i = i as usize;
        let mut mag = self.mag.to_vec();
        if i / 32 >= mag.len() {
            mag.resize(i / 32 + 1, 0);
        }
        let len = ll::bit::set_bit(&mut mag, self.mag.len(), i);
        mag.truncate(mag.len().max(len));
        Ok(Int::from_sign_mag(self.sign, mag))
    }

    pub fn clear_bit(&self, i: i64) -> Result<Int, Error> {
        if i < 0 {
            return Err(Error::OutOfDomain("bit index must be non-negative".into()));
        }
        let mut mag = self.mag.to_vec();
        ll::bit::clear_bit(&mut mag, mag.len(), i as usize);
        Ok(Int::from_sign_mag(self.sign, mag))
    }

    /// A mask of `width` one-bits starting at `index` (default 0):
    /// `((1 << width) - 1) << index`.
    pub fn bit_mask(width: i64, index: Option<i64>) -> Result<Int, Error> {
        if width < 0 {
            return Err(Error::OutOfDomain("mask width must be non-negative".into()));
        }
        let index = index.unwrap_or(0);
        if index < 0 {
            return Err(Error::OutOfDomain("mask index must be non-negative".into()));
        }
        let (width, index) = (width as usize, index as usize);
        if width == 0 {
            return Ok(Int::zero());
        }
        let mut mag = vec![0u32; (index + width) / 32 + 1];
        for bit in index..index + width {
            mag[bit / 32] |= 1 << (bit % 32);
        }
        Ok(Int::from_sign_mag(Sign::NonNegative, mag))
    }

    /// `self | bit_mask(width, index)`.
    pub fn with_bit_mask(&self, width: i64, index: Option<i64>) -> Result<Int, Error> {
        Ok(self.or(&Int::bit_mask(width, index)?))
    }

    pub fn shl(&self, amount: i64) -> Result<Int, Error> {
        if amount < 0 {
            return Err(Error::OutOfDomain("shift amount must be non-negative".into()));
        }
        let needed = ll::bit::shl_limbs_needed(self.mag.len(), amount as u32);
        let mut z = vec![0u32; needed];
        let len = ll::bit::shl(&mut z, &self.mag, self.mag.len(), amount as u32);
        z.truncate(len);
        Ok(Int::from_sign_mag(self.sign, z))
    }

    /// Arithmetic right shift: floor division by `2^amount`, rounding
    /// toward negative infinity for negative values.
    pub fn shr(&self, amount: i64) -> Result<Int, Error> {
        if amount < 0 {
            return Err(Error::OutOfDomain("shift amount must be non-negative".into()));
        }
        let needs_round_up = self.is_negative()
            && self.count_trailing_zero_bits().map(|tz| (tz as i64) < amount).unwrap_or(false);
        let mut z = vec![0u32; self.mag.len().max(1) + 1];
        let mut len = ll::bit::shr(&mut z, &self.mag, self.mag.len(), amount as u32);
        if needs_round_up {
            z[len] = 0;
            let carry = ll::incr(&mut z[..len + 1], 0, 1);
            debug_assert_eq!(carry, 0, "shr round-up overflowed its headroom limb");
            len = ll::norm_len(&z, len + 1);
        }
        z.truncate(len);
        Ok(Int::from_sign_mag(self.sign, z))
    }

    /// Unsigned right shift. With no fixed bit width to shift zeros into
    /// from the top, arbitrary-precision `ushr` coincides with [`shr`] --
    /// see DESIGN.md.
    pub fn ushr(&self, amount: i64) -> Result<Int, Error> {
        self.shr(amount)
    }

    pub fn and(&self, other: &Int) -> Int {
        let (sign, mag) = bitops::twos_complement_combine(
            self.sign, &self.mag, other.sign, &other.mag, |x, y| x & y, |x, y| x && y,
        );
        Int::from_sign_mag(sign, mag)
    }

    pub fn or(&self, other: &Int) -> Int {
        let (sign, mag) = bitops::twos_complement_combine(
            self.sign, &self.mag, other.sign, &other.mag, |x, y| x | y, |x, y| x || y,
        );
        Int::from_sign_mag(sign, mag)
    }

    pub fn xor(&self, other: &Int) -> Int {
        let (sign, mag) = bitops::twos_complement_combine(
            self.sign, &self.mag, other.sign, &other.mag, |x, y| x ^ y, |x, y| x != y,
        );
        Int::from_sign_mag(sign, mag)
    }

    /// `~self == -(self + 1)`.
    pub fn not(&self) -> Int {
        (self + &Int::one()).negate()
    }
}

impl Default for Int {
    fn default() -> Int {
        Int::zero()
    }
}

impl PartialEq for Int {
    fn eq(&self, other: &Int) -> bool {
        self.sign == other.sign && *self.mag == *other.mag
    }
}
impl Eq for Int {}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Int) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Int) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::NonNegative, Sign::Negative) if !self.is_zero() || !other.is_zero() => Ordering::Greater,
            (Sign::Negative, Sign::NonNegative) if !self.is_zero() || !other.is_zero() => Ordering::Less,
            (Sign::NonNegative, _) => ll::cmp(&self.mag, self.mag.len(), &other.mag, other.mag.len()),
            (Sign::Negative, _) => ll::cmp(&other.mag, other.mag.len(), &self.mag, self.mag.len()),
        }
    }
}

impl std::hash::Hash for Int {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.mag.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Int>();
    }

    #[test]
    fn factorial_20_matches_known_value() {
        assert_eq!(
            Int::factorial(20).to_string(),
            "2432902008176640000"
        );
    }

    #[test]
    fn isqrt_of_a_large_power_of_ten() {
        let n = Int::from(10i64).pow(&Int::from(100i64)).unwrap();
        let root = n.isqrt().unwrap();
        assert_eq!(root, Int::from(10i64).pow(&Int::from(50i64)).unwrap());
    }

    #[test]
    fn gcd_matches_known_values() {
        assert_eq!(Int::from(54i64).gcd(&Int::from(24i64)), Int::from(6i64));
        assert_eq!(Int::from(0i64).gcd(&Int::from(5i64)), Int::from(5i64));
        assert_eq!(Int::from(48i64).gcd(&Int::from(18i64)), Int::from(6i64));
        assert_eq!(Int::from(17i64).gcd(&Int::from(5i64)), Int::from(1i64));
    }

    #[test]
    fn not_matches_negate_of_successor() {
        assert_eq!(Int::from(5i64).not(), Int::from(-6i64));
        assert_eq!(Int::from(-1i64).not(), Int::from(0i64));
    }

    #[test]
    fn ordering_handles_mixed_signs_and_zero() {
        assert!(Int::from(-1i64) < Int::from(0i64));
        assert!(Int::from(0i64) < Int::from(1i64));
        assert!(Int::from(-5i64) < Int::from(-1i64));
    }

    #[test]
    fn with_set_bit_and_clear_bit_roundtrip() {
        let x = Int::zero().with_set_bit(70).unwrap();
        assert!(x.test_bit(70).unwrap());
        let y = x.clear_bit(70).unwrap();
        assert!(y.is_zero());
    }
}
