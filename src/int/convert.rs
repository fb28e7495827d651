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

//! Conversions in and out of the primitive integer and float types, plus
//! the little-endian limb-array interchange format.

use super::Int;
use crate::error::Error;
use crate::sign::Sign;
use crate::traits::AsMagnitude;
use ieee754::Ieee754;

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(impl From<$t> for Int {
            fn from(x: $t) -> Int {
                let (neg, limbs) = x.as_sign_magnitude();
                Int::from_sign_mag(if neg { Sign::Negative } else { Sign::NonNegative }, limbs)
            }
        })*
    };
}

impl_from_primitive! { i8, i16, i32, i64, isize, u8, u16, u32, u64, usize }

impl Int {
    /// Builds a value directly from little-endian limbs and a sign,
    /// matching `fromLittleEndianIntArray` (spec.md §6). Accepts an
    /// `[offset, length)` window into `limbs` the way the interface
    /// allows; normalizes on intake.
    pub fn from_little_endian_limbs(is_negative: bool, limbs: &[u32], offset: usize, length: usize) -> Int {
        let end = (offset + length).min(limbs.len());
        let start = offset.min(end);
        let slice = &limbs[start..end];
        let sign = if is_negative { Sign::Negative } else { Sign::NonNegative };
        Int::from_sign_mag(sign, slice.to_vec())
    }

    /// The magnitude as little-endian 32-bit limbs (`magnitudeToLittleEndianIntArray`).
    pub fn magnitude_to_little_endian_limbs(&self) -> Vec<u32> {
        self.magnitude().to_vec()
    }

    /// Builds a value from an IEEE-754 `f64`. Fails on NaN and infinities;
    /// any finite float (including non-integral ones) is truncated toward
    /// zero, matching the common `BigInteger.valueOf(double)` convention.
    pub fn from_f64(value: f64) -> Result<Int, Error> {
        if value.is_nan() || value.is_infinite() {
            return Err(Error::BadFormat("value must be finite".into()));
        }
        if value == 0.0 {
            return Ok(Int::zero());
        }
        let negative = value.is_sign_negative();
        let bits = Ieee754::bits(value.abs());
        let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
        let stored_mantissa = bits & 0xf_ffff_ffff_ffff;
        let (mantissa, exponent) = if biased_exponent == 0 {
            // Subnormal: no implicit leading bit, exponent fixed at 1 - bias.
            (stored_mantissa, 1 - 1023 - 52)
        } else {
            (stored_mantissa | (1u64 << 52), biased_exponent - 1023 - 52)
        };
        let int = if exponent >= 0 {
            let mut limbs = u64_to_limbs(mantissa);
            shl_limbs(&mut limbs, exponent as usize);
            Int::from_sign_mag(Sign::NonNegative, limbs)
        } else {
            let shift = (-exponent) as u32;
            let truncated = if shift >= 64 { 0 } else { mantissa >> shift };
            Int::from_sign_mag(Sign::NonNegative, u64_to_limbs(truncated))
        };
        Ok(if negative { int.negate() } else { int })
    }

    /// Truncates toward zero into an `f64`, with precision loss for
    /// magnitudes beyond 53 significant bits (mirrors `doubleValue`).
    pub fn to_f64(&self) -> f64 {
        let mut acc = 0f64;
        for &limb in self.magnitude().iter().rev() {
            acc = acc * 4294967296.0 + limb as f64;
        }
        if self.is_negative() { -acc } else { acc }
    }

    /// Two's-complement big-endian bytes, the minimum length that
    /// represents the value unambiguously (a negative value's top bit must
    /// be set, so it gets a leading `0xFF` byte when its magnitude's own
    /// top bit already is).
    pub fn to_twos_complement_be_bytes(&self) -> Vec<u8> {
        super::bytes::to_twos_complement_be(self.sign(), self.magnitude())
    }

    /// Parses two's-complement big-endian bytes, per spec.md §6.
    pub fn from_twos_complement_be_bytes(bytes: &[u8]) -> Result<Int, Error> {
        super::bytes::from_twos_complement_be(bytes)
    }
}

fn u64_to_limbs(v: u64) -> Vec<u32> {
    let lo = v as u32;
    let hi = (v >> 32) as u32;
    if hi != 0 { vec![lo, hi] } else if lo != 0 { vec![lo] } else { vec![] }
}

fn shl_limbs(limbs: &mut Vec<u32>, bits: usize) {
    if bits == 0 {
        return;
    }
    let limb_shift = bits / 32;
    let bit_shift = bits % 32;
    let mut out = vec![0u32; limb_shift];
    if bit_shift == 0 {
        out.extend_from_slice(limbs);
    } else {
        let mut carry = 0u32;
        for &l in limbs.iter() {
            out.push((l << bit_shift) | carry);
            carry = l >> (32 - bit_shift);
        }
        if carry != 0 {
            out.push(carry);
        }
    }
    *limbs = out;
}

macro_rules! impl_try_from_for_unsigned {
    ($($t:ty),*) => {
        $(impl TryFrom<&Int> for $t {
            type Error = Error;
            fn try_from(x: &Int) -> Result<$t, Error> {
                if x.is_negative() {
                    return Err(Error::OutOfDomain("value is negative".into()));
                }
                let mut acc: u128 = 0;
                for (i, &limb) in x.magnitude().iter().enumerate() {
                    acc |= (limb as u128) << (32 * i);
                }
                <$t>::try_from(acc).map_err(|_| Error::OutOfDomain("value does not fit in target type".into()))
            }
        })*
    };
}

impl_try_from_for_unsigned! { u8, u16, u32, u64, usize }

macro_rules! impl_try_from_for_signed {
    ($($t:ty),*) => {
        $(impl TryFrom<&Int> for $t {
            type Error = Error;
            fn try_from(x: &Int) -> Result<$t, Error> {
                let mut acc: u128 = 0;
                for (i, &limb) in x.magnitude().iter().enumerate() {
                    acc |= (limb as u128) << (32 * i);
                }
                let magnitude = i128::try_from(acc).map_err(|_| Error::OutOfDomain("value does not fit in target type".into()))?;
                let signed = if x.is_negative() { -magnitude } else { magnitude };
                <$t>::try_from(signed).map_err(|_| Error::OutOfDomain("value does not fit in target type".into()))
            }
        })*
    };
}

impl_try_from_for_signed! { i8, i16, i32, i64, isize }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitive_roundtrips_through_try_from() {
        let x = Int::from(-1234i64);
        let back: i64 = i64::try_from(&x).unwrap();
        assert_eq!(back, -1234);
    }

    #[test]
    fn from_f64_truncates_toward_zero() {
        let x = Int::from_f64(1024.75).unwrap();
        assert_eq!(x, Int::from(1024i64));
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(Int::from_f64(f64::NAN).is_err());
        assert!(Int::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn little_endian_limb_roundtrip() {
        let limbs = [0xdead_beefu32, 0x1];
        let x = Int::from_little_endian_limbs(false, &limbs, 0, 2);
        assert_eq!(x.magnitude_to_little_endian_limbs(), &limbs);
    }

    #[test]
    fn try_from_rejects_negative_for_unsigned() {
        let x = Int::from(-1i64);
        assert!(u32::try_from(&x).is_err());
    }
}
