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

//! Two's-complement bitwise combination shared by `Int::{and,or,xor}` and
//! `Accum::{set_and,set_or,set_xor}`.
//!
//! A negative sign-magnitude value `-m` has infinite two's-complement
//! limbs `!((m-1)[i])` for every `i`, extended with all-one limbs beyond
//! `m`'s length; a non-negative value's limbs are just its magnitude,
//! extended with zero limbs. Combining two operands limb-by-limb up to
//! `max(lenA, lenB)` already captures every bit that can differ, because
//! both operands are constant (their extension value) beyond that point.

use crate::sign::Sign;

struct View<'a> {
    negative: bool,
    mag: &'a [u32],
    minus_one: Vec<u32>,
}

impl<'a> View<'a> {
    fn new(sign: Sign, mag: &'a [u32]) -> View<'a> {
        if sign.is_negative() {
            let mut m = mag.to_vec();
            decrement_in_place(&mut m);
            View { negative: true, mag, minus_one: m }
        } else {
            View { negative: false, mag, minus_one: Vec::new() }
        }
    }

    #[inline]
    fn limb(&self, i: usize) -> u32 {
        if self.negative {
            !self.minus_one.get(i).copied().unwrap_or(0)
        } else {
            self.mag.get(i).copied().unwrap_or(0)
        }
    }

    #[inline]
    fn len_hint(&self) -> usize {
        if self.negative { self.minus_one.len() } else { self.mag.len() }
    }
}

fn decrement_in_place(mag: &mut [u32]) {
    for l in mag.iter_mut() {
        if *l == 0 {
            *l = u32::MAX;
        } else {
            *l -= 1;
            return;
        }
    }
    unreachable!("two's-complement view of zero is always non-negative");
}

fn increment_in_place(mag: &mut Vec<u32>) {
    let mut carry = 1u32;
    for l in mag.iter_mut() {
        let (sum, c) = l.overflowing_add(carry);
        *l = sum;
        carry = c as u32;
        if carry == 0 {
            return;
        }
    }
    if carry != 0 {
        mag.push(carry);
    }
}

/// `testBit` under two's-complement semantics: true for every set bit of
/// a non-negative value, and for every bit of a negative value's infinite
/// two's-complement form (including the implicit leading ones).
pub(crate) fn test_bit(sign: Sign, mag: &[u32], i: usize) -> bool {
    let view = View::new(sign, mag);
    (view.limb(i / 32) >> (i % 32)) & 1 != 0
}

/// Combines two operands bit-by-bit under two's-complement semantics.
/// `combine` acts on a pair of limbs, `combine_ext` on the pair of
/// (implicit, constant) extension bits -- together they fully determine
/// the infinite-precision result.
pub(crate) fn twos_complement_combine(
    a_sign: Sign,
    a_mag: &[u32],
    b_sign: Sign,
    b_mag: &[u32],
    combine: impl Fn(u32, u32) -> u32,
    combine_ext: impl Fn(bool, bool) -> bool,
) -> (Sign, Vec<u32>) {
    let va = View::new(a_sign, a_mag);
    let vb = View::new(b_sign, b_mag);
    let n = va.len_hint().max(vb.len_hint());
    let mut limbs: Vec<u32> = (0..n).map(|i| combine(va.limb(i), vb.limb(i))).collect();

    if combine_ext(va.negative, vb.negative) {
        for l in limbs.iter_mut() {
            *l = !*l;
        }
        increment_in_place(&mut limbs);
        (Sign::Negative, limbs)
    } else {
        (Sign::NonNegative, limbs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_big(sign: Sign, mag: &[u32]) -> num_bigint::BigInt {
        let bytes: Vec<u8> = mag.iter().flat_map(|l| l.to_le_bytes()).collect();
        let m = num_bigint::BigInt::from_bytes_le(num_bigint::Sign::Plus, &bytes);
        if sign.is_negative() { -m } else { m }
    }

    #[test]
    fn and_matches_two_complement_identity() {
        // -1 & x == x for any non-negative x (all-ones AND identity).
        let (s, m) = twos_complement_combine(
            Sign::Negative, &[1],
            Sign::NonNegative, &[0xdead_beef, 1],
            |x, y| x & y, |x, y| x && y,
        );
        assert_eq!(s, Sign::NonNegative);
        assert_eq!(&m, &[0xdead_beef, 1]);
    }

    #[test]
    fn xor_self_is_zero() {
        let (s, m) = twos_complement_combine(
            Sign::Negative, &[7],
            Sign::Negative, &[7],
            |x, y| x ^ y, |x, y| x != y,
        );
        assert_eq!(s, Sign::NonNegative);
        assert!(m.iter().all(|&l| l == 0));
    }

    #[test]
    fn or_of_negatives_matches_oracle() {
        let (s, m) = twos_complement_combine(
            Sign::Negative, &[5],
            Sign::Negative, &[3],
            |x, y| x | y, |x, y| x || y,
        );
        let got = to_big(s, &m);
        let want = to_big(Sign::Negative, &[5]) | to_big(Sign::Negative, &[3]);
        assert_eq!(got, want);
    }

    #[test]
    fn test_bit_negative_is_infinite_ones_above_magnitude() {
        assert!(test_bit(Sign::Negative, &[1], 40));
        assert!(!test_bit(Sign::NonNegative, &[1], 40));
    }
}
