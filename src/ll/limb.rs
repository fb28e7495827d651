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

//! A single base-2^32 digit. Kept as a thin newtype (rather than bare `u32`)
//! so the carry/borrow-propagating primitives read as named operations at
//! every callsite in `ll::mul`/`ll::div`, the way the teacher crate's own
//! `Limb` did it -- minus the raw-pointer/asm calling convention, which has
//! no place in a stable, safe kernel.

use std::ops::{Add, Sub, Not, BitAnd, BitOr, BitXor};

pub const LIMB_BITS: u32 = u32::BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Limb(pub u32);

impl Limb {
    pub const ZERO: Limb = Limb(0);
    pub const ONE: Limb = Limb(1);
    pub const MAX: Limb = Limb(u32::MAX);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self + rhs`, returning `(low, carry)` where `carry` is 0 or 1.
    #[inline]
    pub fn add_overflow(self, rhs: Limb) -> (Limb, Limb) {
        let t = self.0 as u64 + rhs.0 as u64;
        (Limb(t as u32), Limb((t >> LIMB_BITS) as u32))
    }

    /// `self - rhs`, returning `(diff, borrow)` where `borrow` is 0 or 1.
    #[inline]
    pub fn sub_overflow(self, rhs: Limb) -> (Limb, Limb) {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        (Limb(diff), Limb(borrow as u32))
    }

    /// Full 32x32->64 product split into `(high, low)`.
    #[inline]
    pub fn mul_hilo(self, rhs: Limb) -> (Limb, Limb) {
        let t = self.0 as u64 * rhs.0 as u64;
        (Limb((t >> LIMB_BITS) as u32), Limb(t as u32))
    }

    #[inline]
    pub fn leading_zeros(self) -> u32 {
        self.0.leading_zeros()
    }

    #[inline]
    pub fn trailing_zeros(self) -> u32 {
        self.0.trailing_zeros()
    }

    #[inline]
    pub fn count_ones(self) -> u32 {
        hamming::weight(&self.0.to_le_bytes()) as u32
    }
}

impl Add for Limb {
    type Output = Limb;
    #[inline]
    fn add(self, rhs: Limb) -> Limb {
        Limb(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Limb {
    type Output = Limb;
    #[inline]
    fn sub(self, rhs: Limb) -> Limb {
        Limb(self.0.wrapping_sub(rhs.0))
    }
}

impl Not for Limb {
    type Output = Limb;
    #[inline]
    fn not(self) -> Limb {
        Limb(!self.0)
    }
}

impl BitAnd for Limb {
    type Output = Limb;
    #[inline]
    fn bitand(self, rhs: Limb) -> Limb {
        Limb(self.0 & rhs.0)
    }
}

impl BitOr for Limb {
    type Output = Limb;
    #[inline]
    fn bitor(self, rhs: Limb) -> Limb {
        Limb(self.0 | rhs.0)
    }
}

impl BitXor for Limb {
    type Output = Limb;
    #[inline]
    fn bitxor(self, rhs: Limb) -> Limb {
        Limb(self.0 ^ rhs.0)
    }
}

/// High 64 bits of `x * y`. The external-collaborator interface from
/// spec.md section 6 (`unsignedMulHi`), realized directly: a `u32 x u32`
/// widening multiply already produces the full product in a `u64`, so no
/// platform-specific wrapper is needed. Kept for 64-bit two-limb fast paths
/// in `ll::div`.
#[inline]
pub fn unsigned_mul_hi_u64(x: u64, y: u64) -> u64 {
    (((x as u128) * (y as u128)) >> 64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overflow_carries() {
        assert_eq!(Limb::MAX.add_overflow(Limb(1)), (Limb(0), Limb(1)));
        assert_eq!(Limb(1).add_overflow(Limb(1)), (Limb(2), Limb(0)));
    }

    #[test]
    fn sub_overflow_borrows() {
        assert_eq!(Limb(0).sub_overflow(Limb(1)), (Limb(u32::MAX), Limb(1)));
        assert_eq!(Limb(5).sub_overflow(Limb(3)), (Limb(2), Limb(0)));
    }

    #[test]
    fn mul_hilo_full_width() {
        let (hi, lo) = Limb::MAX.mul_hilo(Limb::MAX);
        let got = ((hi.0 as u64) << 32) | lo.0 as u64;
        let want = (u32::MAX as u64) * (u32::MAX as u64);
        assert_eq!(got, want);
    }
}
