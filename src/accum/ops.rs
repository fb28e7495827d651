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

//! Arithmetic, bitwise and shift mutators for [`Accum`], plus the operator
//! trait impls built on top of them.
//!
//! Two shapes coexist here, because Rust's borrow checker (unlike the
//! language-neutral description in spec.md 4.3) does not let a `&mut self`
//! method also take a live `&self` reference to the same binding:
//!
//! - The general two-operand `set_*(a, b)` form takes `&dyn Operand` for
//!   both sides, so `a`/`b` can independently be an `Int` or another
//!   `Accum`. These can never alias `self` -- the borrow checker rejects
//!   `acc.set_add(&acc, &b)` at the call site -- so they read `a`/`b`
//!   freely while writing into `self.scratch1`, then swap it into `mag`.
//! - The `self op self` cases (`setMul(self,self)`, `self %= self`, ...)
//!   have no second live reference at all: `sqr_assign` etc. read
//!   `self.mag` and write `self.scratch1`/`self.scratch2` as three
//!   disjoint fields of the same struct, which Rust permits directly.
//!
//! Both shapes funnel through the same "compute into scratch, then swap"
//! discipline, so neither needs to special-case aliasing.

use super::{Accum, Operand};
use crate::error::Error;
use crate::int::Int;
use crate::ll;
use crate::sign::Sign;
use crate::stats::{Event, ResizeContext};
use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

impl Accum {
    #[inline]
    fn record_op(&self, name: &'static str) {
        self.stats.record(Event::Operation(name));
    }

    fn commit(&mut self, sign: Sign, len: usize) {
        std::mem::swap(&mut self.mag, &mut self.scratch1);
        self.len = len;
        self.sign = if len == 0 { Sign::NonNegative } else { sign };
    }

    fn signed_combine(
        &mut self,
        op_tag: &'static str,
        ctx: ResizeContext,
        a_sign: Sign,
        a_mag: &[u32],
        b_sign: Sign,
        b_mag: &[u32],
    ) {
        self.record_op(op_tag);
        if a_sign == b_sign {
            let needed = a_mag.len().max(b_mag.len()) + 1;
            self.grow_scratch1(needed, ctx);
            let len = ll::add(&mut self.scratch1, a_mag, a_mag.len(), b_mag, b_mag.len());
            self.commit(a_sign, len);
        } else {
            let (big, big_len, big_sign, small, small_len) =
                match ll::cmp(a_mag, a_mag.len(), b_mag, b_mag.len()) {
                    Ordering::Less => (b_mag, b_mag.len(), b_sign, a_mag, a_mag.len()),
                    _ => (a_mag, a_mag.len(), a_sign, b_mag, b_mag.len()),
                };
            self.grow_scratch1(big_len.max(1), ctx);
            let len = ll::sub(&mut self.scratch1, big, big_len, small, small_len);
            self.commit(big_sign, len);
        }
    }

    /// `self = a + b`.
    pub fn set_add(&mut self, a: &dyn Operand, b: &dyn Operand) {
        self.signed_combine("add", ResizeContext::Add, a.op_sign(), a.op_magnitude(), b.op_sign(), b.op_magnitude());
    }

    /// `self = a - b`.
    pub fn set_sub(&mut self, a: &dyn Operand, b: &dyn Operand) {
        self.signed_combine("sub", ResizeContext::Sub, a.op_sign(), a.op_magnitude(), b.op_sign().negate(), b.op_magnitude());
    }

    /// `self = a * b`.
    pub fn set_mul(&mut self, a: &dyn Operand, b: &dyn Operand) {
        self.record_op("mul");
        let (a_sign, a_mag) = (a.op_sign(), a.op_magnitude());
        let (b_sign, b_mag) = (b.op_sign(), b.op_magnitude());
        if a_mag.is_empty() || b_mag.is_empty() {
            self.commit(Sign::NonNegative, 0);
            return;
        }
        self.grow_scratch1(a_mag.len() + b_mag.len(), ResizeContext::Mul);
        let len = ll::mul::mul(&mut self.scratch1, a_mag, a_mag.len(), b_mag, b_mag.len());
        self.commit(a_sign.xor(b_sign), len);
    }

    /// `self = a^2`.
    pub fn set_sqr(&mut self, a: &dyn Operand) {
        self.record_op("sqr");
        let a_mag = a.op_magnitude();
        let n = a_mag.len();
        self.grow_scratch1((2 * n).max(1), ResizeContext::Sqr);
        let scratch_len = ll::mul::sqr_scratch_len(n);
        self.grow_scratch2(scratch_len, ResizeContext::Sqr);
        let len = ll::mul::sqr(&mut self.scratch1, a_mag, n, &mut self.scratch2[..scratch_len]);
        self.commit(Sign::NonNegative, len);
    }

    /// `self = self^2`. The dedicated self-aliasing form of [`set_sqr`]:
    /// expressible in safe Rust because it takes no second live reference.
    pub fn sqr_assign(&mut self) {
        self.record_op("sqr");
        let n = self.len;
        self.grow_scratch1((2 * n).max(1), ResizeContext::Sqr);
        let scratch_len = ll::mul::sqr_scratch_len(n);
        self.grow_scratch2(scratch_len, ResizeContext::Sqr);
        let len = ll::mul::sqr(&mut self.scratch1, &self.mag[..n], n, &mut self.scratch2[..scratch_len]);
        self.commit(Sign::NonNegative, len);
    }

    fn divide(&mut self, a: &dyn Operand, b: &dyn Operand, want_quotient: bool) -> Result<(), Error> {
        let (a_sign, a_mag) = (a.op_sign(), a.op_magnitude());
        let (b_sign, b_mag) = (b.op_sign(), b.op_magnitude());
        if b_mag.is_empty() {
            return Err(Error::DivideByZero);
        }
        let a_len = a_mag.len();
        let b_len = b_mag.len();
        if a_len < b_len {
            if want_quotient {
                self.commit(Sign::NonNegative, 0);
            } else {
                self.grow_scratch1(a_len.max(1), ResizeContext::Rem);
                self.scratch1[..a_len].copy_from_slice(a_mag);
                self.commit(a_sign, a_len);
            }
            return Ok(());
        }

        let mut q = vec![0u32; a_len - b_len + 1];
        let mut r = vec![0u32; b_len];
        let mut su = Vec::new();
        let mut sv = Vec::new();
        let (q_len, r_len) = ll::div::div_rem(&mut q, &mut r, a_mag, a_len, b_mag, b_len, &mut su, &mut sv);

        if want_quotient {
            self.grow_scratch1(q_len.max(1), ResizeContext::Div);
            self.scratch1[..q_len].copy_from_slice(&q[..q_len]);
            self.commit(a_sign.xor(b_sign), q_len);
        } else {
            self.grow_scratch1(r_len.max(1), ResizeContext::Rem);
            self.scratch1[..r_len].copy_from_slice(&r[..r_len]);
            self.commit(a_sign, r_len);
        }
        Ok(())
    }

    /// `self = a / b`, truncating toward zero. `Err(Error::DivideByZero)`
    /// if `b` is zero.
    pub fn set_div(&mut self, a: &dyn Operand, b: &dyn Operand) -> Result<(), Error> {
        self.record_op("div");
        self.divide(a, b, true)
    }

    /// `self = a % b`, sign of the result follows `a` (truncating
    /// division's remainder), per spec.md 4.2.
    pub fn set_rem(&mut self, a: &dyn Operand, b: &dyn Operand) -> Result<(), Error> {
        self.record_op("rem");
        self.divide(a, b, false)
    }

    /// `self = a mod b`, the non-negative residue (`0 <= self < |b|`).
    /// `Err(Error::NegativeModulus)` if `b <= 0`.
    pub fn set_mod(&mut self, a: &dyn Operand, b: &dyn Operand) -> Result<(), Error> {
        self.record_op("mod");
        if b.op_sign().is_negative() || b.op_magnitude().is_empty() {
            return Err(Error::NegativeModulus);
        }
        self.divide(a, b, false)?;
        if self.sign.is_negative() && !self.is_zero() {
            // truncated remainder is negative: the least non-negative
            // residue is |b| - |rem|, not |rem| + |b|.
            let b_mag = b.op_magnitude();
            self.grow_scratch1(b_mag.len().max(1), ResizeContext::Rem);
            let len = ll::sub(&mut self.scratch1, b_mag, b_mag.len(), &self.mag[..self.len], self.len);
            self.commit(Sign::NonNegative, len);
        }
        Ok(())
    }

    /// `self = base^exp`, `exp` a non-negative `Int`, via binary
    /// exponentiation (square-and-multiply). `Err` if `exp` is negative.
    pub fn set_pow(&mut self, base: &dyn Operand, exp: &Int) -> Result<(), Error> {
        self.record_op("pow");
        if exp.is_negative() {
            return Err(Error::NegativeExponent);
        }
        let bit_len = exp.magnitude_bit_len();
        self.set_primitive(1u32);
        if bit_len == 0 {
            return Ok(());
        }
        let mut running = Accum::new();
        running.set_accum_from_operand(base);
        for i in 0..bit_len {
            if exp.test_bit(i as i64).unwrap_or(false) {
                let result_snapshot = self.to_int();
                self.set_mul(&result_snapshot, &running);
            }
            if i + 1 < bit_len {
                running.sqr_assign();
            }
        }
        Ok(())
    }

    fn set_accum_from_operand(&mut self, a: &dyn Operand) {
        self.grow_main(a.op_magnitude().len(), ResizeContext::Other);
        self.mag[..a.op_magnitude().len()].copy_from_slice(a.op_magnitude());
        self.len = a.op_magnitude().len();
        self.sign = if self.len == 0 { Sign::NonNegative } else { a.op_sign() };
    }

    /// `self = a << amount`. `Err` if `amount` is negative.
    pub fn set_shl(&mut self, a: &dyn Operand, amount: i64) -> Result<(), Error> {
        self.record_op("shl");
        if amount < 0 {
            return Err(Error::OutOfDomain("shift amount must be non-negative".into()));
        }
        let a_mag = a.op_magnitude();
        let needed = ll::bit::shl_limbs_needed(a_mag.len(), amount as u32);
        self.grow_scratch1(needed, ResizeContext::Shift);
        let len = ll::bit::shl(&mut self.scratch1, a_mag, a_mag.len(), amount as u32);
        self.commit(a.op_sign(), len);
        Ok(())
    }

    /// `self = a >> amount`, floor division semantics (arithmetic shift:
    /// rounds toward negative infinity for negative `a`, matching
    /// `Int::shr`). `Err` if `amount` is negative.
    pub fn set_shr(&mut self, a: &dyn Operand, amount: i64) -> Result<(), Error> {
        self.record_op("shr");
        if amount < 0 {
            return Err(Error::OutOfDomain("shift amount must be non-negative".into()));
        }
        let a_sign = a.op_sign();
        let a_mag = a.op_magnitude();
        // Floor toward negative infinity: a truncating shr of the magnitude
        // rounds toward zero, so a negative operand with any dropped
        // one-bit needs the result nudged away from zero by one.
        let needs_round_up = a_sign.is_negative()
            && ll::bit::count_trailing_zero_bits(a_mag, a_mag.len())
                .map(|tz| (tz as i64) < amount)
                .unwrap_or(false);
        self.grow_scratch1(a_mag.len().max(1) + 1, ResizeContext::Shift);
        let mut len = ll::bit::shr(&mut self.scratch1, a_mag, a_mag.len(), amount as u32);
        if needs_round_up {
            self.scratch1[len] = 0;
            let carry = ll::incr(&mut self.scratch1[..len + 1], 0, 1);
            debug_assert_eq!(carry, 0, "shr round-up overflowed its headroom limb");
            len = ll::norm_len(&self.scratch1, len + 1);
        }
        self.commit(a_sign, len);
        Ok(())
    }

    /// Unsigned right shift. For arbitrary-precision integers there is no
    /// fixed bit width to shift zeros into from the top, so this coincides
    /// with [`set_shr`] -- see DESIGN.md.
    pub fn set_ushr(&mut self, a: &dyn Operand, amount: i64) -> Result<(), Error> {
        self.set_shr(a, amount)
    }

    /// `self = a & b`, two's-complement semantics.
    pub fn set_and(&mut self, a: &dyn Operand, b: &dyn Operand) {
        self.record_op("and");
        let (sign, mag) = crate::int::bitops::twos_complement_combine(
            a.op_sign(), a.op_magnitude(), b.op_sign(), b.op_magnitude(),
            |x, y| x & y, |x, y| x && y,
        );
        self.grow_scratch1(mag.len().max(1), ResizeContext::Bitwise);
        self.scratch1[..mag.len()].copy_from_slice(&mag);
        self.commit(sign, mag.len());
    }

    /// `self = a | b`, two's-complement semantics.
    pub fn set_or(&mut self, a: &dyn Operand, b: &dyn Operand) {
        self.record_op("or");
        let (sign, mag) = crate::int::bitops::twos_complement_combine(
            a.op_sign(), a.op_magnitude(), b.op_sign(), b.op_magnitude(),
            |x, y| x | y, |x, y| x || y,
        );
        self.grow_scratch1(mag.len().max(1), ResizeContext::Bitwise);
        self.scratch1[..mag.len()].copy_from_slice(&mag);
        self.commit(sign, mag.len());
    }

    /// `self = a ^ b`, two's-complement semantics.
    pub fn set_xor(&mut self, a: &dyn Operand, b: &dyn Operand) {
        self.record_op("xor");
        let (sign, mag) = crate::int::bitops::twos_complement_combine(
            a.op_sign(), a.op_magnitude(), b.op_sign(), b.op_magnitude(),
            |x, y| x ^ y, |x, y| x != y,
        );
        self.grow_scratch1(mag.len().max(1), ResizeContext::Bitwise);
        self.scratch1[..mag.len()].copy_from_slice(&mag);
        self.commit(sign, mag.len());
    }

    /// `self = !a`, i.e. `-(a + 1)`.
    pub fn set_not(&mut self, a: &dyn Operand) {
        self.record_op("not");
        let one = Int::from(1u32);
        self.signed_combine("not", ResizeContext::Bitwise, a.op_sign(), a.op_magnitude(), one.sign(), one.magnitude());
        self.sign = self.sign.negate();
        if self.is_zero() {
            self.sign = Sign::NonNegative;
        }
    }

    pub fn negate_assign(&mut self) {
        if !self.is_zero() {
            self.sign = self.sign.negate();
        }
    }

    pub fn abs_assign(&mut self) {
        self.sign = Sign::NonNegative;
    }

    /// `self += |x|`.
    pub fn add_abs_value_of(&mut self, x: &Int) {
        let a_sign = self.sign;
        let a_mag: Vec<u32> = self.mag[..self.len].to_vec();
        self.signed_combine("add_abs", ResizeContext::Add, a_sign, &a_mag, Sign::NonNegative, x.magnitude());
    }

    /// `self += x^2`.
    pub fn add_square_of(&mut self, x: &Int) {
        let a_sign = self.sign;
        let a_mag: Vec<u32> = self.mag[..self.len].to_vec();
        let mut sq = Accum::new();
        sq.set_sqr(x);
        self.signed_combine("add_sqr", ResizeContext::Add, a_sign, &a_mag, sq.sign, &sq.mag[..sq.len]);
    }
}

impl AddAssign<&Int> for Accum {
    fn add_assign(&mut self, rhs: &Int) {
        self.record_op("add");
        let a_sign = self.sign;
        let a_mag: Vec<u32> = self.mag[..self.len].to_vec();
        self.signed_combine("add", ResizeContext::Add, a_sign, &a_mag, rhs.sign(), rhs.magnitude());
    }
}

impl AddAssign<&Accum> for Accum {
    fn add_assign(&mut self, rhs: &Accum) {
        self.record_op("add");
        let a_sign = self.sign;
        let a_mag: Vec<u32> = self.mag[..self.len].to_vec();
        self.signed_combine("add", ResizeContext::Add, a_sign, &a_mag, rhs.sign, &rhs.mag[..rhs.len]);
    }
}

impl SubAssign<&Int> for Accum {
    fn sub_assign(&mut self, rhs: &Int) {
        let a_sign = self.sign;
        let a_mag: Vec<u32> = self.mag[..self.len].to_vec();
        self.signed_combine("sub", ResizeContext::Sub, a_sign, &a_mag, rhs.sign().negate(), rhs.magnitude());
    }
}

impl SubAssign<&Accum> for Accum {
    fn sub_assign(&mut self, rhs: &Accum) {
        let a_sign = self.sign;
        let a_mag: Vec<u32> = self.mag[..self.len].to_vec();
        self.signed_combine("sub", ResizeContext::Sub, a_sign, &a_mag, rhs.sign.negate(), &rhs.mag[..rhs.len]);
    }
}

impl MulAssign<&Int> for Accum {
    fn mul_assign(&mut self, rhs: &Int) {
        let snapshot = self.to_int();
        self.set_mul(&snapshot, rhs);
    }
}

impl MulAssign<&Accum> for Accum {
    fn mul_assign(&mut self, rhs: &Accum) {
        let snapshot = self.to_int();
        self.set_mul(&snapshot, rhs);
    }
}

impl DivAssign<&Int> for Accum {
    fn div_assign(&mut self, rhs: &Int) {
        let snapshot = self.to_int();
        self.set_div(&snapshot, rhs).expect("division by zero");
    }
}

impl DivAssign<&Accum> for Accum {
    fn div_assign(&mut self, rhs: &Accum) {
        let snapshot = self.to_int();
        self.set_div(&snapshot, rhs).expect("division by zero");
    }
}

impl RemAssign<&Int> for Accum {
    fn rem_assign(&mut self, rhs: &Int) {
        let snapshot = self.to_int();
        self.set_rem(&snapshot, rhs).expect("division by zero");
    }
}

impl RemAssign<&Accum> for Accum {
    fn rem_assign(&mut self, rhs: &Accum) {
        let snapshot = self.to_int();
        self.set_rem(&snapshot, rhs).expect("division by zero");
    }
}

impl BitAndAssign<&Int> for Accum {
    fn bitand_assign(&mut self, rhs: &Int) {
        let snapshot = self.to_int();
        self.set_and(&snapshot, rhs);
    }
}

impl BitOrAssign<&Int> for Accum {
    fn bitor_assign(&mut self, rhs: &Int) {
        let snapshot = self.to_int();
        self.set_or(&snapshot, rhs);
    }
}

impl BitXorAssign<&Int> for Accum {
    fn bitxor_assign(&mut self, rhs: &Int) {
        let snapshot = self.to_int();
        self.set_xor(&snapshot, rhs);
    }
}

impl ShlAssign<u32> for Accum {
    fn shl_assign(&mut self, amount: u32) {
        let snapshot = self.to_int();
        self.set_shl(&snapshot, amount as i64).expect("non-negative shift");
    }
}

impl ShrAssign<u32> for Accum {
    fn shr_assign(&mut self, amount: u32) {
        let snapshot = self.to_int();
        self.set_shr(&snapshot, amount as i64).expect("non-negative shift");
    }
}

impl Neg for Accum {
    type Output = Accum;
    fn neg(mut self) -> Accum {
        self.negate_assign();
        self
    }
}

impl Add<&Int> for Accum {
    type Output = Accum;
    fn add(mut self, rhs: &Int) -> Accum {
        self += rhs;
        self
    }
}

impl Sub<&Int> for Accum {
    type Output = Accum;
    fn sub(mut self, rhs: &Int) -> Accum {
        self -= rhs;
        self
    }
}

impl Mul<&Int> for Accum {
    type Output = Accum;
    fn mul(mut self, rhs: &Int) -> Accum {
        self *= rhs;
        self
    }
}

impl Div<&Int> for Accum {
    type Output = Accum;
    fn div(mut self, rhs: &Int) -> Accum {
        self /= rhs;
        self
    }
}

impl Rem<&Int> for Accum {
    type Output = Accum;
    fn rem(mut self, rhs: &Int) -> Accum {
        self %= rhs;
        self
    }
}

impl BitAnd<&Int> for Accum {
    type Output = Accum;
    fn bitand(mut self, rhs: &Int) -> Accum {
        self &= rhs;
        self
    }
}

impl BitOr<&Int> for Accum {
    type Output = Accum;
    fn bitor(mut self, rhs: &Int) -> Accum {
        self |= rhs;
        self
    }
}

impl BitXor<&Int> for Accum {
    type Output = Accum;
    fn bitxor(mut self, rhs: &Int) -> Accum {
        self ^= rhs;
        self
    }
}

impl Shl<u32> for Accum {
    type Output = Accum;
    fn shl(mut self, amount: u32) -> Accum {
        self <<= amount;
        self
    }
}

impl Shr<u32> for Accum {
    type Output = Accum;
    fn shr(mut self, amount: u32) -> Accum {
        self >>= amount;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_self_to_self_doubles() {
        let mut a = Accum::new();
        a.set(&Int::from(21i64));
        let rhs = a.to_int();
        a += &rhs;
        assert_eq!(a.to_int(), Int::from(42i64));
    }

    #[test]
    fn sqr_assign_matches_mul() {
        let mut a = Accum::new();
        a.set(&Int::from(13i64));
        a.sqr_assign();
        assert_eq!(a.to_int(), Int::from(169i64));
    }

    #[test]
    fn div_and_rem_truncate_toward_zero() {
        let mut a = Accum::new();
        a.set_div(&Int::from(-7i64), &Int::from(2i64)).unwrap();
        assert_eq!(a.to_int(), Int::from(-3i64));
        let mut r = Accum::new();
        r.set_rem(&Int::from(-7i64), &Int::from(2i64)).unwrap();
        assert_eq!(r.to_int(), Int::from(-1i64));
    }

    #[test]
    fn mod_is_non_negative() {
        let mut m = Accum::new();
        m.set_mod(&Int::from(-7i64), &Int::from(2i64)).unwrap();
        assert_eq!(m.to_int(), Int::from(1i64));
    }

    #[test]
    fn mod_with_non_positive_modulus_is_an_error() {
        let mut m = Accum::new();
        assert!(matches!(m.set_mod(&Int::from(7i64), &Int::from(-2i64)), Err(Error::NegativeModulus)));
        assert!(matches!(m.set_mod(&Int::from(7i64), &Int::from(0i64)), Err(Error::NegativeModulus)));
    }

    #[test]
    fn div_by_zero_is_an_error() {
        let mut a = Accum::new();
        assert_eq!(a.set_div(&Int::from(1i64), &Int::from(0i64)), Err(Error::DivideByZero));
    }

    #[test]
    fn pow_matches_repeated_mul() {
        let mut a = Accum::new();
        a.set_pow(&Int::from(3i64), &Int::from(5i64)).unwrap();
        assert_eq!(a.to_int(), Int::from(243i64));
    }

    #[test]
    fn shr_floors_toward_negative_infinity() {
        let mut a = Accum::new();
        a.set_shr(&Int::from(-5i64), 1).unwrap();
        assert_eq!(a.to_int(), Int::from(-3i64));
    }
}
