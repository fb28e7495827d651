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

//! Multiplication and squaring of magnitudes.
//!
//! `mul` is schoolbook only: this design deliberately stops short of
//! Karatsuba/Toom for multiplication (non-goals rule out FFT/Toom-Cook
//! entirely, and the chosen split puts the divide-and-conquer budget into
//! `sqr` instead, where the symmetry pays for itself at every recursion
//! level). `sqr` dispatches tiny/schoolbook/Karatsuba by limb count.

use super::{incr, norm_len};

/// Below this, squaring dispatches through schoolbook multiplication of
/// `x` by itself -- not worth a specialized three-phase pass.
pub const SCHOOLBOOK_SQR_THRESHOLD: usize = 19;

/// At and above this, squaring recurses via Karatsuba.
pub const KARATSUBA_SQR_THRESHOLD: usize = 84;

/// `z[0..xLen+yLen] = x[0..xLen] * y[0..yLen]`. `z` must not alias `x` or
/// `y`. Returns the normalized result length.
pub fn mul(z: &mut [u32], x: &[u32], x_len: usize, y: &[u32], y_len: usize) -> usize {
    if x_len == 0 || y_len == 0 {
        return 0;
    }
    for l in z[..x_len + y_len].iter_mut() {
        *l = 0;
    }

    // First row: plain multiply (mul_1 in the teacher's naming).
    let mut carry = 0u64;
    let x0 = x[0] as u64;
    for j in 0..y_len {
        let t = x0 * y[j] as u64 + carry;
        z[j] = t as u32;
        carry = t >> 32;
    }
    z[y_len] = carry as u32;

    // Remaining rows: multiply-accumulate (addmul_1).
    for i in 1..x_len {
        let xi = x[i] as u64;
        let mut carry = 0u64;
        for j in 0..y_len {
            let t = z[i + j] as u64 + xi * y[j] as u64 + carry;
            z[i + j] = t as u32;
            carry = t >> 32;
        }
        incr(z, i + y_len, carry as u32);
    }

    norm_len(z, x_len + y_len)
}

/// `z[0..2*xLen] = x[0..xLen]^2`. `z` must not alias `x`. Dispatches by
/// limb count per spec.md 4.1.6; `scratch` is used only on the Karatsuba
/// path and may be empty otherwise.
pub fn sqr(z: &mut [u32], x: &[u32], x_len: usize, scratch: &mut [u32]) -> usize {
    match x_len {
        0 => 0,
        1 => {
            let sq = x[0] as u64 * x[0] as u64;
            z[0] = sq as u32;
            z[1] = (sq >> 32) as u32;
            norm_len(z, 2)
        }
        2 => {
            // Combine the two limbs into one u64 and square with a u128
            // intermediate, matching the "use mul_hi_u64 for a 128-bit
            // product" guidance for the 2-limb tiny case.
            let n = x[0] as u64 | ((x[1] as u64) << 32);
            let sq = n as u128 * n as u128;
            z[0] = sq as u32;
            z[1] = (sq >> 32) as u32;
            z[2] = (sq >> 64) as u32;
            z[3] = (sq >> 96) as u32;
            norm_len(z, 4)
        }
        n if n < SCHOOLBOOK_SQR_THRESHOLD => sqr_via_mul(z, x, n),
        n if n < KARATSUBA_SQR_THRESHOLD => sqr_schoolbook(z, x, n),
        n => sqr_karatsuba(z, x, n, scratch),
    }
}

/// Scratch length `sqr` needs for a given input length, to be allocated
/// once by the caller and reused across the whole recursion (a single
/// `Vec` carved up with offsets, never resized mid-recursion).
pub fn sqr_scratch_len(x_len: usize) -> usize {
    if x_len < KARATSUBA_SQR_THRESHOLD {
        0
    } else {
        let k0 = x_len / 2;
        let k1 = x_len - k0;
        // The z0/z2/ (x0+x1)^2 sub-squarings run sequentially, so they
        // share one scratch region; k1+1 (the `(x0+x1)` length) is always
        // the largest of the three sub-problems, so sizing for it alone
        // covers the others too.
        3 * (k1 + 1) + 3 + sqr_scratch_len(k1 + 1)
    }
}

fn sqr_via_mul(z: &mut [u32], x: &[u32], n: usize) -> usize {
    mul(z, x, n, x, n)
}

/// Three-phase schoolbook squaring: cross terms, doubling pass, diagonals.
fn sqr_schoolbook(z: &mut [u32], x: &[u32], n: usize) -> usize {
    for l in z[..2 * n].iter_mut() {
        *l = 0;
    }

    // Phase 1: accumulate cross terms x[i]*x[j] for i < j (each counted once).
    for i in 0..n - 1 {
        let xi = x[i] as u64;
        let mut carry = 0u64;
        for j in (i + 1)..n {
            let t = z[i + j] as u64 + xi * x[j] as u64 + carry;
            z[i + j] = t as u32;
            carry = t >> 32;
        }
        incr(z, i + n, carry as u32);
    }

    // Phase 2: double the accumulated cross-term vector in one pass.
    let mut carry = 0u32;
    for l in z[..2 * n].iter_mut() {
        let v = *l;
        *l = (v << 1) | carry;
        carry = v >> 31;
    }
    debug_assert_eq!(carry, 0, "cross-term doubling overflowed past 2n limbs");

    // Phase 3: add the diagonal terms x[i]^2, rippling carry into 2i/2i+1.
    for i in 0..n {
        let sq = x[i] as u64 * x[i] as u64;
        let lo = sq as u32;
        let hi = (sq >> 32) as u32;

        let (s0, c0) = z[2 * i].overflowing_add(lo);
        z[2 * i] = s0;
        let (s1, c1) = z[2 * i + 1].overflowing_add(hi);
        let (s1, c2) = s1.overflowing_add(c0 as u32);
        z[2 * i + 1] = s1;
        let carry_out = c1 as u32 + c2 as u32;
        if carry_out != 0 {
            incr(z, 2 * i + 2, carry_out);
        }
    }

    norm_len(z, 2 * n)
}

/// Karatsuba squaring: split `x` into `x1*(B^k0) + x0`, recursively square
/// each half, and derive the middle cross term `2*x0*x1` from
/// `(x0+x1)^2 - x0^2 - x1^2` instead of computing it directly.
fn sqr_karatsuba(z: &mut [u32], x: &[u32], n: usize, scratch: &mut [u32]) -> usize {
    let k0 = n / 2;
    let k1 = n - k0;

    let (x0, x1) = x.split_at(k0);

    // z0 = x0^2 (2*k0 limbs), z2 = x1^2 (2*k1 limbs), laid out directly in z.
    {
        let (z0, rest) = z.split_at_mut(2 * k0);
        let scratch_out_len = sqr_scratch_len(k0);
        sqr_rec(z0, x0, k0, &mut scratch[..scratch_out_len]);
        let z2 = &mut rest[..2 * k1];
        let scratch_out_len = sqr_scratch_len(k1);
        sqr_rec(z2, x1, k1, &mut scratch[..scratch_out_len]);
    }

    // s = x0 + x1, into scratch[0..k1+1].
    let (s, rest) = scratch.split_at_mut(k1 + 1);
    let s_len = super::add(s, x0, k0, x1, k1);
    for l in s[s_len..k1 + 1].iter_mut() {
        *l = 0;
    }

    // ss = s^2, into scratch[k1+1 .. k1+1+2*(k1+1)].
    let (ss, rest2) = rest.split_at_mut(2 * (k1 + 1));
    let nested_scratch_len = sqr_scratch_len(k1 + 1);
    sqr_rec(ss, s, k1 + 1, &mut rest2[..nested_scratch_len]);

    // z1 = ss - z0 - z1(=z2 part already in z) = 2*x0*x1, length up to 2*k1+2.
    let mid_len = 2 * (k1 + 1);
    let borrow1 = sub_in_place(&mut ss[..mid_len], z, 2 * k0);
    debug_assert!(!borrow1, "karatsuba sqr: ss - z0 underflowed");
    let borrow2 = sub_in_place(&mut ss[..mid_len], &z[2 * k0..2 * n], 2 * k1);
    debug_assert!(!borrow2, "karatsuba sqr: ss - z0 - z1 underflowed");

    // z[k0 .. k0 + mid_len] += z1
    let carry = add_in_place(&mut z[k0..], &ss[..mid_len]);
    incr(z, k0 + mid_len, carry);

    norm_len(z, 2 * n)
}

/// Used only by the Karatsuba split: squares via the full threshold
/// dispatch so sub-problems still get tiny-case/schoolbook/Karatsuba
/// treatment as their size dictates.
pub fn sqr_rec(z: &mut [u32], x: &[u32], x_len: usize, scratch: &mut [u32]) {
    sqr(z, x, x_len, scratch);
}

/// `a[0..n] -= b[0..n]` (n = b.len() effectively via the passed length),
/// in place, borrow propagated past `n`. Returns whether a borrow escaped
/// the top (an internal invariant violation if it ever does in Karatsuba).
fn sub_in_place(a: &mut [u32], b: &[u32], b_len: usize) -> bool {
    let mut borrow = 0i64;
    for i in 0..b_len {
        let t = a[i] as i64 - b[i] as i64 - borrow;
        if t < 0 {
            a[i] = (t + (1i64 << 32)) as u32;
            borrow = 1;
        } else {
            a[i] = t as u32;
            borrow = 0;
        }
    }
    let mut i = b_len;
    while borrow != 0 && i < a.len() {
        let t = a[i] as i64 - borrow;
        if t < 0 {
            a[i] = (t + (1i64 << 32)) as u32;
            borrow = 1;
        } else {
            a[i] = t as u32;
            borrow = 0;
        }
        i += 1;
    }
    borrow != 0
}

/// `a += b`, in place, returns the carry out of `a`'s top limb.
fn add_in_place(a: &mut [u32], b: &[u32]) -> u32 {
    let mut carry = 0u64;
    for i in 0..b.len() {
        let t = a[i] as u64 + b[i] as u64 + carry;
        a[i] = t as u32;
        carry = t >> 32;
    }
    carry as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_big(limbs: &[u32]) -> num_bigint::BigUint {
        let bytes: Vec<u8> = limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
        num_bigint::BigUint::from_bytes_le(&bytes)
    }

    fn from_big(v: &num_bigint::BigUint, len: usize) -> Vec<u32> {
        let digits = v.to_u32_digits();
        let mut out = digits;
        out.resize(len, 0);
        out
    }

    #[test]
    fn mul_matches_oracle_various_sizes() {
        for (xl, yl) in [(1, 1), (1, 5), (3, 1), (4, 4), (7, 3), (20, 20)] {
            let x: Vec<u32> = (0..xl).map(|i| 0x9e37_79b9u32.wrapping_mul(i as u32 + 1)).collect();
            let y: Vec<u32> = (0..yl).map(|i| 0x85eb_ca6bu32.wrapping_mul(i as u32 + 7)).collect();
            let mut z = vec![0u32; xl + yl];
            let len = mul(&mut z, &x, xl, &y, yl);
            let want = to_big(&x) * to_big(&y);
            assert_eq!(from_big(&want, len), &z[..len], "xl={xl} yl={yl}");
        }
    }

    fn check_sqr(n: usize) {
        let x: Vec<u32> = (0..n).map(|i| 0x2545_f491u32.wrapping_mul(i as u32 * 7 + 3)).collect();
        let mut z = vec![0u32; 2 * n + 8];
        let mut scratch = vec![0u32; sqr_scratch_len(n) + 8];
        let len = sqr(&mut z, &x, n, &mut scratch);
        let want = to_big(&x) * to_big(&x);
        assert_eq!(from_big(&want, len.max(1)), &z[..len.max(1)], "n={n}");
    }

    #[test]
    fn sqr_tiny_cases() {
        for n in 0..=4 {
            check_sqr(n);
        }
    }

    #[test]
    fn sqr_schoolbook_band() {
        for n in [5, 10, 18] {
            check_sqr(n);
        }
    }

    #[test]
    fn sqr_karatsuba_band() {
        for n in [84, 85, 130, 200, 257] {
            check_sqr(n);
        }
    }

    #[test]
    fn sqr_equals_mul_self() {
        for n in [1, 2, 19, 50, 90, 150] {
            let x: Vec<u32> = (0..n).map(|i| 0xdead_beefu32.wrapping_mul(i as u32 + 1)).collect();
            let mut via_sqr = vec![0u32; 2 * n];
            let mut scratch = vec![0u32; sqr_scratch_len(n)];
            let sqr_len = sqr(&mut via_sqr, &x, n, &mut scratch);

            let mut via_mul = vec![0u32; 2 * n];
            let mul_len = mul(&mut via_mul, &x, n, &x, n);

            assert_eq!(sqr_len, mul_len, "n={n}");
            assert_eq!(&via_sqr[..sqr_len], &via_mul[..mul_len], "n={n}");
        }
    }
}
