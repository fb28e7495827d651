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

//! Division of magnitudes, via Knuth's Algorithm D (TAOCP vol. 2, 4.3.1)
//! with linear-scan fast paths for one- and two-limb divisors.
//!
//! `div_rem` takes the two scratch buffers it needs to normalize the
//! operands into (`scratch_u`, `scratch_v`) from the caller, so that an
//! `Accum` can pass its own `scratch1`/`scratch2` and amortize the
//! allocation across a loop, per spec.md 4.3's capacity-reuse contract.
//! `ll` itself stays a pure function: it only ever grows the buffers it's
//! handed, never shrinks or allocates new ones behind the caller's back.

use super::norm_len;

fn ensure_len(buf: &mut Vec<u32>, len: usize) {
    if buf.len() < len {
        buf.resize(len, 0);
    }
}

/// `q = u / v`, `r = u % v`, for normalized `u[0..uLen]`, `v[0..vLen]`
/// with `v[vLen-1] != 0`. `q` must have room for `uLen - vLen + 1` limbs
/// when `uLen >= vLen`; `r` must have room for `vLen` limbs. Returns
/// `(qLen, rLen)`. Caller must ensure `v_len > 0`.
pub fn div_rem(
    q: &mut [u32],
    r: &mut [u32],
    u: &[u32],
    u_len: usize,
    v: &[u32],
    v_len: usize,
    scratch_u: &mut Vec<u32>,
    scratch_v: &mut Vec<u32>,
) -> (usize, usize) {
    debug_assert!(v_len > 0 && v[v_len - 1] != 0, "divisor must be normalized and nonzero");

    if u_len < v_len {
        r[..u_len].copy_from_slice(&u[..u_len]);
        return (0, norm_len(r, u_len));
    }

    if v_len == 1 {
        let rem = div_rem_by_limb(q, u, u_len, v[0]);
        r[0] = rem;
        return (norm_len(q, u_len), if rem != 0 { 1 } else { 0 });
    }

    if v_len == 2 {
        let rem = div_rem_by_two_limbs(q, u, u_len, [v[0], v[1]]);
        r[0] = rem[0];
        r[1] = rem[1];
        return (norm_len(q, u_len - 1), norm_len(r, 2));
    }

    knuth_d(q, r, u, u_len, v, v_len, scratch_u, scratch_v)
}

/// `u / v` where `v` is a single limb, via a linear scan with native `u64`
/// division. Returns the remainder.
fn div_rem_by_limb(q: &mut [u32], u: &[u32], u_len: usize, v: u32) -> u32 {
    let v = v as u64;
    let mut rem = 0u64;
    for i in (0..u_len).rev() {
        let cur = (rem << 32) | u[i] as u64;
        q[i] = (cur / v) as u32;
        rem = cur % v;
    }
    rem as u32
}

/// `u / v` where `v` is two limbs (treated as a `u64`), via a linear scan
/// maintaining a `u128` running remainder -- "a software 128-bit-by-64-bit
/// division primitive", realized with the native widening integer type
/// rather than a hand-rolled soft-division loop. Returns the two-limb
/// remainder.
fn div_rem_by_two_limbs(q: &mut [u32], u: &[u32], u_len: usize, v: [u32; 2]) -> [u32; 2] {
    let vv = v[0] as u128 | ((v[1] as u128) << 32);
    let mut rem = 0u128;
    for i in (0..u_len).rev() {
        rem = (rem << 32) | u[i] as u128;
        let q_digit = (rem / vv) as u32;
        rem -= q_digit as u128 * vv;
        if i >= 1 {
            q[i - 1] = q_digit;
        }
    }
    [(rem & 0xffff_ffff) as u32, (rem >> 32) as u32]
}

/// General case, Knuth's Algorithm D, for divisors of 3+ limbs.
fn knuth_d(
    q: &mut [u32],
    r: &mut [u32],
    u: &[u32],
    u_len: usize,
    v: &[u32],
    v_len: usize,
    scratch_u: &mut Vec<u32>,
    scratch_v: &mut Vec<u32>,
) -> (usize, usize) {
    let n = v_len;
    let m = u_len - v_len;
    let s = v[n - 1].leading_zeros();

    ensure_len(scratch_v, n + 1);
    let vn = &mut scratch_v[..n + 1];
    let vn_len = super::bit::shl(vn, v, n, s);
    debug_assert_eq!(vn_len, n, "normalizing the divisor must not change its limb count");

    ensure_len(scratch_u, u_len + 1);
    let un = &mut scratch_u[..u_len + 1];
    un[u_len] = 0;
    let shifted_len = super::bit::shl(un, u, u_len, s);
    for limb in un[shifted_len..u_len + 1].iter_mut() {
        *limb = 0;
    }

    let vn = &scratch_v[..n];

    for j in (0..=m).rev() {
        let un = &mut scratch_u[..u_len + 1];

        // Estimate qhat from the top two (or three) limbs.
        let top = ((un[j + n] as u64) << 32) | un[j + n - 1] as u64;
        let mut qhat = (top / vn[n - 1] as u64).min(u32::MAX as u64);
        let mut rhat = top - qhat * vn[n - 1] as u64;

        while rhat <= u32::MAX as u64
            && qhat * vn[n - 2] as u64 > (rhat << 32) | un[j + n - 2] as u64
        {
            qhat -= 1;
            rhat += vn[n - 1] as u64;
        }

        // Multiply-subtract v*qhat from un[j..j+n+1].
        let mut borrow: i64 = 0;
        let mut carry: u64 = 0;
        for i in 0..n {
            let p = qhat * vn[i] as u64 + carry;
            carry = p >> 32;
            let sub = un[j + i] as i64 - (p as u32) as i64 - borrow;
            if sub < 0 {
                un[j + i] = (sub + (1i64 << 32)) as u32;
                borrow = 1;
            } else {
                un[j + i] = sub as u32;
                borrow = 0;
            }
        }
        let sub = un[j + n] as i64 - carry as i64 - borrow;
        let top_borrow = if sub < 0 {
            un[j + n] = (sub + (1i64 << 32)) as u32;
            true
        } else {
            un[j + n] = sub as u32;
            false
        };

        if top_borrow {
            // qhat was one too large: add v back once and decrement qhat.
            qhat -= 1;
            let mut carry = 0u64;
            for i in 0..n {
                let t = un[j + i] as u64 + vn[i] as u64 + carry;
                un[j + i] = t as u32;
                carry = t >> 32;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u32);
        }

        q[j] = qhat as u32;
    }

    // Unnormalize the remainder.
    let un = &scratch_u[..n];
    super::bit::shr(r, un, n, s);

    (norm_len(q, m + 1), norm_len(r, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_big(limbs: &[u32]) -> num_bigint::BigUint {
        let bytes: Vec<u8> = limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
        num_bigint::BigUint::from_bytes_le(&bytes)
    }

    fn from_big(v: &num_bigint::BigUint, len: usize) -> Vec<u32> {
        let mut digits = v.to_u32_digits();
        digits.resize(len, 0);
        digits
    }

    fn check(u: &[u32], v: &[u32]) {
        let u_len = norm_len(u, u.len());
        let v_len = norm_len(v, v.len());
        let mut q = vec![0u32; u_len + 1];
        let mut r = vec![0u32; v_len + 1];
        let mut su = Vec::new();
        let mut sv = Vec::new();
        let (q_len, r_len) = div_rem(&mut q, &mut r, u, u_len, v, v_len, &mut su, &mut sv);

        let bu = to_big(u);
        let bv = to_big(v);
        let want_q = &bu / &bv;
        let want_r = &bu % &bv;
        assert_eq!(from_big(&want_q, q_len.max(1)), &q[..q_len.max(1)]);
        assert_eq!(from_big(&want_r, r_len.max(1)), &r[..r_len.max(1)]);
    }

    #[test]
    fn one_limb_divisor() {
        check(&[0xffff_ffff, 0x1234_5678, 7], &[3]);
        check(&[5], &[9]);
    }

    #[test]
    fn two_limb_divisor() {
        check(&[0xffff_ffff, 0x1234_5678, 0xaaaa_bbbb, 7], &[0x1111_1111, 2]);
    }

    #[test]
    fn knuth_general_case() {
        let u: Vec<u32> = (0..10).map(|i| 0x9e37_79b9u32.wrapping_mul(i + 1)).collect();
        let v: Vec<u32> = (0..4).map(|i| 0x85eb_ca6bu32.wrapping_mul(i + 3)).collect();
        check(&u, &v);
    }

    #[test]
    fn divisor_needs_normalization() {
        // top limb of v has many leading zero bits
        let u: Vec<u32> = (0..8).map(|i| 0xdead_beefu32.wrapping_mul(i + 1)).collect();
        let v = [0x1111_1111, 0x2222_2222, 0x0000_0003];
        check(&u, &v);
    }

    #[test]
    fn dividend_shorter_than_divisor() {
        check(&[5, 1], &[0, 0, 1]);
    }
}
