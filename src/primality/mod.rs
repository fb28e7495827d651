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

//! Baillie-PSW probable-primality testing (spec.md §4.5.1) and modular
//! inverse. Trial division by small primes, then deterministic Miller-Rabin
//! over a fixed base set, then a strong Lucas test -- no counterexample to
//! this combination is known.

pub mod modinv;

pub use modinv::mod_inv;

use crate::error::Error;
use crate::int::Int;
use crate::modular::jacobi;
use crate::modular::ModContext;

const SMALL_PRIMES: [u32; 65] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317,
];

const MR_BASES: [u64; 7] = [2, 325, 9375, 28178, 450775, 9780504, 1795265022];

/// `Err(NegativeInput)` for negative `n`. Deterministic for every `n` this
/// crate can represent in practice: the seven Miller-Rabin bases above are
/// known-correct for all `n < 3.3 * 10^24`, and no Baillie-PSW
/// counterexample has ever been found beyond that.
pub fn is_probable_prime(n: &Int) -> Result<bool, Error> {
    if n.is_negative() {
        return Err(Error::NegativeInput);
    }
    if *n <= Int::one() {
        return Ok(false);
    }
    if *n == Int::from(2u32) || *n == Int::from(3u32) {
        return Ok(true);
    }
    if !n.test_bit(0)? {
        return Ok(false);
    }
    for &p in SMALL_PRIMES.iter() {
        let p_int = Int::from(p);
        if *n == p_int {
            return Ok(true);
        }
        if n.checked_rem(&p_int)?.is_zero() {
            return Ok(false);
        }
    }
    if !miller_rabin(n)? {
        return Ok(false);
    }
    strong_lucas(n)
}

fn miller_rabin(n: &Int) -> Result<bool, Error> {
    let n_minus_1 = n - &Int::one();
    let s = n_minus_1.count_trailing_zero_bits().unwrap_or(0);
    let d = n_minus_1.shr(s as i64)?;
    let ctx = ModContext::new(n.clone())?;

    for &base in MR_BASES.iter() {
        let a = Int::from(base);
        if &a >= n {
            continue;
        }
        let mut x = ctx.mod_pow(&a, &d)?;
        if x == Int::one() || x == n_minus_1 {
            continue;
        }
        let mut witnesses_composite = true;
        for _ in 1..s {
            x = ctx.mod_sqr(&x);
            if x == n_minus_1 {
                witnesses_composite = false;
                break;
            }
        }
        if witnesses_composite {
            return Ok(false);
        }
    }
    Ok(true)
}

fn strong_lucas(n: &Int) -> Result<bool, Error> {
    let params = match jacobi::select_selfridge_params(n) {
        Some(params) => params,
        None => return Ok(false),
    };
    let ctx = ModContext::new(n.clone())?;

    let n_plus_1 = n + &Int::one();
    let s = n_plus_1.count_trailing_zero_bits().unwrap_or(0);
    let d_exp = n_plus_1.shr(s as i64)?;

    let (u, mut v, mut qk) = lucas_uv(&d_exp, params.p, params.d, params.q, &ctx)?;
    if u.is_zero() {
        return Ok(true);
    }
    for r in 0..s {
        if v.is_zero() {
            return Ok(true);
        }
        if r + 1 < s {
            let two_qk = ctx.mod_set(&(&qk * &Int::from(2u32)));
            v = ctx.mod_sub(&ctx.mod_sqr(&v), &two_qk);
            qk = ctx.mod_sqr(&qk);
        }
    }
    Ok(false)
}

/// `(U_d, V_d, Q^d) mod n` via binary left-to-right Lucas-sequence
/// doubling, with an "add one" step at every set bit of `d_exp`.
fn lucas_uv(d_exp: &Int, p: i64, d: i64, q: i64, ctx: &ModContext) -> Result<(Int, Int, Int), Error> {
    let bits = d_exp.magnitude_bit_len();
    let p_int = Int::from(p);
    let d_int = Int::from(d);
    let q_int = Int::from(q);

    let mut u = Int::one();
    let mut v = p_int.clone();
    let mut qk = ctx.mod_set(&q_int);

    for i in (0..bits.saturating_sub(1)).rev() {
        let next_u = ctx.mod_mul(&u, &v);
        let two_qk = ctx.mod_set(&(&qk * &Int::from(2u32)));
        let next_v = ctx.mod_sub(&ctx.mod_sqr(&v), &two_qk);
        let next_qk = ctx.mod_sqr(&qk);
        u = next_u;
        v = next_v;
        qk = next_qk;

        if d_exp.test_bit(i as i64)? {
            let sum_u = ctx.mod_set(&(&ctx.mod_mul(&p_int, &u) + &v));
            let sum_v = ctx.mod_set(&(&ctx.mod_mul(&d_int, &u) + &ctx.mod_mul(&p_int, &v)));
            let next_u = ctx.mod_half_lucas(&sum_u);
            let next_v = ctx.mod_half_lucas(&sum_v);
            let next_qk = ctx.mod_mul(&qk, &q_int);
            u = next_u;
            v = next_v;
            qk = next_qk;
        }
    }
    Ok((u, v, qk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mersenne_prime_m61_is_probably_prime() {
        let m61 = Int::from(2u32).pow(&Int::from(61u32)).unwrap() - Int::one();
        assert!(is_probable_prime(&m61).unwrap());
    }

    #[test]
    fn square_of_m61_is_composite() {
        let m61 = Int::from(2u32).pow(&Int::from(61u32)).unwrap() - Int::one();
        assert!(!is_probable_prime(&m61.sqr()).unwrap());
    }

    #[test]
    fn small_primes_and_composites() {
        for p in [2u32, 3, 5, 7, 11, 13, 97, 7919] {
            assert!(is_probable_prime(&Int::from(p)).unwrap(), "{p} should be prime");
        }
        for c in [1u32, 4, 6, 8, 9, 15, 21, 100] {
            assert!(!is_probable_prime(&Int::from(c)).unwrap(), "{c} should be composite");
        }
    }

    #[test]
    fn carmichael_numbers_are_reported_composite() {
        const CARMICHAEL: [u64; 15] = [
            561, 1105, 1729, 2465, 2821, 6601, 8911, 10585, 15841, 29341, 41041, 46657, 52633,
            62745, 63973,
        ];
        for &c in CARMICHAEL.iter() {
            assert!(!is_probable_prime(&Int::from(c)).unwrap(), "{c} should be composite");
        }
    }

    #[test]
    fn negative_input_is_rejected() {
        assert!(is_probable_prime(&Int::from(-7i64)).is_err());
    }
}
