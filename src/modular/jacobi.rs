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

//! Jacobi symbol and Selfridge parameter search, used by the strong Lucas
//! probable-prime test in `primality`.

use crate::int::Int;

fn low_bits(x: &Int, n: usize) -> u32 {
    let mut r = 0u32;
    for i in 0..n {
        if x.test_bit(i as i64).unwrap_or(false) {
            r |= 1 << i;
        }
    }
    r
}

/// `(a|n)`, the Jacobi symbol, for odd `n > 0`. Reduces `a mod n`, peels
/// off factors of two (flipping sign when `n mod 8 in {3,5}`), then swaps
/// and reduces again, applying the quadratic-reciprocity sign flip when
/// both residues are `3 mod 4` -- the standard integer-only algorithm.
pub fn jacobi(a: &Int, n: &Int) -> i32 {
    debug_assert!(n.is_positive() && n.test_bit(0).unwrap_or(false), "jacobi requires a positive odd modulus");

    let mut n = n.clone();
    let mut a = a.modulo(&n).unwrap_or_else(|_| a.abs());
    let mut result = 1i32;

    loop {
        if a.is_zero() {
            return if n == Int::one() { result } else { 0 };
        }
        while !a.test_bit(0).unwrap_or(true) {
            a = a.shr(1).expect("shift amount is non-negative");
            let r = low_bits(&n, 3);
            if r == 3 || r == 5 {
                result = -result;
            }
        }
        if a == Int::one() {
            return result;
        }
        if low_bits(&a, 2) == 3 && low_bits(&n, 2) == 3 {
            result = -result;
        }
        std::mem::swap(&mut a, &mut n);
        a = a.modulo(&n).expect("n is positive after swap");
    }
}

/// Selfridge's `(D, P=1, Q)` for the strong Lucas test: the first `D` in
/// `5, -7, 9, -11, ...` with `jacobi(D, n) == -1`. `None` is the "composite"
/// sentinel for `jacobi(D, n) == 0` with `n != |D|`.
pub struct SelfridgeParams {
    pub d: i64,
    pub p: i64,
    pub q: i64,
}

pub fn select_selfridge_params(n: &Int) -> Option<SelfridgeParams> {
    let mut magnitude: i64 = 5;
    let mut positive = true;
    loop {
        let d = if positive { magnitude } else { -magnitude };
        let d_int = Int::from(d);
        let j = jacobi(&d_int, n);
        if j == -1 {
            return Some(SelfridgeParams { d, p: 1, q: (1 - d) / 4 });
        }
        if j == 0 {
            let abs_d = Int::from(magnitude as u64);
            if n != &abs_d {
                return None;
            }
        }
        magnitude += 2;
        positive = !positive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_jacobi_values() {
        assert_eq!(jacobi(&Int::from(5i64), &Int::from(11i64)), 1);
        assert_eq!(jacobi(&Int::from(5i64), &Int::from(13i64)), -1);
        assert_eq!(jacobi(&Int::from(9i64), &Int::from(15i64)), 0);
    }

    #[test]
    fn selfridge_finds_minus_seven_for_small_prime() {
        let params = select_selfridge_params(&Int::from(13i64)).unwrap();
        assert_eq!(jacobi(&Int::from(params.d), &Int::from(13i64)), -1);
    }
}
