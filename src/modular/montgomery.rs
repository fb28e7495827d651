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

//! Montgomery reduction: applicable only for an odd modulus, used only by
//! `ModContext::mod_pow` so the whole binary-exponentiation loop stays in
//! Montgomery form and only transforms back to normal form once at the end.
//! One-shot multiplication and squaring go through Barrett instead -- see
//! DESIGN.md's Montgomery/Barrett dispatch note.

use crate::error::Error;
use crate::int::Int;

pub struct MontgomeryReducer {
    modulus: Int,
    k: usize,
    n_prime: u32,
    r_squared_mod_m: Int,
}

fn limb_at(x: &Int, i: usize) -> u32 {
    x.magnitude_to_little_endian_limbs().get(i).copied().unwrap_or(0)
}

/// `(-m0^-1) mod 2^32`, via Newton/Hensel lifting of the modular inverse
/// of the modulus's bottom limb. `m0` must be odd.
fn hensel_n_prime(m0: u32) -> u32 {
    let mut x = m0;
    for _ in 0..5 {
        x = x.wrapping_mul(2u32.wrapping_sub(m0.wrapping_mul(x)));
    }
    0u32.wrapping_sub(x)
}

impl MontgomeryReducer {
    /// `Err(NegativeModulus)` if `modulus` is not odd and positive.
    pub fn new(modulus: &Int) -> Result<MontgomeryReducer, Error> {
        if modulus.is_negative() || modulus.is_zero() || !modulus.test_bit(0)? {
            return Err(Error::NegativeModulus);
        }
        let k = modulus.magnitude_bit_len().max(1).div_ceil(32);
        let n_prime = hensel_n_prime(limb_at(modulus, 0));
        let r = Int::one().shl((32 * k) as i64)?;
        let r_squared_mod_m = (&r * &r).modulo(modulus)?;
        Ok(MontgomeryReducer { modulus: modulus.clone(), k, n_prime, r_squared_mod_m })
    }

    /// REDC: given `0 <= t < m*R`, returns `t * R^-1 mod m`.
    fn redc(&self, t: &Int) -> Int {
        let mut acc = t.clone();
        for i in 0..self.k {
            let ti = limb_at(&acc, i);
            let u = ti.wrapping_mul(self.n_prime);
            let term = (&Int::from(u) * &self.modulus).shl((32 * i) as i64).expect("shift is non-negative");
            acc = &acc + &term;
        }
        let mut result = acc.shr((32 * self.k) as i64).expect("shift is non-negative");
        if result >= self.modulus {
            result = &result - &self.modulus;
        }
        result
    }

    fn to_montgomery(&self, x: &Int) -> Int {
        self.redc(&(x * &self.r_squared_mod_m))
    }

    /// `base^exp mod m` via binary exponentiation kept entirely in
    /// Montgomery form, transforming back to normal form only at the end.
    /// `exp` must already be non-negative.
    pub fn mod_pow(&self, base: &Int, exp: &Int) -> Int {
        let bit_len = exp.magnitude_bit_len();
        if bit_len == 0 {
            return if self.modulus == Int::one() { Int::zero() } else { Int::one() };
        }
        let mut result_mont = self.redc(&self.r_squared_mod_m);
        let mut base_mont = self.to_montgomery(base);
        for i in 0..bit_len {
            if exp.test_bit(i as i64).unwrap_or(false) {
                result_mont = self.redc(&(&result_mont * &base_mont));
            }
            if i + 1 < bit_len {
                base_mont = self.redc(&(&base_mont * &base_mont));
            }
        }
        self.redc(&result_mont)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_pow_matches_known_value() {
        let m = Int::from(97u32);
        let reducer = MontgomeryReducer::new(&m).unwrap();
        let result = reducer.mod_pow(&Int::from(5u32), &Int::from(117u32));
        assert_eq!(result, Int::from(44u32));
    }

    #[test]
    fn rejects_even_modulus() {
        assert!(MontgomeryReducer::new(&Int::from(10u32)).is_err());
    }
}
