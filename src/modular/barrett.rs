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

//! Barrett reduction: works for any modulus (odd or even), used as the
//! fallback everywhere Montgomery doesn't apply.

use crate::int::Int;

pub struct BarrettReducer {
    modulus: Int,
    mu: Int,
    shift_k_minus_1: i64,
    shift_k_plus_1: i64,
    b_pow_k_plus_1: Int,
}

impl BarrettReducer {
    /// `modulus` must be positive. `k` is the modulus's limb count.
    pub fn new(modulus: &Int) -> BarrettReducer {
        let k = (modulus.magnitude_bit_len().max(1)).div_ceil(32);
        let shift_k_minus_1 = ((k as i64) - 1).max(0) * 32;
        let shift_k_plus_1 = (k as i64 + 1) * 32;
        let mu = Int::one().shl(2 * 32 * k as i64).expect("shift is non-negative") / modulus;
        let b_pow_k_plus_1 = Int::one().shl(shift_k_plus_1).expect("shift is non-negative");
        BarrettReducer { modulus: modulus.clone(), mu, shift_k_minus_1, shift_k_plus_1, b_pow_k_plus_1 }
    }

    /// Reduces `0 <= x < m^2` to `x mod m`.
    pub fn reduce(&self, x: &Int) -> Int {
        let mut q = x.shr(self.shift_k_minus_1).expect("shift is non-negative");
        q = &q * &self.mu;
        q = q.shr(self.shift_k_plus_1).expect("shift is non-negative");

        let r1 = x.modulo(&self.b_pow_k_plus_1).expect("b_pow_k_plus_1 is positive");
        let qm = &q * &self.modulus;
        let r2 = qm.modulo(&self.b_pow_k_plus_1).expect("b_pow_k_plus_1 is positive");

        let mut r = &r1 - &r2;
        if r.is_negative() {
            r = &r + &self.b_pow_k_plus_1;
        }
        while r >= self.modulus {
            r = &r - &self.modulus;
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_the_same_value_as_rem() {
        let m = Int::from(97u32);
        let reducer = BarrettReducer::new(&m);
        let x = Int::from(5u32).pow(&Int::from(6u32)).unwrap();
        assert_eq!(reducer.reduce(&x), x.checked_rem(&m).unwrap());
    }

    #[test]
    fn reduces_a_large_square_correctly() {
        let m: Int = "123456789012345678901234567890123".parse().unwrap();
        let reducer = BarrettReducer::new(&m);
        let big: Int = "98765432109876543210987654321098".parse().unwrap();
        let squared = big.sqr();
        assert_eq!(reducer.reduce(&squared), squared.checked_rem(&m).unwrap());
    }
}
