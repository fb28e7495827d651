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

//! Modular inverse via the iterative extended Euclidean algorithm (spec.md §4.5.2).

use crate::error::Error;
use crate::int::Int;

/// `a^-1 mod m`, in `[0, m)`. `Err(NotInvertible)` if `gcd(a, m) != 1`.
pub fn mod_inv(a: &Int, m: &Int) -> Result<Int, Error> {
    if *m <= Int::one() {
        return Err(Error::NegativeModulus);
    }

    let mut r = m.clone();
    let mut new_r = a.modulo(m)?;
    let mut t = Int::zero();
    let mut new_t = Int::one();

    while !new_r.is_zero() {
        let q = r.checked_div(&new_r)?;
        let next_t = &t - &(&q * &new_t);
        let next_r = &r - &(&q * &new_r);
        t = new_t;
        new_t = next_t;
        r = new_r;
        new_r = next_r;
    }

    if r != Int::one() {
        return Err(Error::NotInvertible);
    }
    if t.is_negative() {
        t = &t + m;
    }
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_inverse() {
        assert_eq!(mod_inv(&Int::from(7u32), &Int::from(11u32)).unwrap(), Int::from(8u32));
    }

    #[test]
    fn fails_when_not_coprime() {
        assert!(mod_inv(&Int::from(14u32), &Int::from(21u32)).is_err());
    }

    #[test]
    fn handles_negative_input() {
        let inv = mod_inv(&Int::from(-3i64), &Int::from(11u32)).unwrap();
        assert_eq!((&inv * &Int::from(-3i64)).modulo(&Int::from(11u32)).unwrap(), Int::one());
    }
}
