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

//! Operator overloads for [`Int`]: `+ - * / % & | ^ -(neg)` against other
//! `Int`s and against the primitive integer types, without requiring the
//! caller to box a primitive into an `Int` first.

use super::Int;
use crate::accum::Accum;
use std::cmp::Ordering;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Sub};

impl Add<&Int> for &Int {
    type Output = Int;
    fn add(self, rhs: &Int) -> Int {
        let mut acc = Accum::new();
        acc.set_add(self, rhs);
        acc.to_int()
    }
}

impl Sub<&Int> for &Int {
    type Output = Int;
    fn sub(self, rhs: &Int) -> Int {
        let mut acc = Accum::new();
        acc.set_sub(self, rhs);
        acc.to_int()
    }
}

impl Mul<&Int> for &Int {
    type Output = Int;
    fn mul(self, rhs: &Int) -> Int {
        let mut acc = Accum::new();
        acc.set_mul(self, rhs);
        acc.to_int()
    }
}

impl Div<&Int> for &Int {
    type Output = Int;
    fn div(self, rhs: &Int) -> Int {
        let mut acc = Accum::new();
        acc.set_div(self, rhs).expect("division by zero");
        acc.to_int()
    }
}

impl Rem<&Int> for &Int {
    type Output = Int;
    fn rem(self, rhs: &Int) -> Int {
        let mut acc = Accum::new();
        acc.set_rem(self, rhs).expect("division by zero");
        acc.to_int()
    }
}

impl BitAnd<&Int> for &Int {
    type Output = Int;
    fn bitand(self, rhs: &Int) -> Int {
        self.and(rhs)
    }
}

impl BitOr<&Int> for &Int {
    type Output = Int;
    fn bitor(self, rhs: &Int) -> Int {
        self.or(rhs)
    }
}

impl BitXor<&Int> for &Int {
    type Output = Int;
    fn bitxor(self, rhs: &Int) -> Int {
        self.xor(rhs)
    }
}

impl Neg for &Int {
    type Output = Int;
    fn neg(self) -> Int {
        self.negate()
    }
}

impl Neg for Int {
    type Output = Int;
    fn neg(self) -> Int {
        self.negate()
    }
}

impl Int {
    /// Fallible division: `Err(DivideByZero)` instead of a panic.
    pub fn checked_div(&self, rhs: &Int) -> Result<Int, crate::Error> {
        let mut acc = Accum::new();
        acc.set_div(self, rhs)?;
        Ok(acc.to_int())
    }

    /// Fallible remainder (truncating, sign follows `self`):
    /// `Err(DivideByZero)` instead of a panic.
    pub fn checked_rem(&self, rhs: &Int) -> Result<Int, crate::Error> {
        let mut acc = Accum::new();
        acc.set_rem(self, rhs)?;
        Ok(acc.to_int())
    }

    /// The non-negative residue `self mod rhs`, `0 <= result < |rhs|`.
    /// `Err(Error::NegativeModulus)` if `rhs <= 0`.
    pub fn modulo(&self, rhs: &Int) -> Result<Int, crate::Error> {
        let mut acc = Accum::new();
        acc.set_mod(self, rhs)?;
        Ok(acc.to_int())
    }
}

macro_rules! forward_ref_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<Int> for Int {
            type Output = Int;
            fn $method(self, rhs: Int) -> Int {
                $trait::$method(&self, &rhs)
            }
        }
        impl $trait<&Int> for Int {
            type Output = Int;
            fn $method(self, rhs: &Int) -> Int {
                $trait::$method(&self, rhs)
            }
        }
        impl $trait<Int> for &Int {
            type Output = Int;
            fn $method(self, rhs: Int) -> Int {
                $trait::$method(self, &rhs)
            }
        }
    };
}

forward_ref_binop!(Add, add);
forward_ref_binop!(Sub, sub);
forward_ref_binop!(Mul, mul);
forward_ref_binop!(Div, div);
forward_ref_binop!(Rem, rem);
forward_ref_binop!(BitAnd, bitand);
forward_ref_binop!(BitOr, bitor);
forward_ref_binop!(BitXor, bitxor);

macro_rules! impl_primitive_ops {
    ($($t:ty),*) => {
        $(
            impl Add<$t> for &Int {
                type Output = Int;
                fn add(self, rhs: $t) -> Int { self + &Int::from(rhs) }
            }
            impl Add<&Int> for $t {
                type Output = Int;
                fn add(self, rhs: &Int) -> Int { &Int::from(self) + rhs }
            }
            impl Add<$t> for Int {
                type Output = Int;
                fn add(self, rhs: $t) -> Int { &self + rhs }
            }

            impl Sub<$t> for &Int {
                type Output = Int;
                fn sub(self, rhs: $t) -> Int { self - &Int::from(rhs) }
            }
            impl Sub<&Int> for $t {
                type Output = Int;
                fn sub(self, rhs: &Int) -> Int { &Int::from(self) - rhs }
            }
            impl Sub<$t> for Int {
                type Output = Int;
                fn sub(self, rhs: $t) -> Int { &self - rhs }
            }

            impl Mul<$t> for &Int {
                type Output = Int;
                fn mul(self, rhs: $t) -> Int { self * &Int::from(rhs) }
            }
            impl Mul<&Int> for $t {
                type Output = Int;
                fn mul(self, rhs: &Int) -> Int { &Int::from(self) * rhs }
            }
            impl Mul<$t> for Int {
                type Output = Int;
                fn mul(self, rhs: $t) -> Int { &self * rhs }
            }

            impl Div<$t> for &Int {
                type Output = Int;
                fn div(self, rhs: $t) -> Int { self / &Int::from(rhs) }
            }
            impl Div<$t> for Int {
                type Output = Int;
                fn div(self, rhs: $t) -> Int { &self / rhs }
            }

            impl Rem<$t> for &Int {
                type Output = Int;
                fn rem(self, rhs: $t) -> Int { self % &Int::from(rhs) }
            }
            impl Rem<$t> for Int {
                type Output = Int;
                fn rem(self, rhs: $t) -> Int { &self % rhs }
            }

            impl PartialEq<$t> for Int {
                fn eq(&self, other: &$t) -> bool { *self == Int::from(*other) }
            }
            impl PartialOrd<$t> for Int {
                fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                    self.partial_cmp(&Int::from(*other))
                }
            }
        )*
    };
}

impl_primitive_ops! { i8, i16, i32, i64, isize, u8, u16, u32, u64, usize }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_primitive_arithmetic() {
        let x = Int::from(10i64);
        assert_eq!(&x + 5i64, Int::from(15i64));
        assert_eq!(5i64 + &x, Int::from(15i64));
        assert_eq!(x.clone() * 3i32, Int::from(30i64));
        assert_eq!(x == 10i64, true);
        assert!(x < 11i64);
    }

    #[test]
    fn division_by_zero_panics() {
        let x = Int::from(1i64);
        let z = Int::zero();
        let result = std::panic::catch_unwind(|| &x / &z);
        assert!(result.is_err());
    }

    #[test]
    fn checked_division_by_zero_errs() {
        let x = Int::from(1i64);
        assert!(x.checked_div(&Int::zero()).is_err());
    }
}
