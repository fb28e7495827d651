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

//! Small helper traits shared across `int`/`accum`, kept separate the way
//! the teacher crate kept its own `traits` module apart from `int`.

/// A value that can stand in for `Int` on the right-hand side of an
/// operator without allocating -- implemented for the primitive integer
/// types and for `&Int`/`&Accum` themselves. Lets `int::ops` and
/// `accum::ops` accept "BigInt and mixed primitive operands without
/// autoboxing" (spec.md 4.2) through one macro instead of one impl per
/// combinator per type.
pub trait AsMagnitude {
    /// Little-endian limbs and whether the value is negative.
    fn as_sign_magnitude(&self) -> (bool, Vec<u32>);
}

macro_rules! impl_as_magnitude_unsigned {
    ($($t:ty),*) => {
        $(impl AsMagnitude for $t {
            fn as_sign_magnitude(&self) -> (bool, Vec<u32>) {
                (false, u64_to_limbs(*self as u64))
            }
        })*
    };
}

macro_rules! impl_as_magnitude_signed {
    ($($t:ty),*) => {
        $(impl AsMagnitude for $t {
            fn as_sign_magnitude(&self) -> (bool, Vec<u32>) {
                (*self < 0, u64_to_limbs(self.unsigned_abs() as u64))
            }
        })*
    };
}

impl_as_magnitude_unsigned! { u8, u16, u32, u64, usize }
impl_as_magnitude_signed! { i8, i16, i32, i64, isize }

fn u64_to_limbs(v: u64) -> Vec<u32> {
    let lo = v as u32;
    let hi = (v >> 32) as u32;
    if hi != 0 {
        vec![lo, hi]
    } else if lo != 0 {
        vec![lo]
    } else {
        vec![]
    }
}
