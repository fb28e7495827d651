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

//! Sign is kept as a two-variant enum, never folded into the magnitude:
//! every multi-precision kernel in `ll` only ever sees unsigned magnitudes.

use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    NonNegative,
    Negative,
}

impl Sign {
    #[inline]
    pub fn of_i64(v: i64) -> Sign {
        if v < 0 { Sign::Negative } else { Sign::NonNegative }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }

    #[inline]
    pub fn negate(self) -> Sign {
        match self {
            Sign::NonNegative => Sign::Negative,
            Sign::Negative => Sign::NonNegative,
        }
    }

    /// Sign that `a * b` or `a / b` should carry, for nonzero magnitudes.
    #[inline]
    pub fn xor(self, other: Sign) -> Sign {
        if self == other { Sign::NonNegative } else { Sign::Negative }
    }
}

impl Mul for Sign {
    type Output = Sign;
    #[inline]
    fn mul(self, rhs: Sign) -> Sign {
        self.xor(rhs)
    }
}

impl Default for Sign {
    #[inline]
    fn default() -> Sign {
        Sign::NonNegative
    }
}
