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

//! Typed failure surface. Kernels in `ll` assume validated input and use
//! `debug_assert!`; everything reachable from a caller-controlled value
//! returns one of these instead of panicking.

use thiserror::Error as ThisError;

/// Failure returned at the public boundary. Never produced by `ll::*`.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("division by zero")]
    DivideByZero,

    #[error("value has no modular inverse for the given modulus")]
    NotInvertible,

    #[error("exponent must be non-negative")]
    NegativeExponent,

    #[error("modulus must be positive")]
    NegativeModulus,

    #[error("input must be non-negative")]
    NegativeInput,

    #[error("malformed input: {0}")]
    BadFormat(String),

    #[error("value out of domain: {0}")]
    OutOfDomain(String),

    /// An invariant the spec states cannot arise from valid input was
    /// violated anyway. Distinct from the user-facing kinds above.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
