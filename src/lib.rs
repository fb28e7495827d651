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

//! Arbitrary-precision signed integer core.
//!
//! Four layers, leaves first: a pure limb kernel (`ll`) operating on
//! `&[u32]` magnitudes, an immutable [`Int`](int::Int) value type built on
//! top of it, a heap-reusing [`Accum`](accum::Accum) accumulator for
//! allocation-lean loops, and a modular-arithmetic engine
//! (`modular`) plus Baillie-PSW primality testing (`primality`) composed
//! from the two.

pub mod error;
pub mod stats;
pub mod sign;

pub mod ll;

pub mod int;
pub mod accum;

pub mod modular;
pub mod primality;

pub mod random;
pub mod traits;

pub use error::Error;
pub use int::Int;
pub use accum::Accum;
pub use sign::Sign;
pub use modular::ModContext;

/// `Result` alias for fallible operations in this crate; see [`Error`].
pub type Result<T> = ::std::result::Result<T, Error>;
