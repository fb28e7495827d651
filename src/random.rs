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

//! Random-number source the `random*` constructors consume. The core owns
//! no generator of its own (spec.md 5: "injected by caller"); this module
//! just bridges any `rand::RngCore` into the shape `Int`'s constructors
//! need.

use rand::RngCore;

/// Fills magnitude limbs with random bits. Implemented for every
/// `rand::RngCore`, so any caller-owned `rand::rngs::StdRng`,
/// `rand::rngs::ThreadRng`, etc. works directly.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        RngCore::next_u32(self)
    }
}

/// Fills `buf[0..limbs]` with uniformly random limbs, then masks the
/// top limb down to `extra_bits` significant bits (0..32).
pub fn fill_bits<R: RandomSource + ?Sized>(rng: &mut R, buf: &mut [u32], limbs: usize, extra_bits: u32) {
    for l in buf[..limbs].iter_mut() {
        *l = rng.next_u32();
    }
    if limbs > 0 && extra_bits < 32 {
        let mask = if extra_bits == 0 { 0 } else { (1u32 << extra_bits) - 1 };
        buf[limbs - 1] &= mask;
    }
}
