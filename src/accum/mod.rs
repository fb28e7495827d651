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

//! `Accum`: a heap-reusing mutable big integer. Every public mutator
//! leaves it normalized; every mutator is aliasing-safe by construction,
//! because it always computes into `scratch1` (never directly into `mag`)
//! and swaps the buffers in at the end -- strategy (b) from spec.md 4.3 and
//! 9, applied uniformly rather than detected case-by-case.

pub mod ops;

use crate::error::Error;
use crate::int::Int;
use crate::ll;
use crate::sign::Sign;
use crate::stats::{Buffer, Event, NoopSink, Occurrence, ResizeContext, StatsSink};
use crate::traits::AsMagnitude;

/// A view of either an `Int` or an `Accum` as `(sign, magnitude)`, so the
/// two-operand `set_*` engine can mix BigInt and accumulator right-hand
/// sides without one impl per combination (spec.md 4.3: "mirror-named to
/// BigInt operators... with BigInt or accumulator right-hand side").
pub trait Operand {
    fn op_sign(&self) -> Sign;
    fn op_magnitude(&self) -> &[u32];
}

impl Operand for Int {
    fn op_sign(&self) -> Sign {
        self.sign()
    }
    fn op_magnitude(&self) -> &[u32] {
        self.magnitude()
    }
}

impl Operand for Accum {
    fn op_sign(&self) -> Sign {
        self.sign
    }
    fn op_magnitude(&self) -> &[u32] {
        &self.mag[..self.len]
    }
}

pub struct Accum {
    pub(crate) sign: Sign,
    pub(crate) mag: Vec<u32>,
    pub(crate) len: usize,
    pub(crate) scratch1: Vec<u32>,
    pub(crate) scratch2: Vec<u32>,
    grown: [bool; 3],
    stats: Box<dyn StatsSink + Send>,
}

impl Accum {
    pub fn new() -> Accum {
        Accum {
            sign: Sign::NonNegative,
            mag: Vec::new(),
            len: 0,
            scratch1: Vec::new(),
            scratch2: Vec::new(),
            grown: [false; 3],
            stats: Box::new(NoopSink),
        }
    }

    /// Pre-sizes the main buffer to hold at least `bits` bits, so the
    /// first mutator call doesn't need to grow it.
    pub fn with_capacity_bits(bits: usize) -> Accum {
        let mut a = Accum::new();
        let limbs = bits.div_ceil(32);
        a.mag.resize(limbs, 0);
        a
    }

    pub fn with_stats_sink<S: StatsSink + Send + 'static>(mut self, sink: S) -> Accum {
        self.stats = Box::new(sink);
        self
    }

    #[inline]
    fn record(&self, event: Event) {
        self.stats.record(event);
    }

    /// Ensures `buf` has room for `needed` limbs, growing (never
    /// shrinking) and classifying the event through the stats sink.
    fn grow(buf: &mut Vec<u32>, needed: usize, which: Buffer, ctx: ResizeContext, grown_before: &mut bool, stats: &dyn StatsSink) {
        if buf.len() < needed {
            let occurrence = if *grown_before { Occurrence::Repeat } else { Occurrence::Initial };
            stats.record(Event::Resize(which, ctx, occurrence));
            *grown_before = true;
            buf.resize(needed, 0);
        }
    }

    pub(crate) fn grow_main(&mut self, needed: usize, ctx: ResizeContext) {
        Accum::grow(&mut self.mag, needed, Buffer::Main, ctx, &mut self.grown[0], &*self.stats);
    }

    pub(crate) fn grow_scratch1(&mut self, needed: usize, ctx: ResizeContext) {
        Accum::grow(&mut self.scratch1, needed, Buffer::Scratch1, ctx, &mut self.grown[1], &*self.stats);
    }

    pub(crate) fn grow_scratch2(&mut self, needed: usize, ctx: ResizeContext) {
        Accum::grow(&mut self.scratch2, needed, Buffer::Scratch2, ctx, &mut self.grown[2], &*self.stats);
    }

    /// Clones the current normalized value out as an immutable `Int`.
    pub fn to_int(&self) -> Int {
        Int::from_sign_mag(self.sign, self.mag[..self.len].to_vec())
    }

    pub fn is_zero(&self) -> bool {
        self.len == 0
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn magnitude(&self) -> &[u32] {
        &self.mag[..self.len]
    }

    pub fn set(&mut self, x: &Int) {
        self.record(Event::Operation("set"));
        self.grow_main(x.magnitude().len(), ResizeContext::Other);
        self.mag[..x.magnitude().len()].copy_from_slice(x.magnitude());
        self.len = x.magnitude().len();
        self.sign = if self.len == 0 { Sign::NonNegative } else { x.sign() };
    }

    pub fn set_accum(&mut self, x: &Accum) {
        self.record(Event::Operation("set"));
        self.grow_main(x.len, ResizeContext::Other);
        self.mag[..x.len].copy_from_slice(&x.mag[..x.len]);
        self.len = x.len;
        self.sign = if self.len == 0 { Sign::NonNegative } else { x.sign };
    }

    pub fn set_primitive<T: AsMagnitude>(&mut self, x: T) {
        let (neg, limbs) = x.as_sign_magnitude();
        self.grow_main(limbs.len(), ResizeContext::Other);
        self.mag[..limbs.len()].copy_from_slice(&limbs);
        self.len = limbs.len();
        self.sign = if self.len == 0 { Sign::NonNegative } else if neg { Sign::Negative } else { Sign::NonNegative };
    }

    pub fn set_zero(&mut self) {
        self.len = 0;
        self.sign = Sign::NonNegative;
    }

    pub fn set_one(&mut self) {
        self.grow_main(1, ResizeContext::Other);
        self.mag[0] = 1;
        self.len = 1;
        self.sign = Sign::NonNegative;
    }

    pub fn set_bit(&mut self, i: i64) -> Result<(), Error> {
        if i < 0 {
            return Err(Error::OutOfDomain("bit index must be non-negative".into()));
        }
        let i = i as usize;
        self.grow_main(i / 32 + 1, ResizeContext::Bitwise);
        self.len = ll::bit::set_bit(&mut self.mag, self.len, i);
        Ok(())
    }

    pub fn clear_bit(&mut self, i: i64) -> Result<(), Error> {
        if i < 0 {
            return Err(Error::OutOfDomain("bit index must be non-negative".into()));
        }
        self.len = ll::bit::clear_bit(&mut self.mag, self.len, i as usize);
        Ok(())
    }

    /// Sets `self` to a mask of `width` one-bits starting at `index`
    /// (default 0): `((1 << width) - 1) << index`.
    pub fn apply_bit_mask(&mut self, width: i64, index: Option<i64>) -> Result<(), Error> {
        if width < 0 {
            return Err(Error::OutOfDomain("mask width must be non-negative".into()));
        }
        let index = index.unwrap_or(0);
        if index < 0 {
            return Err(Error::OutOfDomain("mask index must be non-negative".into()));
        }
        let width = width as usize;
        let index = index as usize;
        if width == 0 {
            self.set_zero();
            return Ok(());
        }
        let needed = (index + width) / 32 + 1;
        self.grow_main(needed, ResizeContext::Bitwise);
        ll::zero(&mut self.mag[..needed]);
        for bit in index..index + width {
            self.mag[bit / 32] |= 1 << (bit % 32);
        }
        self.len = ll::norm_len(&self.mag, needed);
        self.sign = Sign::NonNegative;
        Ok(())
    }
}

impl Default for Accum {
    fn default() -> Accum {
        Accum::new()
    }
}

impl Clone for Accum {
    fn clone(&self) -> Accum {
        Accum {
            sign: self.sign,
            mag: self.mag.clone(),
            len: self.len,
            scratch1: self.scratch1.clone(),
            scratch2: self.scratch2.clone(),
            grown: self.grown,
            stats: Box::new(NoopSink),
        }
    }
}

impl std::fmt::Debug for Accum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accum")
            .field("sign", &self.sign)
            .field("magnitude", &&self.mag[..self.len])
            .finish()
    }
}

impl PartialEq for Accum {
    fn eq(&self, other: &Accum) -> bool {
        self.sign == other.sign && self.mag[..self.len] == other.mag[..other.len]
    }
}
impl Eq for Accum {}

impl From<&Int> for Accum {
    fn from(x: &Int) -> Accum {
        let mut a = Accum::new();
        a.set(x);
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_to_int_roundtrips() {
        let x = Int::from(12345i64);
        let mut a = Accum::new();
        a.set(&x);
        assert_eq!(a.to_int(), x);
    }

    #[test]
    fn bit_mask_matches_formula() {
        let mut a = Accum::new();
        a.apply_bit_mask(4, Some(2)).unwrap();
        assert_eq!(a.to_int(), Int::from(0b111100i64));
    }

    #[test]
    fn negative_index_is_out_of_domain() {
        let mut a = Accum::new();
        assert!(matches!(a.set_bit(-1), Err(Error::OutOfDomain(_))));
    }

    #[test]
    fn accum_is_send() {
        // Not `Sync`: the `stats` field is a `Box<dyn StatsSink + Send>`,
        // and sharing a `&Accum` across threads would let two threads
        // record through the same sink concurrently without synchronization.
        fn assert_send<T: Send>() {}
        assert_send::<Accum>();
    }
}
