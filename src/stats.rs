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

//! Optional, zero-cost-by-default event sink. `Accum` and `ModContext` emit
//! named events for constructions, operation kinds, and buffer resizes; the
//! default sink ([`NoopSink`]) discards them, a caller can plug in their own
//! [`StatsSink`] to observe allocation behavior without the core depending on
//! any particular metrics crate.

/// Which of an accumulator's buffers a resize event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buffer {
    Main,
    Scratch1,
    Scratch2,
}

/// The call context a buffer growth happened under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeContext {
    Add,
    Sub,
    Mul,
    Sqr,
    Div,
    Rem,
    Shift,
    Bitwise,
    ModReduce,
    ExtendedEuclid,
    Other,
}

/// Whether this is the first time a buffer has grown, or a repeat growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrence {
    Initial,
    Repeat,
}

/// A named event emitted by the core. Variants are intentionally coarse:
/// the sink is for observability, not for driving behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// An `Int` or `Accum` was constructed, tagged by a short kind label.
    Construction(&'static str),
    /// A public operation ran, tagged by a short kind label.
    Operation(&'static str),
    /// A buffer grew past its previous capacity.
    Resize(Buffer, ResizeContext, Occurrence),
}

/// Consumer of [`Event`]s. Implement this to wire the core's internals into
/// your own metrics system; the default implementation is a no-op so nothing
/// is required to use the crate.
pub trait StatsSink {
    fn record(&self, event: Event);
}

/// Default sink: discards everything. Used when no sink is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StatsSink for NoopSink {
    #[inline]
    fn record(&self, _event: Event) {}
}

impl<F: Fn(Event)> StatsSink for F {
    #[inline]
    fn record(&self, event: Event) {
        (self)(event)
    }
}
