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

//! Two's-complement and sign-magnitude byte (de)serialization, in both
//! big-endian and little-endian orderings (spec.md §6, "Binary byte
//! arrays"). Output length is always the minimum needed to represent the
//! value unambiguously: a two's-complement positive value whose top
//! magnitude bit is set gets a leading `0x00`, and a negative value whose
//! top magnitude bit is set gets a leading `0xFF`.

use super::Int;
use crate::error::Error;
use crate::sign::Sign;

fn magnitude_to_be_bytes(mag: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(mag.len() * 4);
    for &limb in mag.iter().rev() {
        out.extend_from_slice(&limb.to_be_bytes());
    }
    while out.first() == Some(&0) && out.len() > 1 {
        out.remove(0);
    }
    if out.is_empty() {
        out.push(0);
    }
    out
}

fn be_bytes_to_magnitude(bytes: &[u8]) -> Vec<u32> {
    let mut padded = bytes.to_vec();
    while padded.len() % 4 != 0 {
        padded.insert(0, 0);
    }
    let mut limbs: Vec<u32> = padded.chunks_exact(4).map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]])).rev().collect();
    let norm = crate::ll::norm_len(&limbs, limbs.len());
    limbs.truncate(norm);
    limbs
}

/// Two's-complement big-endian encoding, minimum length.
pub(crate) fn to_twos_complement_be(sign: Sign, mag: &[u32]) -> Vec<u8> {
    if sign.is_negative() {
        let mut m = mag.to_vec();
        decrement(&mut m);
        let mut bytes = magnitude_to_be_bytes(&m);
        for b in bytes.iter_mut() {
            *b = !*b;
        }
        if bytes[0] & 0x80 == 0 {
            bytes.insert(0, 0xFF);
        }
        bytes
    } else {
        let mut bytes = magnitude_to_be_bytes(mag);
        if bytes[0] & 0x80 != 0 {
            bytes.insert(0, 0x00);
        }
        bytes
    }
}

pub(crate) fn from_twos_complement_be(bytes: &[u8]) -> Result<Int, Error> {
    if bytes.is_empty() {
        return Err(Error::BadFormat("empty byte array".into()));
    }
    let negative = bytes[0] & 0x80 != 0;
    if !negative {
        let mag = be_bytes_to_magnitude(bytes);
        return Ok(Int::from_sign_mag(Sign::NonNegative, mag));
    }
    let inverted: Vec<u8> = bytes.iter().map(|b| !b).collect();
    let mut padded = inverted;
    while padded.len() % 4 != 0 {
        padded.insert(0, 0);
    }
    let mut limbs: Vec<u32> = padded.chunks_exact(4).map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]])).rev().collect();
    increment(&mut limbs);
    let norm = crate::ll::norm_len(&limbs, limbs.len());
    limbs.truncate(norm);
    Ok(Int::from_sign_mag(Sign::Negative, limbs))
}

fn decrement(mag: &mut [u32]) {
    for l in mag.iter_mut() {
        if *l == 0 {
            *l = u32::MAX;
        } else {
            *l -= 1;
            return;
        }
    }
}

fn increment(mag: &mut Vec<u32>) {
    let mut carry = 1u32;
    for l in mag.iter_mut() {
        let (sum, c) = l.overflowing_add(carry);
        *l = sum;
        carry = c as u32;
        if carry == 0 {
            return;
        }
    }
    if carry != 0 {
        mag.push(carry);
    }
}

impl Int {
    /// Sign-magnitude big-endian bytes: sign is carried separately, the
    /// byte string is always the unsigned magnitude.
    pub fn to_magnitude_be_bytes(&self) -> Vec<u8> {
        magnitude_to_be_bytes(self.magnitude())
    }

    /// Parses a sign-magnitude big-endian byte string with an explicit sign.
    pub fn from_magnitude_be_bytes(is_negative: bool, bytes: &[u8]) -> Int {
        let mag = be_bytes_to_magnitude(bytes);
        let sign = if is_negative { Sign::Negative } else { Sign::NonNegative };
        Int::from_sign_mag(sign, mag)
    }

    /// Two's-complement little-endian bytes, minimum length.
    pub fn to_twos_complement_le_bytes(&self) -> Vec<u8> {
        let mut be = self.to_twos_complement_be_bytes();
        be.reverse();
        be
    }

    /// Parses two's-complement little-endian bytes.
    pub fn from_twos_complement_le_bytes(bytes: &[u8]) -> Result<Int, Error> {
        let mut be = bytes.to_vec();
        be.reverse();
        Int::from_twos_complement_be_bytes(&be)
    }

    /// Sign-magnitude little-endian bytes.
    pub fn to_magnitude_le_bytes(&self) -> Vec<u8> {
        let mut be = self.to_magnitude_be_bytes();
        be.reverse();
        be
    }

    /// Parses a sign-magnitude little-endian byte string with an explicit sign.
    pub fn from_magnitude_le_bytes(is_negative: bool, bytes: &[u8]) -> Int {
        let mut be = bytes.to_vec();
        be.reverse();
        Int::from_magnitude_be_bytes(is_negative, &be)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twos_complement_roundtrip_positive() {
        let x = Int::from(300i64);
        let bytes = x.to_twos_complement_be_bytes();
        assert_eq!(Int::from_twos_complement_be_bytes(&bytes).unwrap(), x);
    }

    #[test]
    fn twos_complement_roundtrip_negative() {
        let x = Int::from(-300i64);
        let bytes = x.to_twos_complement_be_bytes();
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(Int::from_twos_complement_be_bytes(&bytes).unwrap(), x);
    }

    #[test]
    fn twos_complement_negative_one_is_single_ff_byte() {
        let x = Int::from(-1i64);
        assert_eq!(x.to_twos_complement_be_bytes(), vec![0xFF]);
    }

    #[test]
    fn magnitude_bytes_roundtrip_with_separate_sign() {
        let x = Int::from(-65535i64);
        let bytes = x.to_magnitude_be_bytes();
        let back = Int::from_magnitude_be_bytes(true, &bytes);
        assert_eq!(back, x);
    }

    #[test]
    fn little_endian_byte_order_matches_reversed_big_endian() {
        let x = Int::from(0x0102_0304i64);
        let mut be = x.to_twos_complement_be_bytes();
        let le = x.to_twos_complement_le_bytes();
        be.reverse();
        assert_eq!(be, le);
    }
}
