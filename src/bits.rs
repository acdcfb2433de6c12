//! Bit-string conventions: `'0'`/`'1'` strings, MSB first; hex groups four bits.

use bitvec::prelude::*;

use crate::CircuitError;

pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

pub fn string_to_bits(s: &str) -> Result<Vec<bool>, CircuitError> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(CircuitError::InvalidBit(other)),
        })
        .collect()
}

/// Lowercase hex of whole nibbles; a trailing partial nibble is dropped
pub fn bits_to_hex(bits: &[bool]) -> String {
    let nibbles = bits.len() / 4;
    let packed: BitVec<u8, Msb0> = bits[..nibbles * 4].iter().copied().collect();
    let mut hex = hex::encode(packed.into_vec());
    hex.truncate(nibbles);
    hex
}

pub fn hex_to_bits(s: &str) -> Result<Vec<bool>, CircuitError> {
    let mut padded = s.to_owned();
    if padded.len() % 2 == 1 {
        padded.push('0');
    }
    let bytes = hex::decode(&padded)
        .map_err(|e| CircuitError::InvalidHex(e.to_string()))?;

    let mut bits = bytes_to_bits(&bytes);
    bits.truncate(s.len() * 4);
    Ok(bits)
}

pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes.view_bits::<Msb0>().iter().by_vals().collect()
}

pub fn word_to_bits(word: u32) -> Vec<bool> {
    bytes_to_bits(&word.to_be_bytes())
}

/// Read up to 32 bits, MSB first
pub fn bits_to_word(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, b| (acc << 1) | u32::from(*b))
}
