use bitvec::prelude::*;
use rand::Rng;

use crate::{
    bits::{bytes_to_bits, word_to_bits},
    Circuit, CircuitError,
};

/// Single-block hash modelled as a circuit.
///
/// The circuit input is the padded 512-bit block as sixteen 32-bit words followed by
/// the chaining value (IV) words, every word MSB first. MD4 reads block bytes as
/// little-endian words, SHA-1 as big-endian ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashFunction {
    Md4,
    Sha1,
}

impl HashFunction {
    pub const BLOCK_BITS: usize = 512;
    /// One `1` bit and the 64-bit length must still fit into the block
    pub const MAX_MESSAGE_BITS: usize = Self::BLOCK_BITS - 64 - 1;
    pub const MAX_MESSAGE_BYTES: usize = Self::MAX_MESSAGE_BITS / 8;

    pub fn build(&self) -> Result<Circuit, CircuitError> {
        match self {
            HashFunction::Md4 => super::build_md4(),
            HashFunction::Sha1 => super::build_sha1(),
        }
    }

    pub fn iv(&self) -> &'static [u32] {
        match self {
            HashFunction::Md4 => &[0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476],
            HashFunction::Sha1 => &[0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0],
        }
    }

    pub fn input_len(&self) -> usize {
        Self::BLOCK_BITS + 32 * self.iv().len()
    }

    pub fn output_len(&self) -> usize {
        32 * self.iv().len()
    }

    /// Circuit input position of message bit `bit` (bits counted MSB first within bytes)
    pub fn input_index(&self, bit: usize) -> usize {
        match self {
            HashFunction::Sha1 => bit,
            HashFunction::Md4 => {
                let (word, lane) = (bit / 32, (bit / 8) % 4);
                word * 32 + (3 - lane) * 8 + bit % 8
            }
        }
    }

    /// Full circuit input for a message given as bits
    pub fn pad_bits(&self, message: &[bool]) -> Result<Vec<bool>, CircuitError> {
        if message.len() > Self::MAX_MESSAGE_BITS {
            return Err(CircuitError::MessageTooLong {
                bits: message.len(),
                max: Self::MAX_MESSAGE_BITS,
            });
        }

        let mut block: BitVec<u8, Msb0> = BitVec::repeat(false, Self::BLOCK_BITS);
        for (i, bit) in message.iter().enumerate() {
            block.set(i, *bit);
        }
        block.set(message.len(), true);

        let length = message.len() as u64;
        let mut bytes = block.into_vec();
        bytes[56..].copy_from_slice(&match self {
            HashFunction::Md4 => length.to_le_bytes(),
            HashFunction::Sha1 => length.to_be_bytes(),
        });

        Ok(bytes
            .chunks_exact(4)
            .map(|chunk| {
                let chunk = [chunk[0], chunk[1], chunk[2], chunk[3]];
                match self {
                    HashFunction::Md4 => u32::from_le_bytes(chunk),
                    HashFunction::Sha1 => u32::from_be_bytes(chunk),
                }
            })
            .chain(self.iv().iter().copied())
            .flat_map(word_to_bits)
            .collect())
    }

    pub fn pad_bytes(&self, message: &[u8]) -> Result<Vec<bool>, CircuitError> {
        self.pad_bits(&bytes_to_bits(message))
    }

    /// Random message of random length in `[0, MAX_MESSAGE_BITS]`
    pub fn random_message<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        let len = rng.random_range(0..=Self::MAX_MESSAGE_BITS);
        (0..len).map(|_| rng.random()).collect()
    }

    pub fn random_input<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<bool>, CircuitError> {
        self.pad_bits(&self.random_message(rng))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::bits::{bits_to_hex, bits_to_word};

    #[test]
    fn sha1_padding_of_abc() {
        let input = HashFunction::Sha1.pad_bytes(b"abc").unwrap();
        assert_eq!(input.len(), HashFunction::Sha1.input_len());

        let block = bits_to_hex(&input[..512]);
        assert!(block.starts_with("61626380"));
        assert!(block.ends_with("0000000000000018"));
        assert_eq!(bits_to_hex(&input[512..544]), "67452301");
    }

    #[test]
    fn md4_padding_is_little_endian() {
        let input = HashFunction::Md4.pad_bytes(b"abc").unwrap();
        assert_eq!(input.len(), HashFunction::Md4.input_len());

        assert_eq!(bits_to_word(&input[..32]), 0x80636261);
        // length 24 in the low half of word 14
        assert_eq!(bits_to_word(&input[14 * 32..15 * 32]), 24);
        assert_eq!(bits_to_word(&input[15 * 32..16 * 32]), 0);
    }

    #[test]
    fn md4_input_index_follows_byte_lanes() {
        let input = HashFunction::Md4.pad_bytes(&[0x80]).unwrap();
        // first message bit lands in the low byte of word 0
        assert!(input[HashFunction::Md4.input_index(0)]);
        assert_eq!(HashFunction::Md4.input_index(0), 24);
        assert_eq!(HashFunction::Md4.input_index(8), 16);
        assert_eq!(HashFunction::Md4.input_index(32), 56);
        assert_eq!(HashFunction::Sha1.input_index(40), 40);
    }

    #[test]
    fn message_limits() {
        assert!(HashFunction::Md4.pad_bits(&[true; 447]).is_ok());
        assert_eq!(
            HashFunction::Sha1.pad_bytes(&[0; 56]),
            Err(CircuitError::MessageTooLong { bits: 448, max: 447 })
        );
        assert_eq!(HashFunction::MAX_MESSAGE_BYTES, 55);
    }
}
