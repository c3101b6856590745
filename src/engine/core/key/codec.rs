use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyCodecError {
    #[error("Dimension ordinal {ordinal} is out of range for a {dim_count}-dimension key")]
    OrdinalOutOfRange { ordinal: usize, dim_count: usize },

    #[error("Expected {expected} key values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    #[error("Value {value} exceeds the {bits}-bit width of ordinal {ordinal}")]
    ValueOverflow {
        ordinal: usize,
        bits: u8,
        value: u64,
    },
}

/// Bit-packing codec over a fixed ordinal space. One generator encodes the
/// packed row key; every multi-column group carries its own.
pub trait KeyGenerator: fmt::Debug + Send + Sync {
    fn dim_count(&self) -> usize;

    fn key_size_in_bytes(&self) -> usize;

    /// Inclusive byte span `[start, end]` the ordinal occupies in the encoded
    /// key, or `None` when the ordinal is out of range.
    fn byte_range(&self, ordinal: usize) -> Option<(usize, usize)>;

    /// Largest value the ordinal's bit width can hold. Out-of-range ordinals
    /// report 0.
    fn max_value(&self, ordinal: usize) -> u64;

    /// Packs one value per ordinal into the key bytes.
    fn encode(&self, values: &[u64]) -> Result<Vec<u8>, KeyCodecError>;
}

/// Variable-bit-width packer: each dimension gets just enough bits for its
/// cardinality, laid out MSB-first in declaration order.
#[derive(Debug, Clone)]
pub struct BitPackedKeyGenerator {
    bit_widths: Vec<u8>,
    bit_offsets: Vec<usize>,
    key_size: usize,
}

fn bits_needed(cardinality: u64) -> u8 {
    if cardinality <= 1 {
        1
    } else {
        (64 - (cardinality - 1).leading_zeros()) as u8
    }
}

impl BitPackedKeyGenerator {
    pub fn from_cardinalities(cardinalities: &[u64]) -> Self {
        let bit_widths: Vec<u8> = cardinalities.iter().map(|&c| bits_needed(c)).collect();
        let mut bit_offsets = Vec::with_capacity(bit_widths.len());
        let mut offset = 0usize;
        for &width in &bit_widths {
            bit_offsets.push(offset);
            offset += width as usize;
        }
        let key_size = offset.div_ceil(8).max(1);
        Self {
            bit_widths,
            bit_offsets,
            key_size,
        }
    }

    pub fn bit_width(&self, ordinal: usize) -> Option<u8> {
        self.bit_widths.get(ordinal).copied()
    }
}

impl KeyGenerator for BitPackedKeyGenerator {
    fn dim_count(&self) -> usize {
        self.bit_widths.len()
    }

    fn key_size_in_bytes(&self) -> usize {
        self.key_size
    }

    fn byte_range(&self, ordinal: usize) -> Option<(usize, usize)> {
        let width = *self.bit_widths.get(ordinal)? as usize;
        let start_bit = self.bit_offsets[ordinal];
        Some((start_bit / 8, (start_bit + width - 1) / 8))
    }

    fn max_value(&self, ordinal: usize) -> u64 {
        match self.bit_widths.get(ordinal) {
            Some(&bits) if bits >= 64 => u64::MAX,
            Some(&bits) => (1u64 << bits) - 1,
            None => 0,
        }
    }

    fn encode(&self, values: &[u64]) -> Result<Vec<u8>, KeyCodecError> {
        if values.len() != self.bit_widths.len() {
            return Err(KeyCodecError::ValueCountMismatch {
                expected: self.bit_widths.len(),
                actual: values.len(),
            });
        }
        let mut key = vec![0u8; self.key_size];
        for (ordinal, &value) in values.iter().enumerate() {
            let bits = self.bit_widths[ordinal];
            if value > self.max_value(ordinal) {
                return Err(KeyCodecError::ValueOverflow {
                    ordinal,
                    bits,
                    value,
                });
            }
            let start_bit = self.bit_offsets[ordinal];
            for bit in 0..bits as usize {
                if (value >> (bits as usize - 1 - bit)) & 1 == 1 {
                    let position = start_bit + bit;
                    key[position / 8] |= 1 << (7 - position % 8);
                }
            }
        }
        Ok(key)
    }
}
