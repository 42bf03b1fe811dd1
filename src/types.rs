//! Core types for the BCH codec
//!
//! Defines the error taxonomy shared by every stage of the codec
//! (construction, encoding, decoding) and the configuration struct that
//! fixes a codec's geometry: the Galois field order `m`, the correction
//! capability `t`, and the size of one coding block in bytes.

use serde::{Deserialize, Serialize};

/// Result type for codec operations
pub type BchResult<T> = Result<T, BchError>;

/// Smallest supported Galois field order (GF(2^8))
pub const MIN_M: u32 = 8;
/// Largest supported Galois field order (GF(2^13))
pub const MAX_M: u32 = 13;
/// Smallest supported correction capability in bits
pub const MIN_T: u32 = 1;
/// Largest supported correction capability in bits
pub const MAX_T: u32 = 12;

/// Errors that can occur during codec construction or use
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BchError {
    #[error("Invalid field order m = {0}. Must be between 8 and 13")]
    InvalidFieldOrder(u32),

    #[error("Invalid correction capability t = {0}. Must be between 1 and 12")]
    InvalidCorrectionCapability(u32),

    #[error("Invalid block size {0}. Must be a nonzero multiple of 4 bytes")]
    InvalidBlockSize(usize),

    #[error(
        "Block of {block_size} bytes plus {ecc_bits} parity bits exceeds the \
         {n}-bit codeword capacity of GF(2^m)"
    )]
    BlockTooLarge {
        block_size: usize,
        ecc_bits: usize,
        n: usize,
    },

    #[error("Generator polynomial needs {required} coefficients, limit is {limit}")]
    GeneratorOverflow { required: usize, limit: usize },

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Page of {page} bytes is not a whole number of {block}-byte coding blocks")]
    PageGeometry { page: usize, block: usize },

    #[error("Uncorrectable error pattern")]
    Uncorrectable,
}

/// BCH codec configuration.
///
/// `m` selects the Galois field GF(2^m) and therefore the maximum codeword
/// length `n = 2^m - 1` bits; `t` is the number of bit errors one coding
/// block can recover from; `block_size` is the number of data bytes fed
/// through the codec per encode/decode call (the NAND ECC step size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BchConfig {
    /// Galois field order, 8..=13.
    pub m: u32,
    /// Error correction capability in bits, 1..=12.
    pub t: u32,
    /// Coding block size in bytes; must be a nonzero multiple of 4.
    pub block_size: usize,
}

impl BchConfig {
    /// Create a configuration from raw parameters.
    pub fn new(m: u32, t: u32, block_size: usize) -> Self {
        Self { m, t, block_size }
    }

    /// 512-byte ECC step, 4-bit correction — common SLC NAND spare layout.
    pub fn nand_step_512_t4() -> Self {
        Self::new(13, 4, 512)
    }

    /// 512-byte ECC step, 8-bit correction — common MLC NAND spare layout.
    pub fn nand_step_512_t8() -> Self {
        Self::new(13, 8, 512)
    }

    /// Check parameter ranges.
    ///
    /// The codeword-capacity bound depends on the exact generator degree
    /// and is checked during codec construction instead.
    pub fn validate(&self) -> BchResult<()> {
        if !(MIN_M..=MAX_M).contains(&self.m) {
            return Err(BchError::InvalidFieldOrder(self.m));
        }
        if !(MIN_T..=MAX_T).contains(&self.t) {
            return Err(BchError::InvalidCorrectionCapability(self.t));
        }
        if self.block_size == 0 || self.block_size % 4 != 0 {
            return Err(BchError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_valid() {
        assert!(BchConfig::nand_step_512_t4().validate().is_ok());
        assert!(BchConfig::nand_step_512_t8().validate().is_ok());
    }

    #[test]
    fn test_field_order_range() {
        assert_eq!(
            BchConfig::new(7, 4, 512).validate(),
            Err(BchError::InvalidFieldOrder(7))
        );
        assert_eq!(
            BchConfig::new(14, 4, 512).validate(),
            Err(BchError::InvalidFieldOrder(14))
        );
    }

    #[test]
    fn test_correction_capability_range() {
        assert_eq!(
            BchConfig::new(13, 0, 512).validate(),
            Err(BchError::InvalidCorrectionCapability(0))
        );
        assert_eq!(
            BchConfig::new(13, 13, 512).validate(),
            Err(BchError::InvalidCorrectionCapability(13))
        );
    }

    #[test]
    fn test_block_size_alignment() {
        assert_eq!(
            BchConfig::new(13, 4, 0).validate(),
            Err(BchError::InvalidBlockSize(0))
        );
        assert_eq!(
            BchConfig::new(13, 4, 510).validate(),
            Err(BchError::InvalidBlockSize(510))
        );
    }
}
