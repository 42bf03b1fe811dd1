//! # BCH ECC Codec
//!
//! Software BCH (Bose-Chaudhuri-Hocquenghem) error-correcting codec over
//! GF(2^m) for NAND flash page ECC.
//!
//! A raw-NAND storage driver runs each page through the codec in fixed
//! `block_size` steps: on program it stores the parity bytes in the spare
//! area, on read it hands the possibly corrupted block plus the stored
//! parity to [`Bch::decode`], which locates and flips up to `t` bad bits
//! in place. Fields GF(2^8) through GF(2^13) and correction capabilities
//! of 1 to 12 bits per block are supported.
//!
//! ## Data Flow
//!
//! ```text
//! encode: data → 32-bit folding through mod table → parity bytes
//! decode: data + parity → re-encode diff → syndromes
//!         → error locator (Berlekamp-Massey) → Chien search → bit flips
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bch_ecc::{Bch, BchConfig};
//!
//! // 512-byte ECC step, 4-bit correction over GF(2^13)
//! let mut bch = Bch::new(BchConfig::nand_step_512_t4()).unwrap();
//!
//! let data = vec![0xA5u8; 512];
//! let mut ecc = vec![0u8; bch.ecc_bytes()];
//! bch.encode(&data, &mut ecc).unwrap();
//!
//! // two bit errors picked up from the flash array
//! let mut received = data.clone();
//! received[10] ^= 0x04;
//! received[300] ^= 0x80;
//!
//! let corrected = bch.decode(&mut received, &ecc).unwrap();
//! assert_eq!(corrected, 2);
//! assert_eq!(received, data);
//! ```

pub mod codec;
mod genpoly;
pub mod gf;
mod modtab;
pub mod types;

pub use codec::Bch;
pub use types::{BchConfig, BchError, BchResult};
