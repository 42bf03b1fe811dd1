//! Modulo-reduction lookup table for the encoder
//!
//! Precomputes, for every 2-bit value at each of the 16 chunk positions of
//! a 32-bit word, the polynomial-division remainder that value contributes
//! once folded through the generator. With the table in hand the encoder
//! absorbs a whole data word with 16 lookups instead of 32 bit-serial
//! shift-and-subtract steps, the same trade the table-driven CRC engines
//! make.
//!
//! Entries share the encoder's register convention: `ecc_words` 32-bit
//! words, remainder left-justified with the X^(degree-1) coefficient at
//! bit 31 of word 0.

use crate::genpoly::GeneratorPoly;

/// Words per table entry is `ecc_words`; the table holds 16 positions x 4
/// values, with the all-zero value entries left zero.
pub(crate) fn build(gen: &GeneratorPoly, ecc_words: usize) -> Vec<u32> {
    let g = &gen.words;
    let plen = g.len();
    let mut tab = vec![0u32; 16 * 4 * ecc_words];

    for pos in 0..16 {
        for val in 1u32..4 {
            let entry = (pos * 4 + val as usize) * ecc_words;
            // remainder of (val << 2*pos) * X^degree modulo g
            let mut data = val << (2 * pos);
            while data != 0 {
                let d = (31 - data.leading_zeros()) as usize;
                // cancel bit d against the leading coefficient of g
                data ^= g[0] >> (31 - d);
                for j in 0..ecc_words {
                    let hi = if d < 31 { g[j] << (d + 1) } else { 0 };
                    let lo = if j + 1 < plen { g[j + 1] >> (31 - d) } else { 0 };
                    tab[entry + j] ^= hi | lo;
                }
            }
        }
    }
    tab
}
