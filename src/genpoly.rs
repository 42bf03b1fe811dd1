//! BCH generator polynomial construction
//!
//! The generator is the product of the minimal polynomials of
//! `alpha^1, alpha^3, ..., alpha^(2t-1)`. Conjugate roots are enumerated
//! first, then the product of the linear factors `(X + alpha^i)` is formed
//! in the log domain. All coefficients of the finished product lie in
//! GF(2), so it packs into a bit vector: MSB-first, bit 31 of word 0
//! holding the leading coefficient.

use crate::gf::{GfPoly, GfTables};
use crate::types::{BchError, BchResult};

/// Hard cap on the coefficient working buffer (covers m*t + 1 for every
/// supported parameter pair).
pub(crate) const MAX_GEN_POLY_SIZE: usize = 169;

/// Bit-packed generator polynomial.
#[derive(Debug, Clone)]
pub(crate) struct GeneratorPoly {
    /// MSB-first packed coefficients; bit 31 of `words[0]` is X^degree.
    pub words: Vec<u32>,
    /// Exact degree; equals the parity bit count of the code.
    pub degree: usize,
}

/// Build the generator polynomial for a t-error-correcting code over the
/// given field.
pub(crate) fn build(gf: &GfTables, t: u32) -> BchResult<GeneratorPoly> {
    let m = gf.m() as usize;
    let t = t as usize;
    let n = gf.n();

    let required = m * t + 1;
    if required > MAX_GEN_POLY_SIZE {
        return Err(BchError::GeneratorOverflow {
            required,
            limit: MAX_GEN_POLY_SIZE,
        });
    }

    // mark the conjugacy classes of the first t odd powers of alpha
    let mut roots = vec![false; n];
    for i in 0..t {
        let mut r = 2 * i + 1;
        for _ in 0..m {
            roots[r] = true;
            r = gf.mod_n(2 * r);
        }
    }

    // product of (X + alpha^i) over every marked root
    let mut g = GfPoly::zero(MAX_GEN_POLY_SIZE);
    g.set_one();
    for (i, _) in roots.iter().enumerate().filter(|(_, &set)| set) {
        let r = gf.a_pow(i);
        g.c[g.deg + 1] = 1;
        for j in (1..=g.deg).rev() {
            g.c[j] = gf.mul(g.c[j], r) ^ g.c[j - 1];
        }
        g.c[0] = gf.mul(g.c[0], r);
        g.deg += 1;
    }

    let degree = g.deg;
    let mut words = vec![0u32; (degree + 1 + 31) / 32];
    for idx in 0..=degree {
        if g.c[degree - idx] != 0 {
            words[idx / 32] |= 1 << (31 - (idx % 32));
        }
    }

    Ok(GeneratorPoly { words, degree })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_error_generator_is_primitive_poly() {
        // t=1: the generator is the minimal polynomial of alpha itself
        let gf = GfTables::build(8).unwrap();
        let g = build(&gf, 1).unwrap();
        assert_eq!(g.degree, 8);
        assert_eq!(g.words, vec![0x11D << 23]);
    }

    #[test]
    fn test_degree_is_m_times_t_for_prime_m() {
        // 13 is prime, so every odd-power conjugacy class has size 13
        let gf = GfTables::build(13).unwrap();
        for t in [1u32, 4, 8, 12] {
            let g = build(&gf, t).unwrap();
            assert_eq!(g.degree, 13 * t as usize, "t={t}");
            // leading coefficient present
            assert_eq!(g.words[0] >> 31, 1);
            assert_eq!(g.words.len(), (g.degree + 1 + 31) / 32);
        }
    }

    #[test]
    fn test_constant_term_is_one() {
        // alpha^i != 0 for every root, so the product of roots is nonzero
        let gf = GfTables::build(10).unwrap();
        let g = build(&gf, 4).unwrap();
        let idx = g.degree;
        let bit = (g.words[idx / 32] >> (31 - (idx % 32))) & 1;
        assert_eq!(bit, 1);
    }

    #[test]
    fn test_coefficient_buffer_cap() {
        let gf = GfTables::build(13).unwrap();
        assert!(matches!(
            build(&gf, 13),
            Err(BchError::GeneratorOverflow {
                required: 170,
                limit: MAX_GEN_POLY_SIZE
            })
        ));
    }
}
