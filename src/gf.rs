//! Galois field GF(2^m) arithmetic
//!
//! Exponent/log lookup tables for the fields GF(2^8) through GF(2^13),
//! built from a fixed table of primitive polynomials. All field
//! multiplication, division and exponentiation in the codec goes through
//! these tables in the log domain.
//!
//! Conventions: `a_pow(0) == 1`, `a_pow(n) == 1` (the exponent wraps at
//! `n = 2^m - 1`), and `log(0)` is undefined — the table stores 0 there by
//! convention and callers must never ask for it.

use crate::types::{BchError, BchResult, MAX_M, MIN_M};

/// A field element; at most 13 significant bits.
pub type GfElem = u16;

/// Primitive polynomials for GF(2^m), indexed by `m - 8`.
const PRIM_POLY: [u32; 6] = [0x11D, 0x211, 0x409, 0x805, 0x1053, 0x201B];

/// Exponent and log tables for one field GF(2^m).
#[derive(Debug, Clone)]
pub struct GfTables {
    m: u32,
    n: usize,
    a_pow: Vec<GfElem>,
    a_log: Vec<GfElem>,
}

impl GfTables {
    /// Build the tables for GF(2^m), m in 8..=13.
    pub fn build(m: u32) -> BchResult<Self> {
        if !(MIN_M..=MAX_M).contains(&m) {
            return Err(BchError::InvalidFieldOrder(m));
        }
        let poly = PRIM_POLY[(m - MIN_M) as usize];
        let n = (1usize << m) - 1;
        let overflow = 1u32 << m;

        let mut a_pow = vec![0 as GfElem; n + 1];
        let mut a_log = vec![0 as GfElem; n + 1];

        let mut x: u32 = 1;
        for i in 0..n {
            a_pow[i] = x as GfElem;
            a_log[x as usize] = i as GfElem;
            x <<= 1;
            if x & overflow != 0 {
                x ^= poly;
            }
        }
        // exponent n wraps back to alpha^0
        a_pow[n] = 1;
        a_log[0] = 0;

        Ok(Self { m, n, a_pow, a_log })
    }

    /// Field order m.
    pub fn m(&self) -> u32 {
        self.m
    }

    /// Multiplicative group order n = 2^m - 1.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Reduce an exponent modulo n without division.
    ///
    /// Works for arbitrary magnitudes because n is an all-ones mask.
    #[inline]
    pub fn mod_n(&self, mut v: usize) -> usize {
        let n = self.n;
        while v >= n {
            v -= n;
            v = (v & n) + (v >> self.m);
        }
        v
    }

    /// alpha^exp, for any non-negative exponent.
    #[inline]
    pub fn a_pow(&self, exp: usize) -> GfElem {
        self.a_pow[self.mod_n(exp)]
    }

    /// Discrete log of a nonzero element.
    #[inline]
    pub fn log(&self, x: GfElem) -> usize {
        debug_assert!(x != 0, "log of zero is undefined");
        self.a_log[x as usize] as usize
    }

    /// Field multiplication.
    #[inline]
    pub fn mul(&self, a: GfElem, b: GfElem) -> GfElem {
        if a == 0 || b == 0 {
            return 0;
        }
        let mut e = self.log(a) + self.log(b);
        if e >= self.n {
            e -= self.n;
        }
        self.a_pow[e]
    }

    /// Field squaring.
    #[inline]
    pub fn sqr(&self, a: GfElem) -> GfElem {
        if a == 0 {
            return 0;
        }
        let mut e = 2 * self.log(a);
        if e >= self.n {
            e -= self.n;
        }
        self.a_pow[e]
    }

    /// Field division a / b, b nonzero.
    #[inline]
    pub fn div(&self, a: GfElem, b: GfElem) -> GfElem {
        debug_assert!(b != 0, "division by zero");
        if a == 0 {
            return 0;
        }
        let mut e = self.log(a) + self.n - self.log(b);
        if e >= self.n {
            e -= self.n;
        }
        self.a_pow[e]
    }

    /// Multiplicative inverse of a nonzero element.
    #[inline]
    pub fn inv(&self, a: GfElem) -> GfElem {
        debug_assert!(a != 0, "inverse of zero is undefined");
        self.a_pow[self.n - self.log(a)]
    }
}

/// Polynomial over GF(2^m) with explicit degree tracking.
///
/// Coefficient `c[i]` multiplies X^i. Used for the generator-polynomial
/// product and the error-locator polynomial; capacity is fixed at
/// allocation and never grows.
#[derive(Debug, Clone)]
pub(crate) struct GfPoly {
    pub deg: usize,
    pub c: Vec<GfElem>,
}

impl GfPoly {
    /// Zero polynomial with room for `cap` coefficients.
    pub fn zero(cap: usize) -> Self {
        Self {
            deg: 0,
            c: vec![0; cap],
        }
    }

    /// Reset to the constant polynomial 1.
    pub fn set_one(&mut self) {
        self.c.fill(0);
        self.c[0] = 1;
        self.deg = 0;
    }

    /// Copy degree and coefficients from another polynomial of equal capacity.
    pub fn assign(&mut self, other: &GfPoly) {
        self.c.copy_from_slice(&other.c);
        self.deg = other.deg;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unsupported_order() {
        assert!(GfTables::build(7).is_err());
        assert!(GfTables::build(14).is_err());
    }

    #[test]
    fn test_known_gf256_values() {
        let gf = GfTables::build(8).unwrap();
        assert_eq!(gf.n(), 255);
        assert_eq!(gf.a_pow(0), 1);
        assert_eq!(gf.a_pow(1), 2);
        // x^8 = x^4 + x^3 + x^2 + 1 under 0x11D
        assert_eq!(gf.a_pow(8), 0x1D);
        // exponent wraps at n
        assert_eq!(gf.a_pow(255), 1);
        assert_eq!(gf.a_pow(260), gf.a_pow(5));
    }

    #[test]
    fn test_log_inverts_pow() {
        for m in 8..=13 {
            let gf = GfTables::build(m).unwrap();
            for e in [0usize, 1, 7, 100, gf.n() - 1] {
                let x = gf.a_pow(e);
                assert_eq!(gf.log(x), e % gf.n(), "m={m} e={e}");
            }
        }
    }

    #[test]
    fn test_mul_div_inv() {
        let gf = GfTables::build(13).unwrap();
        let a = gf.a_pow(1234);
        let b = gf.a_pow(4321);
        assert_eq!(gf.mul(a, b), gf.mul(b, a));
        assert_eq!(gf.div(gf.mul(a, b), b), a);
        assert_eq!(gf.mul(a, gf.inv(a)), 1);
        assert_eq!(gf.mul(a, 0), 0);
        assert_eq!(gf.div(0, b), 0);
    }

    #[test]
    fn test_sqr_matches_mul() {
        let gf = GfTables::build(10).unwrap();
        for e in [0usize, 3, 500, 1000] {
            let x = gf.a_pow(e);
            assert_eq!(gf.sqr(x), gf.mul(x, x));
        }
        assert_eq!(gf.sqr(0), 0);
    }

    #[test]
    fn test_every_nonzero_element_has_a_log() {
        let gf = GfTables::build(9).unwrap();
        let mut seen = vec![false; gf.n() + 1];
        for e in 0..gf.n() {
            let x = gf.a_pow(e) as usize;
            assert!(x != 0 && !seen[x], "alpha^{e} repeats or vanishes");
            seen[x] = true;
        }
    }
}
