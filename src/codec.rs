//! BCH encoder/decoder
//!
//! Systematic binary BCH codec over GF(2^m) with algebraic decoding:
//! syndrome computation, Berlekamp-Massey error locator construction and
//! Chien search for the error positions. One [`Bch`] instance serves one
//! storage device; every lookup table and scratch buffer is allocated at
//! construction and reused for the life of the codec.
//!
//! Encoding streams the block 32 bits at a time through the
//! modulo-reduction table. Decoding re-encodes the received data and works
//! from the XOR against the stored parity, so an error-free block costs
//! one encode pass and a comparison.
//!
//! The decode scratch buffers make an instance unusable from two threads
//! at once; callers that share a codec wrap it in a mutex, as a NAND
//! driver's command sequencing does anyway.
//!
//! ## Example
//!
//! ```rust
//! use bch_ecc::{Bch, BchConfig};
//!
//! let mut bch = Bch::new(BchConfig::nand_step_512_t8()).unwrap();
//! let data = vec![0x5Au8; 512];
//! let mut ecc = vec![0u8; bch.ecc_bytes()];
//! bch.encode(&data, &mut ecc).unwrap();
//!
//! let mut received = data.clone();
//! received[17] ^= 0x20;
//! assert_eq!(bch.decode(&mut received, &ecc), Ok(1));
//! assert_eq!(received, data);
//! ```

use log::debug;

use crate::genpoly::{self, GeneratorPoly};
use crate::gf::{GfElem, GfPoly, GfTables};
use crate::modtab;
use crate::types::{BchConfig, BchError, BchResult};

/// Upper bound on `ecc_words` over all supported parameters
/// (ceil(13 * 12 / 32)).
const ECC_MAX_WORDS: usize = 5;

/// BCH codec instance.
///
/// Construction builds the GF(2^m) tables, the generator polynomial and
/// the encoder's modulo-reduction table; [`encode`](Bch::encode) and
/// [`decode`](Bch::decode) then run without allocating.
#[derive(Debug)]
pub struct Bch {
    config: BchConfig,
    n: usize,
    ecc_bits: usize,
    ecc_bytes: usize,
    ecc_words: usize,
    gf: GfTables,
    genpoly: GeneratorPoly,
    mod_tab: Vec<u32>,
    // decode scratch, reused across calls
    ecc_diff: [u32; ECC_MAX_WORDS],
    syn: Vec<GfElem>,
    elp: GfPoly,
    pelp: GfPoly,
    elp_save: GfPoly,
    log_rep: Vec<i32>,
    errloc: Vec<u32>,
}

impl Bch {
    /// Build a codec for the given configuration.
    ///
    /// Fails when the parameters are out of range or when one block of
    /// data plus its parity would not fit in the `2^m - 1` bit codeword.
    pub fn new(config: BchConfig) -> BchResult<Self> {
        config.validate()?;
        let gf = GfTables::build(config.m)?;
        let genpoly = genpoly::build(&gf, config.t)?;

        let n = gf.n();
        let ecc_bits = genpoly.degree;
        let ecc_bytes = (ecc_bits + 7) / 8;
        let ecc_words = (ecc_bits + 31) / 32;
        if 8 * config.block_size + ecc_bits > n {
            return Err(BchError::BlockTooLarge {
                block_size: config.block_size,
                ecc_bits,
                n,
            });
        }

        let mod_tab = modtab::build(&genpoly, ecc_words);
        let t = config.t as usize;
        debug!(
            "bch codec ready: m={} t={} block={}B parity={}B ({} bits)",
            config.m, config.t, config.block_size, ecc_bytes, ecc_bits
        );

        Ok(Self {
            config,
            n,
            ecc_bits,
            ecc_bytes,
            ecc_words,
            gf,
            genpoly,
            mod_tab,
            ecc_diff: [0; ECC_MAX_WORDS],
            syn: vec![0; 2 * t],
            elp: GfPoly::zero(2 * t + 1),
            pelp: GfPoly::zero(2 * t + 1),
            elp_save: GfPoly::zero(2 * t + 1),
            log_rep: vec![-1; t + 1],
            errloc: vec![0; t],
        })
    }

    /// Codec configuration.
    pub fn config(&self) -> &BchConfig {
        &self.config
    }

    /// Maximum codeword length in bits, `2^m - 1`.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Exact generator degree, the number of parity bits per block.
    pub fn ecc_bits(&self) -> usize {
        self.ecc_bits
    }

    /// Parity bytes produced per coding block.
    pub fn ecc_bytes(&self) -> usize {
        self.ecc_bytes
    }

    /// Coding block size in bytes.
    pub fn block_size(&self) -> usize {
        self.config.block_size
    }

    /// Compute the parity block for one coding block of data.
    ///
    /// `data` must be exactly one block, `ecc` exactly
    /// [`ecc_bytes`](Bch::ecc_bytes) long. Parity is packed big-endian;
    /// trailing pad bits in the last byte are zero. The operation is a
    /// deterministic polynomial division and cannot fail beyond the length
    /// checks.
    pub fn encode(&self, data: &[u8], ecc: &mut [u8]) -> BchResult<()> {
        self.check_block(data.len())?;
        if ecc.len() != self.ecc_bytes {
            return Err(BchError::LengthMismatch {
                expected: self.ecc_bytes,
                actual: ecc.len(),
            });
        }
        let r = self.remainder(data);
        for (i, b) in ecc.iter_mut().enumerate() {
            *b = (r[i / 4] >> (24 - 8 * (i % 4))) as u8;
        }
        Ok(())
    }

    /// Correct up to t bit errors in `data` against its stored parity.
    ///
    /// Returns the number of located errors; 0 means the block was clean.
    /// Errors located inside the parity bytes are counted in the return
    /// value but not applied anywhere, so the total can exceed the number
    /// of data bits actually flipped back.
    ///
    /// [`BchError::Uncorrectable`] means more errors than the code can
    /// resolve. Patterns heavier than t that happen to alias to a valid
    /// codeword within distance t are miscorrected silently; that is
    /// inherent to BCH codes, and the caller treats a failed block as
    /// unreadable rather than retrying here.
    pub fn decode(&mut self, data: &mut [u8], ecc: &[u8]) -> BchResult<usize> {
        self.check_block(data.len())?;
        if ecc.len() != self.ecc_bytes {
            return Err(BchError::LengthMismatch {
                expected: self.ecc_bytes,
                actual: ecc.len(),
            });
        }

        // re-encode and diff against the stored parity; the difference has
        // the same syndromes as the actual error pattern
        let calc = self.remainder(data);
        let mut read = [0u32; ECC_MAX_WORDS];
        for (i, &b) in ecc.iter().enumerate() {
            read[i / 4] |= (b as u32) << (24 - 8 * (i % 4));
        }
        let mut any = 0u32;
        for i in 0..self.ecc_words {
            self.ecc_diff[i] = calc[i] ^ read[i];
            any |= self.ecc_diff[i];
        }
        if any == 0 {
            return Ok(0);
        }

        self.compute_syndromes();
        let deg = self.build_error_locator();
        if deg > self.config.t as usize {
            return Err(BchError::Uncorrectable);
        }
        if deg == 0 {
            // only unused pad bits of the stored parity differed
            return Ok(0);
        }
        if self.chien_search() != deg {
            return Err(BchError::Uncorrectable);
        }

        let nbits = 8 * self.config.block_size + self.ecc_bits;
        for k in 0..deg {
            let root = self.errloc[k] as usize;
            if root >= nbits {
                return Err(BchError::Uncorrectable);
            }
            // translate the algebraic bit index into the physical bit
            // order of the byte buffer
            let idx = nbits - 1 - root;
            let idx = (idx & !7) | (7 - (idx & 7));
            if idx < 8 * self.config.block_size {
                data[idx / 8] ^= 1 << (idx % 8);
            } else {
                debug!("correction at bit {idx} lands in the parity area, not applied");
            }
        }
        Ok(deg)
    }

    /// Encode a whole page as consecutive coding blocks, one parity chunk
    /// per block, the way a NAND driver steps through a page.
    pub fn encode_page(&self, page: &[u8], ecc: &mut [u8]) -> BchResult<()> {
        let blocks = self.page_blocks(page.len())?;
        let expected = blocks * self.ecc_bytes;
        if ecc.len() != expected {
            return Err(BchError::LengthMismatch {
                expected,
                actual: ecc.len(),
            });
        }
        for (blk, par) in page
            .chunks_exact(self.config.block_size)
            .zip(ecc.chunks_exact_mut(self.ecc_bytes))
        {
            self.encode(blk, par)?;
        }
        Ok(())
    }

    /// Correct a whole page in place; returns the summed per-block
    /// correction count. Fails on the first uncorrectable block.
    pub fn correct_page(&mut self, page: &mut [u8], ecc: &[u8]) -> BchResult<usize> {
        let blocks = self.page_blocks(page.len())?;
        let expected = blocks * self.ecc_bytes;
        if ecc.len() != expected {
            return Err(BchError::LengthMismatch {
                expected,
                actual: ecc.len(),
            });
        }
        let block = self.config.block_size;
        let mut total = 0;
        for b in 0..blocks {
            let blk = &mut page[b * block..(b + 1) * block];
            let par = &ecc[b * self.ecc_bytes..(b + 1) * self.ecc_bytes];
            total += self.decode(blk, par)?;
        }
        Ok(total)
    }

    fn check_block(&self, len: usize) -> BchResult<()> {
        if len != self.config.block_size {
            return Err(BchError::LengthMismatch {
                expected: self.config.block_size,
                actual: len,
            });
        }
        Ok(())
    }

    fn page_blocks(&self, len: usize) -> BchResult<usize> {
        let block = self.config.block_size;
        if len == 0 || len % block != 0 {
            return Err(BchError::PageGeometry { page: len, block });
        }
        Ok(len / block)
    }

    /// Polynomial-division remainder of (zero padding + data), kept
    /// left-justified in `ecc_words` 32-bit register words.
    fn remainder(&self, data: &[u8]) -> [u32; ECC_MAX_WORDS] {
        let l = self.ecc_words - 1;
        let mut r = [0u32; ECC_MAX_WORDS];
        for chunk in data.chunks_exact(4) {
            let w = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ r[0];
            for i in 0..l {
                r[i] = r[i + 1];
            }
            r[l] = 0;
            // fold the 16 two-bit chunks of the word through the mod table
            for pos in 0..16 {
                let val = ((w >> (2 * pos)) & 3) as usize;
                if val != 0 {
                    let entry = (pos * 4 + val) * self.ecc_words;
                    for (i, word) in self.mod_tab[entry..entry + self.ecc_words]
                        .iter()
                        .enumerate()
                    {
                        r[i] ^= word;
                    }
                }
            }
        }
        r
    }

    /// Evaluate the parity-difference polynomial at alpha^1 .. alpha^2t.
    ///
    /// Only the odd syndromes are evaluated directly; for a binary code
    /// S_2j = S_j^2.
    fn compute_syndromes(&mut self) {
        let t2 = 2 * self.config.t as usize;
        let frac = self.ecc_bits % 32;
        if frac != 0 {
            // clear pad bits below the generator degree
            self.ecc_diff[self.ecc_bits / 32] &= !((1u32 << (32 - frac)) - 1);
        }
        self.syn.fill(0);

        let mut s = self.ecc_bits as i32;
        for w in 0..self.ecc_words {
            let mut poly = self.ecc_diff[w];
            s -= 32;
            while poly != 0 {
                let i = (31 - poly.leading_zeros()) as i32;
                let e = (i + s) as usize;
                for j in (0..t2).step_by(2) {
                    self.syn[j] ^= self.gf.a_pow((j + 1) * e);
                }
                poly ^= 1 << i;
            }
        }
        for j in 0..self.config.t as usize {
            self.syn[2 * j + 1] = self.gf.sqr(self.syn[j]);
        }
    }

    /// Berlekamp-Massey iteration for binary codes; returns the
    /// error-locator degree, which exceeds t when the pattern is
    /// uncorrectable.
    fn build_error_locator(&mut self) -> usize {
        let t = self.config.t as usize;
        let n = self.n;
        self.elp.set_one();
        self.pelp.set_one();

        let mut d = self.syn[0];
        let mut pd: GfElem = 1;
        let mut pp: i32 = -1;

        let mut i = 0;
        while i < t && self.elp.deg <= t {
            if d != 0 {
                // elp += (d / pd) * X^(2i - pp) * pelp
                let k = (2 * i as i32 - pp) as usize;
                self.elp_save.assign(&self.elp);
                let shift = self.gf.log(d) + n - self.gf.log(pd);
                for j in 0..=self.pelp.deg {
                    if self.pelp.c[j] != 0 {
                        let l = self.gf.log(self.pelp.c[j]);
                        self.elp.c[j + k] ^= self.gf.a_pow(shift + l);
                    }
                }
                let pdeg = self.pelp.deg + k;
                if pdeg > self.elp.deg {
                    self.elp.deg = pdeg;
                    self.pelp.assign(&self.elp_save);
                    pd = d;
                    pp = 2 * i as i32;
                }
            }
            // next discrepancy against the odd syndrome two steps ahead
            if i < t - 1 {
                d = self.syn[2 * i + 2];
                for j in 1..=self.elp.deg {
                    d ^= self.gf.mul(self.elp.c[j], self.syn[2 * i + 2 - j]);
                }
            }
            i += 1;
        }
        self.elp.deg
    }

    /// Brute-force root search over every field element inside the
    /// codeword span. Returns the number of roots found; anything other
    /// than the locator degree means the pattern is not a valid codeword
    /// perturbation.
    fn chien_search(&mut self) -> usize {
        let deg = self.elp.deg;
        let n = self.n;
        let lead = self.elp.c[deg];
        if lead == 0 {
            // degenerate locator, only seen beyond the design capacity
            return 0;
        }

        // log representation of the locator, normalized by its leading
        // coefficient
        let offset = n - self.gf.log(lead);
        for j in 1..deg {
            self.log_rep[j] = match self.elp.c[j] {
                0 => -1,
                c => self.gf.mod_n(self.gf.log(c) + offset) as i32,
            };
        }
        self.log_rep[deg] = 0;
        let syn0 = self.gf.div(self.elp.c[0], lead);

        let span = 8 * self.config.block_size + self.ecc_bits;
        let mut count = 0;
        for i in (n - span + 1)..=n {
            let mut syn = syn0;
            for j in 1..=deg {
                let rep = self.log_rep[j];
                if rep >= 0 {
                    syn ^= self.gf.a_pow(rep as usize + j * i);
                }
            }
            if syn == 0 {
                self.errloc[count] = (n - i) as u32;
                count += 1;
                if count == deg {
                    break;
                }
            }
        }
        count
    }
}
