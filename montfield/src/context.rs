//! Montgomery context: modulus-dependent constants and field operations.

use crate::{
    Error, MontValue, Result,
    limbs::{Word, WORD_BITS, adc, bytes_to_words, mac, sbb, try_alloc_words, words_to_bytes},
};
use alloc::boxed::Box;
use core::fmt;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Largest supported modulus, in words (2048 bits).
pub const MAX_WORDS: usize = 32;

/// Montgomery arithmetic context for an odd modulus `N`.
///
/// Holds `N`, `R mod N` and `R² mod N` (with `R = 2^(64·W)`) and the word
/// inverse `-N⁻¹ mod 2^64` used by the reduction step. Every [`MontValue`]
/// produced by a context has exactly [`MontContext::words`] words.
///
/// Operations never allocate except for the constructors that return a new
/// value, and run in time independent of the value operands. The modulus
/// itself is considered public.
#[derive(Clone)]
pub struct MontContext {
    modulus: Box<[Word]>,
    modulus_minus_two: Box<[Word]>,
    one: Box<[Word]>,
    r2: Box<[Word]>,
    m0: Word,
    bytes: usize,
}

impl MontContext {
    /// Build a context from a big-endian modulus.
    ///
    /// Leading zero bytes are ignored. The modulus must be odd, greater than
    /// one and at most [`MAX_WORDS`] words wide.
    pub fn new(modulus_be: &[u8]) -> Result<Self> {
        let first = modulus_be
            .iter()
            .position(|&b| b != 0)
            .ok_or(Error::Value)?;
        let significant = &modulus_be[first..];
        let words = significant.len().div_ceil(WORD_BITS / 8);
        if words > MAX_WORDS {
            return Err(Error::Value);
        }

        let mut modulus = try_alloc_words(words)?;
        bytes_to_words(significant, &mut modulus)?;
        if modulus[0] & 1 == 0 || (words == 1 && modulus[0] == 1) {
            return Err(Error::Value);
        }

        // Newton iteration, each step doubles the number of correct low bits.
        let mut inv: Word = 1;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(modulus[0].wrapping_mul(inv)));
        }
        let m0 = inv.wrapping_neg();

        // R mod N and R² mod N by repeated doubling, starting from 1.
        let mut one = try_alloc_words(words)?;
        one[0] = 1;
        for _ in 0..words * WORD_BITS {
            double_mod_vartime(&mut one, &modulus);
        }
        let mut r2 = try_alloc_words(words)?;
        r2.copy_from_slice(&one);
        for _ in 0..words * WORD_BITS {
            double_mod_vartime(&mut r2, &modulus);
        }

        let mut modulus_minus_two = try_alloc_words(words)?;
        let mut borrow = 0;
        for (i, dst) in modulus_minus_two.iter_mut().enumerate() {
            (*dst, borrow) = sbb(modulus[i], if i == 0 { 2 } else { 0 }, borrow);
        }

        Ok(Self {
            modulus,
            modulus_minus_two,
            one,
            r2,
            m0,
            bytes: significant.len(),
        })
    }

    /// Number of words in every value of this context.
    pub fn words(&self) -> usize {
        self.modulus.len()
    }

    /// Size of the modulus in bytes, i.e. the field byte width.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Write the modulus as big-endian bytes, left-padded to `out.len()`.
    pub fn modulus_bytes(&self, out: &mut [u8]) -> Result<()> {
        words_to_bytes(&self.modulus, out)
    }

    /// Allocate a new value set to zero.
    pub fn alloc(&self) -> Result<MontValue> {
        Ok(MontValue::from_words(try_alloc_words(self.words())?))
    }

    /// New value holding `0`.
    pub fn zero(&self) -> Result<MontValue> {
        self.alloc()
    }

    /// New value holding `1`.
    pub fn one(&self) -> Result<MontValue> {
        let mut out = self.alloc()?;
        out.words.copy_from_slice(&self.one);
        Ok(out)
    }

    /// New value holding the small integer `n` (reduced modulo `N`).
    pub fn number(&self, n: u64) -> Result<MontValue> {
        let mut out = self.alloc()?;
        self.set(&mut out, n);
        Ok(out)
    }

    /// Set `out` to the small integer `n` (reduced modulo `N`).
    pub fn set(&self, out: &mut MontValue, n: u64) {
        let mut plain = [0 as Word; MAX_WORDS];
        plain[0] = n;
        self.set_words(out, &plain[..self.words()]);
    }

    /// Set `out` to the integer whose little-endian words are `words`,
    /// reduced modulo `N`.
    ///
    /// `words` must have exactly [`MontContext::words`] entries but may hold
    /// any value, including one larger than the modulus.
    pub fn set_words(&self, out: &mut MontValue, words: &[Word]) {
        debug_assert_eq!(words.len(), self.words());
        self.mont_mul(&mut out.words, words, &self.r2);
    }

    /// Convert a big-endian integer to Montgomery form.
    ///
    /// Any length is accepted as long as the integer fits in
    /// [`MontContext::words`] words; it is reduced modulo `N`.
    pub fn from_bytes(&self, be: &[u8]) -> Result<MontValue> {
        let w = self.words();
        let mut plain = [0 as Word; MAX_WORDS];
        bytes_to_words(be, &mut plain[..w])?;
        let mut out = self.alloc()?;
        self.set_words(&mut out, &plain[..w]);
        plain.zeroize();
        Ok(out)
    }

    /// Write the canonical big-endian encoding of `value` to `out`.
    ///
    /// `out` must be at least [`MontContext::bytes`] long; the encoding is
    /// left-padded with zeros.
    pub fn to_bytes(&self, value: &MontValue, out: &mut [u8]) -> Result<()> {
        if out.len() < self.bytes {
            return Err(Error::Value);
        }
        let w = self.words();
        let mut unit = [0 as Word; MAX_WORDS];
        unit[0] = 1;
        let mut plain = [0 as Word; MAX_WORDS];
        self.mont_mul(&mut plain[..w], &value.words, &unit[..w]);
        let ret = words_to_bytes(&plain[..w], out);
        plain.zeroize();
        ret
    }

    /// Whether the big-endian integer `be` is strictly smaller than `N`.
    ///
    /// Integers wider than the modulus are never canonical.
    pub fn is_canonical(&self, be: &[u8]) -> Choice {
        let w = self.words();
        let mut plain = [0 as Word; MAX_WORDS];
        if bytes_to_words(be, &mut plain[..w]).is_err() {
            return Choice::from(0);
        }
        let mut borrow = 0;
        for (x, n) in plain[..w].iter().zip(self.modulus.iter()) {
            (_, borrow) = sbb(*x, *n, borrow);
        }
        plain.zeroize();
        Choice::from((borrow & 1) as u8)
    }

    /// Whether `a` is zero.
    pub fn is_zero(&self, a: &MontValue) -> Choice {
        a.words.iter().fold(0 as Word, |acc, w| acc | w).ct_eq(&0)
    }

    /// Whether `a` is one.
    pub fn is_one(&self, a: &MontValue) -> Choice {
        a.words.ct_eq(&self.one)
    }

    /// Whether `a` and `b` hold the same integer.
    pub fn is_equal(&self, a: &MontValue, b: &MontValue) -> Choice {
        a.ct_eq(b)
    }

    /// Copy `src` into `dst`.
    pub fn copy(&self, dst: &mut MontValue, src: &MontValue) {
        dst.words.copy_from_slice(&src.words);
    }

    /// Overwrite `dst` with `src` if `choice` is set.
    pub fn conditional_assign(&self, dst: &mut MontValue, src: &MontValue, choice: Choice) {
        dst.conditional_assign(src, choice);
    }

    /// `out = a + b mod N`.
    pub fn add(&self, out: &mut MontValue, a: &MontValue, b: &MontValue) {
        let w = self.words();
        let mut sum = [0 as Word; MAX_WORDS];
        let mut carry = 0;
        for i in 0..w {
            (sum[i], carry) = adc(a.words[i], b.words[i], carry);
        }
        self.reduce_once(&mut out.words, &sum[..w], carry);
        sum.zeroize();
    }

    /// `out = a - b mod N`.
    pub fn sub(&self, out: &mut MontValue, a: &MontValue, b: &MontValue) {
        sub_mod(&mut out.words, &a.words, &b.words, &self.modulus);
    }

    /// `out = -a mod N`.
    pub fn neg(&self, out: &mut MontValue, a: &MontValue) {
        let zero = [0 as Word; MAX_WORDS];
        sub_mod(&mut out.words, &zero[..self.words()], &a.words, &self.modulus);
    }

    /// Montgomery product `out = a·b·R⁻¹ mod N`, i.e. the field product of
    /// two values in Montgomery form.
    pub fn mul(&self, out: &mut MontValue, a: &MontValue, b: &MontValue) {
        self.mont_mul(&mut out.words, &a.words, &b.words);
    }

    /// `out = a² mod N`.
    pub fn square(&self, out: &mut MontValue, a: &MontValue) {
        self.mont_mul(&mut out.words, &a.words, &a.words);
    }

    /// `out = a^(N-2) mod N`, the inverse of `a` when `N` is prime.
    ///
    /// The square-and-multiply schedule depends only on the modulus. Zero
    /// maps to zero.
    pub fn inv_prime(&self, out: &mut MontValue, a: &MontValue) {
        let w = self.words();
        let mut acc = [0 as Word; MAX_WORDS];
        let mut sq = [0 as Word; MAX_WORDS];
        acc[..w].copy_from_slice(&self.one);

        for bit in (0..w * WORD_BITS).rev() {
            self.mont_mul(&mut sq[..w], &acc[..w], &acc[..w]);
            if (self.modulus_minus_two[bit / WORD_BITS] >> (bit % WORD_BITS)) & 1 == 1 {
                self.mont_mul(&mut acc[..w], &sq[..w], &a.words);
            } else {
                acc[..w].copy_from_slice(&sq[..w]);
            }
        }

        out.words.copy_from_slice(&acc[..w]);
        acc.zeroize();
        sq.zeroize();
    }

    /// CIOS Montgomery multiplication.
    fn mont_mul(&self, out: &mut [Word], a: &[Word], b: &[Word]) {
        let n = &self.modulus;
        let w = n.len();
        debug_assert!(out.len() == w && a.len() == w && b.len() == w);

        let mut t = [0 as Word; MAX_WORDS + 2];
        for &bi in b {
            let mut carry = 0;
            for j in 0..w {
                (t[j], carry) = mac(t[j], a[j], bi, carry);
            }
            (t[w], t[w + 1]) = adc(t[w], carry, 0);

            let m = t[0].wrapping_mul(self.m0);
            let (_, mut carry) = mac(t[0], m, n[0], 0);
            for j in 1..w {
                (t[j - 1], carry) = mac(t[j], m, n[j], carry);
            }
            let (top, hi) = adc(t[w], carry, 0);
            t[w - 1] = top;
            t[w] = t[w + 1] + hi;
        }

        self.reduce_once(out, &t[..w], t[w]);
        t.zeroize();
    }

    /// `out = hi·R + lo` minus `N` if that does not underflow; requires the
    /// input to be below `2N`.
    fn reduce_once(&self, out: &mut [Word], lo: &[Word], hi: Word) {
        let mut borrow = 0;
        for (i, dst) in out.iter_mut().enumerate() {
            (*dst, borrow) = sbb(lo[i], self.modulus[i], borrow);
        }
        let (_, borrow) = sbb(hi, 0, borrow);

        for (dst, src) in out.iter_mut().zip(lo) {
            *dst = (*dst & !borrow) | (src & borrow);
        }
    }
}

impl PartialEq for MontContext {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for MontContext {}

impl fmt::Debug for MontContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MontContext")
            .field("words", &self.words())
            .field("bytes", &self.bytes)
            .finish_non_exhaustive()
    }
}

/// `out = a - b mod n` for `a, b < n`.
fn sub_mod(out: &mut [Word], a: &[Word], b: &[Word], n: &[Word]) {
    let mut borrow = 0;
    for (i, dst) in out.iter_mut().enumerate() {
        (*dst, borrow) = sbb(a[i], b[i], borrow);
    }
    let mut carry = 0;
    for (i, dst) in out.iter_mut().enumerate() {
        (*dst, carry) = adc(*dst, n[i] & borrow, carry);
    }
}

/// `x = 2x mod n` for `x < n`. Only used on public constants.
fn double_mod_vartime(x: &mut [Word], n: &[Word]) {
    let mut carry = 0;
    for w in x.iter_mut() {
        let top = *w >> (WORD_BITS - 1);
        *w = (*w << 1) | carry;
        carry = top;
    }
    if carry == 1 || !crate::limbs::lt_vartime(x, n) {
        let mut borrow = 0;
        for (w, m) in x.iter_mut().zip(n) {
            (*w, borrow) = sbb(*w, *m, borrow);
        }
    }
}
