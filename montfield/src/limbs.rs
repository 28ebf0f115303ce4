//! Limb-level helpers: word primitives, big-endian codec and fallible allocation.

use crate::{Error, Result};
use alloc::{boxed::Box, vec::Vec};

/// Machine word used for every limb.
pub type Word = u64;

/// Double-width word used for intermediate products.
pub type WideWord = u128;

/// Size of a [`Word`] in bits.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Size of a [`Word`] in bytes.
pub const WORD_BYTES: usize = WORD_BITS / 8;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn adc(a: Word, b: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + (b as WideWord) + (carry as WideWord);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// The borrow is either `0` or `Word::MAX`, so it can be used directly as a mask.
#[inline(always)]
pub const fn sbb(a: Word, b: Word, borrow: Word) -> (Word, Word) {
    let borrow = (borrow >> (WORD_BITS - 1)) as WideWord;
    let ret = (a as WideWord).wrapping_sub((b as WideWord) + borrow);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn mac(a: Word, b: Word, c: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + ((b as WideWord) * (c as WideWord)) + (carry as WideWord);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Number of words needed to hold an integer of `len` bytes.
pub const fn words_for_bytes(len: usize) -> usize {
    len.div_ceil(WORD_BYTES)
}

/// Decode a big-endian integer into little-endian words.
///
/// Leading zero bytes are ignored, so `bytes` may be longer than `out` as long
/// as the integer itself fits. `out` is only written on success.
pub fn bytes_to_words(bytes: &[u8], out: &mut [Word]) -> Result<()> {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.len() > out.len() * WORD_BYTES {
        return Err(Error::Value);
    }

    out.fill(0);
    for (i, &byte) in significant.iter().rev().enumerate() {
        out[i / WORD_BYTES] |= Word::from(byte) << (8 * (i % WORD_BYTES));
    }
    Ok(())
}

/// Encode little-endian words as a big-endian integer filling all of `out`.
///
/// The encoding is left-padded with zeros. Fails without touching `out` if the
/// integer needs more than `out.len()` bytes.
pub fn words_to_bytes(words: &[Word], out: &mut [u8]) -> Result<()> {
    let byte_at = |i: usize| (words[i / WORD_BYTES] >> (8 * (i % WORD_BYTES))) as u8;
    let total = words.len() * WORD_BYTES;

    if (out.len()..total).any(|i| byte_at(i) != 0) {
        return Err(Error::Value);
    }

    for (i, dst) in out.iter_mut().rev().enumerate() {
        *dst = if i < total { byte_at(i) } else { 0 };
    }
    Ok(())
}

/// Allocate `len` zeroed words, reporting allocation failure as [`Error::Memory`].
pub fn try_alloc_words(len: usize) -> Result<Box<[Word]>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Error::Memory)?;
    v.resize(len, 0);
    Ok(v.into_boxed_slice())
}

/// Compare two equally sized little-endian integers, `a < b`, in variable time.
///
/// Only meant for public values such as moduli and curve parameters.
pub(crate) fn lt_vartime(a: &[Word], b: &[Word]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        if x != y {
            return x < y;
        }
    }
    false
}
