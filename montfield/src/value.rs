//! Values in Montgomery form.

use crate::limbs::Word;
use alloc::boxed::Box;
use core::fmt;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An integer `x·R mod N` stored as little-endian words.
///
/// Values are created by a [`MontContext`](crate::MontContext) and always have
/// exactly as many words as that context's modulus. They are kept fully reduced
/// (`< N`) by every operation of the context.
///
/// The limbs are wiped when the value is dropped.
#[derive(Clone)]
pub struct MontValue {
    pub(crate) words: Box<[Word]>,
}

impl MontValue {
    pub(crate) fn from_words(words: Box<[Word]>) -> Self {
        Self { words }
    }

    /// Number of words in this value.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether this value has no words at all (never the case for values
    /// produced by a context).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Borrow the Montgomery-form words.
    ///
    /// # ⚠️ Warning
    ///
    /// These are *not* the canonical digits of the represented integer: use
    /// [`MontContext::to_bytes`](crate::MontContext::to_bytes) for that.
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    /// Overwrite `self` with `other` if `choice` is set, in constant time.
    #[inline]
    pub fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        debug_assert_eq!(self.len(), other.len());
        for (dst, src) in self.words.iter_mut().zip(other.words.iter()) {
            dst.conditional_assign(src, choice);
        }
    }

    /// Overwrite `self` with raw Montgomery-form `words` if `choice` is set,
    /// in constant time.
    ///
    /// `words` must come from a value of a context with the same modulus, e.g.
    /// a table of precomputed values.
    #[inline]
    pub fn conditional_assign_words(&mut self, words: &[Word], choice: Choice) {
        debug_assert_eq!(self.len(), words.len());
        for (dst, src) in self.words.iter_mut().zip(words) {
            dst.conditional_assign(src, choice);
        }
    }

    /// Swap `a` and `b` if `choice` is set, in constant time.
    #[inline]
    pub fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        debug_assert_eq!(a.len(), b.len());
        for (x, y) in a.words.iter_mut().zip(b.words.iter_mut()) {
            Word::conditional_swap(x, y, choice);
        }
    }
}

impl ConstantTimeEq for MontValue {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.words.ct_eq(&other.words)
    }
}

impl fmt::Debug for MontValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MontValue")
            .field("words", &self.words.len())
            .finish_non_exhaustive()
    }
}

impl Zeroize for MontValue {
    fn zeroize(&mut self) {
        self.words.zeroize();
    }
}

impl Drop for MontValue {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for MontValue {}
