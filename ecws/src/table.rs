//! Precomputed multiples of the P-256 generator.

#[cfg(not(any(feature = "critical-section", feature = "std")))]
compile_error!("`precomputed-tables` feature requires either `critical-section` or `std`");

#[cfg(feature = "critical-section")]
use once_cell::sync::Lazy as LazyLock;
#[cfg(all(feature = "std", not(feature = "critical-section")))]
use std::sync::LazyLock;

use crate::{AffinePoint, Error, JacobianPoint, Result, Workplace, p256};
use alloc::{boxed::Box, vec::Vec};
use montfield::{MontContext, Word};
use subtle::ConstantTimeEq;

/// Number of 4-bit windows in a 256-bit scalar.
pub const WINDOWS: usize = 64;

/// Entries per window, `0·B ..= 15·B`.
pub const ENTRIES: usize = 16;

const LIMBS: usize = 4;

/// Affine `(x, y)` in Montgomery form; all zero for the identity.
type Entry = [[Word; LIMBS]; 2];

static GENERATOR_TABLE: LazyLock<Option<GeneratorTable>> =
    LazyLock::new(|| GeneratorTable::build().ok());

/// Fixed-base comb table for P-256: entry `j` of window `i` is `j·16^i·G`.
///
/// Coordinates are stored in Montgomery form for the P-256 modulus, which
/// makes them valid for every context built from that modulus.
pub struct GeneratorTable {
    windows: Box<[[Entry; ENTRIES]]>,
}

impl GeneratorTable {
    /// Shared instance, computed on first use.
    pub fn get() -> Result<&'static GeneratorTable> {
        GENERATOR_TABLE.as_ref().ok_or(Error::Memory)
    }

    fn build() -> Result<Self> {
        let ctx = MontContext::new(&p256::MODULUS)?;
        let mut wp = Workplace::new(&ctx)?;

        let mut windows = Vec::new();
        windows
            .try_reserve_exact(WINDOWS)
            .map_err(|_| Error::Memory)?;

        let g = AffinePoint::new(ctx.from_bytes(&p256::GX)?, ctx.from_bytes(&p256::GY)?);
        let mut base = JacobianPoint::from_affine(&g, &ctx)?;
        let mut multiple = JacobianPoint::identity(&ctx)?;

        for _ in 0..WINDOWS {
            let mut window = [[[0; LIMBS]; 2]; ENTRIES];
            multiple.set_infinity();
            for entry in window.iter_mut().skip(1) {
                multiple.add(&base, &mut wp, &ctx);
                let mut affine = multiple.clone();
                affine.normalize(&mut wp, &ctx);
                entry[0].copy_from_slice(affine.x.as_words());
                entry[1].copy_from_slice(affine.y.as_words());
            }
            windows.push(window);

            for _ in 0..4 {
                base.double(&mut wp, &ctx);
            }
        }

        Ok(Self {
            windows: windows.into_boxed_slice(),
        })
    }

    /// Load entry `nibble` of `window` into `out`, scanning the whole window in
    /// constant time.
    pub fn select(&self, window: usize, nibble: u8, out: &mut AffinePoint) {
        debug_assert!(nibble < ENTRIES as u8);
        for (j, entry) in self.windows[window].iter().enumerate() {
            let hit = (j as u8).ct_eq(&nibble);
            out.x.conditional_assign_words(&entry[0], hit);
            out.y.conditional_assign_words(&entry[1], hit);
        }
    }
}
