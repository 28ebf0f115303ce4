//! Blinded scalar multiplication.

use crate::{Error, JacobianPoint, Result, Workplace, p256};
use alloc::vec::Vec;
use montfield::{MAX_WORDS, MontContext, MontValue, Word};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

#[cfg(feature = "precomputed-tables")]
use crate::{AffinePoint, table::GeneratorTable};

/// Longest accepted scalar, in bytes.
pub const MAX_SCALAR_BYTES: usize = 4096;

/// Size of the fixed window table `[O, P, 2P, ..., 15P]`.
const WINDOW_SIZE: usize = 16;

/// `p = k·p`, with `k` a big-endian integer of any length up to
/// [`MAX_SCALAR_BYTES`].
///
/// The base is rescaled by a random non-zero factor derived from `seed`, then
/// multiplied with a fixed 4-bit window: every nibble costs four doublings and
/// one addition of a table entry fetched by a full scan. The sequence of
/// operations depends only on `k.len()`.
pub fn scalar_mul(
    p: &mut JacobianPoint,
    k: &[u8],
    seed: u64,
    wp: &mut Workplace,
    ctx: &MontContext,
) -> Result<()> {
    if k.len() > MAX_SCALAR_BYTES {
        return Err(Error::Value);
    }

    let lambda = blinding_factor(seed, wp, ctx)?;
    let mut base = p.clone();
    base.rescale(&lambda, wp, ctx);

    let mut table = Vec::new();
    table
        .try_reserve_exact(WINDOW_SIZE)
        .map_err(|_| Error::Memory)?;
    table.push(JacobianPoint::identity(ctx)?);
    for i in 1..WINDOW_SIZE {
        let mut next = table[i - 1].clone();
        next.add(&base, wp, ctx);
        table.push(next);
    }

    let mut acc = JacobianPoint::identity(ctx)?;
    let mut entry = JacobianPoint::identity(ctx)?;
    for &byte in k {
        for nibble in [byte >> 4, byte & 0xf] {
            for _ in 0..4 {
                acc.double(wp, ctx);
            }
            for (j, candidate) in table.iter().enumerate() {
                entry.conditional_assign(candidate, (j as u8).ct_eq(&nibble));
            }
            acc.add(&entry, wp, ctx);
        }
    }

    p.copy_from(&acc);
    Ok(())
}

/// `p = k·G` for the P-256 generator `G`, with `k` at most 32 bytes.
///
/// Fails with [`Error::Value`] for longer scalars and [`Error::EcCurve`] if
/// `ctx` is not the P-256 field. The previous contents of `p` are ignored.
pub fn scalar_mul_generator_p256(
    p: &mut JacobianPoint,
    k: &[u8],
    seed: u64,
    wp: &mut Workplace,
    ctx: &MontContext,
) -> Result<()> {
    if k.len() > p256::BYTES {
        return Err(Error::Value);
    }
    if !p256::is_field(ctx) {
        return Err(Error::EcCurve);
    }

    generator_mul(p, k, seed, wp, ctx)
}

/// One mixed addition per nibble from the generator table, no doublings.
///
/// Whenever the accumulator leaves infinity it is rescaled by `λ`, whichever
/// nibble that happens on.
#[cfg(feature = "precomputed-tables")]
fn generator_mul(
    p: &mut JacobianPoint,
    k: &[u8],
    seed: u64,
    wp: &mut Workplace,
    ctx: &MontContext,
) -> Result<()> {
    let table = GeneratorTable::get()?;
    let lambda = blinding_factor(seed, wp, ctx)?;

    let mut padded = [0u8; p256::BYTES];
    padded[p256::BYTES - k.len()..].copy_from_slice(k);

    let mut acc = JacobianPoint::identity(ctx)?;
    let mut blinded = JacobianPoint::identity(ctx)?;
    let mut entry = AffinePoint::identity(ctx)?;
    for (i, byte) in padded.iter().rev().enumerate() {
        for (half, nibble) in [byte & 0xf, byte >> 4].into_iter().enumerate() {
            table.select(2 * i + half, nibble, &mut entry);
            let was_infinity = acc.is_infinity(ctx);
            acc.add_affine(&entry, wp, ctx);

            // a table entry copied into an empty accumulator has Z = 1
            blinded.copy_from(&acc);
            blinded.rescale(&lambda, wp, ctx);
            acc.conditional_assign(&blinded, was_infinity & !acc.is_infinity(ctx));
        }
    }

    padded.zeroize();
    p.copy_from(&acc);
    Ok(())
}

#[cfg(not(feature = "precomputed-tables"))]
fn generator_mul(
    p: &mut JacobianPoint,
    k: &[u8],
    seed: u64,
    wp: &mut Workplace,
    ctx: &MontContext,
) -> Result<()> {
    let mut g = JacobianPoint::new(
        ctx.from_bytes(&p256::GX)?,
        ctx.from_bytes(&p256::GY)?,
        ctx.one()?,
    );
    scalar_mul(&mut g, k, seed, wp, ctx)?;
    p.copy_from(&g);
    Ok(())
}

/// Non-zero field element drawn from a ChaCha20 stream seeded with `seed`.
fn blinding_factor(seed: u64, wp: &Workplace, ctx: &MontContext) -> Result<MontValue> {
    let w = ctx.words();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut words = [0 as Word; MAX_WORDS];
    for word in words[..w].iter_mut() {
        *word = rng.next_u64();
    }

    let mut lambda = ctx.alloc()?;
    ctx.set_words(&mut lambda, &words[..w]);
    words.zeroize();

    let zero = ctx.is_zero(&lambda);
    lambda.conditional_assign(&wp.one, zero);
    Ok(lambda)
}
