//! Handle-style entry points with explicit argument checks.
//!
//! Every argument is optional so callers that hold nullable handles (for
//! example a foreign function interface) get [`Error::Null`] instead of a
//! crash. Missing arguments are reported before anything else is checked or
//! computed; the remaining validation is the one performed by [`EcContext`]
//! and [`EcPoint`].

use crate::{EcContext, EcPoint, Error, Result};
use alloc::sync::Arc;

/// Create curve parameters and store them in `out`.
pub fn new_context(
    out: Option<&mut Option<Arc<EcContext>>>,
    modulus: Option<&[u8]>,
    b: Option<&[u8]>,
    order: Option<&[u8]>,
) -> Result<()> {
    let (Some(out), Some(modulus), Some(b), Some(order)) = (out, modulus, b, order) else {
        return Err(Error::Null);
    };
    *out = Some(EcContext::new(modulus, b, order)?);
    Ok(())
}

/// Create a point from affine coordinates and store it in `out`.
pub fn new_point(
    out: Option<&mut Option<EcPoint>>,
    x: Option<&[u8]>,
    y: Option<&[u8]>,
    ctx: Option<&Arc<EcContext>>,
) -> Result<()> {
    let (Some(out), Some(x), Some(y), Some(ctx)) = (out, x, y, ctx) else {
        return Err(Error::Null);
    };
    *out = Some(EcPoint::new(x, y, ctx)?);
    Ok(())
}

/// Write the affine coordinates of `point`.
pub fn get_xy(x: Option<&mut [u8]>, y: Option<&mut [u8]>, point: Option<&EcPoint>) -> Result<()> {
    let (Some(x), Some(y), Some(point)) = (x, y, point) else {
        return Err(Error::Null);
    };
    point.get_xy(x, y)
}

/// Double `point` in place.
pub fn double(point: Option<&mut EcPoint>) -> Result<()> {
    point.ok_or(Error::Null)?.double()
}

/// Add `q` to `p` in place.
pub fn add(p: Option<&mut EcPoint>, q: Option<&EcPoint>) -> Result<()> {
    let (Some(p), Some(q)) = (p, q) else {
        return Err(Error::Null);
    };
    p.add(q)
}

/// Negate `point` in place.
pub fn neg(point: Option<&mut EcPoint>) -> Result<()> {
    point.ok_or(Error::Null)?.neg()
}

/// Multiply `point` by the big-endian scalar `k` in place.
pub fn scalar(point: Option<&mut EcPoint>, k: Option<&[u8]>, seed: u64) -> Result<()> {
    let (Some(point), Some(k)) = (point, k) else {
        return Err(Error::Null);
    };
    point.scalar(k, seed)
}

/// Release a point. Its curve parameters stay alive while other points use
/// them.
pub fn free_point(point: Option<EcPoint>) {
    drop(point);
}

/// Release a handle to curve parameters.
pub fn free_context(ctx: Option<Arc<EcContext>>) {
    drop(ctx);
}
