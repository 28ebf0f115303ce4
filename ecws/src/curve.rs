//! Curve parameters and points bound to them.

use crate::{
    AffinePoint, Error, JacobianPoint, Result, Workplace, p256,
    scalar::{scalar_mul, scalar_mul_generator_p256},
};
use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::fmt;
use montfield::{MontContext, MontValue};
use subtle::{Choice, ConstantTimeEq};

/// Parameters of a curve `y² = x³ - 3x + b` over a prime field.
///
/// Shared between points through an [`Arc`], so the parameters stay alive as
/// long as any point refers to them.
pub struct EcContext {
    field: MontContext,
    b: MontValue,
    order: Box<[u8]>,
    bytes: usize,
    is_p256: bool,
}

impl EcContext {
    /// Build curve parameters from big-endian `modulus`, `b` and `order`.
    ///
    /// All three must have the same non-zero length, which becomes the byte
    /// width of coordinates for points on this curve.
    pub fn new(modulus: &[u8], b: &[u8], order: &[u8]) -> Result<Arc<Self>> {
        let bytes = modulus.len();
        if bytes == 0 || b.len() != bytes || order.len() != bytes {
            return Err(Error::Value);
        }

        let field = MontContext::new(modulus)?;
        let b_mont = field.from_bytes(b)?;

        let mut order_buf = Vec::new();
        order_buf
            .try_reserve_exact(bytes)
            .map_err(|_| Error::Memory)?;
        order_buf.extend_from_slice(order);

        let is_p256 = modulus == &p256::MODULUS[..]
            && b == &p256::B[..]
            && order == &p256::ORDER[..];

        Ok(Arc::new(Self {
            field,
            b: b_mont,
            order: order_buf.into_boxed_slice(),
            bytes,
            is_p256,
        }))
    }

    /// NIST P-256.
    pub fn p256() -> Result<Arc<Self>> {
        Self::new(&p256::MODULUS, &p256::B, &p256::ORDER)
    }

    /// Field arithmetic context.
    pub fn field(&self) -> &MontContext {
        &self.field
    }

    /// Coefficient `b` in Montgomery form.
    pub fn b(&self) -> &MontValue {
        &self.b
    }

    /// Big-endian group order, as supplied.
    pub fn order(&self) -> &[u8] {
        &self.order
    }

    /// Byte width of encoded coordinates.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Are these exactly the NIST P-256 parameters?
    pub fn is_p256(&self) -> bool {
        self.is_p256
    }

    /// Check `y² = x³ - 3x + b` for Montgomery-form `x` and `y`.
    fn is_on_curve(&self, x: &MontValue, y: &MontValue, wp: &mut Workplace) -> Choice {
        let ctx = &self.field;
        let [lhs, rhs, t1, t2, ..] = &mut wp.t;
        ctx.square(lhs, y);
        ctx.square(t1, x);
        ctx.mul(rhs, t1, x);
        ctx.add(t1, x, x);
        ctx.add(t2, t1, x);
        ctx.sub(t1, rhs, t2);
        ctx.add(rhs, t1, &self.b);
        ctx.is_equal(lhs, rhs)
    }
}

impl PartialEq for EcContext {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.bytes == other.bytes
            && bool::from(self.b.ct_eq(&other.b))
            && self.order == other.order
    }
}

impl Eq for EcContext {}

impl fmt::Debug for EcContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcContext")
            .field("bytes", &self.bytes)
            .field("is_p256", &self.is_p256)
            .finish_non_exhaustive()
    }
}

/// Point on the curve described by an [`EcContext`].
///
/// Arithmetic happens in place. Each operation allocates its own scratch
/// space, and a failed operation leaves the point untouched.
#[derive(Clone)]
pub struct EcPoint {
    ctx: Arc<EcContext>,
    p: JacobianPoint,
}

impl EcPoint {
    /// Create a point from big-endian affine coordinates.
    ///
    /// Both coordinates must be exactly [`EcContext::bytes`] long. `(0, 0)`
    /// gives the point at infinity; anything else must be a reduced pair
    /// satisfying the curve equation, or [`Error::EcPoint`] is returned.
    pub fn new(x: &[u8], y: &[u8], ctx: &Arc<EcContext>) -> Result<Self> {
        if x.len() != ctx.bytes || y.len() != ctx.bytes {
            return Err(Error::Value);
        }
        let field = &ctx.field;

        if x.iter().chain(y).all(|&b| b == 0) {
            return Ok(Self {
                ctx: Arc::clone(ctx),
                p: JacobianPoint::identity(field)?,
            });
        }

        if !bool::from(field.is_canonical(x) & field.is_canonical(y)) {
            return Err(Error::EcPoint);
        }

        let xm = field.from_bytes(x)?;
        let ym = field.from_bytes(y)?;
        let mut wp = Workplace::new(field)?;
        if !bool::from(ctx.is_on_curve(&xm, &ym, &mut wp)) {
            return Err(Error::EcPoint);
        }

        Ok(Self {
            ctx: Arc::clone(ctx),
            p: JacobianPoint::new(xm, ym, field.one()?),
        })
    }

    /// The point at infinity.
    pub fn identity(ctx: &Arc<EcContext>) -> Result<Self> {
        Ok(Self {
            ctx: Arc::clone(ctx),
            p: JacobianPoint::identity(&ctx.field)?,
        })
    }

    /// Curve parameters this point belongs to.
    pub fn context(&self) -> &Arc<EcContext> {
        &self.ctx
    }

    /// Underlying Jacobian representation.
    pub fn as_jacobian(&self) -> &JacobianPoint {
        &self.p
    }

    /// Write the big-endian affine coordinates into `x` and `y`.
    ///
    /// Both buffers must be exactly [`EcContext::bytes`] long. The point at
    /// infinity is written as `(0, 0)`.
    pub fn get_xy(&self, x: &mut [u8], y: &mut [u8]) -> Result<()> {
        if x.len() != self.ctx.bytes || y.len() != self.ctx.bytes {
            return Err(Error::Value);
        }
        let field = &self.ctx.field;
        let mut wp = Workplace::new(field)?;
        let mut affine = AffinePoint::identity(field)?;
        self.p.to_affine(&mut affine, &mut wp, field);
        field.to_bytes(&affine.x, x)?;
        field.to_bytes(&affine.y, y)?;
        Ok(())
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        bool::from(self.p.is_infinity(&self.ctx.field))
    }

    /// Rewrite the internal representation with `Z = 1`.
    pub fn normalize(&mut self) -> Result<()> {
        let mut wp = Workplace::new(&self.ctx.field)?;
        self.p.normalize(&mut wp, &self.ctx.field);
        Ok(())
    }

    /// `self = 2·self`.
    pub fn double(&mut self) -> Result<()> {
        let mut wp = Workplace::new(&self.ctx.field)?;
        self.p.double(&mut wp, &self.ctx.field);
        Ok(())
    }

    /// `self = self + other`.
    ///
    /// Fails with [`Error::EcCurve`] if the points have different parameters.
    pub fn add(&mut self, other: &EcPoint) -> Result<()> {
        if !Arc::ptr_eq(&self.ctx, &other.ctx) && *self.ctx != *other.ctx {
            return Err(Error::EcCurve);
        }
        let mut wp = Workplace::new(&self.ctx.field)?;
        self.p.add(&other.p, &mut wp, &self.ctx.field);
        Ok(())
    }

    /// `self = -self`.
    pub fn neg(&mut self) -> Result<()> {
        let mut wp = Workplace::new(&self.ctx.field)?;
        self.p.negate(&mut wp, &self.ctx.field);
        Ok(())
    }

    /// `self = k·self` for a big-endian scalar `k`.
    ///
    /// `seed` drives the projective blinding and does not affect the result.
    /// The generator of P-256 is multiplied with a precomputed table.
    pub fn scalar(&mut self, k: &[u8], seed: u64) -> Result<()> {
        let field = &self.ctx.field;
        let mut wp = Workplace::new(field)?;
        let mut result = self.p.clone();

        if self.ctx.is_p256 && k.len() <= p256::BYTES && self.is_p256_generator(&mut wp)? {
            scalar_mul_generator_p256(&mut result, k, seed, &mut wp, field)?;
        } else {
            scalar_mul(&mut result, k, seed, &mut wp, field)?;
        }

        self.p = result;
        Ok(())
    }

    /// Overwrite `self` with `other`, including its curve parameters.
    pub fn copy_from(&mut self, other: &EcPoint) {
        self.ctx = Arc::clone(&other.ctx);
        self.p = other.p.clone();
    }

    fn is_p256_generator(&self, wp: &mut Workplace) -> Result<bool> {
        let field = &self.ctx.field;
        let g = AffinePoint::new(field.from_bytes(&p256::GX)?, field.from_bytes(&p256::GY)?);
        let g = JacobianPoint::from_affine(&g, field)?;
        Ok(bool::from(self.p.eq_projective(&g, wp, field)))
    }
}

/// Points are equal when they belong to the same curve and represent the
/// same affine point.
impl PartialEq for EcPoint {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.ctx, &other.ctx) && *self.ctx != *other.ctx {
            return false;
        }
        match Workplace::new(&self.ctx.field) {
            Ok(mut wp) => bool::from(self.p.eq_projective(&other.p, &mut wp, &self.ctx.field)),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for EcPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPoint")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
