//! Jacobian point arithmetic for short Weierstrass curves with `a = -3`.
//!
//! A point `(X, Y, Z)` stands for the affine point `(X/Z², Y/Z³)`; `Z = 0` is
//! the point at infinity. Every coordinate is a [`MontValue`] of the field
//! context passed to each routine.
//!
//! Formulas are `dbl-2001-b`, `madd-2007-bl` and `add-2007-bl` from the
//! Explicit-Formulas Database. Their exceptional inputs (infinity, equal
//! points) are handled by computing every candidate result and picking one
//! with constant-time conditional moves.

use crate::{Result, Workplace, workplace::TEMPS};
use montfield::{MAX_WORDS, MontContext, MontValue, Word};
use subtle::Choice;
use zeroize::Zeroize;

/// Affine point in Montgomery form; `(0, 0)` encodes the identity.
#[derive(Clone, Debug)]
pub struct AffinePoint {
    pub(crate) x: MontValue,
    pub(crate) y: MontValue,
}

impl AffinePoint {
    /// Build an affine point from its Montgomery-form coordinates.
    pub fn new(x: MontValue, y: MontValue) -> Self {
        Self { x, y }
    }

    /// Affine identity `(0, 0)`.
    pub fn identity(ctx: &MontContext) -> Result<Self> {
        Ok(Self {
            x: ctx.zero()?,
            y: ctx.zero()?,
        })
    }

    /// The `x`-coordinate.
    pub fn x(&self) -> &MontValue {
        &self.x
    }

    /// The `y`-coordinate.
    pub fn y(&self) -> &MontValue {
        &self.y
    }

    /// Is this point the identity encoding `(0, 0)`?
    pub fn is_identity(&self, ctx: &MontContext) -> Choice {
        ctx.is_zero(&self.x) & ctx.is_zero(&self.y)
    }

    /// Conditionally assign `other` to `self` in constant time.
    pub fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        self.x.conditional_assign(&other.x, choice);
        self.y.conditional_assign(&other.y, choice);
    }
}

/// Point in Jacobian coordinates.
#[derive(Clone, Debug)]
pub struct JacobianPoint {
    pub(crate) x: MontValue,
    pub(crate) y: MontValue,
    pub(crate) z: MontValue,
}

impl JacobianPoint {
    /// Build a point from its Montgomery-form coordinates.
    pub fn new(x: MontValue, y: MontValue, z: MontValue) -> Self {
        Self { x, y, z }
    }

    /// The point at infinity, `(0, 0, 0)`.
    pub fn identity(ctx: &MontContext) -> Result<Self> {
        Ok(Self {
            x: ctx.zero()?,
            y: ctx.zero()?,
            z: ctx.zero()?,
        })
    }

    /// Promote an affine point to `Z = 1`, mapping `(0, 0)` to infinity.
    pub fn from_affine(p: &AffinePoint, ctx: &MontContext) -> Result<Self> {
        let mut z = ctx.one()?;
        z.conditional_assign(&ctx.zero()?, p.is_identity(ctx));
        Ok(Self {
            x: p.x.clone(),
            y: p.y.clone(),
            z,
        })
    }

    /// The `X`-coordinate.
    pub fn x(&self) -> &MontValue {
        &self.x
    }

    /// The `Y`-coordinate.
    pub fn y(&self) -> &MontValue {
        &self.y
    }

    /// The `Z`-coordinate.
    pub fn z(&self) -> &MontValue {
        &self.z
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self, ctx: &MontContext) -> Choice {
        ctx.is_zero(&self.z)
    }

    /// Overwrite `self` with the point at infinity.
    pub fn set_infinity(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
    }

    /// Zero `X` and `Y` when `Z = 0`, so infinity always reads `(0, 0, 0)`.
    fn clear_if_infinity(&mut self, ctx: &MontContext) {
        let infinity = self.is_infinity(ctx);
        let zero = [0 as Word; MAX_WORDS];
        let w = ctx.words();
        self.x.conditional_assign_words(&zero[..w], infinity);
        self.y.conditional_assign_words(&zero[..w], infinity);
    }

    /// Copy all coordinates of `other` into `self`.
    pub fn copy_from(&mut self, other: &Self) {
        self.conditional_assign(other, Choice::from(1));
    }

    /// Conditionally assign `other` to `self` in constant time.
    pub fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        self.x.conditional_assign(&other.x, choice);
        self.y.conditional_assign(&other.y, choice);
        self.z.conditional_assign(&other.z, choice);
    }

    /// `self = -self`.
    pub fn negate(&mut self, wp: &mut Workplace, ctx: &MontContext) {
        let t = &mut wp.t[0];
        ctx.neg(t, &self.y);
        ctx.copy(&mut self.y, t);
    }

    /// `self = 2·self`. An infinite result is `(0, 0, 0)`.
    pub fn double(&mut self, wp: &mut Workplace, ctx: &MontContext) {
        double_into(ctx, self, &mut wp.sum, &mut wp.t);
        wp.sum.clear_if_infinity(ctx);
        self.copy_from(&wp.sum);
    }

    /// `self = self + q` for an affine `q`. An infinite result is `(0, 0, 0)`.
    pub fn add_affine(&mut self, q: &AffinePoint, wp: &mut Workplace, ctx: &MontContext) {
        let same = {
            let [z1z1, u2, s2, h, hh, i, j, r, v, t1, t2, t3, ..] = &mut wp.t;
            let sum = &mut wp.sum;

            ctx.square(z1z1, &self.z);
            ctx.mul(u2, &q.x, z1z1);
            ctx.mul(t1, &self.z, z1z1);
            ctx.mul(s2, &q.y, t1);
            ctx.sub(h, u2, &self.x);
            ctx.square(hh, h);
            ctx.add(t1, hh, hh);
            ctx.add(i, t1, t1);
            ctx.mul(j, h, i);
            ctx.sub(t1, s2, &self.y);
            ctx.add(r, t1, t1);
            ctx.mul(v, &self.x, i);

            // X3 = r² - J - 2V
            ctx.square(t1, r);
            ctx.sub(t2, t1, j);
            ctx.add(t1, v, v);
            ctx.sub(&mut sum.x, t2, t1);

            // Y3 = r(V - X3) - 2·Y1·J
            ctx.sub(t1, v, &sum.x);
            ctx.mul(t2, r, t1);
            ctx.mul(t1, &self.y, j);
            ctx.add(t3, t1, t1);
            ctx.sub(&mut sum.y, t2, t3);

            // Z3 = (Z1 + H)² - Z1Z1 - HH
            ctx.add(t1, &self.z, h);
            ctx.square(t2, t1);
            ctx.sub(t1, t2, z1z1);
            ctx.sub(&mut sum.z, t1, hh);

            ctx.is_zero(h) & ctx.is_zero(r)
        };

        double_into(ctx, self, &mut wp.dbl, &mut wp.t);
        wp.sum.conditional_assign(&wp.dbl, same);

        let p_infinity = self.is_infinity(ctx);
        wp.sum.x.conditional_assign(&q.x, p_infinity);
        wp.sum.y.conditional_assign(&q.y, p_infinity);
        wp.sum.z.conditional_assign(&wp.one, p_infinity);

        wp.sum.conditional_assign(self, q.is_identity(ctx));
        wp.sum.clear_if_infinity(ctx);
        self.copy_from(&wp.sum);
    }

    /// `self = self + q`.
    ///
    /// An infinite result is `(0, 0, 0)`. To add a point to itself, pass a
    /// clone (or use [`JacobianPoint::double`]).
    pub fn add(&mut self, q: &JacobianPoint, wp: &mut Workplace, ctx: &MontContext) {
        let same = {
            let [z1z1, z2z2, u1, u2, s1, s2, h, i, j, r, v, t1, t2, t3] = &mut wp.t;
            let sum = &mut wp.sum;

            ctx.square(z1z1, &self.z);
            ctx.square(z2z2, &q.z);
            ctx.mul(u1, &self.x, z2z2);
            ctx.mul(u2, &q.x, z1z1);
            ctx.mul(t1, &q.z, z2z2);
            ctx.mul(s1, &self.y, t1);
            ctx.mul(t1, &self.z, z1z1);
            ctx.mul(s2, &q.y, t1);
            ctx.sub(h, u2, u1);
            ctx.add(t1, h, h);
            ctx.square(i, t1);
            ctx.mul(j, h, i);
            ctx.sub(t1, s2, s1);
            ctx.add(r, t1, t1);
            ctx.mul(v, u1, i);

            // X3 = r² - J - 2V
            ctx.square(t1, r);
            ctx.sub(t2, t1, j);
            ctx.add(t1, v, v);
            ctx.sub(&mut sum.x, t2, t1);

            // Y3 = r(V - X3) - 2·S1·J
            ctx.sub(t1, v, &sum.x);
            ctx.mul(t2, r, t1);
            ctx.mul(t1, s1, j);
            ctx.add(t3, t1, t1);
            ctx.sub(&mut sum.y, t2, t3);

            // Z3 = ((Z1 + Z2)² - Z1Z1 - Z2Z2)·H
            ctx.add(t1, &self.z, &q.z);
            ctx.square(t2, t1);
            ctx.sub(t1, t2, z1z1);
            ctx.sub(t2, t1, z2z2);
            ctx.mul(&mut sum.z, t2, h);

            ctx.is_zero(h) & ctx.is_zero(r)
        };

        double_into(ctx, self, &mut wp.dbl, &mut wp.t);
        wp.sum.conditional_assign(&wp.dbl, same);
        wp.sum.conditional_assign(q, self.is_infinity(ctx));
        wp.sum.conditional_assign(self, q.is_infinity(ctx));
        wp.sum.clear_if_infinity(ctx);
        self.copy_from(&wp.sum);
    }

    /// Write the affine form of `self` into `out`; infinity yields `(0, 0)`.
    pub fn to_affine(&self, out: &mut AffinePoint, wp: &mut Workplace, ctx: &MontContext) {
        let [zi, zi2, zi3, ..] = &mut wp.t;
        ctx.inv_prime(zi, &self.z);
        ctx.square(zi2, zi);
        ctx.mul(zi3, zi2, zi);
        ctx.mul(&mut out.x, &self.x, zi2);
        ctx.mul(&mut out.y, &self.y, zi3);
    }

    /// Rewrite `self` with `Z = 1`; infinity becomes `(0, 0, 0)`.
    pub fn normalize(&mut self, wp: &mut Workplace, ctx: &MontContext) {
        let infinity = self.is_infinity(ctx);
        {
            let [zi, zi2, zi3, t1, ..] = &mut wp.t;
            ctx.inv_prime(zi, &self.z);
            ctx.square(zi2, zi);
            ctx.mul(zi3, zi2, zi);
            ctx.mul(t1, &self.x, zi2);
            ctx.copy(&mut self.x, t1);
            ctx.mul(t1, &self.y, zi3);
            ctx.copy(&mut self.y, t1);
        }
        self.z.conditional_assign(&wp.one, !infinity);
    }

    /// Multiply the projective representative by `λ`: `(λ²X, λ³Y, λZ)`.
    ///
    /// The affine point is unchanged for any non-zero `λ`.
    pub fn rescale(&mut self, lambda: &MontValue, wp: &mut Workplace, ctx: &MontContext) {
        let [l2, l3, t1, ..] = &mut wp.t;
        ctx.square(l2, lambda);
        ctx.mul(l3, l2, lambda);
        ctx.mul(t1, &self.x, l2);
        ctx.copy(&mut self.x, t1);
        ctx.mul(t1, &self.y, l3);
        ctx.copy(&mut self.y, t1);
        ctx.mul(t1, &self.z, lambda);
        ctx.copy(&mut self.z, t1);
    }

    /// Do `self` and `q` represent the same point?
    ///
    /// Compares `X1·Z2² = X2·Z1²` and `Y1·Z2³ = Y2·Z1³`; two points at infinity
    /// are equal whatever their `X` and `Y`.
    pub fn eq_projective(&self, q: &JacobianPoint, wp: &mut Workplace, ctx: &MontContext) -> Choice {
        let [z1z1, z2z2, a, b, t1, ..] = &mut wp.t;
        ctx.square(z1z1, &self.z);
        ctx.square(z2z2, &q.z);

        ctx.mul(a, &self.x, z2z2);
        ctx.mul(b, &q.x, z1z1);
        let same_x = ctx.is_equal(a, b);

        ctx.mul(t1, z2z2, &q.z);
        ctx.mul(a, &self.y, t1);
        ctx.mul(t1, z1z1, &self.z);
        ctx.mul(b, &q.y, t1);
        let same_y = ctx.is_equal(a, b);

        let inf1 = self.is_infinity(ctx);
        let inf2 = q.is_infinity(ctx);
        (inf1 & inf2) | (!inf1 & !inf2 & same_x & same_y)
    }
}

/// `out = 2·p` with `dbl-2001-b`.
///
/// Points at infinity and points with `Y = 0` both come out with `Z3 = 0`;
/// `X3` and `Y3` are left as the formulas produce them.
fn double_into(
    ctx: &MontContext,
    p: &JacobianPoint,
    out: &mut JacobianPoint,
    t: &mut [MontValue; TEMPS],
) {
    let [delta, gamma, beta, alpha, t1, t2, t3, t4, ..] = t;

    ctx.square(delta, &p.z);
    ctx.square(gamma, &p.y);
    ctx.mul(beta, &p.x, gamma);

    // α = 3(X1 - δ)(X1 + δ)
    ctx.sub(t1, &p.x, delta);
    ctx.add(t2, &p.x, delta);
    ctx.mul(t3, t1, t2);
    ctx.add(t1, t3, t3);
    ctx.add(alpha, t1, t3);

    // X3 = α² - 8β, keeping 4β in t2
    ctx.add(t1, beta, beta);
    ctx.add(t2, t1, t1);
    ctx.add(t1, t2, t2);
    ctx.square(t3, alpha);
    ctx.sub(&mut out.x, t3, t1);

    // Z3 = (Y1 + Z1)² - γ - δ
    ctx.add(t1, &p.y, &p.z);
    ctx.square(t3, t1);
    ctx.sub(t1, t3, gamma);
    ctx.sub(&mut out.z, t1, delta);

    // Y3 = α(4β - X3) - 8γ²
    ctx.sub(t1, t2, &out.x);
    ctx.mul(t3, alpha, t1);
    ctx.square(t1, gamma);
    ctx.add(t4, t1, t1);
    ctx.add(t1, t4, t4);
    ctx.add(t4, t1, t1);
    ctx.sub(&mut out.y, t3, t4);
}
