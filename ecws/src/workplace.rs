//! Scratch storage for point arithmetic.

use crate::{Error, JacobianPoint, Result};
use alloc::vec::Vec;
use montfield::{MontContext, MontValue};

/// Number of general purpose temporaries.
pub(crate) const TEMPS: usize = 14;

/// Preallocated field temporaries used by the Jacobian routines.
///
/// A workplace is sized for one [`MontContext`] and carries no state between
/// calls: every routine overwrites the temporaries it uses before reading
/// them. Reusing one workplace across many operations avoids allocating in
/// the inner loops of scalar multiplication.
///
/// Values are wiped on drop.
#[derive(Clone, Debug)]
pub struct Workplace {
    pub(crate) t: [MontValue; TEMPS],
    pub(crate) sum: JacobianPoint,
    pub(crate) dbl: JacobianPoint,
    pub(crate) one: MontValue,
}

impl Workplace {
    /// Allocate a workplace for values of `ctx`.
    pub fn new(ctx: &MontContext) -> Result<Self> {
        let mut temps = Vec::new();
        temps.try_reserve_exact(TEMPS).map_err(|_| Error::Memory)?;
        for _ in 0..TEMPS {
            temps.push(ctx.alloc()?);
        }
        let t = <[MontValue; TEMPS]>::try_from(temps).map_err(|_| Error::Memory)?;

        Ok(Self {
            t,
            sum: JacobianPoint::identity(ctx)?,
            dbl: JacobianPoint::identity(ctx)?,
            one: ctx.one()?,
        })
    }
}
