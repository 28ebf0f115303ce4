#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod boundary;
pub mod p256;

mod curve;
mod error;
mod jacobian;
mod scalar;
#[cfg(feature = "precomputed-tables")]
mod table;
mod workplace;

pub use crate::{
    curve::{EcContext, EcPoint},
    error::{Error, Result},
};
pub use montfield;
pub use subtle;

use crate::{
    jacobian::{AffinePoint, JacobianPoint},
    workplace::Workplace,
};

/// Low-level point arithmetic.
///
/// # ⚠️ Warning
///
/// These routines operate on raw Montgomery-form coordinates and perform no
/// validation: the caller is responsible for passing points that lie on the
/// curve and values that belong to the same field context.
pub mod hazmat {
    pub use crate::{
        jacobian::{AffinePoint, JacobianPoint},
        scalar::{MAX_SCALAR_BYTES, scalar_mul, scalar_mul_generator_p256},
        workplace::Workplace,
    };

    #[cfg(feature = "precomputed-tables")]
    pub use crate::table::{ENTRIES, GeneratorTable, WINDOWS};
}
