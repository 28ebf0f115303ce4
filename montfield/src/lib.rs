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

mod context;
mod error;
pub mod limbs;
mod value;

pub use crate::{
    context::{MAX_WORDS, MontContext},
    error::{Error, Result},
    limbs::Word,
    value::MontValue,
};
pub use subtle;
pub use zeroize;
