//! NIST P-256 domain parameters (FIPS 186-4, SEC 2 `secp256r1`).

use hex_literal::hex;

/// Field modulus `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`.
pub const MODULUS: [u8; 32] =
    hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");

/// Curve coefficient `b`.
pub const B: [u8; 32] = hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");

/// Order of the generator.
pub const ORDER: [u8; 32] =
    hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");

/// Generator `x`-coordinate.
pub const GX: [u8; 32] = hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296");

/// Generator `y`-coordinate.
pub const GY: [u8; 32] = hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5");

/// Byte width of field elements and scalars.
pub const BYTES: usize = 32;

/// Whether `ctx` is the P-256 base field.
pub(crate) fn is_field(ctx: &montfield::MontContext) -> bool {
    let mut modulus = [0u8; BYTES];
    ctx.bytes() == BYTES && ctx.modulus_bytes(&mut modulus).is_ok() && modulus == MODULUS
}
