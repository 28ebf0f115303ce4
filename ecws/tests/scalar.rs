//! Scalar multiplication on P-256.

use ecws::{
    Error,
    hazmat::{
        AffinePoint, JacobianPoint, MAX_SCALAR_BYTES, Workplace, scalar_mul,
        scalar_mul_generator_p256,
    },
    montfield::{MontContext, MontValue},
    p256,
};
use hex_literal::hex;
use proptest::prelude::*;

/// The generator in Jacobian form with `Z = 10`.
const GX10: [u8; 32] = hex!("d54e0308f549e3f429ca319aec295eb67d5d064cefe02adf8efa5f489bac02c1");
const GY10: [u8; 32] = hex!("0fbd47e89782766e39ef1af49d01869b1d788c42b8da57cbbfeb9719c3582640");
const TEN: [u8; 32] = hex!("000000000000000000000000000000000000000000000000000000000000000a");

const ORDER_PLUS_ONE: [u8; 32] =
    hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632552");

const K: [u8; 32] = hex!("c51e4753afdec1e6b6c6a5b992f43f8dd0c7a8933072708b6522468b2ffb06fd");

/// Arbitrary point `A` and `K·A`.
const AX: [u8; 32] = hex!("de2444bebc8d36e682edd27e0f271508617519b3221a8fa0b77cab3989da97c9");
const AY: [u8; 32] = hex!("c093ae7ff36e5380fc01a5aad1e66659702de80f53cec576b6350b243042a256");
const KAX: [u8; 32] = hex!("51d08d5f2d4278882946d88d83c97d11e62becc3cfc18bedacc89ba34eeca03f");
const KAY: [u8; 32] = hex!("75ee68eb8bf626aa5b673ab51f6e744e06f8fcf8a6c0cf3035beca956a7b41d5");

const G31: [[u8; 32]; 2] = [
    hex!("301d9e502dc7e05da85da026a7ae9aa0fac9db7d52a95b3e3e3f9aa0a1b45b8b"),
    hex!("6551b6f6b3061223e0d23c026b017d72298d9ae46887ca61d58db6aea17ee267"),
];
const G32: [[u8; 32]; 2] = [
    hex!("2377c7d690a242ca6c45074e8ea5beefaa557fd5b68371d9d1475bd52a7ed0e1"),
    hex!("47a13fb98413a4393f8d90e9bf901b7e6658a6cdecf46716e7c067b1ddb8d2b2"),
];

/// `0x738734343ff89387·G`.
const SMALL_K: [u8; 8] = hex!("738734343ff89387");
const SMALL_KG: [[u8; 32]; 2] = [
    hex!("fc856a2635512a8344355597bdbfa93d33702a48b09d02bd1dc4fd4b5a4c6c09"),
    hex!("cf0dc7681861a0b72922a9ce17f15822311aab2a14c4bdb0c432eafe939a4a47"),
];

struct Fixture {
    ctx: MontContext,
    wp: Workplace,
}

impl Fixture {
    fn new() -> Self {
        let ctx = MontContext::new(&p256::MODULUS).unwrap();
        let wp = Workplace::new(&ctx).unwrap();
        Self { ctx, wp }
    }

    fn value(&self, bytes: &[u8]) -> MontValue {
        self.ctx.from_bytes(bytes).unwrap()
    }

    fn generator(&self) -> JacobianPoint {
        JacobianPoint::new(self.value(&GX10), self.value(&GY10), self.value(&TEN))
    }

    fn mul(&mut self, mut p: JacobianPoint, k: &[u8], seed: u64) -> JacobianPoint {
        scalar_mul(&mut p, k, seed, &mut self.wp, &self.ctx).unwrap();
        p
    }

    fn mul_generator(&mut self, k: &[u8], seed: u64) -> JacobianPoint {
        let mut p = JacobianPoint::identity(&self.ctx).unwrap();
        scalar_mul_generator_p256(&mut p, k, seed, &mut self.wp, &self.ctx).unwrap();
        p
    }

    fn affine(&mut self, p: &JacobianPoint) -> ([u8; 32], [u8; 32]) {
        let mut out = AffinePoint::identity(&self.ctx).unwrap();
        p.to_affine(&mut out, &mut self.wp, &self.ctx);
        let (mut x, mut y) = ([0u8; 32], [0u8; 32]);
        self.ctx.to_bytes(out.x(), &mut x).unwrap();
        self.ctx.to_bytes(out.y(), &mut y).unwrap();
        (x, y)
    }

    fn assert_affine(&mut self, p: &JacobianPoint, x: &[u8; 32], y: &[u8; 32]) {
        assert_eq!(self.affine(p), (*x, *y));
    }
}

#[test]
fn generic_small_scalars() {
    let mut f = Fixture::new();

    let g = f.generator();
    let p = f.mul(g.clone(), &[1], 0);
    f.assert_affine(&p, &p256::GX, &p256::GY);

    let p = f.mul(g.clone(), &[0, 1], 0);
    f.assert_affine(&p, &p256::GX, &p256::GY);

    let p = f.mul(g.clone(), &[0], 0);
    assert!(bool::from(p.is_infinity(&f.ctx)));

    let p = f.mul(g, &[31], 0x4455);
    f.assert_affine(&p, &G31[0], &G31[1]);
}

#[test]
fn generic_order() {
    let mut f = Fixture::new();
    let g = f.generator();

    let p = f.mul(g.clone(), &p256::ORDER, 0);
    assert!(bool::from(p.is_infinity(&f.ctx)));

    let p = f.mul(g, &ORDER_PLUS_ONE, 0);
    f.assert_affine(&p, &p256::GX, &p256::GY);
}

#[test]
fn generic_infinity_base() {
    let mut f = Fixture::new();
    let o = JacobianPoint::identity(&f.ctx).unwrap();
    let p = f.mul(o, &[0xff], 0);
    assert!(bool::from(p.is_infinity(&f.ctx)));
}

#[test]
fn generic_arbitrary_point() {
    let mut f = Fixture::new();
    let a = JacobianPoint::new(f.value(&AX), f.value(&AY), f.ctx.one().unwrap());
    let p = f.mul(a, &K, 0x1234);
    f.assert_affine(&p, &KAX, &KAY);
}

#[test]
fn generic_arbitrary_point_order() {
    let mut f = Fixture::new();
    let a = JacobianPoint::new(f.value(&AX), f.value(&AY), f.ctx.one().unwrap());

    let p = f.mul(a.clone(), &p256::ORDER, 3);
    assert!(bool::from(p.is_infinity(&f.ctx)));

    let p = f.mul(a.clone(), &ORDER_PLUS_ONE, 4);
    f.assert_affine(&p, &AX, &AY);

    let p = f.mul(a, &[1], 5);
    f.assert_affine(&p, &AX, &AY);
}

#[test]
fn generic_result_ignores_seed() {
    let mut f = Fixture::new();
    let g = f.generator();
    let a = f.mul(g.clone(), &K, 1);
    let b = f.mul(g, &K, 0xdead_beef);
    assert!(bool::from(a.eq_projective(&b, &mut f.wp, &f.ctx)));
}

#[test]
fn generic_blinding_changes_representation() {
    let mut f = Fixture::new();
    let g = f.generator();
    let a = f.mul(g.clone(), &K, 1);
    let b = f.mul(g, &K, 2);
    assert_ne!(a.z().as_words(), b.z().as_words());
    assert_eq!(f.affine(&a), f.affine(&b));
}

#[test]
fn generic_scalar_too_long() {
    let mut f = Fixture::new();
    let mut g = f.generator();
    let k = vec![0u8; MAX_SCALAR_BYTES + 1];
    assert_eq!(
        scalar_mul(&mut g, &k, 0, &mut f.wp, &f.ctx),
        Err(Error::Value)
    );
}

#[test]
fn generator_vectors() {
    let mut f = Fixture::new();

    let p = f.mul_generator(&[1], 0);
    f.assert_affine(&p, &p256::GX, &p256::GY);

    let p = f.mul_generator(&[0, 1], 0);
    f.assert_affine(&p, &p256::GX, &p256::GY);

    let p = f.mul_generator(&[0], 0);
    assert!(bool::from(p.is_infinity(&f.ctx)));

    let p = f.mul_generator(&[], 0);
    assert!(bool::from(p.is_infinity(&f.ctx)));

    let p = f.mul_generator(&[31], 0);
    f.assert_affine(&p, &G31[0], &G31[1]);

    let p = f.mul_generator(&[32], 0);
    f.assert_affine(&p, &G32[0], &G32[1]);

    let p = f.mul_generator(&SMALL_K, 0x6776);
    f.assert_affine(&p, &SMALL_KG[0], &SMALL_KG[1]);
}

#[test]
fn generator_order() {
    let mut f = Fixture::new();

    let p = f.mul_generator(&p256::ORDER, 0x1111);
    assert!(bool::from(p.is_infinity(&f.ctx)));

    let p = f.mul_generator(&ORDER_PLUS_ONE, 0x2222);
    f.assert_affine(&p, &p256::GX, &p256::GY);
}

#[test]
fn generator_matches_generic() {
    let mut f = Fixture::new();
    let g = f.generator();
    let a = f.mul_generator(&K, 0xabcd);
    let b = f.mul(g, &K, 0xabcd);
    assert!(bool::from(a.eq_projective(&b, &mut f.wp, &f.ctx)));
}

#[test]
fn generator_blinding_changes_representation() {
    let mut f = Fixture::new();

    // the lowest nibble is zero in the first three scalars
    let scalars: [&[u8]; 5] = [&[0x12, 0x30], &[0x12, 0x00], &[0x10, 0, 0, 0], &[0x12, 0x35], &K];
    for k in scalars {
        let a = f.mul_generator(k, 1);
        let b = f.mul_generator(k, 2);
        assert_ne!(a.z().as_words(), b.z().as_words(), "k = {k:02x?}");
        assert_eq!(f.affine(&a), f.affine(&b), "k = {k:02x?}");
    }
}

#[test]
fn generator_scalar_too_long() {
    let mut f = Fixture::new();
    let mut p = JacobianPoint::identity(&f.ctx).unwrap();
    assert_eq!(
        scalar_mul_generator_p256(&mut p, &[1; 33], 0, &mut f.wp, &f.ctx),
        Err(Error::Value)
    );
}

#[test]
fn generator_rejects_other_fields() {
    let ctx = MontContext::new(&hex!(
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffff000000000000000000000001"
    ))
    .unwrap();
    let mut wp = Workplace::new(&ctx).unwrap();
    let mut p = JacobianPoint::identity(&ctx).unwrap();
    assert_eq!(
        scalar_mul_generator_p256(&mut p, &[1], 0, &mut wp, &ctx),
        Err(Error::EcCurve)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn generator_table_agrees_with_ladder(
        k in any::<[u8; 32]>(),
        seed in any::<u64>(),
    ) {
        let mut f = Fixture::new();
        let g = f.generator();
        let a = f.mul_generator(&k, seed);
        let b = f.mul(g, &k, seed.rotate_left(17));
        prop_assert!(bool::from(a.eq_projective(&b, &mut f.wp, &f.ctx)));
    }
}
