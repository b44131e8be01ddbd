use halo2curves::ff::{Field, PrimeField};
use halo2curves::secp256k1::{Fp, Fq, Secp256k1Affine};
use halo2curves::{Coordinates, CurveAffine};
use sha2::{Digest, Sha512};
use sha3::Keccak256;

use crate::{CHALLENGE_TAG, HASH_TO_CURVE_TAG};

/// Uncompressed encoding `x || y`, 32 little-endian bytes each.
/// Returns `None` for the identity, which has no affine coordinates.
pub(crate) fn point_bytes(p: &Secp256k1Affine) -> Option<[u8; 64]> {
    let coords: Coordinates<Secp256k1Affine> = Option::from(p.coordinates())?;
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&coords.x().to_repr());
    out[32..].copy_from_slice(&coords.y().to_repr());
    Some(out)
}

/// Address-style commitment of a point: the trailing 20 bytes of the
/// Keccak-256 digest of its uncompressed encoding.
pub(crate) fn point_address(p: &Secp256k1Affine) -> Option<[u8; 20]> {
    let digest = Keccak256::digest(point_bytes(p)?);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    Some(address)
}

/// Map `(pk, alpha)` deterministically onto the curve by try-and-increment:
/// hash with an incrementing counter until the digest decodes to the
/// x-coordinate of a curve point, then take the even square root of
/// `x^3 + 7` as y. Canonical by construction; the counter is part of the
/// compatibility contract, so provers must walk it in the same order.
///
/// Returns `None` only when `pk` is the identity.
pub fn hash_to_curve(pk: &Secp256k1Affine, alpha: &[u8]) -> Option<Secp256k1Affine> {
    let pk_bytes = point_bytes(pk)?;
    let b = Fp::from(7u64);
    for counter in 0u64.. {
        let mut hasher = Sha512::new();
        hasher.update(HASH_TO_CURVE_TAG);
        hasher.update(pk_bytes);
        hasher.update(alpha);
        hasher.update(counter.to_le_bytes());
        let digest: [u8; 64] = hasher.finalize().into();

        let mut repr = [0u8; 32];
        repr.copy_from_slice(&digest[..32]);
        let x = match Option::<Fp>::from(Fp::from_repr(repr)) {
            Some(x) => x,
            None => continue,
        };
        let y2 = x.square() * x + b;
        let y = match Option::<Fp>::from(y2.sqrt()) {
            Some(y) => y,
            None => continue,
        };
        let y = if bool::from(y.is_odd()) { -y } else { y };
        if let Some(p) = Option::from(Secp256k1Affine::from_xy(x, y)) {
            return Some(p);
        }
    }
    None
}

/// Fiat-Shamir challenge binding the hash point, public key, gamma, the
/// u-witness commitment, and the reconstructed `V`. Truncated to 128 bits in
/// line with the RFC 9381 challenge length.
pub(crate) fn challenge_scalar(
    h: &Secp256k1Affine,
    pk: &Secp256k1Affine,
    gamma: &Secp256k1Affine,
    u_address: &[u8; 20],
    v: &Secp256k1Affine,
) -> Option<Fq> {
    let mut hasher = Sha512::new();
    hasher.update(CHALLENGE_TAG);
    hasher.update(point_bytes(h)?);
    hasher.update(point_bytes(pk)?);
    hasher.update(point_bytes(gamma)?);
    hasher.update(u_address);
    hasher.update(point_bytes(v)?);
    let digest: [u8; 64] = hasher.finalize().into();
    Some(Fq::from_u128(u128::from_le_bytes(
        digest[..16].try_into().unwrap(),
    )))
}
