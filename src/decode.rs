use halo2curves::ff::{Field, PrimeField};
use halo2curves::group::prime::PrimeCurveAffine;
use halo2curves::secp256k1::{Fp, Fq, Secp256k1Affine};
use halo2curves::CurveAffine;

use crate::errors::VRFError;
use crate::hash::point_bytes;
use crate::{VRFProof, PROOF_SIZE};

impl VRFProof {
    /// Decode a proof from its fixed 372-byte wire layout:
    /// `pk(64) || gamma(64) || c(32) || s(32) || u_witness(20) ||
    /// c_gamma_witness(64) || s_hash_witness(64) || z_inv(32)`,
    /// points as uncompressed `x || y` with little-endian limbs.
    ///
    /// Structural failures reject before any verification arithmetic runs.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, VRFError> {
        if raw.len() != PROOF_SIZE {
            return Err(VRFError::MalformedProof("length"));
        }
        let mut src = raw;
        let pk = read_point(&mut src, "pk")?;
        let gamma = read_point(&mut src, "gamma")?;
        let c = read_scalar(&mut src, "c")?;
        let s = read_scalar(&mut src, "s")?;
        let mut u_witness = [0u8; 20];
        u_witness.copy_from_slice(read(&mut src, 20));
        let c_gamma_witness = read_point(&mut src, "c_gamma_witness")?;
        let s_hash_witness = read_point(&mut src, "s_hash_witness")?;
        let z_inv = read_base(&mut src, "z_inv")?;

        let proof = Self {
            pk,
            gamma,
            c,
            s,
            u_witness,
            c_gamma_witness,
            s_hash_witness,
            z_inv,
        };
        proof.validate()?;
        Ok(proof)
    }

    /// Encode to the wire layout accepted by [`VRFProof::from_bytes`].
    /// `None` if any point is the identity, which has no affine encoding.
    pub fn to_bytes(&self) -> Option<[u8; PROOF_SIZE]> {
        let mut out = [0u8; PROOF_SIZE];
        out[..64].copy_from_slice(&point_bytes(&self.pk)?);
        out[64..128].copy_from_slice(&point_bytes(&self.gamma)?);
        out[128..160].copy_from_slice(&self.c.to_repr());
        out[160..192].copy_from_slice(&self.s.to_repr());
        out[192..212].copy_from_slice(&self.u_witness);
        out[212..276].copy_from_slice(&point_bytes(&self.c_gamma_witness)?);
        out[276..340].copy_from_slice(&point_bytes(&self.s_hash_witness)?);
        out[340..].copy_from_slice(&self.z_inv.to_repr());
        Some(out)
    }

    /// Range and membership checks over an already-decoded proof. The engine
    /// runs this first so that proofs assembled directly from parts get the
    /// same screening as decoded ones; its algebraic shortcuts are only sound
    /// once every input is a confirmed group element.
    pub fn validate(&self) -> Result<(), VRFError> {
        check_point(&self.pk, "pk")?;
        check_point(&self.gamma, "gamma")?;
        check_point(&self.c_gamma_witness, "c_gamma_witness")?;
        check_point(&self.s_hash_witness, "s_hash_witness")?;
        check_scalar(&self.c, "c")?;
        check_scalar(&self.s, "s")?;
        if bool::from(self.z_inv.is_zero()) {
            return Err(VRFError::MalformedProof("z_inv"));
        }
        Ok(())
    }
}

// secp256k1 has cofactor 1, so "on the curve and not the identity" is the
// whole subgroup check.
fn check_point(p: &Secp256k1Affine, field: &'static str) -> Result<(), VRFError> {
    if !bool::from(p.is_on_curve()) {
        return Err(VRFError::PointNotOnCurve(field));
    }
    if bool::from(p.is_identity()) {
        return Err(VRFError::InvalidSubgroup(field));
    }
    Ok(())
}

// Scalar range is enforced by `from_repr` during decoding; zero is rejected
// here because a zero challenge or response voids the witness equations.
fn check_scalar(scalar: &Fq, field: &'static str) -> Result<(), VRFError> {
    if bool::from(scalar.is_zero()) {
        return Err(VRFError::MalformedProof(field));
    }
    Ok(())
}

pub(crate) fn scalar_bytes(scalar: &Fq) -> [u8; 32] {
    scalar.to_repr()
}

fn read<'a>(src: &mut &'a [u8], n: usize) -> &'a [u8] {
    let (head, tail) = src.split_at(n);
    *src = tail;
    head
}

fn read_repr(src: &mut &[u8]) -> [u8; 32] {
    let mut repr = [0u8; 32];
    repr.copy_from_slice(read(src, 32));
    repr
}

fn read_base(src: &mut &[u8], field: &'static str) -> Result<Fp, VRFError> {
    Option::from(Fp::from_repr(read_repr(src))).ok_or(VRFError::MalformedProof(field))
}

fn read_scalar(src: &mut &[u8], field: &'static str) -> Result<Fq, VRFError> {
    Option::from(Fq::from_repr(read_repr(src))).ok_or(VRFError::MalformedProof(field))
}

fn read_point(src: &mut &[u8], field: &'static str) -> Result<Secp256k1Affine, VRFError> {
    let x = read_base(src, field)?;
    let y = read_base(src, field)?;
    Option::from(Secp256k1Affine::from_xy(x, y)).ok_or(VRFError::PointNotOnCurve(field))
}
