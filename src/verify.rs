use halo2curves::ff::Field;
use halo2curves::group::prime::PrimeCurveAffine;
use halo2curves::group::Curve;
use halo2curves::secp256k1::{Fp, Secp256k1, Secp256k1Affine};
use halo2curves::{Coordinates, CurveAffine};
use sha3::{Digest, Keccak256};
use subtle::ConstantTimeEq;

use crate::errors::VRFError;
use crate::hash::{challenge_scalar, hash_to_curve, point_address, point_bytes};
use crate::{VRFOutput, VRFProof, VRFVerifier};

impl VRFVerifier {
    /// Check `proof` against the input `alpha` and, on acceptance, derive the
    /// pseudorandom output bound to `(pk, alpha)` under this verifier's tag.
    ///
    /// The checks mirror ECVRF verification with the prover's convention
    /// `s = k - c*x`, so the nonce commitments are `U = c*pk + s*G` and
    /// `V = c*gamma + s*H`. `U` is only compared through its address
    /// commitment; `V` is rebuilt from the supplied witnesses. Every failure
    /// is a terminal rejection of the proof, never a retryable fault.
    pub fn verify(&self, proof: &VRFProof, alpha: &[u8]) -> Result<VRFOutput, VRFError> {
        proof.validate()?;

        let h = hash_to_curve(&proof.pk, alpha).ok_or(VRFError::InvalidSubgroup("pk"))?;

        // First equation: the proof commits to U through the 20-byte digest.
        let u = (proof.pk.to_curve() * proof.c + Secp256k1::generator() * proof.s).to_affine();
        let u_address = point_address(&u).ok_or(VRFError::InvalidWitnessU)?;
        if u_address != proof.u_witness {
            return Err(VRFError::InvalidWitnessU);
        }

        // Second equation: both halves of V must match the supplied witnesses
        // before they are combined.
        if (proof.gamma.to_curve() * proof.c).to_affine() != proof.c_gamma_witness {
            return Err(VRFError::InvalidWitnessV);
        }
        if (h.to_curve() * proof.s).to_affine() != proof.s_hash_witness {
            return Err(VRFError::InvalidWitnessV);
        }
        let v = witness_sum(&proof.c_gamma_witness, &proof.s_hash_witness, proof.z_inv)?;

        let c_prime = challenge_scalar(&h, &proof.pk, &proof.gamma, &proof.u_witness, &v)
            .ok_or(VRFError::ChallengeMismatch)?;
        if !bool::from(c_prime.ct_eq(&proof.c)) {
            return Err(VRFError::ChallengeMismatch);
        }

        derive_output(&self.output_tag, &proof.gamma).ok_or(VRFError::InvalidSubgroup("gamma"))
    }

    /// Decode-then-verify convenience for wire-encoded proofs.
    pub fn verify_bytes(&self, raw: &[u8], alpha: &[u8]) -> Result<VRFOutput, VRFError> {
        self.verify(&VRFProof::from_bytes(raw)?, alpha)
    }
}

/// Affine addition of the two witness points using the prover-supplied
/// inverse of `x2 - x1`. Equal x-coordinates would mean a doubling or the
/// identity, neither of which the protocol produces, so both are rejected.
fn witness_sum(
    c_gamma: &Secp256k1Affine,
    s_hash: &Secp256k1Affine,
    z_inv: Fp,
) -> Result<Secp256k1Affine, VRFError> {
    let p: Coordinates<Secp256k1Affine> =
        Option::from(c_gamma.coordinates()).ok_or(VRFError::InvalidWitnessV)?;
    let q: Coordinates<Secp256k1Affine> =
        Option::from(s_hash.coordinates()).ok_or(VRFError::InvalidWitnessV)?;
    let (x1, y1) = (*p.x(), *p.y());
    let (x2, y2) = (*q.x(), *q.y());
    if x1 == x2 {
        return Err(VRFError::InvalidWitnessV);
    }
    if (x2 - x1) * z_inv != Fp::ONE {
        return Err(VRFError::InvalidWitnessV);
    }
    let slope = (y2 - y1) * z_inv;
    let x3 = slope.square() - x1 - x2;
    let y3 = slope * (x1 - x3) - y1;
    Option::from(Secp256k1Affine::from_xy(x3, y3)).ok_or(VRFError::InvalidWitnessV)
}

/// Hash the trusted gamma under the output domain tag. Only reachable after
/// the engine accepts.
fn derive_output(tag: &[u8], gamma: &Secp256k1Affine) -> Option<VRFOutput> {
    let mut hasher = Keccak256::new();
    hasher.update(tag);
    hasher.update(point_bytes(gamma)?);
    Some(VRFOutput(hasher.finalize().into()))
}
