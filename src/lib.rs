use core::fmt;

use halo2curves::secp256k1::{Fp, Fq, Secp256k1Affine};

mod decode;
mod errors;
mod hash;
mod verify;

pub use errors::VRFError;
pub use hash::hash_to_curve;

/// Number of bytes in the wire encoding of a [`VRFProof`].
pub const PROOF_SIZE: usize = 372;

/// Domain tag for the try-and-increment hash mapping `(pk, alpha)` onto the curve.
pub const HASH_TO_CURVE_TAG: &[u8] = b"ecvrf-secp256k1-h2c-v1";

/// Domain tag for the Fiat-Shamir challenge hash.
pub const CHALLENGE_TAG: &[u8] = b"ecvrf-secp256k1-challenge-v1";

/// Default domain tag bound into the output hash. Deployments that must not
/// share outputs pick their own tag via [`VRFVerifier::new`].
pub const OUTPUT_TAG: &[u8] = b"Orochi Network";

/// A VRF proof over secp256k1, carrying the witness material that lets the
/// verifier check the two Schnorr-style equations without recovering the
/// nonce commitments from scratch.
///
/// `u_witness` is the 20-byte address commitment of `U = c*pk + s*G`;
/// `c_gamma_witness` and `s_hash_witness` are `c*gamma` and `s*H`, whose sum
/// reconstructs `V`; `z_inv` is the inverse of the x-coordinate difference
/// consumed by that addition, supplied by the prover so the verifier never
/// performs a field inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VRFProof {
    pub pk: Secp256k1Affine,
    pub gamma: Secp256k1Affine,
    pub c: Fq,
    pub s: Fq,
    pub u_witness: [u8; 20],
    pub c_gamma_witness: Secp256k1Affine,
    pub s_hash_witness: Secp256k1Affine,
    pub z_inv: Fp,
}

/// Pseudorandom output of a verified proof. Purely a function of `gamma` and
/// the verifier's output tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VRFOutput(pub [u8; 32]);

impl VRFOutput {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for VRFOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Stateless proof verifier. The output tag is the only configuration; it is
/// fixed at construction and must be versioned rather than edited in place,
/// since changing it changes every derived output.
#[derive(Debug, Clone)]
pub struct VRFVerifier {
    output_tag: Vec<u8>,
}

impl VRFVerifier {
    /// Build a verifier deriving outputs under a custom domain tag.
    pub fn new(output_tag: impl Into<Vec<u8>>) -> Self {
        Self {
            output_tag: output_tag.into(),
        }
    }
}

impl Default for VRFVerifier {
    fn default() -> Self {
        Self::new(OUTPUT_TAG)
    }
}

impl fmt::Display for VRFProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn coords(p: &Secp256k1Affine) -> (String, String) {
            match hash::point_bytes(p) {
                Some(bytes) => (hex::encode(&bytes[..32]), hex::encode(&bytes[32..])),
                None => ("infinity".to_string(), "infinity".to_string()),
            }
        }
        let (pk_x, pk_y) = coords(&self.pk);
        let (gamma_x, gamma_y) = coords(&self.gamma);
        writeln!(f, "public key:\n > x: 0x{pk_x}\n > y: 0x{pk_y}")?;
        writeln!(f, "gamma:\n > x: 0x{gamma_x}\n > y: 0x{gamma_y}")?;
        writeln!(f, "c: 0x{}", hex::encode(decode::scalar_bytes(&self.c)))?;
        writeln!(f, "s: 0x{}", hex::encode(decode::scalar_bytes(&self.s)))?;
        writeln!(f, "u witness: 0x{}", hex::encode(self.u_witness))
    }
}
