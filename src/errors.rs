use thiserror::Error;

/// Rejection reasons surfaced by proof decoding and verification.
///
/// Every variant is terminal: each one falsifies the proof, so callers must
/// treat any error as "proof invalid" rather than a fault worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VRFError {
    /// A field failed a structural check before any curve arithmetic ran:
    /// wrong encoding length, an out-of-range field element, or a zero scalar.
    #[error("malformed proof: {0}")]
    MalformedProof(&'static str),

    /// The named point does not satisfy the curve equation.
    #[error("{0} is not a point on the curve")]
    PointNotOnCurve(&'static str),

    /// The named point is the identity, which sits outside the prime-order
    /// group the protocol operates in.
    #[error("{0} is not in the prime-order group")]
    InvalidSubgroup(&'static str),

    /// The recomputed Fiat-Shamir challenge differs from the supplied `c`.
    #[error("recomputed challenge does not match c")]
    ChallengeMismatch,

    /// The address commitment of `c*pk + s*G` differs from `u_witness`.
    #[error("u witness does not commit to c*pk + s*G")]
    InvalidWitnessU,

    /// The gamma/hash witnesses or `z_inv` fail to reconstruct `c*gamma + s*H`.
    #[error("witnesses do not reconstruct c*gamma + s*H")]
    InvalidWitnessV,
}
