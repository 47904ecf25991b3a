//! Acceptance Tester: momentum-closure (triangle) condition.
//!
//! Three momentum magnitudes can close into a triangle, so the vectors can sum
//! to zero, iff the largest does not exceed the sum of the other two.

use std::fmt;

use super::derivation::{Derivation, ForbiddenReason};

/// Why a candidate was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Early rejection from the energy checks.
    Forbidden(ForbiddenReason),
    /// Allowed energies, but the momenta cannot close.
    Unclosed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden(reason) => write!(f, "forbidden ({})", reason),
            Self::Unclosed => write!(f, "momenta do not close"),
        }
    }
}

/// Binary outcome for one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Candidate is recorded.
    Accepted,
    /// Candidate is discarded and the generator retries.
    Rejected(Rejection),
}

impl Verdict {
    /// Whether the candidate passed.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Triangle test on momentum magnitudes.
///
/// Returns `false` when any magnitude is NaN.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::kinematics::satisfies_closure;
///
/// assert!(satisfies_closure(&[3.0, 4.0, 5.0]));
/// assert!(satisfies_closure(&[1.0, 1.0, 2.0]));
/// assert!(!satisfies_closure(&[1.0, 1.0, 2.5]));
/// ```
#[inline]
pub fn satisfies_closure(momenta: &[f64; 3]) -> bool {
    let p_max = momenta.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let p_sum: f64 = momenta.iter().sum();
    p_max <= p_sum - p_max
}

/// Verdict for a derivation; forbidden configurations are rejected outright.
#[inline]
pub fn judge(derivation: &Derivation) -> Verdict {
    match derivation {
        Derivation::Forbidden { reason, .. } => Verdict::Rejected(Rejection::Forbidden(*reason)),
        Derivation::Allowed { momenta, .. } => {
            if satisfies_closure(momenta) {
                Verdict::Accepted
            } else {
                Verdict::Rejected(Rejection::Unclosed)
            }
        }
    }
}
