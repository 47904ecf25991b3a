//! Kinematics Derivation: planar point to kinetic energies and momenta.
//!
//! ```text
//! T1 = a - b·X + c·Y
//! T2 = a + b·X + c·Y
//! T3 = Q - T1 - T2
//! p  = sqrt(T² + 2·T·m)
//! ```
//!
//! Configurations with `T1 < 0`, `T2 < 0` or `T1 + T2 > Q` are forbidden and
//! rejected before any momentum is computed.

use std::fmt;

use super::mapper::PlanarPoint;
use crate::constants::{DalitzMapping, DecayParameters};

/// Kinetic energies of the three daughters (MeV).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KineticEnergies {
    /// Daughter 1.
    pub t1: f64,
    /// Daughter 2.
    pub t2: f64,
    /// Daughter 3, the residual of the budget.
    pub t3: f64,
}

impl KineticEnergies {
    /// Sum of the three kinetic energies.
    #[inline]
    pub fn total(&self) -> f64 {
        self.t1 + self.t2 + self.t3
    }

    /// Energies as an array ordered by daughter.
    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.t1, self.t2, self.t3]
    }
}

/// Why a configuration is kinematically forbidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForbiddenReason {
    /// `T1 < 0`.
    NegativeT1,
    /// `T2 < 0`.
    NegativeT2,
    /// `T3 < 0`, i.e. `T1 + T2 > Q`.
    ExceedsBudget,
}

impl fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeT1 => write!(f, "T1 < 0"),
            Self::NegativeT2 => write!(f, "T2 < 0"),
            Self::ExceedsBudget => write!(f, "T1 + T2 > Q"),
        }
    }
}

/// Result of deriving momenta from a planar point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Derivation {
    /// Energies are allowed; momenta were computed.
    Allowed {
        /// Kinetic energies.
        energies: KineticEnergies,
        /// Momentum magnitudes `[p1, p2, p3]`.
        momenta: [f64; 3],
    },
    /// Early rejection; momenta were not computed.
    Forbidden {
        /// Kinetic energies.
        energies: KineticEnergies,
        /// First failing condition.
        reason: ForbiddenReason,
    },
}

impl Derivation {
    /// Kinetic energies of either variant.
    #[inline]
    pub fn energies(&self) -> KineticEnergies {
        match self {
            Self::Allowed { energies, .. } | Self::Forbidden { energies, .. } => *energies,
        }
    }

    /// Momenta when the configuration is allowed.
    #[inline]
    pub fn momenta(&self) -> Option<[f64; 3]> {
        match self {
            Self::Allowed { momenta, .. } => Some(*momenta),
            Self::Forbidden { .. } => None,
        }
    }
}

/// Applies the affine transform and the energy budget.
#[inline]
pub fn kinetic_energies(mapping: &DalitzMapping, budget: f64, point: PlanarPoint) -> KineticEnergies {
    let shared = mapping.a() + mapping.c() * point.y;
    let t1 = shared - mapping.b() * point.x;
    let t2 = shared + mapping.b() * point.x;

    KineticEnergies {
        t1,
        t2,
        t3: budget - t1 - t2,
    }
}

/// Checks the early-rejection conditions in order.
///
/// The budget condition reads the stored `T3`, which can round below zero
/// while `T1 + T2 <= Q` still holds.
#[inline]
pub fn forbidden_reason(energies: &KineticEnergies) -> Option<ForbiddenReason> {
    if energies.t1 < 0.0 {
        Some(ForbiddenReason::NegativeT1)
    } else if energies.t2 < 0.0 {
        Some(ForbiddenReason::NegativeT2)
    } else if energies.t3 < 0.0 {
        Some(ForbiddenReason::ExceedsBudget)
    } else {
        None
    }
}

/// Momentum magnitude of a particle of rest mass `mass` and kinetic energy
/// `kinetic`, from `p² = (T + m)² - m²`.
#[inline]
pub fn momentum(kinetic: f64, mass: f64) -> f64 {
    (kinetic * kinetic + 2.0 * kinetic * mass).sqrt()
}

/// Momenta of the three daughters.
#[inline]
pub fn momenta(energies: &KineticEnergies, masses: [f64; 3]) -> [f64; 3] {
    let t = energies.as_array();
    [
        momentum(t[0], masses[0]),
        momentum(t[1], masses[1]),
        momentum(t[2], masses[2]),
    ]
}

/// Derives energies and, when allowed, momenta for `point`.
pub fn derive(
    params: &DecayParameters,
    mapping: &DalitzMapping,
    point: PlanarPoint,
) -> Derivation {
    let budget = params.energy_budget();
    let energies = kinetic_energies(mapping, budget, point);

    match forbidden_reason(&energies) {
        Some(reason) => Derivation::Forbidden { energies, reason },
        None => Derivation::Allowed {
            energies,
            momenta: momenta(&energies, params.daughter_masses()),
        },
    }
}
