//! Rejection-sampling kinematics for a three-body decay.
//!
//! # Architecture
//!
//! ```text
//! (u1, u2) ──► mapper ──► (X, Y) ──► derivation ──► (T1, T2, T3) ──► (p1, p2, p3)
//!                                        │                                 │
//!                                        └── forbidden ──┐                 │
//!                                                        ▼                 ▼
//!                                                   acceptance ◄───────────┘
//! ```
//!
//! [`DalitzKinematics`] bundles the decay parameters and the mapping, and
//! turns one draw pair into a [`Candidate`] carrying every intermediate
//! quantity and the [`Verdict`].
//!
//! # Examples
//!
//! ```rust
//! use dalitz_engine::kinematics::DalitzKinematics;
//!
//! let kinematics = DalitzKinematics::reference();
//! let candidate = kinematics.evaluate(0.5, 0.25);
//!
//! assert!(candidate.verdict.is_accepted());
//! let event = candidate.accepted_event().unwrap();
//! assert!((event.y - 1.4106).abs() < 1e-4);
//! ```

mod acceptance;
mod derivation;
mod mapper;

pub use acceptance::{judge, satisfies_closure, Rejection, Verdict};
pub use derivation::{
    derive, forbidden_reason, kinetic_energies, momenta, momentum, Derivation, ForbiddenReason,
    KineticEnergies,
};
pub use mapper::{map_candidate, radial_discriminant, radial_transform, MappedPoint, PlanarPoint};

use crate::constants::{DalitzMapping, DecayParameters};

/// Planar coordinates of an accepted configuration.
///
/// Immutable once created; handed to the dataset sink by value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AcceptedEvent {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl AcceptedEvent {
    /// Coordinates as the two-element `XY` record.
    #[inline]
    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Point form of the event.
    #[inline]
    pub fn point(&self) -> PlanarPoint {
        PlanarPoint::new(self.x, self.y)
    }
}

impl From<[f64; 2]> for AcceptedEvent {
    fn from(xy: [f64; 2]) -> Self {
        Self { x: xy[0], y: xy[1] }
    }
}

/// One retry attempt with all intermediate quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Radial draw.
    pub u1: f64,
    /// Angular draw.
    pub u2: f64,
    /// Mapper output.
    pub mapped: MappedPoint,
    /// Energies and, when allowed, momenta.
    pub derivation: Derivation,
    /// Accept/reject decision.
    pub verdict: Verdict,
}

impl Candidate {
    /// Planar point of the candidate.
    #[inline]
    pub fn point(&self) -> PlanarPoint {
        self.mapped.point
    }

    /// The event to record, if the candidate was accepted.
    #[inline]
    pub fn accepted_event(&self) -> Option<AcceptedEvent> {
        self.verdict.is_accepted().then(|| AcceptedEvent {
            x: self.mapped.point.x,
            y: self.mapped.point.y,
        })
    }
}

/// Decay parameters and mapping for candidate evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DalitzKinematics {
    params: DecayParameters,
    mapping: DalitzMapping,
}

impl DalitzKinematics {
    /// Bundles validated parameters and mapping.
    pub fn new(params: DecayParameters, mapping: DalitzMapping) -> Self {
        Self { params, mapping }
    }

    /// Reference K⁰ → 3π⁰ kinematics.
    pub fn reference() -> Self {
        Self::new(DecayParameters::reference(), DalitzMapping::reference())
    }

    /// Decay parameters.
    #[inline]
    pub fn params(&self) -> &DecayParameters {
        &self.params
    }

    /// Mapping constants.
    #[inline]
    pub fn mapping(&self) -> &DalitzMapping {
        &self.mapping
    }

    /// Evaluates the candidate for the draw pair `(u1, u2)`.
    #[inline]
    pub fn evaluate(&self, u1: f64, u2: f64) -> Candidate {
        let mapped = map_candidate(&self.mapping, u1, u2);
        let derivation = derive(&self.params, &self.mapping, mapped.point);
        let verdict = judge(&derivation);

        Candidate {
            u1,
            u2,
            mapped,
            derivation,
            verdict,
        }
    }

    /// Recomputes the derivation for a recorded point.
    #[inline]
    pub fn derive_at(&self, point: PlanarPoint) -> Derivation {
        derive(&self.params, &self.mapping, point)
    }
}
