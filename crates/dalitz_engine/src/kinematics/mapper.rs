//! Candidate Mapper: two uniform draws to a point of the sampled disc.
//!
//! ```text
//! R     = sqrt(K1 - sqrt(K1² - K2·u1))
//! theta = 2π·u2
//! (X, Y) = (R cos theta, R sin theta)
//! ```
//!
//! The radial step is an inverse-transform sample of the phase-space density
//! along the radius.

use std::f64::consts::TAU;

use crate::constants::DalitzMapping;

/// Point of the planar (Dalitz-style) configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlanarPoint {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl PlanarPoint {
    /// Creates a point from Cartesian coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Output of the mapper: polar sample and the resulting point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedPoint {
    /// Sampled radius R.
    pub radius: f64,
    /// Sampled angle theta in radians.
    pub theta: f64,
    /// Cartesian point.
    pub point: PlanarPoint,
}

/// Argument of the inner square root of the radial transform.
///
/// Non-negative for every `u1` in [0, 1) whenever `K2 <= K1²`.
#[inline]
pub fn radial_discriminant(mapping: &DalitzMapping, u1: f64) -> f64 {
    mapping.k1() * mapping.k1() - mapping.k2() * u1
}

/// Radius for the draw `u1`.
#[inline]
pub fn radial_transform(mapping: &DalitzMapping, u1: f64) -> f64 {
    let discriminant = radial_discriminant(mapping, u1);
    debug_assert!(
        discriminant >= 0.0,
        "radial transform domain violated: K1² - K2·u1 = {discriminant} for u1 = {u1}"
    );
    (mapping.k1() - discriminant.sqrt()).sqrt()
}

/// Maps the draw pair `(u1, u2)` onto the disc.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::constants::DalitzMapping;
/// use dalitz_engine::kinematics::map_candidate;
///
/// let mapped = map_candidate(&DalitzMapping::reference(), 0.5, 0.25);
/// assert!(mapped.point.x.abs() < 1e-12);
/// assert!((mapped.point.y - 1.4106).abs() < 1e-4);
/// ```
#[inline]
pub fn map_candidate(mapping: &DalitzMapping, u1: f64, u2: f64) -> MappedPoint {
    let radius = radial_transform(mapping, u1);
    let theta = TAU * u2;
    let (sin, cos) = theta.sin_cos();

    MappedPoint {
        radius,
        theta,
        point: PlanarPoint::new(radius * cos, radius * sin),
    }
}
