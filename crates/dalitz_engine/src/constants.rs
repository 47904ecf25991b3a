//! Physical constants and parameter sets for the three-body decay.
//!
//! The reference reaction is K⁰ → π⁰ π⁰ π⁰ with all masses in MeV (natural
//! units, so momenta share the unit).
//!
//! Two parameter sets drive the engine:
//!
//! - [`DecayParameters`]: parent mass, the three daughter masses and the
//!   kinetic energy budget Q.
//! - [`DalitzMapping`]: the constants of the radial transform (K1, K2) and the
//!   affine coefficients (a, b, c) that turn a planar point into kinetic
//!   energies.
//!
//! Both are immutable once validated.

use crate::error::ConfigError;

/// Neutral kaon mass (MeV).
pub const KAON_MASS_MEV: f64 = 497.65;

/// Neutral pion mass (MeV). Used for all three daughters.
pub const NEUTRAL_PION_MASS_MEV: f64 = 134.98;

/// Charged pion mass (MeV).
///
/// Unused, reference value for a possible alternate mass model. The
/// kinematics never read it.
pub const CHARGED_PION_MASS_MEV: f64 = 139.58;

/// Kinetic energy budget Q of the reference decay (MeV).
pub const REFERENCE_ENERGY_BUDGET_MEV: f64 = 92.71;

/// Radial transform constant K1.
pub const REFERENCE_K1: f64 = 200.0;

/// Radial transform constant K2.
pub const REFERENCE_K2: f64 = 1584.0;

/// Affine offset `a` shared by T1 and T2 (MeV).
pub const REFERENCE_A: f64 = 30.9033;

/// Affine coefficient `b` applied to X (MeV).
pub const REFERENCE_B: f64 = 16.9521;

/// Affine coefficient `c` applied to Y (MeV).
pub const REFERENCE_C: f64 = 9.78729;

/// Event count of the reference production run.
pub const REFERENCE_EVENT_COUNT: u64 = 500_000_000;

/// Tolerance used when comparing Q against parent minus daughter masses.
pub const ENERGY_BUDGET_TOLERANCE_MEV: f64 = 1e-6;

/// Masses and energy budget of a three-body decay.
///
/// # Examples
///
/// ```rust
/// use dalitz_engine::constants::DecayParameters;
///
/// let params = DecayParameters::reference();
/// assert_eq!(params.daughter_masses(), [134.98; 3]);
/// assert!(params.is_budget_consistent());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayParameters {
    parent_mass: f64,
    daughter_masses: [f64; 3],
    energy_budget: f64,
}

impl DecayParameters {
    /// Creates a validated parameter set.
    ///
    /// Q is taken as given and is not derived from the masses; use
    /// [`nominal_energy_budget`](Self::nominal_energy_budget) to compare.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if any mass or the budget is
    /// non-finite or not strictly positive.
    pub fn new(
        parent_mass: f64,
        daughter_masses: [f64; 3],
        energy_budget: f64,
    ) -> Result<Self, ConfigError> {
        check_positive("parent_mass", parent_mass)?;
        for (name, mass) in ["daughter_mass_1", "daughter_mass_2", "daughter_mass_3"]
            .into_iter()
            .zip(daughter_masses)
        {
            check_positive(name, mass)?;
        }
        check_positive("energy_budget", energy_budget)?;

        Ok(Self {
            parent_mass,
            daughter_masses,
            energy_budget,
        })
    }

    /// K⁰ → 3π⁰ with the literal Q = 92.71 MeV.
    pub fn reference() -> Self {
        Self {
            parent_mass: KAON_MASS_MEV,
            daughter_masses: [NEUTRAL_PION_MASS_MEV; 3],
            energy_budget: REFERENCE_ENERGY_BUDGET_MEV,
        }
    }

    /// Parent mass (MeV).
    #[inline]
    pub fn parent_mass(&self) -> f64 {
        self.parent_mass
    }

    /// Daughter masses (MeV).
    #[inline]
    pub fn daughter_masses(&self) -> [f64; 3] {
        self.daughter_masses
    }

    /// Kinetic energy budget Q (MeV).
    #[inline]
    pub fn energy_budget(&self) -> f64 {
        self.energy_budget
    }

    /// Parent mass minus the summed daughter masses.
    pub fn nominal_energy_budget(&self) -> f64 {
        self.parent_mass - self.daughter_masses.iter().sum::<f64>()
    }

    /// Whether Q matches the nominal budget within
    /// [`ENERGY_BUDGET_TOLERANCE_MEV`].
    pub fn is_budget_consistent(&self) -> bool {
        (self.energy_budget - self.nominal_energy_budget()).abs() <= ENERGY_BUDGET_TOLERANCE_MEV
    }
}

impl Default for DecayParameters {
    fn default() -> Self {
        Self::reference()
    }
}

/// Constants of the draw-to-plane mapping and of the plane-to-energy transform.
///
/// The radial transform `R = sqrt(K1 - sqrt(K1² - K2·u))` is only defined for
/// every `u` in [0, 1) when `K2 <= K1²`; [`DalitzMapping::new`] enforces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DalitzMapping {
    k1: f64,
    k2: f64,
    a: f64,
    b: f64,
    c: f64,
}

impl DalitzMapping {
    /// Creates a validated mapping.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidParameter`] for non-finite values, non-positive
    ///   `k1`, `k2` or `b`
    /// - [`ConfigError::RadialDomain`] when `k2 > k1²`
    pub fn new(k1: f64, k2: f64, a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        check_positive("k1", k1)?;
        check_positive("k2", k2)?;
        check_finite("a", a)?;
        check_positive("b", b)?;
        check_finite("c", c)?;

        if k2 > k1 * k1 {
            return Err(ConfigError::RadialDomain { k1, k2 });
        }

        Ok(Self { k1, k2, a, b, c })
    }

    /// Reference constants for K⁰ → 3π⁰.
    pub fn reference() -> Self {
        Self {
            k1: REFERENCE_K1,
            k2: REFERENCE_K2,
            a: REFERENCE_A,
            b: REFERENCE_B,
            c: REFERENCE_C,
        }
    }

    /// Radial constant K1.
    #[inline]
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// Radial constant K2.
    #[inline]
    pub fn k2(&self) -> f64 {
        self.k2
    }

    /// Affine offset `a`.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Affine coefficient `b`.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Affine coefficient `c`.
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Outer radius of the sampled disc, reached as `u1 -> 1`.
    pub fn max_radius(&self) -> f64 {
        (self.k1 - (self.k1 * self.k1 - self.k2).sqrt()).sqrt()
    }
}

impl Default for DalitzMapping {
    fn default() -> Self {
        Self::reference()
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter {
            name,
            value: format!("{} is not finite", value),
        });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value: format!("{} must be positive", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_budget_matches_masses() {
        let params = DecayParameters::reference();
        assert_relative_eq!(params.nominal_energy_budget(), 92.71, epsilon = 1e-9);
        assert!(params.is_budget_consistent());
    }

    #[test]
    fn test_budget_is_not_derived() {
        let params = DecayParameters::new(KAON_MASS_MEV, [NEUTRAL_PION_MASS_MEV; 3], 80.0).unwrap();
        assert_eq!(params.energy_budget(), 80.0);
        assert!(!params.is_budget_consistent());
    }

    #[test]
    fn test_invalid_masses_rejected() {
        let result = DecayParameters::new(0.0, [NEUTRAL_PION_MASS_MEV; 3], 92.71);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "parent_mass",
                ..
            })
        ));

        let result = DecayParameters::new(KAON_MASS_MEV, [134.98, f64::NAN, 134.98], 92.71);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "daughter_mass_2",
                ..
            })
        ));

        let result = DecayParameters::new(KAON_MASS_MEV, [134.98; 3], -1.0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "energy_budget",
                ..
            })
        ));
    }

    #[test]
    fn test_reference_mapping_domain() {
        let mapping = DalitzMapping::reference();
        assert!(mapping.k2() <= mapping.k1() * mapping.k1());
        // K1² - K2 = 196², so the disc radius is exactly 2.
        assert_relative_eq!(mapping.max_radius(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mapping_domain_violation() {
        let result = DalitzMapping::new(10.0, 101.0, REFERENCE_A, REFERENCE_B, REFERENCE_C);
        assert!(matches!(result, Err(ConfigError::RadialDomain { .. })));

        let result = DalitzMapping::new(10.0, 100.0, REFERENCE_A, REFERENCE_B, REFERENCE_C);
        assert!(result.is_ok());
    }

    #[test]
    fn test_mapping_rejects_non_finite() {
        let result = DalitzMapping::new(REFERENCE_K1, REFERENCE_K2, f64::INFINITY, 1.0, 1.0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "a", .. })
        ));
    }
}
