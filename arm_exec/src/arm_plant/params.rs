//! Parameters structure for the arm plant

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Physical parameters of the arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- STATE ----

    /// Angle of the arm at the start of the simulation.
    ///
    /// Units: degrees
    pub initial_angle_deg: f64,

    // ---- INERTIA ----

    /// Moment of inertia of the arm, must be positive.
    pub moment: f64,

    // ---- FRICTION ----

    /// If true friction opposes the arm's motion.
    #[serde(default)]
    pub friction_enabled: bool,

    /// Coulomb friction coefficient, applied with the sign of the velocity.
    #[serde(default)]
    pub k_kinetic: f64,

    /// Viscous friction coefficient, applied in proportion to the velocity.
    #[serde(default)]
    pub k_viscous: f64,

    // ---- GRAVITY ----

    /// If true gravity acts on the arm.
    #[serde(default)]
    pub gravity_enabled: bool,

    /// Gravity coefficient, scaling the cosine of the arm angle.
    #[serde(default)]
    pub k_gravity: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    /// A pure inertial arm starting horizontal.
    fn default() -> Self {
        Self {
            initial_angle_deg: 90.0,
            moment: 50.0,
            friction_enabled: false,
            k_kinetic: 0.0,
            k_viscous: 0.0,
            gravity_enabled: false,
            k_gravity: 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params() {
        let p: Params = util::params::parse(
            include_str!("../../../params/arm_plant.toml")
        ).unwrap();

        assert_eq!(p.initial_angle_deg, 90.0);
        assert_eq!(p.moment, 50.0);
        assert!(p.friction_enabled && p.gravity_enabled);
        assert_eq!((p.k_kinetic, p.k_viscous, p.k_gravity), (10.0, 3.0, 0.5));
    }

    #[test]
    fn test_optional_terms_default_off() {
        let p: Params = util::params::parse("initial_angle_deg = 0.0\nmoment = 5.0\n").unwrap();

        assert!(!p.friction_enabled);
        assert!(!p.gravity_enabled);
        assert_eq!(p.k_gravity, 0.0);
    }
}
