//! # Arm plant dynamics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{ArmPlantError, Params};
use util::maths::sign_or_zero;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulated arm.
#[derive(Debug, Clone)]
pub struct ArmPlant {
    params: Params,

    /// Current angle, not wrapped.
    ///
    /// Units: degrees
    angle_deg: f64,

    /// Current angular velocity.
    ///
    /// Units: degrees/step
    velocity: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmPlant {
    /// Create a new arm at rest at the initial angle.
    ///
    /// The moment of inertia must be positive since every update divides by
    /// it, and all other parameters must be finite.
    pub fn new(params: &Params) -> Result<Self, ArmPlantError> {
        if !(params.moment.is_finite() && params.moment > 0.0) {
            return Err(ArmPlantError::InvalidMoment(params.moment));
        }

        let finite_checks = [
            ("initial_angle_deg", params.initial_angle_deg),
            ("k_kinetic", params.k_kinetic),
            ("k_viscous", params.k_viscous),
            ("k_gravity", params.k_gravity),
        ];
        for &(name, value) in finite_checks.iter() {
            if !value.is_finite() {
                return Err(ArmPlantError::NonFiniteParam(name, value));
            }
        }

        debug!("New ArmPlant: {:?}", params);

        Ok(Self {
            params: params.clone(),
            angle_deg: params.initial_angle_deg,
            velocity: 0.0,
        })
    }

    /// Advance the arm by one step under the given torque.
    pub fn update(&mut self, torque: f64) {
        let mut torque = torque;

        // Zero when horizontal (90/270 deg), largest when vertical
        if self.params.gravity_enabled {
            torque -= self.params.k_gravity * self.angle_deg.to_radians().cos();
        }

        let friction = if self.params.friction_enabled {
            self.params.k_kinetic * sign_or_zero(self.velocity)
                + self.params.k_viscous * self.velocity
        }
        else {
            0.0
        };

        self.velocity += (torque - friction) / self.params.moment;
        self.angle_deg += self.velocity;

        trace!(
            "Arm step: torque {:.6}, friction {:.6}, velocity {:.6}, angle {:.6}",
            torque, friction, self.velocity, self.angle_deg
        );
    }

    /// The current angle of the arm in degrees.
    pub fn get_current_angle(&self) -> f64 {
        self.angle_deg
    }

    /// The current angular velocity in degrees per step.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn inertial(initial_angle_deg: f64, moment: f64) -> Params {
        Params {
            initial_angle_deg,
            moment,
            ..Default::default()
        }
    }

    #[test]
    fn test_at_rest_stays_at_rest() {
        let mut plant = ArmPlant::new(&inertial(90.0, 5.0)).unwrap();

        for _ in 0..10_000 {
            plant.update(0.0);
        }

        assert_eq!(plant.get_current_angle(), 90.0);
        assert_eq!(plant.velocity(), 0.0);
    }

    #[test]
    fn test_at_rest_with_friction_stays_at_rest() {
        // With sign(0) = 0 the Coulomb term doesn't kick a stationary arm
        let mut plant = ArmPlant::new(&Params {
            friction_enabled: true,
            k_kinetic: 10.0,
            k_viscous: 3.0,
            ..inertial(45.0, 50.0)
        }).unwrap();

        for _ in 0..100 {
            plant.update(0.0);
        }

        assert_eq!(plant.get_current_angle(), 45.0);
        assert_eq!(plant.velocity(), 0.0);
    }

    #[test]
    fn test_constant_torque() {
        let mut plant = ArmPlant::new(&inertial(0.0, 2.0)).unwrap();

        // Velocity grows by torque/moment each step, angle by the new velocity
        plant.update(1.0);
        assert_eq!((plant.velocity(), plant.get_current_angle()), (0.5, 0.5));
        plant.update(1.0);
        assert_eq!((plant.velocity(), plant.get_current_angle()), (1.0, 1.5));
        plant.update(-2.0);
        assert_eq!((plant.velocity(), plant.get_current_angle()), (0.0, 1.5));
    }

    #[test]
    fn test_friction_opposes_motion() {
        let mut plant = ArmPlant::new(&Params {
            friction_enabled: true,
            k_kinetic: 1.0,
            k_viscous: 0.5,
            ..inertial(90.0, 1.0)
        }).unwrap();

        // At rest there's no friction
        plant.update(10.0);
        assert_eq!((plant.velocity(), plant.get_current_angle()), (10.0, 100.0));

        // 1 * sign(10) + 0.5 * 10 = 6
        plant.update(0.0);
        assert_eq!((plant.velocity(), plant.get_current_angle()), (4.0, 104.0));

        // 1 * sign(4) + 0.5 * 4 = 3
        plant.update(0.0);
        assert_eq!((plant.velocity(), plant.get_current_angle()), (1.0, 105.0));

        // Friction is applied with the sign of the velocity
        let mut plant = ArmPlant::new(&Params {
            friction_enabled: true,
            k_kinetic: 1.0,
            k_viscous: 0.5,
            ..inertial(0.0, 1.0)
        }).unwrap();
        plant.update(-10.0);
        plant.update(0.0);
        assert_eq!(plant.velocity(), -4.0);
    }

    #[test]
    fn test_friction_divided_by_moment() {
        let mut plant = ArmPlant::new(&Params {
            friction_enabled: true,
            k_kinetic: 2.0,
            k_viscous: 0.0,
            ..inertial(0.0, 4.0)
        }).unwrap();

        plant.update(8.0);
        assert_eq!(plant.velocity(), 2.0);

        // (0 - 2) / 4
        plant.update(0.0);
        assert_eq!(plant.velocity(), 1.5);
    }

    #[test]
    fn test_gravity() {
        let gravity = |angle| Params {
            gravity_enabled: true,
            k_gravity: 2.0,
            ..inertial(angle, 1.0)
        };

        // Pulled down when pointing along 0 deg
        let mut plant = ArmPlant::new(&gravity(0.0)).unwrap();
        plant.update(0.0);
        assert_eq!(plant.velocity(), -2.0);
        assert_eq!(plant.get_current_angle(), -2.0);

        // Pulled the other way at 180 deg
        let mut plant = ArmPlant::new(&gravity(180.0)).unwrap();
        plant.update(0.0);
        assert!((plant.velocity() - 2.0).abs() < 1e-12);

        // Balanced at 90 deg
        let mut plant = ArmPlant::new(&gravity(90.0)).unwrap();
        plant.update(0.0);
        assert!(plant.velocity().abs() < 1e-12);

        // Held in place by a torque matching gravity
        let mut plant = ArmPlant::new(&gravity(0.0)).unwrap();
        for _ in 0..100 {
            plant.update(2.0);
        }
        assert_eq!(plant.get_current_angle(), 0.0);
    }

    #[test]
    fn test_angle_not_wrapped() {
        let mut plant = ArmPlant::new(&inertial(350.0, 1.0)).unwrap();
        plant.update(20.0);
        assert_eq!(plant.get_current_angle(), 370.0);

        plant.update(-820.0);
        assert_eq!(plant.get_current_angle(), -430.0);
    }

    #[test]
    fn test_invalid_params() {
        for &moment in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
            match ArmPlant::new(&inertial(90.0, moment)) {
                Err(ArmPlantError::InvalidMoment(_)) => (),
                r => panic!("Expected invalid moment for {}, got {:?}", moment, r),
            }
        }

        match ArmPlant::new(&inertial(f64::NAN, 1.0)) {
            Err(ArmPlantError::NonFiniteParam(name, _)) => assert_eq!(name, "initial_angle_deg"),
            r => panic!("Expected a non-finite parameter error, got {:?}", r),
        }

        match ArmPlant::new(&Params { k_gravity: f64::INFINITY, ..Default::default() }) {
            Err(ArmPlantError::NonFiniteParam(name, _)) => assert_eq!(name, "k_gravity"),
            r => panic!("Expected a non-finite parameter error, got {:?}", r),
        }
    }
}
