//! # Arm plant module
//!
//! A single rotational joint driven by a torque demand. Each call to
//! `ArmPlant::update` advances the arm by one step:
//!
//! 1. Gravity (optional) removes `k_gravity * cos(angle)` from the torque.
//! 2. Friction (optional) opposes motion with a Coulomb term
//!    `k_kinetic * sign(velocity)` and a viscous term `k_viscous * velocity`.
//! 3. Velocity is updated from `(torque - friction) / moment`, then the angle
//!    from the new velocity (semi-implicit Euler with a unit timestep).
//!
//! Angles are in degrees and are not wrapped, velocity is in degrees per
//! step. The plant must be stepped at a constant rate for the motion to mean
//! anything physically.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod plant;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use plant::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while building the arm plant.
#[derive(Debug, thiserror::Error)]
pub enum ArmPlantError {
    #[error("The moment of inertia must be positive and finite, got {0}")]
    InvalidMoment(f64),

    #[error("Plant parameter `{0}` must be finite, got {1}")]
    NonFiniteParam(&'static str, f64),
}
