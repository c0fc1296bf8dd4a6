//! # PID control module
//!
//! The controller tracks the error between a target angle and the measured
//! arm angle and produces a torque demand from three terms:
//!
//! - P: the current error scaled by `k_p`.
//! - I: the plain sum of the most recent `integrator_window` errors scaled by
//!   `k_i`. The sum is not multiplied by a timestep, and old samples fall out
//!   of the window, which bounds windup.
//! - D: the change in error since the previous step scaled by `k_d`. The
//!   first step has no previous error and so contributes no derivative.
//!
//! Sensor noise can be emulated by adding samples from a `NoiseSource` to
//! the error before it is used.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod controller;
mod noise;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use controller::*;
pub use noise::*;
pub use params::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of error samples retained for the integral term when no window is
/// given.
pub const DEFAULT_INTEGRATOR_WINDOW: usize = 300;

/// Standard deviation of the emulated sensor noise, in degrees.
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.2;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while building a PID controller.
#[derive(Debug, thiserror::Error)]
pub enum PidCtrlError {
    #[error("Gains must be finite, got {0:?}")]
    NonFiniteGains(Gains),

    #[error("Invalid noise standard deviation {0}: {1}")]
    InvalidNoiseStdDev(f64, rand_distr::NormalError),
}
