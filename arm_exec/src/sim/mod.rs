//! # Simulation module
//!
//! The simulation owns one PID controller and one arm plant and steps them
//! together. Each call to `proc`:
//!
//! 1. Applies any tuning commands (gains, target, integrator reset, noise).
//! 2. Reads the arm angle and passes it with the target to the controller.
//! 3. Applies the controller's torque demand to the arm.
//!
//! The controller and plant never see each other, they only exchange the
//! measured angle and the torque through this module.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use state::*;

use crate::{arm_plant::ArmPlantError, pid_ctrl::{Gains, PidCtrlError}};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Could not initialise the PID controller: {0}")]
    PidCtrlInitError(PidCtrlError),

    #[error("Could not initialise the arm plant: {0}")]
    ArmPlantInitError(ArmPlantError),

    #[error("The initial target must be finite, got {0}")]
    NonFiniteInitialTarget(f64),

    #[error("Recieved a non-finite target: {0}")]
    NonFiniteTarget(f64),

    #[error("Recieved non-finite gains: {0:?}")]
    NonFiniteGains(Gains),
}
