//! # Arm simulator library.
//!
//! This library allows other crates in the workspace (and the benches) to
//! access the models driven by `arm_exec`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// PID control module - converts the angle error into a torque demand
pub mod pid_ctrl;

/// Arm plant module - integrates the arm dynamics under the torque demand
pub mod arm_plant;

/// Simulation module - owns the controller and plant and steps them together
pub mod sim;
