//! Simulation state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::{SimCmd, SimError};
use crate::{
    arm_plant::{self, ArmPlant},
    pid_ctrl::{self, PidController},
};
use util::{maths::rms_from_sum_sq, module::State};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulation context, owning the controller and the plant.
#[derive(Debug)]
pub struct Simulation {
    controller: PidController,

    plant: ArmPlant,

    /// The angle the controller is driving the arm towards.
    ///
    /// Units: degrees
    target_deg: f64,

    /// Number of completed cycles
    cycle: u64,

    stats: RunStats,
}

/// Data required to initialise the simulation.
#[derive(Debug, Clone)]
pub struct InitData {
    pub pid_params: pid_ctrl::Params,

    pub plant_params: arm_plant::Params,

    /// Units: degrees
    pub initial_target_deg: f64,
}

/// Input data to the simulation.
#[derive(Debug, Default, Clone)]
pub struct InputData {
    /// Commands to apply before stepping, in order.
    pub cmds: Vec<SimCmd>,
}

/// Output of one simulation cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputData {
    /// Torque demanded by the controller this cycle.
    pub torque: f64,

    /// Angle of the arm after applying the torque.
    ///
    /// Units: degrees
    pub angle_deg: f64,
}

/// Status report for one simulation cycle.
///
/// This is a flat struct so it can be archived as a CSV row.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct StatusReport {
    /// Index of this cycle, starting at 0
    pub cycle: u64,

    pub target_deg: f64,

    /// Angle read by the controller at the start of the cycle.
    pub measured_angle_deg: f64,

    /// Angle after the plant was updated.
    pub angle_deg: f64,

    /// Units: degrees/step
    pub velocity: f64,

    pub torque: f64,

    /// Target minus measured angle, without noise.
    pub tracking_error_deg: f64,

    /// The error seen by the controller, including noise.
    pub ctrl_error_deg: f64,

    pub p_term: f64,

    pub i_term: f64,

    pub d_term: f64,

    /// Number of samples in the integrator window.
    pub integrator_len: usize,

    /// True if the integrator was reset this cycle.
    pub integrator_reset: bool,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct SimSummary {
    pub num_cycles: u64,

    pub final_angle_deg: f64,

    pub final_target_deg: f64,

    pub final_velocity: f64,

    /// Root mean square of the tracking error over all cycles.
    pub rms_tracking_error_deg: f64,

    pub max_abs_tracking_error_deg: f64,

    pub final_gains: pid_ctrl::Gains,

    pub num_integrator_resets: u64,
}

/// Statistics accumulated over the run.
#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    sum_sq_error: f64,
    max_abs_error: f64,
    num_integrator_resets: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for Simulation {
    type InitData = InitData;
    type InitError = SimError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = SimError;

    /// Build the controller and plant from their parameters.
    fn init(init_data: Self::InitData) -> Result<Self, Self::InitError> {
        let controller = PidController::from_params(&init_data.pid_params)
            .map_err(SimError::PidCtrlInitError)?;

        let plant = ArmPlant::new(&init_data.plant_params)
            .map_err(SimError::ArmPlantInitError)?;

        Self::from_parts(controller, plant, init_data.initial_target_deg)
    }

    /// Run one cycle of the simulation.
    ///
    /// All commands are checked before any are applied, so an invalid
    /// command leaves the simulation untouched and the cycle is not run.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        for cmd in input_data.cmds.iter() {
            cmd.validate()?;
        }

        let mut report = StatusReport {
            cycle: self.cycle,
            ..Default::default()
        };

        for cmd in input_data.cmds.iter() {
            self.apply_cmd(cmd, &mut report);
        }

        // ---- CONTROL STEP ----

        let measured_angle_deg = self.plant.get_current_angle();
        let torque = self.controller.calculate(measured_angle_deg, self.target_deg);
        self.plant.update(torque);

        // ---- REPORTING ----

        let terms = self.controller.last_terms();
        let tracking_error_deg = self.target_deg - measured_angle_deg;

        report.target_deg = self.target_deg;
        report.measured_angle_deg = measured_angle_deg;
        report.angle_deg = self.plant.get_current_angle();
        report.velocity = self.plant.velocity();
        report.torque = torque;
        report.tracking_error_deg = tracking_error_deg;
        report.ctrl_error_deg = terms.error;
        report.p_term = terms.p;
        report.i_term = terms.i;
        report.d_term = terms.d;
        report.integrator_len = self.controller.error_history().len();

        self.stats.sum_sq_error += tracking_error_deg.powi(2);
        self.stats.max_abs_error = self.stats.max_abs_error.max(tracking_error_deg.abs());
        self.cycle += 1;

        trace!("Sim cycle: {:?}", report);

        Ok((
            OutputData {
                torque,
                angle_deg: report.angle_deg,
            },
            report,
        ))
    }
}

impl Simulation {
    /// Build a simulation from an existing controller and plant.
    pub fn from_parts(
        controller: PidController,
        plant: ArmPlant,
        initial_target_deg: f64,
    ) -> Result<Self, SimError> {
        if !initial_target_deg.is_finite() {
            return Err(SimError::NonFiniteInitialTarget(initial_target_deg));
        }

        Ok(Self {
            controller,
            plant,
            target_deg: initial_target_deg,
            cycle: 0,
            stats: RunStats::default(),
        })
    }

    /// Apply a single, already validated, command.
    fn apply_cmd(&mut self, cmd: &SimCmd, report: &mut StatusReport) {
        match cmd {
            SimCmd::SetGains(g) => {
                if self.controller.update_gains(g.k_p, g.k_i, g.k_d) {
                    info!("Gains set to {:?}", g);
                }
            }
            SimCmd::SetTarget { target_deg } => {
                if *target_deg != self.target_deg {
                    info!("Target set to {} deg", target_deg);
                }
                self.target_deg = *target_deg;
            }
            SimCmd::ResetIntegrator => {
                info!("Resetting integrator");
                self.controller.reset_integrator();
                self.stats.num_integrator_resets += 1;
                report.integrator_reset = true;
            }
            SimCmd::SetNoise { enabled } => {
                debug!("Noise {}", if *enabled { "enabled" } else { "disabled" });
                self.controller.set_noise_enabled(*enabled);
            }
        }
    }

    /// Summarise the run so far.
    pub fn summary(&self) -> SimSummary {
        SimSummary {
            num_cycles: self.cycle,
            final_angle_deg: self.plant.get_current_angle(),
            final_target_deg: self.target_deg,
            final_velocity: self.plant.velocity(),
            rms_tracking_error_deg: rms_from_sum_sq(self.stats.sum_sq_error, self.cycle as usize),
            max_abs_tracking_error_deg: self.stats.max_abs_error,
            final_gains: self.controller.gains(),
            num_integrator_resets: self.stats.num_integrator_resets,
        }
    }

    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    pub fn plant(&self) -> &ArmPlant {
        &self.plant
    }

    pub fn target_deg(&self) -> f64 {
        self.target_deg
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}
