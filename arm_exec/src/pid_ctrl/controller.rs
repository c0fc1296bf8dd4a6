//! # PID controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

// Internal
use super::{
    GaussianNoise, NoiseSource, Params, PidCtrlError, ZeroNoise, DEFAULT_INTEGRATOR_WINDOW,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The three controller gains.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,
}

/// Breakdown of a single controller output.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct PidTerms {
    /// The error used this step, including any noise.
    pub error: f64,

    /// Proportional contribution
    pub p: f64,

    /// Integral contribution
    pub i: f64,

    /// Derivative contribution
    pub d: f64,
}

/// A PID controller with a windowed integrator.
#[derive(Debug)]
pub struct PidController {
    gains: Gains,

    /// Maximum number of samples kept in `error_history`.
    integrator_window: usize,

    /// Past errors, oldest first.
    error_history: VecDeque<f64>,

    /// Error from the previous step, `None` before the first step.
    previous_error: Option<f64>,

    noise: Box<dyn NoiseSource>,

    noise_enabled: bool,

    last_terms: PidTerms,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Gains {
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self { k_p, k_i, k_d }
    }

    /// True if all three gains are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.k_p.is_finite() && self.k_i.is_finite() && self.k_d.is_finite()
    }
}

impl PidTerms {
    /// The controller output, the sum of the three terms.
    pub fn output(&self) -> f64 {
        self.p + self.i + self.d
    }
}

impl PidController {
    /// Create a new controller with the given gains and the default
    /// integrator window. Noise is disabled.
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self::with_window(k_p, k_i, k_d, DEFAULT_INTEGRATOR_WINDOW)
    }

    /// Create a new controller with an explicit integrator window.
    ///
    /// A window of zero keeps no history, so the integral term is always
    /// zero.
    pub fn with_window(k_p: f64, k_i: f64, k_d: f64, integrator_window: usize) -> Self {
        Self {
            gains: Gains::new(k_p, k_i, k_d),
            integrator_window,
            error_history: VecDeque::with_capacity(integrator_window.min(4096) + 1),
            previous_error: None,
            noise: Box::new(ZeroNoise),
            noise_enabled: false,
            last_terms: PidTerms::default(),
        }
    }

    /// Create a new controller from the parameters.
    ///
    /// A gaussian noise source is always built from the parameters so that
    /// noise can be switched on later, `noise_enabled` only sets whether it
    /// starts switched on.
    pub fn from_params(params: &Params) -> Result<Self, PidCtrlError> {
        let gains = Gains::new(params.k_p, params.k_i, params.k_d);
        if !gains.is_finite() {
            return Err(PidCtrlError::NonFiniteGains(gains));
        }

        let mut ctrl = Self::with_window(
            params.k_p, params.k_i, params.k_d, params.integrator_window
        );

        let noise = GaussianNoise::new(params.noise_std_dev, params.noise_seed)
            .map_err(|e| PidCtrlError::InvalidNoiseStdDev(params.noise_std_dev, e))?;
        ctrl = ctrl.with_noise(Box::new(noise));
        ctrl.set_noise_enabled(params.noise_enabled);

        debug!(
            "New PidController: {:?}, window {}, noise {}",
            ctrl.gains,
            ctrl.integrator_window,
            if ctrl.noise_enabled { "on" } else { "off" }
        );

        Ok(ctrl)
    }

    /// Replace the noise source and enable noise.
    pub fn with_noise(mut self, noise: Box<dyn NoiseSource>) -> Self {
        self.noise = noise;
        self.noise_enabled = true;
        self
    }

    /// Calculate the controller output for this step.
    ///
    /// This is stateful: it records the error for the integral and derivative
    /// terms, so it must be called exactly once per control step.
    pub fn calculate(&mut self, current: f64, target: f64) -> f64 {
        let mut error = target - current;
        if self.noise_enabled {
            error += self.noise.sample();
        }

        let p = self.gains.k_p * error;

        // Record the error, dropping the oldest if the window is now overfull.
        // Only one sample is added per call so one eviction is always enough.
        self.error_history.push_back(error);
        if self.error_history.len() > self.integrator_window {
            self.error_history.pop_front();
        }

        let error_area: f64 = self.error_history.iter().sum();
        let i = self.gains.k_i * error_area;

        // Positive when the error grew over the last step
        let slope = match self.previous_error {
            Some(prev) => error - prev,
            None => 0.0,
        };
        let d = self.gains.k_d * slope;

        self.previous_error = Some(error);

        self.last_terms = PidTerms { error, p, i, d };
        trace!("PID step: {:?}", self.last_terms);

        self.last_terms.output()
    }

    /// Overwrite the gains if any of them differ from the current ones.
    ///
    /// Returns true if the gains were changed. The error history and previous
    /// error are never touched.
    pub fn update_gains(&mut self, k_p: f64, k_i: f64, k_d: f64) -> bool {
        let new_gains = Gains::new(k_p, k_i, k_d);

        if new_gains == self.gains {
            return false;
        }

        debug!("PID gains changed from {:?} to {:?}", self.gains, new_gains);
        self.gains = new_gains;

        true
    }

    /// Clear the integrator's error history.
    ///
    /// The gains and the previous error (used by the derivative term) are
    /// kept.
    pub fn reset_integrator(&mut self) {
        self.error_history.clear();
    }

    /// Enable or disable the noise source.
    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.noise_enabled = enabled;
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn integrator_window(&self) -> usize {
        self.integrator_window
    }

    /// The retained errors, oldest first.
    pub fn error_history(&self) -> &VecDeque<f64> {
        &self.error_history
    }

    pub fn previous_error(&self) -> Option<f64> {
        self.previous_error
    }

    pub fn noise_enabled(&self) -> bool {
        self.noise_enabled
    }

    /// The terms making up the most recent output.
    pub fn last_terms(&self) -> PidTerms {
        self.last_terms
    }
}
