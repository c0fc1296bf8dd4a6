//! Parameters structure for PidCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use super::{DEFAULT_INTEGRATOR_WINDOW, DEFAULT_NOISE_STD_DEV};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for PID control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- GAINS ----

    /// Proportional gain.
    ///
    /// Units: torque/degree
    pub k_p: f64,

    /// Integral gain, applied to the unscaled sum of the error window.
    ///
    /// Units: torque/degree
    pub k_i: f64,

    /// Derivative gain, applied to the per-step change in error.
    ///
    /// Units: torque/degree
    pub k_d: f64,

    // ---- INTEGRATOR ----

    /// Number of most recent error samples summed for the integral term.
    #[serde(default = "default_integrator_window")]
    pub integrator_window: usize,

    // ---- NOISE ----

    /// If true zero-mean gaussian noise is added to every error sample.
    #[serde(default)]
    pub noise_enabled: bool,

    /// Standard deviation of the noise.
    ///
    /// Units: degrees
    #[serde(default = "default_noise_std_dev")]
    pub noise_std_dev: f64,

    /// Seed for the noise generator. If not set the generator is seeded from
    /// system entropy, so runs are not repeatable.
    #[serde(default)]
    pub noise_seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            k_p: 0.0,
            k_i: 0.0,
            k_d: 0.0,
            integrator_window: DEFAULT_INTEGRATOR_WINDOW,
            noise_enabled: false,
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
            noise_seed: None
        }
    }
}

fn default_integrator_window() -> usize {
    DEFAULT_INTEGRATOR_WINDOW
}

fn default_noise_std_dev() -> f64 {
    DEFAULT_NOISE_STD_DEV
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let p: Params = util::params::parse("k_p = 0.5\nk_i = 0.001\nk_d = 0.2\n").unwrap();

        assert_eq!(p.k_p, 0.5);
        assert_eq!(p.integrator_window, DEFAULT_INTEGRATOR_WINDOW);
        assert!(!p.noise_enabled);
        assert_eq!(p.noise_std_dev, DEFAULT_NOISE_STD_DEV);
        assert_eq!(p.noise_seed, None);
    }

    #[test]
    fn test_params_full() {
        let p: Params = util::params::parse(
            r#"
            k_p = 0.1
            k_i = 0.0
            k_d = 0.3
            integrator_window = 100000
            noise_enabled = true
            noise_std_dev = 0.5
            noise_seed = 7
            "#
        ).unwrap();

        assert_eq!(p.integrator_window, 100000);
        assert!(p.noise_enabled);
        assert_eq!(p.noise_std_dev, 0.5);
        assert_eq!(p.noise_seed, Some(7));
    }

    #[test]
    fn test_shipped_params() {
        let p: Params = util::params::parse(
            include_str!("../../../params/pid_ctrl.toml")
        ).unwrap();

        assert_eq!(p.integrator_window, DEFAULT_INTEGRATOR_WINDOW);
        assert!(p.noise_enabled);
        assert_eq!(p.noise_seed, Some(2024));
    }
}
