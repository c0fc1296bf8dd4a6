//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the simulator's root
/// directory, the one containing `params/` and `sessions/`.
pub const SIM_ROOT_ENV_VAR: &str = "ARM_SIM_ROOT";

/// Get the root directory of the simulator software.
pub fn get_sim_root() -> Result<PathBuf, env::VarError> {
    env::var(SIM_ROOT_ENV_VAR).map(PathBuf::from)
}
