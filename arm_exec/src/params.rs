//! # Arm Simulator Executable Parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct ArmExecParams {

    /// Simulated time covered by one cycle, used to time script commands and
    /// to pace the loop in realtime mode.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Number of cycles to run before exiting.
    pub num_cycles: u64,

    /// If true each cycle is padded out to `cycle_period_s` of wall clock
    /// time, otherwise the simulation runs as fast as possible.
    #[serde(default)]
    pub realtime: bool,

    /// Target angle at the start of the run.
    ///
    /// Units: degrees
    #[serde(default)]
    pub initial_target_deg: f64,

    /// Number of cycles between status messages on the console.
    pub status_period_cycles: u64,

    /// Minimum level of messages printed to the console, one of `info`,
    /// `debug` or `trace`.
    pub console_log_level: String,

    /// Minimum level of messages written to the session log file.
    pub file_log_level: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shipped_params() {
        let p: ArmExecParams = util::params::parse(
            include_str!("../../params/arm_exec.toml")
        ).unwrap();

        assert!(p.cycle_period_s > 0.0);
        assert_eq!(p.num_cycles, 3600);
        assert!(!p.realtime);
        assert!(p.console_log_level.parse::<util::logger::LevelFilter>().is_ok());
        assert!(p.file_log_level.parse::<util::logger::LevelFilter>().is_ok());
    }
}
