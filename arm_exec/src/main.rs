//! Arm simulator executable entry point.
//!
//! # Architecture
//!
//! The executable runs a PID controller against a simulated single joint
//! arm:
//!
//!     - Initialise the session, parameters and logging
//!     - Load the (optional) tuning script given as the only argument
//!     - Main loop, once per cycle:
//!         - Collect script commands due at the current simulated time
//!         - Step the simulation (controller then plant)
//!         - Archive the cycle's status report
//!     - Save a summary of the run into the session directory
//!
//! Parameters are loaded from `$ARM_SIM_ROOT/params/`: `arm_exec.toml`,
//! `pid_ctrl.toml` and `arm_plant.toml`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Parameters for the arm simulator executable.
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Result, eyre::{WrapErr, eyre}};

// Internal
use arm_lib::{
    arm_plant,
    pid_ctrl,
    sim::{InitData, InputData, SimCmd, Simulation},
};
use params::ArmExecParams;
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingCmds, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "arm_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    let exec_params: ArmExecParams = util::params::load("arm_exec.toml")
        .wrap_err("Could not load exec params")?;

    // Initialise logger
    let console_level: LevelFilter = exec_params.console_log_level.parse()
        .wrap_err("Invalid console log level")?;
    let file_level: LevelFilter = exec_params.file_log_level.parse()
        .wrap_err("Invalid file log level")?;
    logger_init(console_level, file_level, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("PID Arm Simulator Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    if !(exec_params.cycle_period_s.is_finite() && exec_params.cycle_period_s > 0.0) {
        return Err(eyre!(
            "The cycle period must be positive, got {} s", exec_params.cycle_period_s
        ));
    }
    let status_period_cycles = exec_params.status_period_cycles.max(1);

    // ---- LOAD PARAMETERS ----

    let pid_params: pid_ctrl::Params = util::params::load("pid_ctrl.toml")
        .wrap_err("Could not load PID control params")?;
    let plant_params: arm_plant::Params = util::params::load("arm_plant.toml")
        .wrap_err("Could not load arm plant params")?;

    info!("Parameters loaded");

    // ---- INITIALISE SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let mut script: Option<ScriptInterpreter<SimCmd>> = match args.len() {
        1 => {
            info!("No script provided, running with the initial parameters");
            None
        }
        2 => {
            let interp = ScriptInterpreter::new(&args[1])
                .wrap_err("Failed to load the script")?;
            info!(
                "Loaded script {:?} with {} commands lasting {:.2} s",
                args[1],
                interp.get_num_cmds(),
                interp.get_duration()
            );
            Some(interp)
        }
        _ => return Err(eyre!(
            "Expected at most one argument (the path to a script), found {}",
            args.len() - 1
        ))
    };

    // ---- INITIALISE SIMULATION ----

    let mut sim = Simulation::init(InitData {
        pid_params,
        plant_params,
        initial_target_deg: exec_params.initial_target_deg,
    }).wrap_err("Failed to initialise the simulation")?;

    let mut archiver = Archiver::from_path(&session, "arm_sim.csv")
        .wrap_err("Failed to create the simulation archive")?;

    info!(
        "Initialisation complete, running {} cycles of {} s{}",
        exec_params.num_cycles,
        exec_params.cycle_period_s,
        if exec_params.realtime { " in realtime" } else { "" }
    );

    // ---- MAIN LOOP ----

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let mut end_of_script = false;

    for cycle in 0..exec_params.num_cycles {
        let cycle_start = Instant::now();
        let sim_time_s = cycle as f64 * exec_params.cycle_period_s;

        // ---- SCRIPT PROCESSING ----

        let cmds = match script.as_mut().map(|s| s.get_pending(sim_time_s)) {
            Some(PendingCmds::Some(cmds)) => cmds,
            Some(PendingCmds::EndOfScript) => {
                if !end_of_script {
                    info!("End of script reached at {:.2} s", sim_time_s);
                    end_of_script = true;
                }
                vec![]
            }
            Some(PendingCmds::None) | None => vec![],
        };

        // ---- SIMULATION ----

        let input = InputData { cmds };
        let (output, report) = match sim.proc(&input) {
            Ok(r) => r,
            Err(e) => {
                warn!("Discarding commands at {:.2} s: {}", sim_time_s, e);
                sim.proc(&InputData::default())
                    .wrap_err("Simulation cycle failed")?
            }
        };

        archiver.serialise(report)
            .wrap_err("Failed to archive the status report")?;

        if cycle % status_period_cycles == 0 {
            info!(
                "[{:8.2} s] target {:9.3} deg, angle {:9.3} deg, torque {:9.4}",
                sim_time_s, report.target_deg, output.angle_deg, output.torque
            );
        }

        // ---- CYCLE PACING ----

        if exec_params.realtime {
            let cycle_dur = Instant::now() - cycle_start;
            match cycle_period.checked_sub(cycle_dur) {
                Some(d) => thread::sleep(d),
                None => warn!(
                    "Cycle overran by {:.06} s",
                    (cycle_dur - cycle_period).as_secs_f64()
                )
            }
        }
    }

    // ---- SHUTDOWN ----

    archiver.flush().wrap_err("Failed to flush the simulation archive")?;

    let summary = sim.summary();
    info!(
        "Run complete:\n{}",
        serde_json::to_string_pretty(&summary).wrap_err("Failed to serialise the summary")?
    );
    session.save("summary.json", summary);

    session.exit();

    Ok(())
}
