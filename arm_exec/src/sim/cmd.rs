//! Tuning commands accepted by the simulation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::SimError;
use crate::pid_ctrl::Gains;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A command changing the simulation's tuning, applied at the start of a
/// cycle.
///
/// In a script these are written as JSON, for example:
///
/// ```text
/// 0.0: {"SetGains": {"k_p": 0.5, "k_i": 0.0, "k_d": 2.5}};
/// 2.0: {"SetTarget": {"target_deg": -45.0}};
/// 4.0: "ResetIntegrator";
/// 6.0: {"SetNoise": {"enabled": true}};
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimCmd {
    /// Set the controller gains.
    SetGains(Gains),

    /// Set the target angle.
    SetTarget { target_deg: f64 },

    /// Clear the controller's integrator history.
    ResetIntegrator,

    /// Turn the controller's sensor noise on or off.
    SetNoise { enabled: bool },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimCmd {
    /// Check that the command's values are usable.
    pub fn validate(&self) -> Result<(), SimError> {
        match self {
            SimCmd::SetGains(g) if !g.is_finite() => Err(SimError::NonFiniteGains(*g)),
            SimCmd::SetTarget { target_deg } if !target_deg.is_finite() => {
                Err(SimError::NonFiniteTarget(*target_deg))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cmd_json() {
        let cmd: SimCmd =
            serde_json::from_str(r#"{"SetGains": {"k_p": 0.5, "k_i": 0.001, "k_d": 2.5}}"#).unwrap();
        assert_eq!(cmd, SimCmd::SetGains(Gains::new(0.5, 0.001, 2.5)));

        let cmd: SimCmd = serde_json::from_str(r#"{"SetTarget": {"target_deg": -45.0}}"#).unwrap();
        assert_eq!(cmd, SimCmd::SetTarget { target_deg: -45.0 });

        let cmd: SimCmd = serde_json::from_str(r#""ResetIntegrator""#).unwrap();
        assert_eq!(cmd, SimCmd::ResetIntegrator);

        let cmd: SimCmd = serde_json::from_str(r#"{"SetNoise": {"enabled": true}}"#).unwrap();
        assert_eq!(cmd, SimCmd::SetNoise { enabled: true });

        assert!(serde_json::from_str::<SimCmd>(r#""Explode""#).is_err());
    }

    #[test]
    fn test_cmd_validate() {
        assert!(SimCmd::SetTarget { target_deg: 720.0 }.validate().is_ok());
        assert!(SimCmd::ResetIntegrator.validate().is_ok());

        assert!(matches!(
            SimCmd::SetTarget { target_deg: f64::NAN }.validate(),
            Err(SimError::NonFiniteTarget(_))
        ));
        assert!(matches!(
            SimCmd::SetGains(Gains::new(0.1, f64::INFINITY, 0.0)).validate(),
            Err(SimError::NonFiniteGains(_))
        ));
    }

    #[test]
    fn test_demo_script() {
        use util::script_interpreter::{PendingCmds, ScriptInterpreter};

        let mut interp: ScriptInterpreter<SimCmd> = ScriptInterpreter::from_script_str(
            include_str!("../../../scripts/tuning_demo.script")
        ).unwrap();

        assert_eq!(interp.get_num_cmds(), 7);
        assert_eq!(interp.get_duration(), 50.0);

        assert_eq!(
            interp.get_pending(0.0),
            PendingCmds::Some(vec![
                SimCmd::SetGains(Gains::new(0.4, 0.0, 0.0)),
                SimCmd::SetTarget { target_deg: 45.0 },
            ])
        );
    }
}
