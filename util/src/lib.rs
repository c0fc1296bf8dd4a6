//! Utility library for the PID arm simulator
//!
//! Provides the ambient services shared by executables: sessions, logging,
//! parameter loading, archiving and scripting.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod archive;
pub mod host;
pub mod logger;
pub mod maths;
pub mod module;
pub mod params;
pub mod session;
pub mod script_interpreter;
pub mod time;
