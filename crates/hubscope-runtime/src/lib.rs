#![forbid(unsafe_code)]

//! Minimal Elm-style message runtime.
//!
//! Applications implement [`Model`]: a state struct with a single `update`
//! transition that consumes messages and returns [`Cmd`] values describing
//! side effects. The [`Driver`] executes those effects for a live host
//! (background task threads, tick scheduling); the [`Simulator`] executes
//! them synchronously for deterministic tests.
//!
//! All state mutation happens on the thread that owns the driver. Background
//! tasks communicate only by sending a message back, so races between
//! overlapping effects are logical (message ordering), never memory races.

pub mod cmd;
pub mod driver;
pub mod simulator;

pub use cmd::{Cmd, Model, TickEvent};
pub use driver::Driver;
pub use simulator::{CmdRecord, Simulator};
