//! Deterministic model simulator for testing.
//!
//! [`Simulator`] runs a [`Model`] without threads or a clock. `Cmd::Task`
//! closures execute synchronously on the caller's thread, and scheduled
//! ticks fire only when the test calls [`Simulator::fire_tick`]. This makes
//! ordering fully explicit: a test that wants out-of-order responses simply
//! sends the completion messages itself in the order under test.

use std::time::Duration;

use crate::cmd::{Cmd, Model, TickEvent};

/// Record of a command executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message fed back to the model.
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Tick scheduled.
    Tick(Duration),
    /// Background task executed synchronously.
    Task,
}

/// Deterministic simulator for [`Model`] testing.
pub struct Simulator<M: Model> {
    model: M,
    command_log: Vec<CmdRecord>,
    running: bool,
    pending_tick: Option<Duration>,
}

impl<M: Model> Simulator<M> {
    /// Create a simulator; the model is not initialized until [`init`].
    ///
    /// [`init`]: Simulator::init
    pub fn new(model: M) -> Self {
        Self {
            model,
            command_log: Vec::new(),
            running: true,
            pending_tick: None,
        }
    }

    /// Run `Model::init()` and execute the returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Dispatch a message through `update`, executing resulting commands.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Fire the pending tick, if one is scheduled.
    ///
    /// Returns `true` if a tick was delivered.
    pub fn fire_tick(&mut self) -> bool {
        if self.pending_tick.take().is_some() {
            self.send(TickEvent.into());
            true
        } else {
            false
        }
    }

    /// Fire pending ticks until none remain, up to `limit` rounds.
    ///
    /// Models re-arm ticks while work is outstanding; this drains that loop.
    pub fn settle(&mut self, limit: usize) {
        for _ in 0..limit {
            if !self.fire_tick() {
                break;
            }
        }
    }

    /// Borrow the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutably borrow the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether the simulated program is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The currently scheduled tick interval, if any.
    #[must_use]
    pub fn pending_tick(&self) -> Option<Duration> {
        self.pending_tick
    }

    /// Record of all executed commands.
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => self.command_log.push(CmdRecord::None),
            Cmd::Quit => {
                self.command_log.push(CmdRecord::Quit);
                self.running = false;
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                self.send(m);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.command_log.push(CmdRecord::Tick(duration));
                self.pending_tick = Some(duration);
            }
            Cmd::Task(f) => {
                self.command_log.push(CmdRecord::Task);
                let msg = f();
                self.send(msg);
            }
        }
    }
}
