//! Threaded effect driver for live hosts.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cmd::{Cmd, Model, TickEvent};

/// Executes a model's commands against real threads and real time.
///
/// The host owns the loop: it feeds external input via [`dispatch`] and calls
/// [`poll`] regularly to collect finished task messages and fire due ticks.
/// Every `update` runs on the host thread; task threads only produce a
/// message and exit.
///
/// [`dispatch`]: Driver::dispatch
/// [`poll`]: Driver::poll
pub struct Driver<M: Model> {
    model: M,
    task_sender: mpsc::Sender<M::Message>,
    task_receiver: mpsc::Receiver<M::Message>,
    task_handles: Vec<JoinHandle<()>>,
    /// Deadline of the pending one-shot tick, if any.
    tick_deadline: Option<Instant>,
    running: bool,
}

impl<M: Model> Driver<M> {
    /// Create a driver and run the model's `init` commands.
    pub fn new(mut model: M) -> Self {
        let (task_sender, task_receiver) = mpsc::channel();
        let init_cmd = model.init();
        let mut driver = Self {
            model,
            task_sender,
            task_receiver,
            task_handles: Vec::new(),
            tick_deadline: None,
            running: true,
        };
        driver.execute_cmd(init_cmd);
        driver
    }

    /// Feed one message through `update` and execute the resulting commands.
    pub fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Collect finished task messages and fire a due tick.
    ///
    /// Call this once per host loop iteration.
    pub fn poll(&mut self) {
        while let Ok(msg) = self.task_receiver.try_recv() {
            self.dispatch(msg);
        }
        if let Some(deadline) = self.tick_deadline
            && Instant::now() >= deadline
        {
            self.tick_deadline = None;
            self.dispatch(TickEvent.into());
        }
        self.reap_finished_tasks();
    }

    /// How long the host may sleep before the next scheduled wakeup.
    ///
    /// `None` when no tick is pending; the host should then block on input.
    #[must_use]
    pub fn time_to_next_tick(&self) -> Option<Duration> {
        self.tick_deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Whether the model has requested quit.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Borrow the model (for rendering).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutably borrow the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(duration) => {
                self.tick_deadline = Some(Instant::now() + duration);
            }
            Cmd::Task(f) => {
                let sender = self.task_sender.clone();
                let handle = std::thread::spawn(move || {
                    let msg = f();
                    // The driver may already be gone on shutdown.
                    let _ = sender.send(msg);
                });
                self.task_handles.push(handle);
            }
        }
    }

    fn reap_finished_tasks(&mut self) {
        if self.task_handles.is_empty() {
            return;
        }
        let mut remaining = Vec::with_capacity(self.task_handles.len());
        for handle in self.task_handles.drain(..) {
            if handle.is_finished() {
                if let Err(payload) = handle.join() {
                    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
                        (*s).to_owned()
                    } else if let Some(s) = payload.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic payload".to_owned()
                    };
                    debug!("background task panicked: {msg}");
                }
            } else {
                remaining.push(handle);
            }
        }
        self.task_handles = remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Msg {
        Tick,
        Add(u32),
        SpawnAdd(u32),
        Quit,
    }

    impl From<TickEvent> for Msg {
        fn from(_: TickEvent) -> Self {
            Self::Tick
        }
    }

    #[derive(Default)]
    struct Counter {
        value: u32,
        ticks: u32,
    }

    impl Model for Counter {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Tick => {
                    self.ticks += 1;
                    Cmd::none()
                }
                Msg::Add(n) => {
                    self.value += n;
                    Cmd::none()
                }
                Msg::SpawnAdd(n) => Cmd::task(move || Msg::Add(n)),
                Msg::Quit => Cmd::quit(),
            }
        }
    }

    #[test]
    fn dispatch_updates_model() {
        let mut driver = Driver::new(Counter::default());
        driver.dispatch(Msg::Add(3));
        assert_eq!(driver.model().value, 3);
    }

    #[test]
    fn task_result_arrives_via_poll() {
        let mut driver = Driver::new(Counter::default());
        driver.dispatch(Msg::SpawnAdd(7));
        let deadline = Instant::now() + Duration::from_secs(2);
        while driver.model().value == 0 && Instant::now() < deadline {
            driver.poll();
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(driver.model().value, 7);
    }

    #[test]
    fn tick_fires_once_after_deadline() {
        let mut driver = Driver::new(Counter::default());
        driver.execute_cmd(Cmd::tick(Duration::from_millis(5)));
        assert!(driver.time_to_next_tick().is_some());
        std::thread::sleep(Duration::from_millis(10));
        driver.poll();
        assert_eq!(driver.model().ticks, 1);
        // One-shot: no further ticks without re-arming.
        driver.poll();
        assert_eq!(driver.model().ticks, 1);
        assert!(driver.time_to_next_tick().is_none());
    }

    #[test]
    fn quit_stops_the_driver() {
        let mut driver = Driver::new(Counter::default());
        driver.dispatch(Msg::Quit);
        assert!(!driver.is_running());
    }
}
