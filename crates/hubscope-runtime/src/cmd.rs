//! The [`Model`] trait and [`Cmd`] effect values.

use std::time::Duration;

/// Delivered to the model when a scheduled tick elapses.
///
/// Ticks are one-shot: the model re-arms with [`Cmd::tick`] if it still
/// needs a wakeup (e.g. while a debounce window is open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent;

/// Application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Must be convertible from [`TickEvent`] so the driver can deliver
    /// scheduled ticks, and `Send` so task threads can return one.
    type Message: From<TickEvent> + Send + 'static;

    /// Initialize the model with startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition. Returns commands for any side
    /// effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;
}

/// Side effects returned from `init()` and `update()`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Stop the driver loop.
    Quit,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into the model.
    Msg(M),
    /// Schedule a one-shot tick after a duration.
    ///
    /// A new tick replaces any pending one.
    Tick(Duration),
    /// Run a blocking operation on a background thread.
    ///
    /// The return value is sent back to the model as a message. There is no
    /// cancellation: a superseded task still completes and its message is
    /// delivered; the model decides whether to ignore it.
    Task(Box<dyn FnOnce() -> M + Send>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
            Self::Task(_) => write!(f, "Task"),
        }
    }
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a one-shot tick command.
    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    /// Create a background task command.
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(Box::new(f))
    }

    /// Create a batch of commands, flattening trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Tick(_) => "Tick",
            Self::Task(_) => "Task",
        }
    }

    /// Count the atomic commands in this command.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}
