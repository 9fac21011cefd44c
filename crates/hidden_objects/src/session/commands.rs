//! Outbound commands and sinks for observing a running session.
//!
//! The [`crate::session::SessionController`] never renders anything itself; it
//! tells the host what to show by sending [`SessionCommand`]s to a
//! [`CommandSink`]. Objects are addressed by [`ObjectId`].
use crate::scene::ObjectId;

/// Side effects requested from the render/input collaborator.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// A target was found; show it as discovered.
    MarkFound(ObjectId),
    /// Show the hint visual above an unfound target.
    ShowHint(ObjectId),
    /// Hide the hint visual of a target.
    HideHint(ObjectId),
    /// A decoy was clicked; play the "wrong object" wobble.
    DecoyFeedback(ObjectId),
    /// Low-time warning flash.
    FlashWarning,
    /// Countdown changed.
    TimeChanged { time_left: u32 },
    /// Discovery progress changed.
    ProgressChanged { found: usize, total: usize },
    /// Show the end-of-round banner.
    ShowEndMessage(String),
    /// Hide the banner again.
    HideMessage,
    /// The round is over; return to the menu.
    TransitionToMenu,
}

/// Coarse classification of [`SessionCommand`]s, for filtering sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCommandKind {
    MarkFound,
    ShowHint,
    HideHint,
    DecoyFeedback,
    FlashWarning,
    TimeChanged,
    ProgressChanged,
    ShowEndMessage,
    HideMessage,
    TransitionToMenu,
}

impl SessionCommand {
    pub fn kind(&self) -> SessionCommandKind {
        match self {
            SessionCommand::MarkFound(_) => SessionCommandKind::MarkFound,
            SessionCommand::ShowHint(_) => SessionCommandKind::ShowHint,
            SessionCommand::HideHint(_) => SessionCommandKind::HideHint,
            SessionCommand::DecoyFeedback(_) => SessionCommandKind::DecoyFeedback,
            SessionCommand::FlashWarning => SessionCommandKind::FlashWarning,
            SessionCommand::TimeChanged { .. } => SessionCommandKind::TimeChanged,
            SessionCommand::ProgressChanged { .. } => SessionCommandKind::ProgressChanged,
            SessionCommand::ShowEndMessage(_) => SessionCommandKind::ShowEndMessage,
            SessionCommand::HideMessage => SessionCommandKind::HideMessage,
            SessionCommand::TransitionToMenu => SessionCommandKind::TransitionToMenu,
        }
    }
}

/// A generic sink that accepts [`SessionCommand`]s.
pub trait CommandSink {
    fn send(&mut self, command: SessionCommand);

    /// Whether the sink cares about commands of `kind`. Senders may skip
    /// building commands the sink does not want.
    fn wants(&self, _kind: SessionCommandKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, commands: I)
    where
        Self: Sized,
        I: IntoIterator<Item = SessionCommand>,
    {
        for c in commands {
            self.send(c);
        }
    }
}

/// A no-op sink.
impl CommandSink for () {
    #[inline]
    fn send(&mut self, _command: SessionCommand) {}

    #[inline]
    fn wants(&self, _kind: SessionCommandKind) -> bool {
        false
    }
}

/// A sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SessionCommand),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SessionCommand),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> CommandSink for FnSink<F>
where
    F: FnMut(SessionCommand),
{
    #[inline]
    fn send(&mut self, command: SessionCommand) {
        (self.f)(command);
    }
}

/// A sink that collects all commands in a `Vec`.
#[derive(Default, Debug)]
pub struct VecSink {
    commands: Vec<SessionCommand>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn into_inner(self) -> Vec<SessionCommand> {
        self.commands
    }

    pub fn as_slice(&self) -> &[SessionCommand] {
        &self.commands
    }

    /// Remove and return everything collected so far.
    pub fn drain(&mut self) -> Vec<SessionCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, kind: SessionCommandKind) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSink for VecSink {
    #[inline]
    fn send(&mut self, command: SessionCommand) {
        self.commands.push(command);
    }
}

/// Fan-out sink that forwards each command to all contained sinks.
pub struct MultiSink<S: CommandSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: CommandSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: CommandSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CommandSink> CommandSink for MultiSink<S> {
    fn send(&mut self, command: SessionCommand) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            if sink.wants(command.kind()) {
                sink.send(command.clone());
            }
        }
        if last.wants(command.kind()) {
            last.send(command);
        }
    }

    fn wants(&self, kind: SessionCommandKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
