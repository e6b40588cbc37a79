//! # Commands
//!
//! A `Command` is a deferred action returned from an update step. The
//! controller never executes or inspects commands: it only builds them (for
//! navigation) and passes its screens' commands through. The host loop
//! decides when and how to run them.
//!
//! ```text
//! Batch([a, b])      a and b are independent, no ordering guarantee
//! Sequence([a, b])   a is fully delivered before b starts
//! ```

use std::fmt;

use super::msg::Msg;

/// Background work run by the host. Its result, if any, is fed back as a message.
pub type Task<M> = Box<dyn FnOnce() -> Option<Msg<M>> + Send>;

pub enum Command<M> {
    /// Deliver a message on the next cycle.
    Msg(Msg<M>),
    Batch(Vec<Command<M>>),
    Sequence(Vec<Command<M>>),
    /// Run a task off the UI thread and deliver its result.
    Perform(Task<M>),
    /// Ask the host for the current viewport size (answered with `Msg::Resize`).
    WindowSize,
    /// Terminate the host loop.
    Quit,
}

impl<M> Command<M> {
    /// Wraps a static message as a command.
    pub fn msg(msg: impl Into<Msg<M>>) -> Self {
        Command::Msg(msg.into())
    }

    pub fn perform<F>(task: F) -> Self
    where
        F: FnOnce() -> Option<Msg<M>> + Send + 'static,
    {
        Command::Perform(Box::new(task))
    }

    /// Combines commands to run concurrently.
    ///
    /// Absent commands are dropped; a single remaining command is returned
    /// as-is and an empty batch is `None`.
    pub fn batch(commands: impl IntoIterator<Item = Option<Command<M>>>) -> Option<Self> {
        collapse(commands, Command::Batch)
    }

    /// Combines commands to run one after another, in order.
    pub fn sequence(commands: impl IntoIterator<Item = Option<Command<M>>>) -> Option<Self> {
        collapse(commands, Command::Sequence)
    }

    /// Flattens the command tree into the effects a host has to perform.
    ///
    /// Tasks nested in a sequence are marked inline so the host runs them
    /// before delivering anything queued after them.
    pub(crate) fn into_effects(self, ordered: bool, out: &mut Vec<Effect<M>>) {
        match self {
            Command::Msg(msg) => out.push(Effect::Deliver(msg)),
            Command::Batch(commands) => {
                for command in commands {
                    command.into_effects(ordered, out);
                }
            }
            Command::Sequence(commands) => {
                for command in commands {
                    command.into_effects(true, out);
                }
            }
            Command::Perform(task) => out.push(Effect::Run {
                task,
                inline: ordered,
            }),
            Command::WindowSize => out.push(Effect::WindowSize),
            Command::Quit => out.push(Effect::Quit),
        }
    }
}

fn collapse<M>(
    commands: impl IntoIterator<Item = Option<Command<M>>>,
    wrap: fn(Vec<Command<M>>) -> Command<M>,
) -> Option<Command<M>> {
    let mut commands: Vec<Command<M>> = commands.into_iter().flatten().collect();
    match commands.len() {
        0 => None,
        1 => commands.pop(),
        _ => Some(wrap(commands)),
    }
}

/// A single host-side action produced by flattening a `Command`.
pub(crate) enum Effect<M> {
    Deliver(Msg<M>),
    Run { task: Task<M>, inline: bool },
    WindowSize,
    Quit,
}

impl<M: fmt::Debug> fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Msg(msg) => f.debug_tuple("Msg").field(msg).finish(),
            Command::Batch(commands) => f.debug_tuple("Batch").field(commands).finish(),
            Command::Sequence(commands) => f.debug_tuple("Sequence").field(commands).finish(),
            Command::Perform(_) => f.write_str("Perform(..)"),
            Command::WindowSize => f.write_str("WindowSize"),
            Command::Quit => f.write_str("Quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(n: u8) -> Option<Command<u8>> {
        Some(Command::msg(Msg::App(n)))
    }

    #[test]
    fn test_batch_of_nothing_is_none() {
        assert!(Command::<u8>::batch([None, None]).is_none());
        assert!(Command::<u8>::sequence(std::iter::empty()).is_none());
    }

    #[test]
    fn test_batch_collapses_single_command() {
        let cmd = Command::batch([None, Some(Command::<u8>::WindowSize)]);
        assert!(matches!(cmd, Some(Command::WindowSize)));
    }

    #[test]
    fn test_batch_keeps_order_of_present_commands() {
        let cmd = Command::batch([app(1), None, app(2)]);
        match cmd {
            Some(Command::Batch(commands)) => {
                assert_eq!(commands.len(), 2);
                assert!(matches!(commands[0], Command::Msg(Msg::App(1))));
                assert!(matches!(commands[1], Command::Msg(Msg::App(2))));
            }
            other => panic!("expected batch, got {:?}", other),
        }
    }

    #[test]
    fn test_effects_mark_tasks_in_sequence_inline() {
        let cmd = Command::Batch(vec![
            Command::perform(|| None),
            Command::Sequence(vec![Command::perform(|| Some(Msg::App(7u8))), Command::Quit]),
        ]);
        let mut effects = Vec::new();
        cmd.into_effects(false, &mut effects);

        assert_eq!(effects.len(), 3);
        assert!(matches!(effects[0], Effect::Run { inline: false, .. }));
        assert!(matches!(effects[1], Effect::Run { inline: true, .. }));
        assert!(matches!(effects[2], Effect::Quit));
    }

    #[test]
    fn test_debug_hides_task_body() {
        let cmd: Command<u8> = Command::perform(|| None);
        assert_eq!(format!("{:?}", cmd), "Perform(..)");
    }
}
