use super::command::Command;
use super::msg::Msg;

/// An independently updatable, renderable unit managed by the stack.
///
/// The controller only ever sees screens through this trait; it never knows
/// their concrete types.
///
/// Screens are `Send` because navigation messages carrying them may be
/// produced by background tasks.
pub trait Screen<M>: Send {
    /// Called once when the screen becomes part of the stack.
    fn init(&mut self) -> Option<Command<M>> {
        None
    }

    /// Handle a message. The outcome may carry a follow-up command and a
    /// replacement for this screen.
    fn update(&mut self, msg: Msg<M>) -> Outcome<M>;

    /// Render the screen as text.
    fn view(&self) -> String;
}

/// Result of a screen update.
///
/// ```rust,ignore
/// fn update(&mut self, msg: Msg<()>) -> Outcome<()> {
///     match msg {
///         Msg::Key(key) if key.code == KeyCode::Esc => close().into(),
///         Msg::App(()) => Outcome::replace(Finished::new()),
///         _ => Outcome::none(),
///     }
/// }
/// ```
pub struct Outcome<M> {
    pub(crate) replacement: Option<Box<dyn Screen<M>>>,
    pub(crate) command: Option<Command<M>>,
}

impl<M> Outcome<M> {
    pub fn none() -> Self {
        Self {
            replacement: None,
            command: None,
        }
    }

    pub fn command(command: Command<M>) -> Self {
        Self {
            replacement: None,
            command: Some(command),
        }
    }

    /// Swap this screen for `screen` in its stack slot.
    pub fn replace(screen: impl Screen<M> + 'static) -> Self {
        Self {
            replacement: Some(Box::new(screen)),
            command: None,
        }
    }

    pub fn with_command(mut self, command: Command<M>) -> Self {
        self.command = Some(command);
        self
    }
}

impl<M> From<Command<M>> for Outcome<M> {
    fn from(command: Command<M>) -> Self {
        Outcome::command(command)
    }
}

impl<M> From<Option<Command<M>>> for Outcome<M> {
    fn from(command: Option<Command<M>>) -> Self {
        Self {
            replacement: None,
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Recorder, effects};

    #[test]
    fn test_outcome_conversions_carry_command_only() {
        let outcome: Outcome<()> = Command::Quit.into();
        assert!(outcome.replacement.is_none());
        assert_eq!(effects(outcome.command), vec!["Quit"]);

        let outcome = Outcome::from(None::<Command<()>>);
        assert!(outcome.replacement.is_none());
        assert!(outcome.command.is_none());
    }

    #[test]
    fn test_replace_with_command() {
        let (recorder, _) = Recorder::new("next");
        let outcome = Outcome::replace(recorder).with_command(Command::Quit);
        assert_eq!(outcome.replacement.map(|s| s.view()), Some("next".to_string()));
        assert_eq!(effects(outcome.command), vec!["Quit"]);
    }
}
