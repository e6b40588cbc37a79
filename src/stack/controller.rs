//! # Stack Controller
//!
//! Owns an ordered stack of screens. Only the top screen receives messages
//! and only the top screen is rendered.
//!
//! ```text
//! Controller
//! ├── screens: Vec<Box<dyn Screen<M>>>   // tail = top
//! └── err: Option<Failure>               // set once by `fail`, final
//! ```
//!
//! Screens never touch the stack directly. They return navigation commands
//! ([`open`], [`close`], [`replace`], [`replace_all`], [`fail`]) from their
//! update, the host loop delivers the resulting message back, and the
//! controller applies it on that later cycle.
//!
//! Edge interactions are no-ops, not errors: closing an empty stack or
//! opening an absent screen does nothing.

use log::{debug, info};

use super::command::Command;
use super::error::{Failure, StackError};
use super::msg::{Msg, NavKind, Navigation};
use super::screen::{Outcome, Screen};

pub struct Controller<M> {
    screens: Vec<Box<dyn Screen<M>>>,
    err: Option<Failure>,
}

impl<M> Controller<M> {
    /// Creates a controller with `screen` as its only entry.
    ///
    /// Returns `StackError::NilModel` if the screen is absent.
    pub fn new(screen: Option<Box<dyn Screen<M>>>) -> Result<Self, StackError> {
        match screen {
            Some(screen) => Ok(Self {
                screens: vec![screen],
                err: None,
            }),
            None => Err(StackError::NilModel),
        }
    }

    pub fn with_screen(screen: impl Screen<M> + 'static) -> Self {
        Self {
            screens: vec![Box::new(screen)],
            err: None,
        }
    }

    /// Initializes the top screen, if there is one.
    pub fn init(&mut self) -> Option<Command<M>> {
        self.top_mut().and_then(|top| top.init())
    }

    /// Applies navigation messages to the stack and forwards everything
    /// else to the top screen.
    pub fn update(&mut self, msg: Msg<M>) -> Option<Command<M>> {
        if self.err.is_some() {
            return None;
        }

        match msg {
            Msg::Nav(Navigation { kind }) => self.navigate(kind),
            msg => {
                let top = self.top_mut()?;
                let Outcome {
                    replacement,
                    command,
                } = top.update(msg);
                if let Some(screen) = replacement {
                    debug!("Top screen replaced itself (depth={})", self.screens.len());
                    if let Some(slot) = self.screens.last_mut() {
                        *slot = screen;
                    }
                }
                command
            }
        }
    }

    /// Renders the top screen, or an empty string if the stack is empty.
    pub fn view(&self) -> String {
        self.top().map(|top| top.view()).unwrap_or_default()
    }

    /// The error recorded by `fail`, if any.
    pub fn err(&self) -> Option<&Failure> {
        self.err.as_ref()
    }

    pub fn into_err(self) -> Option<Failure> {
        self.err
    }

    /// Number of screens on the stack.
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    fn navigate(&mut self, kind: NavKind<M>) -> Option<Command<M>> {
        match kind {
            NavKind::Open(Some(screen)) => {
                self.push(screen);
                debug!("Opened screen (depth={})", self.screens.len());
                let init = self.top_mut().and_then(|top| top.init());
                Command::batch([init, Some(Command::WindowSize)])
            }
            NavKind::Open(None) => {
                debug!("Ignoring open of an absent screen");
                None
            }
            NavKind::Close { notify } => {
                self.pop();
                debug!("Closed screen (depth={}, notify={})", self.screens.len(), notify);
                if self.screens.is_empty() {
                    return None;
                }
                if notify {
                    Command::batch([Some(Command::msg(Msg::Closed)), Some(Command::WindowSize)])
                } else {
                    Some(Command::WindowSize)
                }
            }
            NavKind::CloseAll => {
                debug!("Closing all {} screens", self.screens.len());
                self.screens.clear();
                None
            }
            NavKind::Fail(err) => {
                info!("Navigation failed, clearing {} screens: {}", self.screens.len(), err);
                self.screens.clear();
                self.err = Some(err);
                Some(Command::Quit)
            }
        }
    }

    fn push(&mut self, screen: Box<dyn Screen<M>>) {
        self.screens.push(screen);
    }

    fn pop(&mut self) {
        self.screens.pop();
    }

    fn top(&self) -> Option<&dyn Screen<M>> {
        self.screens.last().map(|screen| &**screen)
    }

    fn top_mut(&mut self) -> Option<&mut Box<dyn Screen<M>>> {
        self.screens.last_mut()
    }
}

impl<M: Send> Screen<M> for Controller<M> {
    fn init(&mut self) -> Option<Command<M>> {
        Controller::init(self)
    }

    fn update(&mut self, msg: Msg<M>) -> Outcome<M> {
        Controller::update(self, msg).into()
    }

    fn view(&self) -> String {
        Controller::view(self)
    }
}

// ============================================================================
// Navigation Commands
// ============================================================================

/// Pushes `screen` onto the stack. It becomes the screen receiving updates
/// and rendering, and is initialized right away.
pub fn open<M>(screen: impl Screen<M> + 'static) -> Command<M> {
    open_boxed(Some(Box::new(screen)))
}

/// Like [`open`] for an already boxed, possibly absent screen. Opening
/// `None` is a no-op.
pub fn open_boxed<M>(screen: Option<Box<dyn Screen<M>>>) -> Command<M> {
    Command::msg(Navigation::open(screen))
}

/// Closes the top screen. The screen below it receives `Msg::Closed`.
pub fn close<M>() -> Command<M> {
    Command::msg(Navigation::close(true))
}

/// Closes the top screen and opens `screen` in its place. The screen below
/// is not notified.
pub fn replace<M>(screen: impl Screen<M> + 'static) -> Command<M> {
    Command::Sequence(vec![Command::msg(Navigation::close(false)), open(screen)])
}

/// Closes every screen on the stack, then opens `screen`. No screen is
/// notified.
pub fn replace_all<M>(screen: impl Screen<M> + 'static) -> Command<M> {
    Command::Sequence(vec![Command::msg(Navigation::close_all()), open(screen)])
}

/// Records `err` on the controller, clears the stack and quits.
pub fn fail<M>(err: impl Into<Failure>) -> Command<M> {
    Command::msg(Navigation::fail(err.into()))
}
