//! # Messages
//!
//! Everything the host loop delivers to the controller is a `Msg`.
//! Terminal input arrives as `Key`/`Mouse`/`Paste`/`Resize`, screens talk to
//! each other through `App(M)`, and navigation requests travel as `Nav`.
//!
//! ```text
//! host loop ──Msg──▶ Controller ──(forward)──▶ top Screen
//!     ▲                  │
//!     └────Command───────┘
//! ```

use std::fmt;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Size;

use super::error::Failure;
use super::screen::Screen;

/// A message delivered by the host loop.
///
/// `M` is the application's own message type; use `()` if screens never
/// exchange custom messages.
pub enum Msg<M> {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    /// Current viewport size. Sent at startup, on terminal resize, and in
    /// answer to `Command::WindowSize`.
    Resize(Size),
    /// Sent to the new top screen after the screen above it was closed.
    /// Not sent on replace.
    Closed,
    App(M),
    Nav(Navigation<M>),
}

impl<M: fmt::Debug> fmt::Debug for Msg<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Msg::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Msg::Mouse(mouse) => f.debug_tuple("Mouse").field(mouse).finish(),
            Msg::Paste(data) => f.debug_tuple("Paste").field(&data.len()).finish(),
            Msg::Resize(size) => f.debug_tuple("Resize").field(size).finish(),
            Msg::Closed => f.write_str("Closed"),
            Msg::App(msg) => f.debug_tuple("App").field(msg).finish(),
            Msg::Nav(nav) => f.debug_tuple("Nav").field(nav).finish(),
        }
    }
}

/// An internal navigation event.
///
/// Opaque on purpose: build one with [`open`](super::open),
/// [`close`](super::close), [`replace`](super::replace),
/// [`replace_all`](super::replace_all) or [`fail`](super::fail).
pub struct Navigation<M> {
    pub(crate) kind: NavKind<M>,
}

pub(crate) enum NavKind<M> {
    Open(Option<Box<dyn Screen<M>>>),
    Close { notify: bool },
    CloseAll,
    Fail(Failure),
}

impl<M> Navigation<M> {
    pub(crate) fn open(screen: Option<Box<dyn Screen<M>>>) -> Self {
        Self {
            kind: NavKind::Open(screen),
        }
    }

    pub(crate) fn close(notify: bool) -> Self {
        Self {
            kind: NavKind::Close { notify },
        }
    }

    pub(crate) fn close_all() -> Self {
        Self {
            kind: NavKind::CloseAll,
        }
    }

    pub(crate) fn fail(err: Failure) -> Self {
        Self {
            kind: NavKind::Fail(err),
        }
    }
}

impl<M> fmt::Debug for Navigation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NavKind::Open(Some(_)) => f.write_str("Open(..)"),
            NavKind::Open(None) => f.write_str("Open(None)"),
            NavKind::Close { notify } => f.debug_struct("Close").field("notify", notify).finish(),
            NavKind::CloseAll => f.write_str("CloseAll"),
            NavKind::Fail(err) => f.debug_tuple("Fail").field(&err.to_string()).finish(),
        }
    }
}

impl<M> From<Navigation<M>> for Msg<M> {
    fn from(nav: Navigation<M>) -> Self {
        Msg::Nav(nav)
    }
}
