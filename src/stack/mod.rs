//! # Navigation Stack
//!
//! The controller and the vocabulary it speaks. Nothing in here touches the
//! terminal: the controller is a pure state-transition function over
//! `(stack, message)`, and every side effect leaves as a [`Command`].
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   Msg ────────▶ │        Controller        │ ────▶ Option<Command>
//!                 │  ┌────────────────────┐  │
//!                 │  │ top   (receives)   │  │
//!                 │  ├────────────────────┤  │
//!                 │  │ ...   (dormant)    │  │
//!                 │  ├────────────────────┤  │
//!                 │  │ root  (dormant)    │  │
//!                 │  └────────────────────┘  │
//!                 └──────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `controller`: the `Controller` and the navigation commands
//! - `screen`: the `Screen` trait every stack entry implements
//! - `msg`: the `Msg` enum the host loop delivers
//! - `command`: the `Command` enum returned to the host loop
//! - `error`: construction errors and the terminal `Failure` type

mod command;
mod controller;
mod error;
mod msg;
mod screen;

pub use command::{Command, Task};
pub use controller::{Controller, close, fail, open, open_boxed, replace, replace_all};
pub use error::{Failure, StackError};
pub use msg::{Msg, Navigation};
pub use screen::{Outcome, Screen};

pub(crate) use command::Effect;
