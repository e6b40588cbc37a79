//! navstack: a stack of screens for terminal apps.
//!
//! Only the top screen receives messages and renders. Screens navigate by
//! returning commands ([`stack::open`], [`stack::close`],
//! [`stack::replace`], [`stack::replace_all`], [`stack::fail`]) from their
//! update.

pub mod config;
pub mod logging;
pub mod stack;
pub mod testing;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use stack::{Command, Controller, Msg, Outcome, Screen};
