//! # Demo Screens
//!
//! A small app showing the stack in action:
//!
//! ```text
//! Menu ──Enter──▶ Detail ──Enter──▶ Detail ...
//!   │                └──Esc──▶ (close, Menu gets Closed)
//!   ├──l──▶ Loader ──(background task)──▶ replaced by Detail
//!   ├──r──▶ replace(Menu)      ├──a──▶ replace_all(Menu)
//!   └──f──▶ fail               └──q──▶ quit
//! ```

mod detail;
mod loader;
mod menu;

pub use menu::Menu;

use crossterm::event::{KeyCode, KeyEvent};
use navstack::Msg;

/// Messages the demo screens exchange.
#[derive(Debug)]
pub enum DemoMsg {
    Loaded(Vec<String>),
}

/// The key code of a key message, if it is one.
fn key_code(msg: &Msg<DemoMsg>) -> Option<KeyCode> {
    match msg {
        Msg::Key(KeyEvent { code, .. }) => Some(*code),
        _ => None,
    }
}

#[cfg(test)]
fn press(code: KeyCode) -> Msg<DemoMsg> {
    Msg::Key(KeyEvent::new(code, crossterm::event::KeyModifiers::NONE))
}
