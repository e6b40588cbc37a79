use std::time::Duration;

use crossterm::event::KeyCode;
use log::debug;
use navstack::stack::close;
use navstack::{Command, Msg, Outcome, Screen};

use super::detail::Detail;
use super::{DemoMsg, key_code};

/// Fetches its content in the background, then swaps itself for a `Detail`.
pub struct Loader {
    delay: Duration,
}

impl Loader {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Screen<DemoMsg> for Loader {
    fn init(&mut self) -> Option<Command<DemoMsg>> {
        let delay = self.delay;
        Some(Command::perform(move || {
            std::thread::sleep(delay);
            let lines = (1..=3).map(|i| format!("record {i}")).collect();
            Some(Msg::App(DemoMsg::Loaded(lines)))
        }))
    }

    fn update(&mut self, msg: Msg<DemoMsg>) -> Outcome<DemoMsg> {
        if let Msg::App(DemoMsg::Loaded(lines)) = msg {
            debug!("Loader received {} lines", lines.len());
            return Outcome::replace(Detail::with_lines("Loaded", 1, lines));
        }
        match key_code(&msg) {
            Some(KeyCode::Esc) => close().into(),
            _ => Outcome::none(),
        }
    }

    fn view(&self) -> String {
        "Loading...\nEsc cancel".to_string()
    }
}
