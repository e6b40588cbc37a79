//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use crate::stack::{Command, Effect, Msg, Outcome, Screen};

/// Observable state of a [`Recorder`], shared with the test that created it.
#[derive(Debug, Default)]
pub struct RecorderState {
    pub view: String,
    pub init: bool,
    /// Every message the recorder received, in order.
    pub received: Vec<String>,
}

pub type RecorderHandle = Arc<Mutex<RecorderState>>;

/// A screen that records what happens to it.
///
/// `App(())` appends " updated" to the view, `Closed` appends " closed".
pub struct Recorder {
    state: RecorderHandle,
    init_command: Option<fn() -> Command<()>>,
}

impl Recorder {
    pub fn new(view: &str) -> (Self, RecorderHandle) {
        let state = Arc::new(Mutex::new(RecorderState {
            view: view.to_string(),
            ..Default::default()
        }));
        (
            Self {
                state: state.clone(),
                init_command: None,
            },
            state,
        )
    }

    /// A recorder whose `init` returns the given command.
    pub fn with_init(view: &str, init_command: fn() -> Command<()>) -> (Self, RecorderHandle) {
        let (mut recorder, state) = Self::new(view);
        recorder.init_command = Some(init_command);
        (recorder, state)
    }
}

impl Screen<()> for Recorder {
    fn init(&mut self) -> Option<Command<()>> {
        self.state.lock().unwrap().init = true;
        self.init_command.map(|build| build())
    }

    fn update(&mut self, msg: Msg<()>) -> Outcome<()> {
        let mut state = self.state.lock().unwrap();
        state.received.push(format!("{:?}", msg));
        match msg {
            Msg::App(()) => state.view.push_str(" updated"),
            Msg::Closed => state.view.push_str(" closed"),
            _ => {}
        }
        Outcome::none()
    }

    fn view(&self) -> String {
        self.state.lock().unwrap().view.clone()
    }
}

/// Flattens a command into its effects for assertions.
pub fn effects(command: Option<Command<()>>) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(command) = command {
        command.into_effects(false, &mut out);
    }
    out.iter()
        .map(|effect| match effect {
            Effect::Deliver(msg) => format!("{:?}", msg),
            Effect::Run { inline, .. } => format!("Run(inline={inline})"),
            Effect::WindowSize => "WindowSize".to_string(),
            Effect::Quit => "Quit".to_string(),
        })
        .collect()
}

/// A screen that answers every `App(())` with another `App(())`, forever.
pub struct Echo {
    count: Arc<Mutex<usize>>,
}

impl Echo {
    pub fn new() -> (Self, Arc<Mutex<usize>>) {
        let count = Arc::new(Mutex::new(0));
        (
            Self {
                count: count.clone(),
            },
            count,
        )
    }
}

impl Screen<()> for Echo {
    fn update(&mut self, msg: Msg<()>) -> Outcome<()> {
        match msg {
            Msg::App(()) => {
                *self.count.lock().unwrap() += 1;
                Command::msg(Msg::App(())).into()
            }
            _ => Outcome::none(),
        }
    }

    fn view(&self) -> String {
        format!("echo {}", self.count.lock().unwrap())
    }
}
