//! # Headless Test Host
//!
//! Drives a [`Controller`] exactly like the terminal host loop does, minus
//! the terminal. Everything is synchronous: sending a message delivers it
//! and every message it causes, until the queue is empty or a `Quit` is seen.
//! A screen that keeps answering itself is cut off after
//! [`MAX_SETTLE_MESSAGES`] deliveries; [`TestProgram::hit_message_cap`]
//! reports it.
//!
//! ```rust,ignore
//! let mut tp = TestProgram::new(Controller::with_screen(Home::new()));
//! tp.exec(open(Details::new()));
//! assert_eq!(tp.view(), "details");
//! ```

use std::collections::VecDeque;

use log::warn;
use ratatui::layout::Size;

use crate::stack::{Command, Controller, Effect, Msg};

/// Viewport reported to screens unless a size is given.
pub const DEFAULT_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Most messages a single `send`/`exec` delivers before giving up.
pub const MAX_SETTLE_MESSAGES: usize = 10_000;

pub struct TestProgram<M> {
    controller: Controller<M>,
    queue: VecDeque<Msg<M>>,
    size: Size,
    finished: bool,
    capped: bool,
}

impl<M> TestProgram<M> {
    pub fn new(controller: Controller<M>) -> Self {
        Self::with_size(controller, DEFAULT_SIZE)
    }

    /// Starts the program: initializes the controller and delivers the
    /// initial viewport size.
    pub fn with_size(mut controller: Controller<M>, size: Size) -> Self {
        let init = controller.init();
        let mut program = Self {
            controller,
            queue: VecDeque::new(),
            size,
            finished: false,
            capped: false,
        };
        program.dispatch(init);
        program.queue.push_back(Msg::Resize(size));
        program.settle();
        program
    }

    /// Delivers a message and everything it causes.
    pub fn send(&mut self, msg: impl Into<Msg<M>>) {
        self.queue.push_back(msg.into());
        self.settle();
    }

    /// Executes a command the way the host loop would, then settles.
    pub fn exec(&mut self, command: Command<M>) {
        self.dispatch(Some(command));
        self.settle();
    }

    pub fn view(&self) -> String {
        self.controller.view()
    }

    /// True once a `Quit` command was executed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True if the last `send`/`exec` stopped at [`MAX_SETTLE_MESSAGES`]
    /// with messages still queued.
    pub fn hit_message_cap(&self) -> bool {
        self.capped
    }

    /// Messages still waiting for delivery.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn controller(&self) -> &Controller<M> {
        &self.controller
    }

    pub fn into_controller(self) -> Controller<M> {
        self.controller
    }

    fn dispatch(&mut self, command: Option<Command<M>>) {
        let Some(command) = command else {
            return;
        };
        let mut effects = Vec::new();
        command.into_effects(false, &mut effects);
        for effect in effects {
            match effect {
                Effect::Deliver(msg) => self.queue.push_back(msg),
                Effect::Run { task, .. } => {
                    if let Some(msg) = task() {
                        self.queue.push_back(msg);
                    }
                }
                Effect::WindowSize => self.queue.push_back(Msg::Resize(self.size)),
                Effect::Quit => self.finished = true,
            }
        }
    }

    fn settle(&mut self) {
        self.capped = false;
        let mut delivered = 0;
        while !self.finished {
            if delivered == MAX_SETTLE_MESSAGES {
                warn!(
                    "Stopped settling after {} messages, {} still queued",
                    delivered,
                    self.queue.len()
                );
                self.capped = true;
                break;
            }
            let Some(msg) = self.queue.pop_front() else {
                break;
            };
            let command = self.controller.update(msg);
            self.dispatch(command);
            delivered += 1;
        }
    }
}
