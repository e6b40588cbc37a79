//! # TUI Host
//!
//! The ratatui-specific layer. Owns the terminal, polls crossterm events,
//! feeds them to the [`Controller`] as messages, executes the commands it
//! returns, and draws the top screen's view.
//!
//! This is the only module that knows about the terminal. The controller
//! itself is host-agnostic; [`crate::testing::TestProgram`] drives it the
//! same way without one.
//!
//! ## Event Loop
//!
//! ```text
//! ┌─▶ drain background results ─▶ deliver pass snapshot ─▶ draw (if changed)
//! │                                                               │
//! └───────────────── poll terminal (tick_rate) ◀──────────────────┘
//! ```
//!
//! - `Perform` tasks run on the tokio blocking pool (or a plain thread when
//!   no runtime is present) and report back through an mpsc channel.
//!   Inside a `Sequence` they run inline so ordering holds.
//! - Ctrl+C ends the loop with [`ProgramError::Interrupted`] no matter what
//!   the screens do.

mod event;

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, stdout};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Size;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};

use crate::stack::{Command, Controller, Effect, Msg};
use crate::tui::event::{Input, poll_input, poll_input_immediate};

pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);

/// Host loop settings.
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// How long to wait for terminal input before checking background results.
    pub tick_rate: Duration,
    pub mouse_capture: bool,
    pub bracketed_paste: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            mouse_capture: true,
            bracketed_paste: true,
        }
    }
}

#[derive(Debug)]
pub enum ProgramError {
    /// Terminal I/O failed.
    Io(io::Error),
    /// The user pressed Ctrl+C.
    Interrupted,
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Io(e) => write!(f, "terminal I/O error: {e}"),
            ProgramError::Interrupted => write!(f, "program was interrupted"),
        }
    }
}

impl std::error::Error for ProgramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProgramError::Io(e) => Some(e),
            ProgramError::Interrupted => None,
        }
    }
}

impl From<io::Error> for ProgramError {
    fn from(e: io::Error) -> Self {
        ProgramError::Io(e)
    }
}

struct TerminalModeGuard {
    options: ProgramOptions,
}

impl TerminalModeGuard {
    fn new(options: &ProgramOptions) -> io::Result<Self> {
        if options.mouse_capture {
            execute!(stdout(), EnableMouseCapture)?;
        }
        if options.bracketed_paste {
            execute!(stdout(), EnableBracketedPaste)?;
        }
        info!(
            "Terminal modes enabled (mouse={}, bracketed paste={})",
            options.mouse_capture, options.bracketed_paste
        );
        Ok(Self {
            options: options.clone(),
        })
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        if self.options.mouse_capture {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        if self.options.bracketed_paste {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}

/// Runs a controller as the root of a terminal program.
pub struct Program<M> {
    controller: Controller<M>,
    options: ProgramOptions,
}

impl<M: Send + 'static> Program<M> {
    pub fn new(controller: Controller<M>) -> Self {
        Self::with_options(controller, ProgramOptions::default())
    }

    pub fn with_options(controller: Controller<M>, options: ProgramOptions) -> Self {
        Self {
            controller,
            options,
        }
    }

    /// Runs until a screen quits (or fails) or the user interrupts.
    ///
    /// Returns the final controller so a recorded failure can be inspected
    /// with [`Controller::err`].
    pub fn run(self) -> Result<Controller<M>, ProgramError> {
        let Program {
            mut controller,
            options,
        } = self;

        info!("Starting program (tick rate {:?})", options.tick_rate);
        let mut terminal = ratatui::init();
        let result = TerminalModeGuard::new(&options)
            .map_err(ProgramError::from)
            .and_then(|_guard| event_loop(&mut terminal, &mut controller, &options));
        ratatui::restore();

        match &result {
            Ok(()) => info!("Program finished (depth={})", controller.depth()),
            Err(e) => warn!("Program stopped: {}", e),
        }
        result.map(|()| controller)
    }
}

fn event_loop<M: Send + 'static>(
    terminal: &mut DefaultTerminal,
    controller: &mut Controller<M>,
    options: &ProgramOptions,
) -> Result<(), ProgramError> {
    // Channel for results of background tasks
    let (tx, rx) = mpsc::channel();
    let mut host = Host {
        queue: VecDeque::new(),
        size: terminal.size()?,
        tx,
        quit: false,
    };

    host.dispatch(controller.init());
    host.queue.push_back(Msg::Resize(host.size));
    let mut needs_redraw = true; // Force first frame

    loop {
        while let Ok(msg) = rx.try_recv() {
            host.queue.push_back(msg);
        }

        if !host.queue.is_empty() {
            needs_redraw = true;
        }
        deliver_pending(&mut host, controller);
        if host.quit {
            debug!("Quit requested, {} messages dropped", host.queue.len());
            return Ok(());
        }

        // Only draw when something changed
        if needs_redraw {
            let view = controller.view();
            terminal.draw(|frame| draw(frame, &view))?;
            needs_redraw = false;
        }

        // Messages produced this pass wait for the next one; don't block on input
        let timeout = if host.queue.is_empty() {
            options.tick_rate
        } else {
            Duration::ZERO
        };

        // Wait for the first event, then drain everything already pending
        let mut next = poll_input(timeout)?;
        while let Some(input) = next {
            handle_input(&mut host, controller, input)?;
            next = poll_input_immediate()?;
        }
    }
}

/// Delivers the messages queued at the start of the pass. Anything they
/// produce stays queued for the next pass, so a screen that keeps answering
/// itself cannot starve drawing or input.
fn deliver_pending<M: Send + 'static>(host: &mut Host<M>, controller: &mut Controller<M>) {
    let pending = host.queue.len();
    for _ in 0..pending {
        let Some(msg) = host.queue.pop_front() else {
            break;
        };
        let command = controller.update(msg);
        host.dispatch(command);
        if host.quit {
            return;
        }
    }
}

fn handle_input<M>(
    host: &mut Host<M>,
    controller: &Controller<M>,
    input: Input<M>,
) -> Result<(), ProgramError> {
    match input {
        Input::Interrupt => {
            info!("Interrupted (depth={})", controller.depth());
            Err(ProgramError::Interrupted)
        }
        Input::Msg(msg) => {
            if let Msg::Resize(size) = &msg {
                host.size = *size;
            }
            host.queue.push_back(msg);
            Ok(())
        }
    }
}

fn draw(frame: &mut Frame, view: &str) {
    let paragraph = Paragraph::new(view).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

/// Executes command effects on behalf of the event loop.
struct Host<M> {
    queue: VecDeque<Msg<M>>,
    size: Size,
    tx: mpsc::Sender<Msg<M>>,
    quit: bool,
}

impl<M: Send + 'static> Host<M> {
    fn dispatch(&mut self, command: Option<Command<M>>) {
        let Some(command) = command else {
            return;
        };
        let mut effects = Vec::new();
        command.into_effects(false, &mut effects);
        for effect in effects {
            match effect {
                Effect::Deliver(msg) => self.queue.push_back(msg),
                Effect::Run { task, inline: true } => {
                    if let Some(msg) = task() {
                        self.queue.push_back(msg);
                    }
                }
                Effect::Run {
                    task,
                    inline: false,
                } => self.spawn(task),
                Effect::WindowSize => self.queue.push_back(Msg::Resize(self.size)),
                Effect::Quit => self.quit = true,
            }
        }
    }

    fn spawn(&self, task: crate::stack::Task<M>) {
        let tx = self.tx.clone();
        let job = move || {
            if let Some(msg) = task() {
                if tx.send(msg).is_err() {
                    warn!("Dropped background result: event loop is gone");
                }
            }
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                std::thread::spawn(job);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{close, open};
    use crate::test_support::{Echo, Recorder};

    fn host() -> (Host<()>, mpsc::Receiver<Msg<()>>) {
        let (tx, rx) = mpsc::channel();
        let host = Host {
            queue: VecDeque::new(),
            size: Size {
                width: 80,
                height: 24,
            },
            tx,
            quit: false,
        };
        (host, rx)
    }

    #[test]
    fn test_default_options() {
        let options = ProgramOptions::default();
        assert_eq!(options.tick_rate, DEFAULT_TICK_RATE);
        assert!(options.mouse_capture);
        assert!(options.bracketed_paste);
    }

    #[test]
    fn test_program_error_display() {
        assert_eq!(ProgramError::Interrupted.to_string(), "program was interrupted");
        let io = ProgramError::from(io::Error::other("tty gone"));
        assert_eq!(io.to_string(), "terminal I/O error: tty gone");
    }

    #[test]
    fn test_dispatch_answers_window_size() {
        let (mut host, _rx) = host();
        host.dispatch(Some(Command::WindowSize));
        assert!(matches!(host.queue.pop_front(), Some(Msg::Resize(size)) if size.width == 80));
    }

    #[test]
    fn test_background_task_reports_through_channel() {
        let (mut host, rx) = host();
        host.dispatch(Some(Command::perform(|| Some(Msg::App(())))));

        assert!(host.queue.is_empty());
        let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(msg, Msg::App(())));
    }

    #[test]
    fn test_sequenced_task_runs_inline() {
        let (mut host, _rx) = host();
        let cmd = Command::sequence([
            Some(Command::perform(|| Some(Msg::App(())))),
            Some(Command::msg(Msg::Closed)),
        ]);
        host.dispatch(cmd);

        assert!(matches!(host.queue.pop_front(), Some(Msg::App(()))));
        assert!(matches!(host.queue.pop_front(), Some(Msg::Closed)));
    }

    #[test]
    fn test_close_after_interrupt_race_is_noop() {
        // The loop may still deliver a close that was queued before Ctrl+C
        let (recorder, _) = Recorder::new("view");
        let mut controller = Controller::with_screen(recorder);
        let (mut host, _rx) = host();
        host.dispatch(Some(close()));
        host.dispatch(Some(close()));
        while let Some(msg) = host.queue.pop_front() {
            let command = controller.update(msg);
            host.dispatch(command);
        }
        assert!(controller.is_empty());
        assert!(!host.quit);
    }

    #[test]
    fn test_interrupt_after_close_race_stops_loop() {
        let (recorder, _) = Recorder::new("view");
        let mut controller = Controller::with_screen(recorder);
        let (mut host, _rx) = host();
        host.dispatch(Some(close()));
        deliver_pending(&mut host, &mut controller);
        assert!(controller.is_empty());

        let result = handle_input(&mut host, &controller, Input::Interrupt);
        assert!(matches!(result, Err(ProgramError::Interrupted)));
    }

    #[test]
    fn test_input_resize_updates_host_size() {
        let (recorder, _) = Recorder::new("view");
        let controller = Controller::with_screen(recorder);
        let (mut host, _rx) = host();
        let size = Size {
            width: 100,
            height: 30,
        };

        handle_input(&mut host, &controller, Input::Msg(Msg::Resize(size))).unwrap();

        assert_eq!(host.size, size);
        assert!(matches!(host.queue.pop_front(), Some(Msg::Resize(s)) if s == size));
    }

    #[test]
    fn test_self_answering_screen_yields_each_pass() {
        let (echo, count) = Echo::new();
        let mut controller = Controller::with_screen(echo);
        let (mut host, _rx) = host();
        host.queue.push_back(Msg::App(()));

        deliver_pending(&mut host, &mut controller);
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(host.queue.len(), 1);

        deliver_pending(&mut host, &mut controller);
        assert_eq!(*count.lock().unwrap(), 2);
        assert_eq!(host.queue.len(), 1);
        assert_eq!(controller.view(), "echo 2");
    }

    #[test]
    fn test_quit_sets_flag() {
        let (recorder, _) = Recorder::new("view");
        let mut controller = Controller::with_screen(recorder);
        let (mut host, _rx) = host();
        host.dispatch(Some(open(Recorder::new("view 2").0)));
        host.dispatch(Some(Command::Quit));
        assert!(host.quit);
        let first = host.queue.pop_front().unwrap();
        controller.update(first);
        assert_eq!(controller.view(), "view 2");
    }
}
