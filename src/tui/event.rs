use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::Size;

use crate::stack::Msg;

/// Terminal input translated for the host loop.
pub(crate) enum Input<M> {
    /// Ctrl+C. Always ends the program regardless of what the screens do.
    Interrupt,
    Msg(Msg<M>),
}

/// Poll for an event with timeout (blocks up to `timeout`)
pub(crate) fn poll_input<M>(timeout: Duration) -> io::Result<Option<Input<M>>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

/// Poll for an event without blocking (returns immediately)
pub(crate) fn poll_input_immediate<M>() -> io::Result<Option<Input<M>>> {
    poll_input(Duration::ZERO)
}

fn translate<M>(event: Event) -> Option<Input<M>> {
    match event {
        Event::Key(key_event) => {
            // Release/repeat events show up with keyboard enhancement enabled
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            // Shift or caps lock may ride along with Ctrl
            match key_event.code {
                KeyCode::Char('c' | 'C') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Input::Interrupt)
                }
                _ => Some(Input::Msg(Msg::Key(key_event))),
            }
        }
        Event::Mouse(mouse_event) => Some(Input::Msg(Msg::Mouse(mouse_event))),
        Event::Paste(data) => Some(Input::Msg(Msg::Paste(data))),
        Event::Resize(width, height) => Some(Input::Msg(Msg::Resize(Size { width, height }))),
        _ => None,
    }
}
