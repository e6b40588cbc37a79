use std::time::Duration;

use crossterm::event::KeyCode;
use navstack::stack::{fail, open, replace, replace_all};
use navstack::{Command, Msg, Outcome, Screen};
use ratatui::layout::Size;

use super::detail::Detail;
use super::loader::Loader;
use super::{DemoMsg, key_code};

const ITEMS: &[&str] = &["Alpha", "Bravo", "Charlie"];
const LOAD_DELAY: Duration = Duration::from_millis(600);

/// Root screen: a selectable list plus navigation shortcuts.
pub struct Menu {
    generation: u32,
    selected: usize,
    note: String,
    size: Option<Size>,
    /// Label of the screen last opened on top of this one.
    opened: Option<&'static str>,
    load_delay: Duration,
}

impl Menu {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            selected: 0,
            note: String::new(),
            size: None,
            opened: None,
            load_delay: LOAD_DELAY,
        }
    }

    fn open_labelled(
        &mut self,
        label: &'static str,
        screen: impl Screen<DemoMsg> + 'static,
    ) -> Outcome<DemoMsg> {
        self.opened = Some(label);
        open(screen).into()
    }
}

impl Screen<DemoMsg> for Menu {
    fn update(&mut self, msg: Msg<DemoMsg>) -> Outcome<DemoMsg> {
        match msg {
            Msg::Closed => {
                self.note = match self.opened.take() {
                    Some(label) => format!("Back from {label}"),
                    None => "Back".to_string(),
                };
                return Outcome::none();
            }
            Msg::Resize(size) => {
                self.size = Some(size);
                return Outcome::none();
            }
            _ => {}
        }

        match key_code(&msg) {
            Some(KeyCode::Up) => self.selected = self.selected.saturating_sub(1),
            Some(KeyCode::Down) => self.selected = (self.selected + 1).min(ITEMS.len() - 1),
            Some(KeyCode::Enter) => {
                let item = ITEMS[self.selected];
                return self.open_labelled(item, Detail::new(item, 1));
            }
            Some(KeyCode::Char('l')) => {
                return self.open_labelled("Loader", Loader::new(self.load_delay));
            }
            Some(KeyCode::Char('r')) => return replace(Menu::new(self.generation + 1)).into(),
            Some(KeyCode::Char('a')) => return replace_all(Menu::new(0)).into(),
            Some(KeyCode::Char('f')) => {
                return fail(format!("menu #{} gave up", self.generation)).into();
            }
            Some(KeyCode::Char('q')) | Some(KeyCode::Esc) => return Command::Quit.into(),
            _ => {}
        }
        Outcome::none()
    }

    fn view(&self) -> String {
        let mut lines = vec![format!("Menu #{}", self.generation), String::new()];
        for (i, item) in ITEMS.iter().enumerate() {
            let marker = if i == self.selected { ">" } else { " " };
            lines.push(format!("{marker} {item}"));
        }
        lines.push(String::new());
        if !self.note.is_empty() {
            lines.push(self.note.clone());
        }
        if let Some(size) = self.size {
            lines.push(format!("{}x{}", size.width, size.height));
        }
        lines.push("Enter open · l load · r replace · a reset · f fail · q quit".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::press;
    use navstack::Controller;
    use navstack::testing::TestProgram;

    fn program() -> TestProgram<DemoMsg> {
        TestProgram::new(Controller::with_screen(Menu::new(0)))
    }

    #[test]
    fn test_menu_shows_size_after_startup() {
        let tp = program();
        assert!(tp.view().contains("80x24"));
    }

    #[test]
    fn test_enter_opens_selected_detail_and_esc_returns() {
        let mut tp = program();
        tp.send(press(KeyCode::Down));
        tp.send(press(KeyCode::Enter));
        assert!(tp.view().starts_with("Bravo (level 1)"));
        assert_eq!(tp.controller().depth(), 2);

        tp.send(press(KeyCode::Esc));
        assert!(tp.view().contains("Back from Bravo"));
        assert_eq!(tp.controller().depth(), 1);
    }

    #[test]
    fn test_closing_loader_reports_loader() {
        let mut menu = Menu::new(0);
        menu.load_delay = Duration::ZERO;
        let mut tp = TestProgram::new(Controller::with_screen(menu));
        tp.send(press(KeyCode::Down));
        tp.send(press(KeyCode::Char('l')));
        assert!(tp.view().starts_with("Loaded (level 1)"));

        tp.send(press(KeyCode::Esc));
        let view = tp.view();
        assert!(view.contains("Back from Loader"));
        assert!(!view.contains("Back from Bravo"));
    }

    #[test]
    fn test_replace_bumps_generation_without_growing() {
        let mut tp = program();
        tp.send(press(KeyCode::Char('r')));
        assert!(tp.view().starts_with("Menu #1"));
        assert_eq!(tp.controller().depth(), 1);
    }

    #[test]
    fn test_reset_collapses_stack() {
        let mut tp = program();
        tp.send(press(KeyCode::Enter));
        tp.send(press(KeyCode::Enter));
        assert_eq!(tp.controller().depth(), 3);

        tp.exec(replace_all(Menu::new(0)));
        assert_eq!(tp.controller().depth(), 1);
        assert!(tp.view().starts_with("Menu #0"));
    }

    #[test]
    fn test_fail_quits_with_error() {
        let mut tp = program();
        tp.send(press(KeyCode::Char('f')));
        assert!(tp.is_finished());
        let err = tp.into_controller().into_err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("menu #0 gave up"));
    }

    #[test]
    fn test_q_quits_cleanly() {
        let mut tp = program();
        tp.send(press(KeyCode::Char('q')));
        assert!(tp.is_finished());
        assert!(tp.controller().err().is_none());
    }
}
