use crossterm::event::KeyCode;
use navstack::stack::{close, open, replace};
use navstack::{Msg, Outcome, Screen};

use super::{DemoMsg, key_code};

pub struct Detail {
    title: String,
    level: usize,
    lines: Vec<String>,
    children_closed: usize,
}

impl Detail {
    pub fn new(title: &str, level: usize) -> Self {
        Self::with_lines(title, level, Vec::new())
    }

    pub fn with_lines(title: &str, level: usize, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            level,
            lines,
            children_closed: 0,
        }
    }
}

impl Screen<DemoMsg> for Detail {
    fn update(&mut self, msg: Msg<DemoMsg>) -> Outcome<DemoMsg> {
        if let Msg::Closed = msg {
            self.children_closed += 1;
            return Outcome::none();
        }

        match key_code(&msg) {
            Some(KeyCode::Esc) | Some(KeyCode::Backspace) => close().into(),
            Some(KeyCode::Enter) => open(Detail::new(&self.title, self.level + 1)).into(),
            Some(KeyCode::Char('r')) => {
                replace(Detail::new(&format!("{} (again)", self.title), self.level)).into()
            }
            _ => Outcome::none(),
        }
    }

    fn view(&self) -> String {
        let mut out = format!("{} (level {})\n", self.title, self.level);
        for line in &self.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        if self.children_closed > 0 {
            out.push_str(&format!("{} child screen(s) closed\n", self.children_closed));
        }
        out.push_str("Enter deeper · r replace · Esc back");
        out
    }
}
