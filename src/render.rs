//! Colored terminal rendering for dayboard types.

use chrono::Local;
use owo_colors::OwoColorize;

use dayboard_core::{Event, Note};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = if self.all_day {
            format!("{} (all day)", self.start.with_timezone(&Local).format("%a %b %e"))
        } else {
            format!(
                "{} - {}",
                self.start.with_timezone(&Local).format("%a %b %e %H:%M"),
                self.end.with_timezone(&Local).format("%H:%M"),
            )
        };

        let mut line = format!("{}  {}  {}", self.id.dimmed(), time.dimmed(), self.title.bold());
        if !self.description.is_empty() {
            line.push_str(&format!("\n{}", indent(&self.description)));
        }
        line
    }
}

impl Render for Note {
    fn render(&self) -> String {
        format!("{}  {}", format!("#{}", self.id).dimmed(), self.text)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("      {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a list, or a placeholder when it is empty.
pub fn render_list<T: Render>(items: &[T], empty_message: &str) -> String {
    if items.is_empty() {
        return empty_message.dimmed().to_string();
    }
    items
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join("\n")
}
