use std::fmt::Write as _;

use activities::{CatalogView, Notice, NoticeLevel, View};

/// Prints client output. Errors go to stderr so stdout stays pipeable.
pub struct TerminalView;

impl View for TerminalView {
    fn render_catalog(&self, view: CatalogView) {
        print!("{}", format_catalog(&view));
    }

    fn show_message(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.text),
            NoticeLevel::Error => eprintln!("{}", notice.text),
        }
    }

    fn alert(&self, text: &str) {
        println!("! {text}");
    }

    fn report_diagnostic(&self, message: &str) {
        eprintln!("{}", format_diagnostic(message));
    }
}

pub fn format_diagnostic(message: &str) -> String {
    format!("diagnostic: {message}")
}

pub fn format_catalog(view: &CatalogView) -> String {
    if view.is_empty() {
        return "No activities.\n".to_string();
    }

    let mut out = String::new();
    for card in &view.cards {
        let _ = writeln!(out, "{}", card.name);
        let _ = writeln!(out, "  {}", card.description);
        let _ = writeln!(out, "  Schedule: {}", card.schedule);
        let _ = writeln!(out, "  Availability: {}", card.availability());
        if card.participants.is_empty() {
            let _ = writeln!(out, "  Participants: none");
        } else {
            let _ = writeln!(out, "  Participants:");
            for p in &card.participants {
                let _ = writeln!(out, "    - {}", p.email);
            }
        }
        out.push('\n');
    }
    out
}
