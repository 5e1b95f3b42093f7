//! Line-oriented terminal presenter.

use std::io::{self, BufRead, StdinLock, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use ew_core::{Player, Presenter};

/// Presenter that prints to stdout and reads lines from `input`.
pub struct TerminalPresenter<R> {
    input: R,
}

impl TerminalPresenter<StdinLock<'static>> {
    /// Read from standard input.
    pub fn stdio() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalPresenter<R> {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

fn styled(line: &str) -> String {
    if line.starts_with("== ") {
        line.cyan().bold().to_string()
    } else if line.contains("Game Over") || line.contains("Critical hit") {
        line.red().bold().to_string()
    } else if line.starts_with("You found")
        || line.starts_with("You receive")
        || line.starts_with("You claim")
        || line.starts_with("You reached level")
    {
        line.green().to_string()
    } else if line.starts_with("Invalid choice") || line.contains("not recognized") {
        line.yellow().to_string()
    } else {
        line.to_string()
    }
}

impl<R: BufRead> Presenter for TerminalPresenter<R> {
    fn render(&mut self, lines: &[String]) {
        for line in lines {
            println!("  {}", styled(line));
        }
    }

    fn render_sidebar(&mut self, player: &Player) {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "Health", "Level", "XP", "Gold", "Damage +"]);
        table.add_row(vec![
            player.name.clone(),
            format!("{}/{}", player.display_health(), player.max_health()),
            player.level.to_string(),
            player.experience.to_string(),
            player.gold.to_string(),
            player.damage_bonus.to_string(),
        ]);
        println!();
        println!("{table}");
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{} ", message.trim_end().bold());
        io::stdout().flush().ok()?;
        self.read_line()
    }

    fn pause(&mut self) {
        print!("{}", "Press Enter to continue...".dimmed());
        if io::stdout().flush().is_ok() {
            self.read_line();
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_reads_lines_until_eof() {
        let mut presenter = TerminalPresenter {
            input: "north\r\nquit\n".as_bytes(),
        };
        assert_eq!(presenter.prompt("> ").as_deref(), Some("north"));
        assert_eq!(presenter.prompt("> ").as_deref(), Some("quit"));
        assert_eq!(presenter.prompt("> "), None);
    }

    #[test]
    fn headings_are_styled_without_losing_text() {
        colored::control::set_override(false);
        assert_eq!(styled("== Village =="), "== Village ==");
        assert_eq!(styled("plain"), "plain");
    }
}
