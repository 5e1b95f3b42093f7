//! Shared mutable context for one step of play.

use rand::rngs::StdRng;

use crate::content::GameContent;
use crate::error::{CoreError, CoreResult};
use crate::player::Player;
use crate::presenter::Presenter;

/// Everything an event, encounter, or item use may touch.
pub struct Scene<'a> {
    /// The player.
    pub player: &'a mut Player,
    /// Read-only world content.
    pub content: &'a GameContent,
    /// Display and input boundary.
    pub presenter: &'a mut dyn Presenter,
    /// Random source.
    pub rng: &'a mut StdRng,
}

impl<'a> Scene<'a> {
    /// Bundle the pieces of a scene.
    pub fn new(
        player: &'a mut Player,
        content: &'a GameContent,
        presenter: &'a mut dyn Presenter,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            player,
            content,
            presenter,
            rng,
        }
    }

    /// Show one line.
    pub fn say(&mut self, line: impl Into<String>) {
        self.presenter.render(&[line.into()]);
    }

    /// Show several lines.
    pub fn tell(&mut self, lines: &[String]) {
        if !lines.is_empty() {
            self.presenter.render(lines);
        }
    }

    /// Ask for a line of input.
    pub fn ask(&mut self, message: &str) -> CoreResult<String> {
        self.presenter
            .prompt(message)
            .map(|s| s.trim().to_string())
            .ok_or(CoreError::InputClosed)
    }

    /// Show numbered options and ask for one.
    ///
    /// Returns the zero-based index, or `None` if the answer is not a valid
    /// option number.
    pub fn choose(&mut self, options: &[&str]) -> CoreResult<Option<usize>> {
        let lines: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}. {o}", i + 1))
            .collect();
        self.tell(&lines);
        let answer = self.ask("Choose an option: ")?;
        Ok(answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=options.len()).contains(n))
            .map(|n| n - 1))
    }

    /// Wait for acknowledgement.
    pub fn pause(&mut self) {
        self.presenter.pause();
    }
}
