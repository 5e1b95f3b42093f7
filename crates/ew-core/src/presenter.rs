//! The presentation boundary.
//!
//! The engine never reads or writes a terminal itself. It hands narrative
//! lines to a [`Presenter`] and asks it for the next line of input.

use std::collections::VecDeque;

use crate::player::Player;

/// Display and input collaborator implemented outside the engine.
pub trait Presenter {
    /// Show narrative lines.
    fn render(&mut self, lines: &[String]);

    /// Show the player's at-a-glance status.
    fn render_sidebar(&mut self, player: &Player);

    /// Ask for one line of input. `None` means input has closed.
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Wait for the player to acknowledge before continuing.
    fn pause(&mut self);
}

/// A presenter that replays canned input and records everything shown.
///
/// Used by tests and for non-interactive runs.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    inputs: VecDeque<String>,
    /// Every rendered line, in order.
    pub lines: Vec<String>,
    /// Every prompt message, in order.
    pub prompts: Vec<String>,
    /// Number of sidebar refreshes.
    pub sidebars: usize,
    /// Number of pauses.
    pub pauses: usize,
}

impl ScriptedPresenter {
    /// Create a presenter that will answer prompts with `inputs` in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether any rendered line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Number of inputs not yet consumed.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Presenter for ScriptedPresenter {
    fn render(&mut self, lines: &[String]) {
        self.lines.extend(lines.iter().cloned());
    }

    fn render_sidebar(&mut self, _player: &Player) {
        self.sidebars += 1;
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.inputs.pop_front()
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}
