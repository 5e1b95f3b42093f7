//! Command vocabulary and fuzzy correction.

mod command;
mod corrector;

pub use command::{Command, Direction, KEYWORDS, Phrase, phrasal};
pub use corrector::{MAX_CORRECTION, Correction, correct, is_affirmative, resolve};
