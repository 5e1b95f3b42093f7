//! Fuzzy command correction.
//!
//! Free text is matched against the tokens valid at the current prompt.
//! Phrasal forms are tried first; otherwise the nearest token by edit
//! distance (adjacent transpositions count as one edit) is accepted, offered
//! for confirmation, or rejected.

use strsim::osa_distance;

use ew_core::{CoreResult, Scene, normalize_name};

use super::command::phrasal;

/// Largest edit distance that is offered as a suggestion.
pub const MAX_CORRECTION: usize = 2;

/// Result of matching input against the valid tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// The input names this token.
    Accepted(String),
    /// The input is close to this token and needs confirmation.
    Suggest {
        /// Nearest valid token.
        token: String,
        /// Edit distance to it.
        distance: usize,
    },
    /// Nothing is close enough.
    Rejected,
}

/// Match `input` against `valid` without asking anything.
///
/// When a phrasal form matches, its argument is what gets compared; ties
/// between equally near tokens go to the one listed first.
pub fn correct<S: AsRef<str>>(input: &str, valid: &[S]) -> Correction {
    let input = normalize_name(input);
    if input.is_empty() {
        return Correction::Rejected;
    }

    let subject = match phrasal(&input) {
        Some(phrase) => {
            if let Some(token) = exact(phrase.argument(), valid) {
                return Correction::Accepted(token);
            }
            phrase.argument().to_string()
        }
        None => input,
    };

    let Some((token, distance)) = valid
        .iter()
        .map(|t| (t.as_ref(), osa_distance(&subject, &normalize_name(t.as_ref()))))
        .min_by_key(|(_, d)| *d)
    else {
        return Correction::Rejected;
    };

    match distance {
        0 => Correction::Accepted(token.to_string()),
        d if d <= MAX_CORRECTION => Correction::Suggest {
            token: token.to_string(),
            distance: d,
        },
        _ => Correction::Rejected,
    }
}

fn exact<S: AsRef<str>>(word: &str, valid: &[S]) -> Option<String> {
    valid
        .iter()
        .find(|t| normalize_name(t.as_ref()) == word)
        .map(|t| t.as_ref().to_string())
}

/// Whether an answer counts as "yes".
pub fn is_affirmative(answer: &str) -> bool {
    matches!(normalize_name(answer).as_str(), "y" | "yes")
}

/// Correct `input`, asking the player to confirm near misses.
///
/// Returns `None` when the input was rejected or the suggestion declined;
/// the caller should prompt again.
pub fn resolve<S: AsRef<str>>(
    scene: &mut Scene<'_>,
    input: &str,
    valid: &[S],
) -> CoreResult<Option<String>> {
    match correct(input, valid) {
        Correction::Accepted(token) => Ok(Some(token)),
        Correction::Suggest { token, distance } => {
            tracing::debug!(input, %token, distance, "suggesting correction");
            let answer = scene.ask(&format!("Did you mean '{token}'? (y/n) "))?;
            if is_affirmative(&answer) {
                Ok(Some(token))
            } else {
                scene.say("Okay. Try again.");
                Ok(None)
            }
        }
        Correction::Rejected => {
            scene.say(format!(
                "Command '{}' not recognized. Type 'help' for a list of commands.",
                input.trim()
            ));
            Ok(None)
        }
    }
}
