//! Puzzle resolution.

use rand::Rng;

use ew_core::{CoreResult, Player, PuzzlePenalty, PuzzleReward, Scene};
use ew_mechanics::items::add_item;
use ew_mechanics::survival::survive;

use crate::event::Outcome;

/// Pose a random puzzle from `pool` and settle the answer.
///
/// Empty pools and malformed puzzles are reported and skipped.
pub fn run_puzzle(scene: &mut Scene<'_>, pool: &str) -> CoreResult<Outcome> {
    let content = scene.content;
    let puzzles = content.puzzle_pool(pool);
    if puzzles.is_empty() {
        tracing::warn!(pool, "empty puzzle pool");
        scene.say(format!("The {pool} is quiet today. There is no riddle to solve."));
        return Ok(Outcome::Continue);
    }
    let puzzle = &puzzles[scene.rng.random_range(0..puzzles.len())];
    if let Err(e) = puzzle.validate() {
        tracing::warn!(pool, error = %e, "skipping malformed puzzle");
        scene.say(format!("The riddle here is worn beyond reading. ({e})"));
        return Ok(Outcome::Continue);
    }

    scene.say(puzzle.question.clone());
    let options: Vec<&str> = puzzle.options.iter().map(String::as_str).collect();
    let choice = loop {
        match scene.choose(&options)? {
            Some(i) => break i,
            None => scene.say("Invalid choice. Please try again."),
        }
    };

    if choice == puzzle.answer {
        scene.say("Correct!");
        let lines = apply_reward(scene.player, &puzzle.reward);
        scene.tell(&lines);
        return Ok(Outcome::Continue);
    }

    scene.say(format!(
        "Wrong. The answer was: {}.",
        puzzle.options[puzzle.answer]
    ));
    let lines = apply_penalty(scene.player, &puzzle.penalty);
    scene.tell(&lines);
    if survive(scene) {
        Ok(Outcome::Continue)
    } else {
        Ok(Outcome::Defeated)
    }
}

/// Grant a puzzle reward.
pub fn apply_reward(player: &mut Player, reward: &PuzzleReward) -> Vec<String> {
    match reward {
        PuzzleReward::Item { item } => {
            let name = add_item(player, item);
            vec![format!("You receive a {name}.")]
        }
        PuzzleReward::Gold { amount } => {
            player.gold += amount;
            vec![format!("You receive {amount} gold.")]
        }
        PuzzleReward::Stats { heal, damage_bonus } => {
            let mut lines = Vec::new();
            if *heal > 0 {
                let healed = player.heal(*heal);
                lines.push(format!("You recover {healed} health."));
            }
            if *damage_bonus != 0 {
                player.damage_bonus += damage_bonus;
                lines.push(format!("Your damage increases by {damage_bonus}."));
            }
            lines
        }
    }
}

/// Apply a puzzle penalty. The caller runs the loss check.
pub fn apply_penalty(player: &mut Player, penalty: &PuzzlePenalty) -> Vec<String> {
    match penalty {
        PuzzlePenalty::Health { amount } => {
            player.health -= amount;
            vec![format!("You take {amount} damage.")]
        }
        PuzzlePenalty::Gold { amount } => {
            let lost = player.lose_gold(*amount);
            vec![format!("You lose {lost} gold.")]
        }
        PuzzlePenalty::Item { item } => {
            if player.consume(item) {
                vec![format!("Your {item} crumbles to dust.")]
            } else {
                vec!["You feel a tug at your pack, but nothing is taken.".to_string()]
            }
        }
    }
}
