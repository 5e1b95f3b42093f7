use std::path::Path;

use colored::Colorize;

use ew_fiction::{SubAreaKind, standard_world};

pub fn run(content: Option<&Path>) -> Result<(), String> {
    let content = super::load_content(content)?;
    let world = standard_world().map_err(|e| format!("world setup failed: {e}"))?;

    let mut problems = content.problems();
    for room in world.rooms() {
        let pools = room.sub_areas.iter().filter_map(|a| match &a.kind {
            SubAreaKind::Puzzle(pool) => Some(pool),
            _ => None,
        });
        for pool in pools {
            if content.puzzle_pool(pool).is_empty() {
                problems.push(format!("{}: puzzle pool '{pool}' has no puzzles", room.id));
            }
        }
    }

    if !problems.is_empty() {
        for problem in &problems {
            println!("  {} {problem}", "problem:".yellow().bold());
        }
        return Err(format!("{} problem(s) found", problems.len()));
    }

    println!("  {}", "All checks passed.".green());
    println!(
        "  {} rooms, {} gates, {} enemies, {} puzzle pools, {} store items",
        world.rooms().count(),
        world.gates().len(),
        content.enemies.len(),
        content.puzzles.len(),
        content.store.len()
    );
    Ok(())
}
