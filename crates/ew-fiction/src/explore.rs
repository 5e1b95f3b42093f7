//! Entering sub-areas and boss lairs.

use ew_core::{CoreResult, Enemy, Scene};
use ew_mechanics::combat::Spoils;

use crate::event::{Outcome, encounter, encounter_enemy};
use crate::puzzle::run_puzzle;
use crate::store::visit_store;
use crate::world::{BossDescriptor, FlavorEffect, Room, SubArea, SubAreaKind};

/// Resolve a visit to one of a room's sub-areas.
pub fn enter_sub_area(scene: &mut Scene<'_>, room: &Room, area: &SubArea) -> CoreResult<Outcome> {
    tracing::debug!(room = %room.id, area = %area.name, "entering sub-area");
    scene.say(format!("You enter the {}.", area.name));
    match &area.kind {
        SubAreaKind::Flavor { text, effect } => {
            scene.say(text.clone());
            if let FlavorEffect::Rest(amount) = effect {
                let healed = scene.player.heal(*amount);
                if healed > 0 {
                    scene.say(format!("You recover {healed} health."));
                }
            }
            Ok(Outcome::Continue)
        }
        SubAreaKind::Combat => encounter_enemy(scene),
        SubAreaKind::Puzzle(pool) => run_puzzle(scene, pool),
        SubAreaKind::Store => {
            visit_store(scene)?;
            Ok(Outcome::Continue)
        }
        SubAreaKind::Boathouse(tool) => {
            repair_boat(scene, tool);
            Ok(Outcome::Continue)
        }
        SubAreaKind::Lair => challenge_boss(scene, room),
    }
}

fn repair_boat(scene: &mut Scene<'_>, tool: &str) {
    if scene.player.boat_repaired {
        scene.say("The boat bobs at its mooring, ready to sail.");
    } else if scene.player.consume(tool) {
        scene.player.boat_repaired = true;
        tracing::info!("boat repaired");
        scene.say(format!("You patch the hull with your {tool}. The boat is seaworthy again!"));
    } else {
        scene.say(format!("The boat needs work. You'll need a {tool}."));
    }
}

/// Offer the room's boss fight.
pub fn challenge_boss(scene: &mut Scene<'_>, room: &Room) -> CoreResult<Outcome> {
    let Some(boss) = &room.boss else {
        scene.say("There is no boss here.");
        return Ok(Outcome::Continue);
    };
    if scene.player.defeated_bosses.contains(&boss.name) {
        scene.say(format!(
            "The lair is silent. The {} has already fallen.",
            boss.name
        ));
        return Ok(Outcome::Continue);
    }

    scene.say(format!(
        "The {} guards this place. {}",
        boss.name, boss.description
    ));
    match scene.choose(&["Fight", "Leave"])? {
        Some(0) => fight_boss(scene, boss),
        _ => {
            scene.say("You back away quietly.");
            Ok(Outcome::Continue)
        }
    }
}

fn fight_boss(scene: &mut Scene<'_>, boss: &BossDescriptor) -> CoreResult<Outcome> {
    let enemy = Enemy::new(
        boss.name.clone(),
        boss.health,
        boss.damage,
        boss.ability,
        String::new(),
    );
    let outcome = encounter(scene, enemy, Spoils::Reward(boss.reward.clone()))?;
    if outcome == Outcome::Continue {
        scene.player.defeated_bosses.insert(boss.name.clone());
        tracing::info!(boss = %boss.name, "boss defeated");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ew_core::{Ability, GameContent, Player, ScriptedPresenter};
    use ew_mechanics::items::add_item;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn visit(player: &mut Player, room: &Room, area: &str, inputs: &[&str]) -> ScriptedPresenter {
        let content = GameContent::builtin();
        let mut presenter = ScriptedPresenter::new(inputs.iter().copied());
        let mut rng = StdRng::seed_from_u64(11);
        {
            let mut scene = Scene::new(player, &content, &mut presenter, &mut rng);
            let area = room.sub_area(area).unwrap().clone();
            enter_sub_area(&mut scene, room, &area).unwrap();
        }
        presenter
    }

    fn lair() -> Room {
        Room::new("den", "Den", "")
            .area("lair", SubAreaKind::Lair)
            .area(
                "hearth",
                SubAreaKind::Flavor {
                    text: "Warm.".into(),
                    effect: FlavorEffect::Rest(10),
                },
            )
            .area("shed", SubAreaKind::Boathouse("Toolkit".into()))
            .boss(BossDescriptor {
                name: "Paper Tiger".into(),
                health: 5,
                damage: 1,
                ability: Ability::None,
                description: "It looks flimsy.".into(),
                reward: "Crystal Key".into(),
            })
    }

    #[test]
    fn beaten_boss_gives_reward_once() {
        let room = lair();
        let mut p = Player::new("Ada", 100, 0);
        visit(&mut p, &room, "lair", &["1", "1"]);
        assert!(p.has_item("Crystal Key"));
        assert!(p.defeated_bosses.contains("Paper Tiger"));

        let presenter = visit(&mut p, &room, "lair", &[]);
        assert!(presenter.saw("already fallen"));
        assert_eq!(p.item_count("Crystal Key"), 1);
    }

    #[test]
    fn boss_is_opt_in() {
        let room = lair();
        let mut p = Player::new("Ada", 100, 0);
        let presenter = visit(&mut p, &room, "lair", &["2"]);
        assert!(presenter.saw("back away"));
        assert!(p.defeated_bosses.is_empty());
    }

    #[test]
    fn flavor_rest_heals() {
        let room = lair();
        let mut p = Player::new("Ada", 100, 0);
        p.health = 50;
        visit(&mut p, &room, "hearth", &[]);
        assert_eq!(p.health, 60);
    }

    #[test]
    fn boat_needs_the_tool() {
        let room = lair();
        let mut p = Player::new("Ada", 100, 0);
        visit(&mut p, &room, "shed", &[]);
        assert!(!p.boat_repaired);
        add_item(&mut p, "Toolkit");
        visit(&mut p, &room, "shed", &[]);
        assert!(p.boat_repaired);
        assert!(!p.has_item("Toolkit"));
    }
}
