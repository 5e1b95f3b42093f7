//! The standard world layout.
//!
//! ```text
//!                 tower
//!                   | (Crystal Key)
//!                 ruins
//!                   |
//!   caves --down-- forest
//!                   |
//!                village ---- coast ==(boat)== isle
//! ```

use ew_core::Ability;

use super::{BossDescriptor, FlavorEffect, Gate, GateCondition, Room, SubAreaKind, WorldGraph};
use crate::error::FictionResult;
use crate::event::UniqueEvent;
use crate::parser::Direction;

/// Where new players begin.
pub const START_ROOM: &str = "village";

fn flavor(text: &str, effect: FlavorEffect) -> SubAreaKind {
    SubAreaKind::Flavor {
        text: text.to_string(),
        effect,
    }
}

fn boss(
    name: &str,
    health: i32,
    damage: i32,
    ability: Ability,
    description: &str,
    reward: &str,
) -> BossDescriptor {
    BossDescriptor {
        name: name.to_string(),
        health,
        damage,
        ability,
        description: description.to_string(),
        reward: reward.to_string(),
    }
}

/// Build the standard seven-room world.
pub fn standard_world() -> FictionResult<WorldGraph> {
    let mut world = WorldGraph::new(START_ROOM);

    world.add_room(
        Room::new(
            "village",
            "Village",
            "Smoke curls from the chimneys of a quiet village. Roads lead north into the forest and east toward the sea.",
        )
        .exit(Direction::North, "forest")
        .exit(Direction::East, "coast")
        .area(
            "tavern",
            flavor(
                "You share stories by the fire and rest your feet.",
                FlavorEffect::Rest(10),
            ),
        )
        .area("shrine", SubAreaKind::Puzzle("shrine".into()))
        .area("market", SubAreaKind::Store)
        .events(&[UniqueEvent::TravelingMerchant, UniqueEvent::VillageFestival]),
    )?;

    world.add_room(
        Room::new(
            "forest",
            "Forest",
            "Tall pines swallow the light. A path climbs north to old ruins, and a dark hole opens in the ground.",
        )
        .exit(Direction::South, "village")
        .exit(Direction::North, "ruins")
        .exit(Direction::Down, "caves")
        .area("clearing", SubAreaKind::Combat)
        .area("old oak", SubAreaKind::Puzzle("old oak".into()))
        .events(&[UniqueEvent::FairyRing, UniqueEvent::BanditAmbush]),
    )?;

    world.add_room(
        Room::new(
            "caves",
            "Caves",
            "Water drips in the dark. Somewhere below, something large is breathing.",
        )
        .exit(Direction::Up, "forest")
        .area(
            "underground lake",
            flavor(
                "Blind white fish circle in the still black water.",
                FlavorEffect::Nothing,
            ),
        )
        .area("troll den", SubAreaKind::Lair)
        .boss(boss(
            "Cave Troll King",
            150,
            15,
            Ability::Regeneration,
            "A hulking troll wearing a crown of stalactites.",
            "Crystal Key",
        ))
        .events(&[UniqueEvent::CaveIn, UniqueEvent::GlowingCrystals]),
    )?;

    world.add_room(
        Room::new(
            "ruins",
            "Ruins",
            "Broken columns ring a sunken courtyard. To the north a sealed door bars the way to a tower.",
        )
        .exit(Direction::South, "forest")
        .area("library", SubAreaKind::Puzzle("library".into()))
        .area("collapsed hall", SubAreaKind::Combat)
        .events(&[UniqueEvent::CursedIdol, UniqueEvent::ForgottenArmory]),
    )?;

    world.add_room(
        Room::new(
            "tower",
            "Tower",
            "Stairs spiral up into a chamber that hums with old magic.",
        )
        .exit(Direction::South, "ruins")
        .area(
            "observatory",
            flavor(
                "Through a cracked lens you glimpse the isle far to the south-east.",
                FlavorEffect::Nothing,
            ),
        )
        .area("lich sanctum", SubAreaKind::Lair)
        .boss(boss(
            "Lich Sorcerer",
            180,
            18,
            Ability::MagicBlast,
            "A robed skeleton crackling with stolen power.",
            "Ancient Relic",
        ))
        .events(&[UniqueEvent::ArcaneSurge, UniqueEvent::RestlessSpirits]),
    )?;

    world.add_room(
        Room::new(
            "coast",
            "Coast",
            "Waves crash on a rocky shore. A wrecked boat lies by the boathouse; beyond the surf an isle rises from the mist.",
        )
        .exit(Direction::West, "village")
        .area("boathouse", SubAreaKind::Boathouse("Toolkit".into()))
        .area("tide pools", SubAreaKind::Puzzle("tide pools".into()))
        .events(&[UniqueEvent::Shipwreck, UniqueEvent::RogueWave]),
    )?;

    world.add_room(
        Room::new(
            "isle",
            "Isle",
            "Black sand and twisted palms. A grotto yawns at the waterline.",
        )
        .exit(Direction::West, "coast")
        .area(
            "palm grove",
            flavor(
                "You drink from a coconut and doze in the shade.",
                FlavorEffect::Rest(15),
            ),
        )
        .area("serpent grotto", SubAreaKind::Lair)
        .boss(boss(
            "Sea Serpent",
            200,
            20,
            Ability::Freeze,
            "Coils as thick as a mast rise from the water.",
            "Serpent Scale",
        ))
        .events(&[UniqueEvent::SirenSong, UniqueEvent::BuriedChest]),
    )?;

    world.add_gate(Gate {
        id: "ruins-tower".into(),
        from: "ruins".into(),
        direction: Direction::North,
        to: "tower".into(),
        condition: GateCondition::HasItem("Crystal Key".into()),
        blocked: "The tower door is sealed. A crystal-shaped keyhole glints in the stone.".into(),
    })?;
    world.add_gate(Gate {
        id: "coast-isle".into(),
        from: "coast".into(),
        direction: Direction::East,
        to: "isle".into(),
        condition: GateCondition::BoatRepaired,
        blocked: "The boat is wrecked. You'll need to repair it in the boathouse first.".into(),
    })?;

    Ok(world)
}
