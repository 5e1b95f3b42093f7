//! Arrival events.
//!
//! Entering a room through a direction runs one event. Rooms that declare
//! unique events get one of them 30% of the time; otherwise one of the four
//! generic events runs. Unique events are plain enum values mapped to their
//! handler functions by [`UniqueEvent::handler`].

use rand::Rng;

use ew_core::{Affliction, CoreResult, Enemy, Scene};
use ew_mechanics::combat::{CombatState, Spoils, fight};
use ew_mechanics::dice::chance;
use ew_mechanics::items::add_item;
use ew_mechanics::survival::survive;

/// Chance of a room-specific event when the room has any.
pub const UNIQUE_EVENT_CHANCE: f64 = 0.3;

/// How a step of play ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Play goes on.
    Continue,
    /// The player fell for good.
    Defeated,
}

/// Events available in every room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericEvent {
    /// An item from the treasure pool.
    FindTreasure,
    /// A random enemy.
    EncounterEnemy,
    /// A companion offers to join.
    FindAlly,
    /// Something strange worth a closer look.
    DiscoverMystery,
}

impl GenericEvent {
    /// Pick one uniformly.
    pub fn roll(rng: &mut impl Rng) -> Self {
        match rng.random_range(1..=4) {
            1 => Self::FindTreasure,
            2 => Self::EncounterEnemy,
            3 => Self::FindAlly,
            _ => Self::DiscoverMystery,
        }
    }

    /// Run the event.
    pub fn run(self, scene: &mut Scene<'_>) -> CoreResult<Outcome> {
        match self {
            Self::FindTreasure => {
                find_treasure(scene);
                Ok(Outcome::Continue)
            }
            Self::EncounterEnemy => encounter_enemy(scene),
            Self::FindAlly => find_ally(scene),
            Self::DiscoverMystery => discover_mystery(scene),
        }
    }
}

/// Events tied to one room of the standard world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueEvent {
    /// A merchant offers a cheap potion.
    TravelingMerchant,
    /// The village celebrates and shares its coin.
    VillageFestival,
    /// A ring of mushrooms that mends wounds.
    FairyRing,
    /// Bandits jump out of the brush.
    BanditAmbush,
    /// Rocks fall from the cave ceiling.
    CaveIn,
    /// A seam of crystals hides a tonic.
    GlowingCrystals,
    /// Touching an idol sets the player alight.
    CursedIdol,
    /// Old racks still hold a blade.
    ForgottenArmory,
    /// Raw magic crackles through the tower.
    ArcaneSurge,
    /// The dead of the tower stir.
    RestlessSpirits,
    /// A wreck on the sand with coin aboard.
    Shipwreck,
    /// A wave knocks the player down.
    RogueWave,
    /// A song lures coin out of the player's purse.
    SirenSong,
    /// A chest half-buried in the sand.
    BuriedChest,
}

/// An event handler.
pub type Handler = fn(&mut Scene<'_>) -> CoreResult<Outcome>;

impl UniqueEvent {
    /// Every unique event.
    pub const ALL: [Self; 14] = [
        Self::TravelingMerchant,
        Self::VillageFestival,
        Self::FairyRing,
        Self::BanditAmbush,
        Self::CaveIn,
        Self::GlowingCrystals,
        Self::CursedIdol,
        Self::ForgottenArmory,
        Self::ArcaneSurge,
        Self::RestlessSpirits,
        Self::Shipwreck,
        Self::RogueWave,
        Self::SirenSong,
        Self::BuriedChest,
    ];

    /// Name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::TravelingMerchant => "traveling merchant",
            Self::VillageFestival => "village festival",
            Self::FairyRing => "fairy ring",
            Self::BanditAmbush => "bandit ambush",
            Self::CaveIn => "cave-in",
            Self::GlowingCrystals => "glowing crystals",
            Self::CursedIdol => "cursed idol",
            Self::ForgottenArmory => "forgotten armory",
            Self::ArcaneSurge => "arcane surge",
            Self::RestlessSpirits => "restless spirits",
            Self::Shipwreck => "shipwreck",
            Self::RogueWave => "rogue wave",
            Self::SirenSong => "siren song",
            Self::BuriedChest => "buried chest",
        }
    }

    /// The handler for this event.
    pub fn handler(self) -> Handler {
        match self {
            Self::TravelingMerchant => traveling_merchant,
            Self::VillageFestival => village_festival,
            Self::FairyRing => fairy_ring,
            Self::BanditAmbush => bandit_ambush,
            Self::CaveIn => cave_in,
            Self::GlowingCrystals => glowing_crystals,
            Self::CursedIdol => cursed_idol,
            Self::ForgottenArmory => forgotten_armory,
            Self::ArcaneSurge => arcane_surge,
            Self::RestlessSpirits => restless_spirits,
            Self::Shipwreck => shipwreck,
            Self::RogueWave => rogue_wave,
            Self::SirenSong => siren_song,
            Self::BuriedChest => buried_chest,
        }
    }
}

/// Run the arrival event for a room with the given unique events.
pub fn dispatch(scene: &mut Scene<'_>, unique: &[UniqueEvent]) -> CoreResult<Outcome> {
    if !unique.is_empty() && chance(scene.rng, UNIQUE_EVENT_CHANCE) {
        let event = unique[scene.rng.random_range(0..unique.len())];
        tracing::debug!(event = event.name(), "unique event");
        return event.handler()(scene);
    }
    let event = GenericEvent::roll(scene.rng);
    tracing::debug!(?event, "generic event");
    event.run(scene)
}

/// Add a random item from the treasure pool.
pub fn find_treasure(scene: &mut Scene<'_>) {
    let content = scene.content;
    let pool = &content.treasure_pool;
    if pool.is_empty() {
        scene.say("You search around but find nothing of value.");
        return;
    }
    let treasure = pool[scene.rng.random_range(0..pool.len())].clone();
    let name = add_item(scene.player, &treasure);
    scene.say(format!("You found a {name}!"));
}

/// Fight a random enemy from the content.
pub fn encounter_enemy(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let content = scene.content;
    let enemies = &content.enemies;
    if enemies.is_empty() {
        scene.say("You hear something in the distance, but nothing comes.");
        return Ok(Outcome::Continue);
    }
    let template = &enemies[scene.rng.random_range(0..enemies.len())];
    if let Err(e) = template.validate() {
        tracing::warn!(error = %e, "skipping malformed enemy");
        scene.say(format!("A shape stirs in the shadows, then fades away. ({e})"));
        return Ok(Outcome::Continue);
    }
    let enemy = Enemy::from_template(template, scene.rng);
    encounter(scene, enemy, Spoils::Treasure)
}

/// Fight the enemy template with this name, or a random one if it is missing.
pub fn encounter_named(scene: &mut Scene<'_>, name: &str) -> CoreResult<Outcome> {
    let content = scene.content;
    let Some(template) = content.enemies.iter().find(|t| t.name == name) else {
        return encounter_enemy(scene);
    };
    if let Err(e) = template.validate() {
        tracing::warn!(error = %e, "skipping malformed enemy");
        scene.say(format!("The {name} thinks better of it and slinks away. ({e})"));
        return Ok(Outcome::Continue);
    }
    let enemy = Enemy::from_template(template, scene.rng);
    encounter(scene, enemy, Spoils::Treasure)
}

/// Resolve a fight and translate its end state.
pub fn encounter(scene: &mut Scene<'_>, enemy: Enemy, spoils: Spoils) -> CoreResult<Outcome> {
    match fight(scene, enemy, spoils)? {
        CombatState::Defeat => Ok(Outcome::Defeated),
        _ => Ok(Outcome::Continue),
    }
}

/// Offer a companion who has not joined yet.
pub fn find_ally(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let content = scene.content;
    let candidates: Vec<_> = content
        .allies
        .iter()
        .filter(|a| !scene.player.has_ally(&a.name))
        .collect();
    if candidates.is_empty() {
        scene.say("You meet no one new along the way.");
        return Ok(Outcome::Continue);
    }
    let ally = candidates[scene.rng.random_range(0..candidates.len())].clone();
    scene.say(format!(
        "You find {} who offers to join you on your adventure.",
        ally.name
    ));
    match scene.choose(&["Accept", "Decline"])? {
        Some(0) => {
            scene.player.allies.insert(ally.name.clone());
            scene.player.damage_bonus += ally.damage_bonus;
            scene.player.health_bonus += ally.health_bonus;
            let mut lines = vec![format!(
                "{} joins your party and helps you on your journey.",
                capitalize(&ally.name)
            )];
            if ally.damage_bonus != 0 {
                lines.push(format!("Your damage increases by {}.", ally.damage_bonus));
            }
            if ally.health_bonus != 0 {
                lines.push(format!(
                    "Your maximum health increases by {}.",
                    ally.health_bonus
                ));
            }
            tracing::info!(ally = %ally.name, "ally joined");
            scene.tell(&lines);
        }
        Some(_) => scene.say("You politely decline and continue on your way."),
        None => scene.say("Invalid choice. The ally leaves while you hesitate."),
    }
    Ok(Outcome::Continue)
}

/// Offer a mystery; investigating finds treasure.
///
/// With no mysteries in the content, nothing happens.
pub fn discover_mystery(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let content = scene.content;
    let mysteries = &content.mysteries;
    if mysteries.is_empty() {
        scene.say("Nothing interesting happens. You continue on your way.");
        return Ok(Outcome::Continue);
    }
    let mystery = mysteries[scene.rng.random_range(0..mysteries.len())].clone();
    scene.say(format!("You discover {mystery}."));
    match scene.choose(&["Investigate", "Ignore"])? {
        Some(0) => {
            scene.say("You investigate and find something valuable!");
            find_treasure(scene);
        }
        Some(_) => scene.say("You decide to ignore it and continue on your way."),
        None => scene.say("Invalid choice. You miss the opportunity while you hesitate."),
    }
    Ok(Outcome::Continue)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn hurt(scene: &mut Scene<'_>, amount: i32) -> Outcome {
    scene.player.health -= amount;
    if survive(scene) {
        Outcome::Continue
    } else {
        Outcome::Defeated
    }
}

fn traveling_merchant(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    const PRICE: u32 = 10;
    scene.say(format!("A traveling merchant offers you a Healing Potion for {PRICE} gold."));
    match scene.choose(&["Buy", "Decline"])? {
        Some(0) if scene.player.spend_gold(PRICE) => {
            add_item(scene.player, "Healing Potion");
            scene.say("The merchant hands over the potion with a wink.");
        }
        Some(0) => scene.say("You cannot afford it. The merchant shrugs."),
        _ => scene.say("The merchant moves on."),
    }
    Ok(Outcome::Continue)
}

fn village_festival(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    scene.player.gold += 10;
    scene.say("The village is celebrating the harvest. A grateful farmer gives you 10 gold.");
    Ok(Outcome::Continue)
}

fn fairy_ring(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let healed = scene.player.heal(25);
    scene.say(format!(
        "You step into a ring of pale mushrooms and feel renewed. You recover {healed} health."
    ));
    Ok(Outcome::Continue)
}

fn bandit_ambush(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    scene.say("Bandits leap from the undergrowth!");
    encounter_named(scene, "bandit")
}

fn cave_in(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    scene.say("The ceiling groans and rocks rain down on you. You take 10 damage.");
    Ok(hurt(scene, 10))
}

fn glowing_crystals(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let name = add_item(scene.player, "Vitality Tonic");
    scene.say(format!("Behind a seam of glowing crystals you find a {name}."));
    Ok(Outcome::Continue)
}

fn cursed_idol(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    scene.say("You brush against a grinning idol and it bursts into flame!");
    if Affliction::offer(&mut scene.player.affliction, Affliction::burn()) {
        scene.say("You are burning.");
    } else {
        scene.say("The flames fail to catch.");
    }
    Ok(Outcome::Continue)
}

fn forgotten_armory(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let name = add_item(scene.player, "Silver Sword");
    scene.say(format!(
        "Among rusted racks in a forgotten armory, one blade still gleams: a {name}."
    ));
    Ok(Outcome::Continue)
}

fn arcane_surge(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let name = add_item(scene.player, "Strength Elixir");
    scene.say(format!("Raw magic crackles through the tower and condenses into a {name}."));
    Ok(Outcome::Continue)
}

fn restless_spirits(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    scene.say("A chill fills the air as the dead of the tower stir.");
    encounter_named(scene, "frost wraith")
}

fn shipwreck(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let gold = scene.rng.random_range(10..=20);
    scene.player.gold += gold;
    scene.say(format!("You pick through a shipwreck on the sand and recover {gold} gold."));
    Ok(Outcome::Continue)
}

fn rogue_wave(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    scene.say("A rogue wave slams you against the rocks. You take 8 damage.");
    Ok(hurt(scene, 8))
}

fn siren_song(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    let lost = scene.player.lose_gold(10);
    scene.say(format!(
        "A haunting song drifts over the water. When you come to your senses, {lost} gold is gone."
    ));
    Ok(Outcome::Continue)
}

fn buried_chest(scene: &mut Scene<'_>) -> CoreResult<Outcome> {
    add_item(scene.player, "Gold Coin");
    scene.player.gold += 20;
    scene.say("You dig up a buried chest holding 20 gold and an old Gold Coin.");
    Ok(Outcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ew_core::{GameContent, Player, ScriptedPresenter};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Harness {
        player: Player,
        content: GameContent,
        presenter: ScriptedPresenter,
        rng: StdRng,
    }

    impl Harness {
        fn new(inputs: &[&str]) -> Self {
            Self {
                player: Player::new("Ada", 100, 20),
                content: GameContent::builtin(),
                presenter: ScriptedPresenter::new(inputs.iter().copied()),
                rng: StdRng::seed_from_u64(5),
            }
        }

        fn run(&mut self, f: impl FnOnce(&mut Scene<'_>) -> CoreResult<Outcome>) -> Outcome {
            let mut scene = Scene::new(
                &mut self.player,
                &self.content,
                &mut self.presenter,
                &mut self.rng,
            );
            f(&mut scene).unwrap()
        }
    }

    #[test]
    fn accepted_ally_grants_bonuses_once() {
        let mut h = Harness::new(&["1", "1", "1", "1"]);
        for _ in 0..4 {
            h.run(find_ally);
        }
        assert_eq!(h.player.allies.len(), 3);
        assert_eq!(h.player.damage_bonus, 15);
        assert_eq!(h.player.health_bonus, 20);
        assert!(h.presenter.saw("no one new"));
    }

    #[test]
    fn hesitating_loses_the_ally() {
        let mut h = Harness::new(&["maybe"]);
        h.run(find_ally);
        assert!(h.player.allies.is_empty());
        assert!(h.presenter.saw("leaves while you hesitate"));
    }

    #[test]
    fn investigating_finds_treasure() {
        let mut h = Harness::new(&["1"]);
        h.run(discover_mystery);
        assert_eq!(h.player.inventory.len(), 1);

        let mut h = Harness::new(&["2"]);
        h.run(discover_mystery);
        assert!(h.player.inventory.is_empty());
    }

    #[test]
    fn quiet_content_never_prompts() {
        for seed in 0..20 {
            let mut h = Harness::new(&[]);
            h.content = GameContent::default();
            h.rng = StdRng::seed_from_u64(seed);
            assert_eq!(h.run(|scene| dispatch(scene, &[])), Outcome::Continue);
        }
    }

    #[test]
    fn treasure_with_empty_pool() {
        let mut h = Harness::new(&[]);
        h.content.treasure_pool.clear();
        h.run(|scene| {
            find_treasure(scene);
            Ok(Outcome::Continue)
        });
        assert!(h.presenter.saw("nothing of value"));
    }

    #[test]
    fn malformed_enemy_is_skipped() {
        let mut h = Harness::new(&[]);
        h.content.enemies.truncate(1);
        h.content.enemies[0].health = 0;
        assert_eq!(h.run(encounter_enemy), Outcome::Continue);
        assert!(h.presenter.saw("fades away"));
    }

    #[test]
    fn cave_in_can_be_fatal() {
        let mut h = Harness::new(&[]);
        h.player.health = 5;
        assert_eq!(h.run(UniqueEvent::CaveIn.handler()), Outcome::Defeated);
        assert!(h.presenter.saw("Game Over"));
    }

    #[test]
    fn cursed_idol_burns() {
        let mut h = Harness::new(&[]);
        h.run(UniqueEvent::CursedIdol.handler());
        assert_eq!(h.player.affliction, Some(Affliction::burn()));
    }

    #[test]
    fn merchant_needs_gold() {
        let mut h = Harness::new(&["1", "1"]);
        h.run(UniqueEvent::TravelingMerchant.handler());
        assert!(h.player.has_item("Healing Potion"));
        assert_eq!(h.player.gold, 10);
        h.player.gold = 3;
        h.run(UniqueEvent::TravelingMerchant.handler());
        assert_eq!(h.player.item_count("Healing Potion"), 1);
        assert_eq!(h.player.gold, 3);
    }

    #[test]
    fn dispatch_without_unique_events_runs_generic() {
        let eager = ["1"; 200];
        for seed in 0..30 {
            let mut h = Harness::new(&eager);
            h.rng = StdRng::seed_from_u64(seed);
            h.player.health = 10_000;
            assert_eq!(h.run(|scene| dispatch(scene, &[])), Outcome::Continue);
        }
    }

    #[test]
    fn dispatch_mixes_room_events_with_generic_ones() {
        let eager = vec!["1"; 5000];
        let mut h = Harness::new(&eager);
        h.player.health = 10_000;
        let room = [UniqueEvent::VillageFestival, UniqueEvent::FairyRing];
        for _ in 0..100 {
            assert_eq!(h.run(|scene| dispatch(scene, &room)), Outcome::Continue);
        }
        let count = |needle: &str| {
            h.presenter
                .lines
                .iter()
                .filter(|l| l.contains(needle))
                .count()
        };
        let festivals = count("The village is celebrating");
        let rings = count("ring of pale mushrooms");
        assert!(festivals > 0 && rings > 0);
        assert!((15..=50).contains(&(festivals + rings)), "{festivals} + {rings}");
        assert_eq!(count("traveling merchant"), 0);
        assert_eq!(count("rogue wave"), 0);
    }

    #[test]
    fn every_unique_event_has_a_handler() {
        for event in UniqueEvent::ALL {
            let mut h = Harness::new(&["1"; 100]);
            h.player.health = 10_000;
            assert_eq!(h.run(event.handler()), Outcome::Continue, "{}", event.name());
        }
    }
}
