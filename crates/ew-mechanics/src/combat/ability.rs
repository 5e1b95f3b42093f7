//! Enemy ability effects.
//!
//! Each [`Ability`] maps to one effect function through [`effect_for`]. An
//! effect mutates the clash and returns its narration.

use rand::Rng;
use rand::rngs::StdRng;

use ew_core::{Ability, Affliction, Enemy, Player};

use crate::dice::{chance, roll_damage};

/// Chance that a critical strike doubles its damage.
const CRITICAL_STRIKE_CHANCE: f64 = 0.3;
/// Damage-bonus lost to a freeze.
const FREEZE_PENALTY: i32 = 5;

/// The two combatants during the enemy's phase.
pub struct Clash<'a> {
    /// The acting enemy.
    pub enemy: &'a mut Enemy,
    /// The player.
    pub player: &'a mut Player,
    /// Random source.
    pub rng: &'a mut StdRng,
    /// Set when the player's damage bonus should be halved for a round.
    pub weaken: bool,
}

/// An ability effect.
pub type Effect = fn(&mut Clash<'_>) -> Vec<String>;

/// The effect function for an ability.
pub fn effect_for(ability: Ability) -> Effect {
    match ability {
        Ability::None => plain_attack,
        Ability::QuickStrike => quick_strike,
        Ability::Berserk => berserk,
        Ability::Regeneration => regeneration,
        Ability::StealGold => steal_gold,
        Ability::MagicBlast => magic_blast,
        Ability::PackTactics => pack_tactics,
        Ability::StoneSkin => stone_skin,
        Ability::CriticalStrike => critical_strike,
        Ability::Burn => burn,
        Ability::Freeze => freeze,
    }
}

fn hit(clash: &mut Clash<'_>, damage: i32, how: &str) -> String {
    clash.player.health -= damage;
    format!("The {} {how} and deals {damage} damage.", clash.enemy.name)
}

/// The default attack.
pub fn plain_attack(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage);
    vec![hit(clash, damage, "attacks you")]
}

fn quick_strike(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage + 5);
    vec![hit(clash, damage, "darts in with a quick strike")]
}

fn berserk(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage * 2);
    vec![hit(clash, damage, "flies into a berserk rage")]
}

fn regeneration(clash: &mut Clash<'_>) -> Vec<String> {
    let healed = clash.rng.random_range(10..=20);
    clash.enemy.health += healed;
    vec![format!("The {} regenerates {healed} health.", clash.enemy.name)]
}

fn steal_gold(clash: &mut Clash<'_>) -> Vec<String> {
    let amount = clash.rng.random_range(5..=15);
    let stolen = clash.player.lose_gold(amount);
    if stolen == 0 {
        vec![format!(
            "The {} grabs at your purse but finds it empty.",
            clash.enemy.name
        )]
    } else {
        vec![format!("The {} steals {stolen} gold!", clash.enemy.name)]
    }
}

fn magic_blast(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage);
    vec![hit(clash, damage, "hurls a magic blast")]
}

fn pack_tactics(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage + 5);
    vec![hit(clash, damage, "calls its pack to flank you")]
}

fn stone_skin(clash: &mut Clash<'_>) -> Vec<String> {
    clash.weaken = true;
    vec![format!(
        "The {}'s skin hardens to stone. Your strikes feel feeble.",
        clash.enemy.name
    )]
}

fn critical_strike(clash: &mut Clash<'_>) -> Vec<String> {
    if chance(clash.rng, CRITICAL_STRIKE_CHANCE) {
        let damage = roll_damage(clash.rng, clash.enemy.damage) * 2;
        vec![hit(clash, damage, "lands a critical strike")]
    } else {
        plain_attack(clash)
    }
}

fn burn(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage);
    let mut lines = vec![hit(clash, damage, "engulfs you in flame")];
    if Affliction::offer(&mut clash.player.affliction, Affliction::burn()) {
        lines.push("You are burning!".to_string());
    }
    lines
}

fn freeze(clash: &mut Clash<'_>) -> Vec<String> {
    let damage = roll_damage(clash.rng, clash.enemy.damage);
    let mut lines = vec![hit(clash, damage, "breathes a freezing mist")];
    clash.player.damage_bonus = (clash.player.damage_bonus - FREEZE_PENALTY).max(0);
    lines.push("The cold numbs your arms. Your damage bonus drops.".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn run(ability: Ability, player: &mut Player, enemy: &mut Enemy) -> (Vec<String>, bool) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut clash = Clash {
            enemy,
            player,
            rng: &mut rng,
            weaken: false,
        };
        let lines = effect_for(ability)(&mut clash);
        (lines, clash.weaken)
    }

    fn enemy(ability: Ability) -> Enemy {
        Enemy::new("beast", 50, 8, ability, "")
    }

    #[test]
    fn freeze_lowers_damage_bonus_to_floor() {
        let mut p = Player::new("Ada", 100, 0);
        p.damage_bonus = 3;
        let mut e = enemy(Ability::Freeze);
        run(Ability::Freeze, &mut p, &mut e);
        assert_eq!(p.damage_bonus, 0);
        assert_eq!(p.health, 92);

        p.damage_bonus = 12;
        run(Ability::Freeze, &mut p, &mut e);
        assert_eq!(p.damage_bonus, 7);
    }

    #[test]
    fn fixed_damage_abilities() {
        let cases = [
            (Ability::None, 8),
            (Ability::QuickStrike, 13),
            (Ability::Berserk, 16),
            (Ability::MagicBlast, 8),
            (Ability::PackTactics, 13),
        ];
        for (ability, expected) in cases {
            let mut p = Player::new("Ada", 100, 0);
            let mut e = enemy(ability);
            run(ability, &mut p, &mut e);
            assert_eq!(100 - p.health, expected, "{ability}");
        }
    }

    #[test]
    fn critical_strike_is_normal_or_double() {
        let mut p = Player::new("Ada", 100, 0);
        let mut e = enemy(Ability::CriticalStrike);
        run(Ability::CriticalStrike, &mut p, &mut e);
        assert!(p.health == 92 || p.health == 84);
    }

    #[test]
    fn burn_applies_affliction() {
        let mut p = Player::new("Ada", 100, 0);
        let mut e = enemy(Ability::Burn);
        let (lines, _) = run(Ability::Burn, &mut p, &mut e);
        assert_eq!(p.health, 92);
        assert_eq!(p.affliction, Some(Affliction::burn()));
        assert!(lines.iter().any(|l| l.contains("burning")));
    }

    #[test]
    fn regeneration_heals_ten_to_twenty() {
        let mut p = Player::new("Ada", 100, 0);
        let mut e = enemy(Ability::Regeneration);
        let (lines, _) = run(Ability::Regeneration, &mut p, &mut e);
        assert!((60..=70).contains(&e.health), "{}", e.health);
        assert!(lines[0].contains(&format!("regenerates {}", e.health - 50)));
        e.health = 10;
        run(Ability::Regeneration, &mut p, &mut e);
        assert!((20..=30).contains(&e.health));
        assert_eq!(p.health, 100);
    }

    #[test]
    fn steal_gold_never_overdraws() {
        let mut p = Player::new("Ada", 100, 3);
        let mut e = enemy(Ability::StealGold);
        run(Ability::StealGold, &mut p, &mut e);
        assert_eq!(p.gold, 0);
        let (lines, _) = run(Ability::StealGold, &mut p, &mut e);
        assert!(lines[0].contains("empty"));

        p.gold = 100;
        run(Ability::StealGold, &mut p, &mut e);
        assert!((85..=95).contains(&p.gold));
    }

    #[test]
    fn stone_skin_requests_weakening() {
        let mut p = Player::new("Ada", 100, 0);
        let mut e = enemy(Ability::StoneSkin);
        let (_, weaken) = run(Ability::StoneSkin, &mut p, &mut e);
        assert!(weaken);
        assert_eq!(p.health, 100);
    }
}
