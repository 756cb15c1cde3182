//! Strike and encounter resolution.
//! This module exists to keep combat arithmetic pure: every roll comes from a `RollStream`
//! the caller owns, so identical inputs always produce identical encounters.
//! It does not remove dead creatures or write the event log.

use serde::{Deserialize, Serialize};

use crate::config::CombatConfig;
use crate::mapgen::mix_seed_stream;
use crate::state::{Creature, PlayerState};

/// Counter-based roll source stored in the game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollStream {
    seed: u64,
    cursor: u64,
}

impl RollStream {
    pub fn new(seed: u64) -> Self {
        Self { seed, cursor: 0 }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Uniform roll in `0..100`.
    pub fn next_percent(&mut self) -> u8 {
        let value = mix_seed_stream(self.seed, self.cursor);
        self.cursor = self.cursor.wrapping_add(1);
        (value % 100) as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl From<&PlayerState> for Combatant {
    fn from(player: &PlayerState) -> Self {
        Self { hp: player.hp, attack: player.attack(), defense: player.defense() }
    }
}

impl From<&Creature> for Combatant {
    fn from(creature: &Creature) -> Self {
        Self { hp: creature.hp, attack: creature.attack, defense: creature.defense }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strike {
    Miss,
    Hit { damage: i32 },
    Critical { damage: i32 },
}

impl Strike {
    pub fn damage(self) -> i32 {
        match self {
            Strike::Miss => 0,
            Strike::Hit { damage } | Strike::Critical { damage } => damage,
        }
    }

    pub fn landed(self) -> bool {
        !matches!(self, Strike::Miss)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterOutcome {
    CreatureSlain,
    PlayerSlain,
    Exchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub damage_to_player: i32,
    pub damage_to_creature: i32,
    pub player_strike: Strike,
    /// `None` when the creature died before it could answer.
    pub creature_strike: Option<Strike>,
    pub outcome: EncounterOutcome,
}

/// A hit deals `attack - defense`, never less than 1 unless the attacker has no attack at all.
pub fn strike_damage(attack: i32, defense: i32) -> i32 {
    if attack <= 0 { 0 } else { attack.saturating_sub(defense).max(1) }
}

pub fn resolve_strike(
    attacker: Combatant,
    defender: Combatant,
    config: &CombatConfig,
    rolls: &mut RollStream,
) -> Strike {
    if rolls.next_percent() >= config.hit_chance_percent {
        return Strike::Miss;
    }
    let damage = strike_damage(attacker.attack, defender.defense);
    if rolls.next_percent() < config.crit_chance_percent {
        Strike::Critical { damage: damage.saturating_mul(config.crit_multiplier) }
    } else {
        Strike::Hit { damage }
    }
}

/// The player always strikes first; the creature answers only if it survives.
pub fn resolve_encounter(
    player: &Combatant,
    creature: &Creature,
    config: &CombatConfig,
    rolls: &mut RollStream,
) -> Encounter {
    let foe = Combatant::from(creature);
    let player_strike = resolve_strike(*player, foe, config, rolls);
    let damage_to_creature = player_strike.damage();
    if foe.hp.saturating_sub(damage_to_creature) <= 0 {
        return Encounter {
            damage_to_player: 0,
            damage_to_creature,
            player_strike,
            creature_strike: None,
            outcome: EncounterOutcome::CreatureSlain,
        };
    }

    let creature_strike = resolve_strike(foe, *player, config, rolls);
    let damage_to_player = creature_strike.damage();
    let outcome = if player.hp.saturating_sub(damage_to_player) <= 0 {
        EncounterOutcome::PlayerSlain
    } else {
        EncounterOutcome::Exchanged
    };
    Encounter {
        damage_to_player,
        damage_to_creature,
        player_strike,
        creature_strike: Some(creature_strike),
        outcome,
    }
}
