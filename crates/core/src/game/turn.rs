//! Turn bookkeeping: player attacks, the creature phase, and the end-of-turn checks.

use log::{info, trace};

use crate::content::{CRITICAL_BLEED, species_template};
use crate::creatures::{
    Combatant, CreatureAction, EncounterOutcome, Occupancy, Strike, choose_action,
    resolve_encounter, resolve_strike,
};
use crate::state::GameState;
use crate::types::{CreatureId, GameStatus, SoundCue, Species};

use super::conditions::{self, inflict};
use super::events::GameEvent;

pub(super) fn begin_turn(state: &mut GameState) {
    state.turn += 1;
    state.sound_cues.clear();
}

/// Creature phase (unless the level just changed), condition tick, then the defeat check.
pub(super) fn end_turn(state: &mut GameState, engaged: Option<&CreatureId>, level_changed: bool) {
    if !level_changed && is_contested(state) {
        creature_phase(state, engaged);
    }
    if is_contested(state) {
        conditions::tick_player(state);
    }
    if state.status == GameStatus::Playing && state.player.hp <= 0 {
        state.status = GameStatus::Lost;
        state.push_log(GameEvent::PlayerDied.to_string());
        info!("run lost at depth {} after {} turns", state.depth, state.turn);
    }
}

fn is_contested(state: &GameState) -> bool {
    state.status == GameStatus::Playing && state.player.hp > 0
}

pub(super) fn player_attacks(state: &mut GameState, id: &CreatureId) {
    let Some(creature) = state.creatures.get(id) else {
        return;
    };
    let species = creature.species;
    let player = Combatant::from(&state.player);
    let encounter = resolve_encounter(&player, creature, &state.config.combat, &mut state.rolls);
    trace!("encounter with {id}: {encounter:?}");

    let (cue, event) = match encounter.player_strike {
        Strike::Miss => (SoundCue::AttackMiss, GameEvent::PlayerMiss { target: species }),
        Strike::Hit { damage } => {
            (SoundCue::AttackHit, GameEvent::PlayerHit { target: species, damage })
        }
        Strike::Critical { damage } => {
            (SoundCue::AttackCritical, GameEvent::PlayerCritical { target: species, damage })
        }
    };
    state.sound_cues.push(cue);
    state.push_log(event.to_string());

    if encounter.outcome == EncounterOutcome::CreatureSlain {
        kill_creature(state, id);
        return;
    }
    if let Some(creature) = state.creatures.get_mut(id) {
        creature.hp = creature.hp.saturating_sub(encounter.damage_to_creature);
        if encounter.damage_to_creature > 0 {
            state.sound_cues.push(SoundCue::CreaturePain(species));
        }
        if matches!(encounter.player_strike, Strike::Critical { .. }) {
            inflict(&mut creature.conditions, CRITICAL_BLEED);
        }
    }
    if let Some(strike) = encounter.creature_strike {
        suffer_strike(state, species, strike);
    }
}

fn suffer_strike(state: &mut GameState, attacker: Species, strike: Strike) {
    state.sound_cues.push(SoundCue::CreatureAttack(attacker));
    if !strike.landed() {
        state.push_log(GameEvent::CreatureMiss { attacker }.to_string());
        return;
    }
    let damage = strike.damage();
    state.player.hp = state.player.hp.saturating_sub(damage);
    state.push_log(GameEvent::CreatureHit { attacker, damage }.to_string());
    if state.player.hp > 0
        && let Some(on_hit) = species_template(attacker).on_hit
        && inflict(&mut state.player.conditions, on_hit)
    {
        state.push_log(GameEvent::ConditionStarted { kind: on_hit.kind }.to_string());
    }
}

fn kill_creature(state: &mut GameState, id: &CreatureId) {
    let Some(map) = state.current_map.as_mut() else {
        return;
    };
    let removed = Occupancy::new(map, &mut state.creatures).remove(id);
    if let Some(creature) = removed {
        state.sound_cues.push(SoundCue::CreatureDeath(creature.species));
        state.push_log(GameEvent::CreatureDied { species: creature.species }.to_string());
        trace!("{id} died at {:?}", creature.position);
    }
}

/// Every creature in id order: conditions first, then its action. The creature the player just
/// fought only suffers its conditions.
fn creature_phase(state: &mut GameState, engaged: Option<&CreatureId>) {
    let ids: Vec<CreatureId> = state.creatures.keys().cloned().collect();
    for id in ids {
        if state.player.hp <= 0 {
            break;
        }
        if !tick_creature_conditions(state, &id) || engaged == Some(&id) {
            continue;
        }

        let (Some(map), Some(creature)) = (state.current_map.as_ref(), state.creatures.get(&id))
        else {
            continue;
        };
        let action = choose_action(creature, state.player.position, map);
        let species = creature.species;
        let attacker = Combatant::from(creature);
        trace!("{id} chooses {action:?}");

        match action {
            CreatureAction::Attack => {
                let defender = Combatant::from(&state.player);
                let strike =
                    resolve_strike(attacker, defender, &state.config.combat, &mut state.rolls);
                suffer_strike(state, species, strike);
            }
            CreatureAction::Step(to) => {
                if let Some(map) = state.current_map.as_mut() {
                    Occupancy::new(map, &mut state.creatures).relocate(&id, to);
                }
            }
            CreatureAction::Idle => {}
        }
    }
}

/// Returns false when the creature is gone afterwards.
fn tick_creature_conditions(state: &mut GameState, id: &CreatureId) -> bool {
    let Some(creature) = state.creatures.get_mut(id) else {
        return false;
    };
    let effects = conditions::tick(&mut creature.conditions);
    let mut bled = 0;
    for effect in effects {
        if effect.hp_delta < 0 {
            bled -= effect.hp_delta;
        } else {
            creature.hp = (creature.hp + effect.hp_delta).min(creature.max_hp);
        }
    }
    if bled == 0 {
        return true;
    }
    creature.hp -= bled;
    let species = creature.species;
    let alive = creature.hp > 0;
    state.push_log(GameEvent::CreatureBleeds { species, damage: bled }.to_string());
    if !alive {
        kill_creature(state, id);
    }
    alive
}
