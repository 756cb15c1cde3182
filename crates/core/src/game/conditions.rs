//! Timed conditions: stacking rules and the once-per-turn tick.

use std::collections::BTreeMap;

use crate::content::OnHitCondition;
use crate::state::GameState;
use crate::types::{ActiveCondition, ConditionKind};

use super::events::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ConditionEffect {
    pub(super) kind: ConditionKind,
    pub(super) hp_delta: i32,
    pub(super) ended: bool,
}

/// Re-applying keeps the longer duration and the stronger intensity. Returns true if new.
pub(super) fn inflict(
    conditions: &mut BTreeMap<ConditionKind, ActiveCondition>,
    condition: OnHitCondition,
) -> bool {
    match conditions.get_mut(&condition.kind) {
        Some(active) => {
            active.remaining_turns = active.remaining_turns.max(condition.turns);
            active.intensity = active.intensity.max(condition.intensity);
            false
        }
        None => {
            conditions.insert(
                condition.kind,
                ActiveCondition {
                    remaining_turns: condition.turns,
                    intensity: condition.intensity,
                },
            );
            true
        }
    }
}

/// One turn of every condition: report its hp effect, count it down, drop it at zero.
pub(super) fn tick(
    conditions: &mut BTreeMap<ConditionKind, ActiveCondition>,
) -> Vec<ConditionEffect> {
    let mut effects = Vec::with_capacity(conditions.len());
    for (&kind, active) in conditions.iter_mut() {
        active.remaining_turns = active.remaining_turns.saturating_sub(1);
        effects.push(ConditionEffect {
            kind,
            hp_delta: kind.hp_delta(active.intensity),
            ended: active.remaining_turns == 0,
        });
    }
    conditions.retain(|_, active| active.remaining_turns > 0);
    effects
}

pub(super) fn tick_player(state: &mut GameState) {
    for effect in tick(&mut state.player.conditions) {
        let player = &mut state.player;
        if effect.hp_delta < 0 {
            player.hp += effect.hp_delta;
            let damage = -effect.hp_delta;
            state.push_log(GameEvent::ConditionDamage { kind: effect.kind, damage }.to_string());
        } else if effect.hp_delta > 0 {
            let before = player.hp;
            player.hp = (player.hp + effect.hp_delta).min(player.max_hp);
            let amount = player.hp - before;
            if amount > 0 {
                state.push_log(GameEvent::ConditionHealing { amount }.to_string());
            }
        }
        if effect.ended {
            state.push_log(GameEvent::ConditionEnded { kind: effect.kind }.to_string());
        }
    }
}
