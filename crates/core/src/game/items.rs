//! Loot pickup and inventory use.

use crate::content::{
    self, HEALING_POTION_AMOUNT, OnHitCondition, REGENERATION_INTENSITY, REGENERATION_TURNS,
};
use crate::geometry::Position;
use crate::state::GameState;
use crate::types::{ConditionKind, Item, PotionKind, SoundCue};

use super::Rejection;
use super::conditions::inflict;
use super::events::GameEvent;
use super::turn::{begin_turn, end_turn};

/// Takes whatever lies on `position`. Equipment goes straight to a free slot.
pub(super) fn pick_up(state: &mut GameState, position: Position) {
    let Some(item) = state
        .current_map
        .as_mut()
        .and_then(|map| map.cell_mut(position))
        .and_then(|cell| cell.item.take())
    else {
        return;
    };

    match item {
        Item::Gold { amount } => {
            state.player.gold = state.player.gold.saturating_add(amount);
            let cue = if content::is_large_gold(amount) {
                SoundCue::LootLarge
            } else {
                SoundCue::LootSmall
            };
            state.sound_cues.push(cue);
            state.push_log(GameEvent::PickedUpGold { amount }.to_string());
        }
        Item::Potion(_) => {
            state.sound_cues.push(SoundCue::ItemPickup);
            state.player.inventory.push(item);
            state.push_log(GameEvent::PickedUp { item }.to_string());
        }
        Item::Weapon(_) | Item::Armor(_) => {
            state.sound_cues.push(SoundCue::ItemPickup);
            let slot_taken =
                item.equip_slot().is_some_and(|slot| state.player.equipped_in(slot).is_some());
            if slot_taken {
                state.player.inventory.push(item);
                state.push_log(GameEvent::PickedUp { item }.to_string());
            } else {
                state.player.equipped.push(item);
                state.push_log(GameEvent::Equipped { item }.to_string());
            }
        }
    }
}

/// Drinks a potion or equips an item from `index`, then lets the rest of the turn play out.
pub(super) fn use_item(state: &mut GameState, index: usize) -> Result<(), Rejection> {
    if state.status.is_terminal() {
        return Err(Rejection::NotPlaying);
    }
    let item = *state.player.inventory.get(index).ok_or(Rejection::NoSuchItem(index))?;
    if matches!(item, Item::Gold { .. }) {
        return Err(Rejection::NotUsable);
    }

    begin_turn(state);
    state.player.inventory.remove(index);
    match item {
        Item::Potion(PotionKind::Healing) => {
            let before = state.player.hp;
            state.player.hp = (state.player.hp + HEALING_POTION_AMOUNT).min(state.player.max_hp);
            let amount = state.player.hp - before;
            state.push_log(GameEvent::Healed { amount }.to_string());
        }
        Item::Potion(PotionKind::Regeneration) => {
            let regeneration = OnHitCondition {
                kind: ConditionKind::Regenerating,
                turns: REGENERATION_TURNS,
                intensity: REGENERATION_INTENSITY,
            };
            inflict(&mut state.player.conditions, regeneration);
            let started = GameEvent::ConditionStarted { kind: ConditionKind::Regenerating };
            state.push_log(started.to_string());
        }
        Item::Weapon(_) | Item::Armor(_) => {
            if let Some(slot) = item.equip_slot()
                && let Some(worn) = state.player.equipped_in(slot)
            {
                let previous = state.player.equipped.remove(worn);
                state.player.inventory.insert(index, previous);
                state.push_log(GameEvent::Unequipped { item: previous }.to_string());
            }
            state.player.equipped.push(item);
            state.push_log(GameEvent::Equipped { item }.to_string());
        }
        Item::Gold { .. } => return Err(Rejection::NotUsable),
    }
    end_turn(state, None, false);
    Ok(())
}
