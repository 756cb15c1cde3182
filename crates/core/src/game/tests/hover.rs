use crate::action::GameAction;
use crate::game::test_support::{add_creature, arena_state, creature};
use crate::game::{describe_cell, reduce};
use crate::geometry::Position;
use crate::state::GameState;
use crate::types::{Item, PotionKind, Species, Visibility};

fn hover(state: &GameState, position: Position) -> GameState {
    reduce(state, &GameAction::HoverCell { position })
}

#[test]
fn hover_then_hover_away_touches_only_the_interaction_text() {
    let state = arena_state(Position::new(2, 2));
    let hovered = hover(&state, Position::new(1, 1));
    assert_eq!(hovered.interaction_text, "Stone floor.");

    let away = reduce(&hovered, &GameAction::HoverAwayFromCell);
    assert_eq!(away.interaction_text, "");
    assert_eq!(GameState { interaction_text: state.interaction_text.clone(), ..away }, state);
}

#[test]
fn hover_names_what_is_visible() {
    let mut state = arena_state(Position::new(2, 2));
    add_creature(&mut state, creature(Species::Rat, 0, Position::new(3, 3), 3, 1));
    state
        .current_map
        .as_mut()
        .and_then(|map| map.cell_mut(Position::new(1, 4)))
        .expect("item cell")
        .item = Some(Item::Potion(PotionKind::Healing));

    assert_eq!(describe_cell(&state, Position::new(2, 2)), "You, Kerhebos (20/20 hp).");
    assert_eq!(describe_cell(&state, Position::new(3, 3)), "A rat (3/3 hp).");
    assert_eq!(describe_cell(&state, Position::new(1, 4)), "You see a healing potion here.");
    assert_eq!(describe_cell(&state, Position::new(5, 5)), "Stairs leading down.");
    assert_eq!(describe_cell(&state, Position::new(0, 0)), "A rough stone wall.");
}

#[test]
fn hover_respects_fog_of_war() {
    let mut state = arena_state(Position::new(2, 2));
    add_creature(&mut state, creature(Species::Goblin, 0, Position::new(4, 4), 5, 1));
    let map = state.current_map.as_mut().expect("arena has a map");
    map.cell_mut(Position::new(4, 4)).expect("in bounds").visibility = Visibility::Remembered;
    map.cell_mut(Position::new(1, 1)).expect("in bounds").visibility = Visibility::Unseen;

    assert_eq!(
        describe_cell(&state, Position::new(4, 4)),
        "Stone floor. You remember it from earlier."
    );
    assert_eq!(describe_cell(&state, Position::new(1, 1)), "You have not explored this place.");
}

#[test]
fn hover_outside_the_map_or_without_one_is_blank() {
    let state = arena_state(Position::new(2, 2));
    assert_eq!(hover(&state, Position::new(-1, 3)).interaction_text, "");
    assert_eq!(hover(&GameState::initial(), Position::new(0, 0)).interaction_text, "");
}
