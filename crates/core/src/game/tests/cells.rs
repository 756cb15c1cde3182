use crate::action::{CellPatch, GameAction};
use crate::game::test_support::{add_creature, arena_state, creature};
use crate::game::{Rejection, apply, reduce};
use crate::geometry::Position;
use crate::state::GameState;
use crate::types::{Item, Species, Terrain, Visibility};

fn patch(position: Position, terrain: Terrain, item: Option<Item>) -> GameAction {
    GameAction::UpdateCell(CellPatch { position, terrain, item })
}

fn refused(state: &GameState, action: &GameAction) -> Option<Rejection> {
    let outcome = apply(&mut state.clone(), action).err();
    assert_eq!(&reduce(state, action), state, "a refused patch must not change the state");
    outcome
}

#[test]
fn patch_replaces_terrain_and_item_but_keeps_slot_and_sight() {
    let mut state = arena_state(Position::new(2, 2));
    let id = add_creature(&mut state, creature(Species::Goblin, 0, Position::new(3, 3), 4, 1));

    let gold = Some(Item::Gold { amount: 4 });
    let next = reduce(&state, &patch(Position::new(3, 3), Terrain::Floor, gold));
    let cell = next.map().and_then(|map| map.cell(Position::new(3, 3))).expect("cell exists");
    assert_eq!(cell.item, Some(Item::Gold { amount: 4 }));
    assert_eq!(cell.creature(), Some(&id));
    assert_eq!(cell.visibility, Visibility::Visible);
}

#[test]
fn walls_may_not_bury_the_player_or_a_creature() {
    let mut state = arena_state(Position::new(2, 2));
    add_creature(&mut state, creature(Species::Rat, 0, Position::new(3, 3), 3, 1));

    assert!(matches!(
        refused(&state, &patch(Position::new(2, 2), Terrain::Wall, None)),
        Some(Rejection::InvalidPatch(_))
    ));
    assert!(matches!(
        refused(&state, &patch(Position::new(3, 3), Terrain::Empty, None)),
        Some(Rejection::InvalidPatch(_))
    ));
}

#[test]
fn stairs_can_be_neither_added_nor_removed() {
    let state = arena_state(Position::new(2, 2));
    assert!(matches!(
        refused(&state, &patch(Position::new(1, 1), Terrain::Stairs, None)),
        Some(Rejection::InvalidPatch(_))
    ));
    assert!(matches!(
        refused(&state, &patch(Position::new(5, 5), Terrain::Floor, None)),
        Some(Rejection::InvalidPatch(_))
    ));

    let gold = Some(Item::Gold { amount: 1 });
    let with_gold = reduce(&state, &patch(Position::new(5, 5), Terrain::Stairs, gold));
    assert_eq!(
        with_gold.map().and_then(|map| map.cell(Position::new(5, 5))).and_then(|cell| cell.item),
        Some(Item::Gold { amount: 1 })
    );
}

#[test]
fn items_only_lie_on_open_ground() {
    let state = arena_state(Position::new(2, 2));
    let gold = Some(Item::Gold { amount: 2 });
    assert!(matches!(
        refused(&state, &patch(Position::new(1, 1), Terrain::Wall, gold)),
        Some(Rejection::InvalidPatch(_))
    ));
}

#[test]
fn walling_a_cell_drops_its_spawn_marker() {
    let mut state = arena_state(Position::new(2, 2));
    let marked = Position::new(4, 1);
    state
        .current_map
        .as_mut()
        .and_then(|map| map.cell_mut(marked))
        .expect("marker cell")
        .spawn_marker = Some(Species::Goblin);

    let next = reduce(&state, &patch(marked, Terrain::Wall, None));
    let cell = next.map().and_then(|map| map.cell(marked)).expect("cell exists");
    assert_eq!(cell.terrain, Terrain::Wall);
    assert_eq!(cell.spawn_marker, None);
}

#[test]
fn patches_need_a_map_and_an_in_bounds_cell() {
    let outside = Position::new(7, 0);
    assert_eq!(
        refused(&arena_state(Position::new(2, 2)), &patch(outside, Terrain::Floor, None)),
        Some(Rejection::OutOfBounds(outside))
    );
    assert_eq!(
        refused(&GameState::initial(), &patch(Position::new(0, 0), Terrain::Floor, None)),
        Some(Rejection::NoMap)
    );
}
