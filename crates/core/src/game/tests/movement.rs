use crate::action::GameAction;
use crate::config::GameConfig;
use crate::game::test_support::{ARENA, arena_state, exact_config, state_on};
use crate::game::{Rejection, apply, reduce};
use crate::geometry::{MoveDirection, Position};
use crate::state::{GameState, Map};
use crate::types::{GameStatus, SoundCue, Terrain, Visibility};

fn step(state: &GameState, direction: MoveDirection) -> GameState {
    reduce(state, &GameAction::MovePlayer(direction))
}

#[test]
fn moving_into_a_wall_leaves_the_state_deep_equal() {
    let state = arena_state(Position::new(1, 1));
    let next = step(&state, MoveDirection::Up);
    assert_eq!(next, state);

    let mut scratch = state.clone();
    assert_eq!(
        apply(&mut scratch, &GameAction::MovePlayer(MoveDirection::Up)),
        Err(Rejection::Blocked(Position::new(0, 1)))
    );
}

#[test]
fn moving_off_the_map_edge_is_rejected() {
    let state = state_on(&["...", "...", "..>"], Position::new(0, 0));
    let mut scratch = state.clone();
    assert_eq!(
        apply(&mut scratch, &GameAction::MovePlayer(MoveDirection::Left)),
        Err(Rejection::OutOfBounds(Position::new(0, -1)))
    );
    assert_eq!(step(&state, MoveDirection::Left), state);
}

#[test]
fn moving_from_the_edge_of_the_coordinate_space_is_rejected() {
    let far = Position::new(i32::MAX, 1);
    let arena = Map::from_rows(&ARENA, "fixture");
    let mut state = reduce(&GameState::initial(), &GameAction::InitPlayerSpawn(far));
    state = reduce(&state, &GameAction::SetCurrentMap(arena));
    assert_eq!(state.player.position, far);

    let mut scratch = state.clone();
    assert_eq!(
        apply(&mut scratch, &GameAction::MovePlayer(MoveDirection::Down)),
        Err(Rejection::OutOfBounds(far))
    );
    assert_eq!(step(&state, MoveDirection::Down), state);
    assert_eq!(
        apply(&mut scratch, &GameAction::MovePlayer(MoveDirection::Up)),
        Err(Rejection::OutOfBounds(Position::new(i32::MAX - 1, 1)))
    );
}

#[test]
fn empty_rock_blocks_movement() {
    let state = state_on(&["#####", "#. >#", "#####"], Position::new(1, 1));
    assert_eq!(step(&state, MoveDirection::Right), state);
}

#[test]
fn a_step_moves_the_player_and_consumes_a_turn() {
    let state = arena_state(Position::new(2, 2));
    let next = step(&state, MoveDirection::Down);

    assert_eq!(next.player.position, Position::new(3, 2));
    assert_eq!(next.move_direction, MoveDirection::Down);
    assert_eq!(next.turn, state.turn + 1);
    assert_eq!(state.player.position, Position::new(2, 2), "input state must not change");
}

#[test]
fn moving_without_a_map_is_ignored() {
    let state = GameState::initial();
    let mut scratch = state.clone();
    assert_eq!(
        apply(&mut scratch, &GameAction::MovePlayer(MoveDirection::Down)),
        Err(Rejection::NoMap)
    );
    assert_eq!(step(&state, MoveDirection::Down), state);
}

#[test]
fn finished_runs_ignore_movement() {
    for status in [GameStatus::Won, GameStatus::Lost] {
        let mut state = arena_state(Position::new(2, 2));
        state.status = status;
        assert_eq!(step(&state, MoveDirection::Down), state);
    }
}

#[test]
fn stepping_refreshes_sight_around_the_new_position() {
    let rows = [
        "###########",
        "#.........#",
        "#########.#",
        "#.>.......#",
        "###########",
    ];
    let state = state_on(&rows, Position::new(1, 1));
    let far = Position::new(3, 1);
    assert_eq!(state.map().map(|map| map.visibility_at(far)), Some(Visibility::Unseen));

    let mut walked = state;
    for direction in [MoveDirection::Right; 8] {
        walked = step(&walked, direction);
    }
    for direction in [MoveDirection::Down, MoveDirection::Down, MoveDirection::Left] {
        walked = step(&walked, direction);
    }
    let map = walked.map().expect("map stays loaded");
    assert_eq!(walked.player.position, Position::new(3, 8));
    assert_eq!(map.visibility_at(Position::new(3, 4)), Visibility::Visible);
    assert_eq!(map.visibility_at(Position::new(1, 1)), Visibility::Remembered);
}

#[test]
fn stairs_on_the_last_depth_win_the_run() {
    let mut state = arena_state(Position::new(5, 4));
    state.config.max_depth = 1;
    let next = step(&state, MoveDirection::Right);

    assert_eq!(next.status, GameStatus::Won);
    assert_eq!(next.player.position, Position::new(5, 5));
    assert!(next.sound_cues.contains(&SoundCue::StairsUsed));
    assert_eq!(next.event_log.last().map(String::as_str), Some("You escape the dungeon!"));
    assert_eq!(step(&next, MoveDirection::Left), next, "a won run accepts no more moves");
}

#[test]
fn stairs_below_the_last_depth_install_the_next_level() {
    let mut state = arena_state(Position::new(5, 4));
    state.config = GameConfig { max_depth: 3, ..exact_config() };
    let next = step(&state, MoveDirection::Right);

    assert_eq!(next.status, GameStatus::Playing);
    assert_eq!(next.depth, 2);
    let map = next.map().expect("next level is loaded");
    assert_eq!((map.width(), map.height()), (next.config.map_width, next.config.map_height));
    assert_ne!(map.width(), ARENA[0].len());
    assert!(map.is_passable(next.player.position));
    assert_eq!(map.visibility_at(next.player.position), Visibility::Visible);
    assert_eq!(map.creature_at(next.player.position), None);
    assert!(next.sound_cues.contains(&SoundCue::StairsUsed));
    assert!(next.event_log.iter().any(|line| line == "You descend to depth 2."));
    assert_eq!(next.rolls, state.rolls, "descending keeps the run's roll stream");
}

#[test]
fn failed_level_generation_leaves_the_player_on_the_stairs() {
    let mut state = arena_state(Position::new(5, 4));
    state.config.map_width = 3;
    let next = step(&state, MoveDirection::Right);

    assert_eq!(next.depth, 1);
    assert_eq!(next.status, GameStatus::Playing);
    assert_eq!(next.player.position, Position::new(5, 5));
    assert_eq!(next.map().map(|map| map.terrain_at(Position::new(5, 5))), Some(Terrain::Stairs));
    assert_eq!(next.event_log.last().map(String::as_str), Some("You cannot find a way down."));
}
