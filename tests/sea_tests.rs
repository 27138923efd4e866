use std::cell::Cell;
use std::rc::Rc;

use seabattle::{
    Orientation, Position, Sea, SeaError, ShotResult, TileState, GRID_HEIGHT, GRID_WIDTH,
    NUM_SHIPS, SHIPS_SIZES,
};

/// Places the fleet on rows 0, 2, 4, 6 and 8, starting at column 0.
fn sea_with_fleet_on_even_rows() -> Sea {
    let mut sea = Sea::new();
    sea.put_next_ship_to_place();
    for row in 0..NUM_SHIPS {
        sea.position_ship_on_placing(Position::new(0, row * 2), Orientation::Horizontal)
            .unwrap();
        assert!(sea.is_ship_on_placing_in_valid_position());
        sea.validate_ship_placement();
    }
    sea
}

fn count_notifications(sea: &mut Sea) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    sea.subscribe(move |_: &Sea| seen.set(seen.get() + 1));
    count
}

#[test]
fn test_new_sea() {
    let sea = Sea::new();
    assert!(sea.ships().is_empty());
    assert!(sea.ship_on_placing().is_none());
    let lengths: Vec<_> = sea.ships_to_place().map(|s| s.length()).collect();
    assert_eq!(lengths, SHIPS_SIZES.to_vec());
    assert_eq!(Sea::ships_sizes(), &[5, 4, 3, 3, 2]);
    assert_eq!(sea.grid_width(), GRID_WIDTH);
    assert_eq!(sea.grid_height(), GRID_HEIGHT);
    assert_eq!(sea.all_normal_positions().len(), GRID_WIDTH * GRID_HEIGHT);
    assert!(!sea.are_ships_all_placed());
    assert!(!sea.are_ships_all_dead());
}

#[test]
fn test_put_next_ship_to_place_is_idempotent() {
    let mut sea = Sea::new();
    sea.put_next_ship_to_place();
    assert_eq!(sea.ship_on_placing().unwrap().length(), 5);
    sea.put_next_ship_to_place();
    assert_eq!(sea.ship_on_placing().unwrap().length(), 5);
    assert_eq!(sea.ships_to_place().len(), NUM_SHIPS - 1);
}

#[test]
fn test_placement_sequence() {
    let sea = sea_with_fleet_on_even_rows();
    assert!(sea.are_ships_all_placed());
    assert_eq!(sea.ships_to_place().len(), 0);
    assert!(sea.ship_on_placing().is_none());
    assert_eq!(sea.ships().len(), NUM_SHIPS);
    assert!(!sea.are_ships_all_dead());
}

#[test]
fn test_fleet_count_is_constant_during_placement() {
    let mut sea = Sea::new();
    let total = |sea: &Sea| {
        sea.ships().len() + sea.ships_to_place().len() + sea.ship_on_placing().map_or(0, |_| 1)
    };
    assert_eq!(total(&sea), NUM_SHIPS);
    sea.put_next_ship_to_place();
    for row in 0..NUM_SHIPS {
        assert_eq!(total(&sea), NUM_SHIPS);
        sea.position_ship_on_placing(Position::new(2, row), Orientation::Horizontal)
            .unwrap();
        sea.validate_ship_placement();
    }
    assert_eq!(total(&sea), NUM_SHIPS);
}

#[test]
fn test_overlap_rejected() {
    let mut sea = Sea::new();
    sea.put_next_ship_to_place();
    sea.position_ship_on_placing(Position::new(2, 2), Orientation::Horizontal)
        .unwrap();
    sea.commit_ship_on_placing().unwrap();

    // battleship crossing the carrier at (4, 2)
    sea.position_ship_on_placing(Position::new(4, 0), Orientation::Vertical)
        .unwrap();
    assert!(!sea.is_sea_tile_free(Position::new(4, 2)));
    assert!(!sea.is_ship_on_placing_in_valid_position());
    assert_eq!(sea.commit_ship_on_placing(), Err(SeaError::InvalidPlacement));
    assert_eq!(sea.ships().len(), 1);
    assert_eq!(sea.ship_on_placing().unwrap().length(), 4);

    sea.rotate_ship_on_placing().unwrap();
    assert_eq!(sea.ship_on_placing().unwrap().orientation(), Orientation::Horizontal);
    assert!(sea.is_ship_on_placing_in_valid_position());
}

#[test]
fn test_invalid_positions() {
    let mut sea = Sea::new();
    // nothing on placing
    assert!(!sea.is_ship_on_placing_in_valid_position());
    assert_eq!(
        sea.position_ship_on_placing(Position::new(0, 0), Orientation::Vertical),
        Err(SeaError::NoShipOnPlacing)
    );
    assert_eq!(sea.rotate_ship_on_placing(), Err(SeaError::NoShipOnPlacing));

    sea.put_next_ship_to_place();
    // origin unset
    assert!(!sea.is_ship_on_placing_in_valid_position());
    // origin off the sea
    sea.position_ship_on_placing(Position::new(GRID_WIDTH, 0), Orientation::Vertical)
        .unwrap();
    assert!(!sea.is_ship_on_placing_in_valid_position());
    // tail off the sea
    sea.position_ship_on_placing(Position::new(6, 0), Orientation::Horizontal)
        .unwrap();
    assert!(!sea.is_ship_on_placing_in_valid_position());
    sea.position_ship_on_placing(Position::new(5, 0), Orientation::Horizontal)
        .unwrap();
    assert!(sea.is_ship_on_placing_in_valid_position());

    assert!(!sea.is_sea_tile_free(Position::new(0, GRID_HEIGHT)));
}

#[test]
fn test_on_placing_ship_does_not_block_tiles() {
    let mut sea = Sea::new();
    sea.put_next_ship_to_place();
    sea.position_ship_on_placing(Position::new(0, 0), Orientation::Horizontal)
        .unwrap();
    assert!(sea.is_sea_tile_free(Position::new(0, 0)));
    sea.validate_ship_placement();
    assert!(!sea.is_sea_tile_free(Position::new(0, 0)));
}

#[test]
fn test_validate_without_ship_on_placing() {
    let mut sea = Sea::new();
    let notified = count_notifications(&mut sea);
    sea.validate_ship_placement();
    assert_eq!(notified.get(), 1);
    assert!(sea.ships().is_empty());
    // the queue advanced anyway
    assert_eq!(sea.ship_on_placing().unwrap().length(), 5);
    assert_eq!(sea.ships_to_place().len(), NUM_SHIPS - 1);

    let mut sea = sea_with_fleet_on_even_rows();
    assert_eq!(sea.commit_ship_on_placing(), Err(SeaError::NoShipOnPlacing));
    sea.validate_ship_placement();
    assert!(sea.are_ships_all_placed());
}

#[test]
fn test_receive_shot_hit_and_miss() {
    let mut sea = sea_with_fleet_on_even_rows();
    let notified = count_notifications(&mut sea);

    assert!(sea.receive_shot(Position::new(0, 0)));
    assert_eq!(sea.tile_state(Position::new(0, 0)), Some(TileState::Touched));
    assert!(sea.receive_shot(Position::new(0, 1)));
    assert_eq!(sea.tile_state(Position::new(0, 1)), Some(TileState::Shot));
    assert_eq!(notified.get(), 2);

    // second shot on the same cell is rejected without notification
    assert!(!sea.receive_shot(Position::new(0, 0)));
    assert!(!sea.receive_shot(Position::new(0, 1)));
    assert_eq!(notified.get(), 2);

    // off the sea
    assert!(!sea.receive_shot(Position::new(GRID_WIDTH, 0)));
    assert_eq!(sea.tile_state(Position::new(GRID_WIDTH, 0)), None);
    assert_eq!(notified.get(), 2);

    assert_eq!(sea.shots_fired(), 2);
    assert_eq!(sea.hits_landed(), 1);
    assert_eq!(sea.all_normal_positions().len(), GRID_WIDTH * GRID_HEIGHT - 2);
    assert!(!sea.all_normal_positions().contains(&Position::new(0, 0)));
}

#[test]
fn test_fire_at_reports_sink() {
    let mut sea = sea_with_fleet_on_even_rows();
    // destroyer sits on row 8, columns 0 and 1
    assert_eq!(sea.fire_at(Position::new(0, 8)), Ok(ShotResult::Hit));
    assert!(!sea.is_ship_sunk_at(Position::new(0, 8)));
    assert_eq!(sea.fire_at(Position::new(1, 8)), Ok(ShotResult::Sink("Destroyer")));
    assert!(sea.is_ship_sunk_at(Position::new(0, 8)));
    assert!(sea.is_ship_sunk_at(Position::new(1, 8)));
    assert_eq!(
        sea.fire_at(Position::new(1, 8)),
        Err(SeaError::AlreadyShot(Position::new(1, 8)))
    );
    assert_eq!(
        sea.fire_at(Position::new(0, GRID_HEIGHT)),
        Err(SeaError::OutOfBounds(Position::new(0, GRID_HEIGHT)))
    );
    assert_eq!(sea.fire_at(Position::new(5, 9)), Ok(ShotResult::Miss));
    assert!(!sea.is_ship_sunk_at(Position::new(5, 9)));
}

#[test]
fn test_all_dead_after_every_tile_shot() {
    let mut sea = sea_with_fleet_on_even_rows();
    let tiles: Vec<Position> = sea.ships().iter().flat_map(|s| s.occupied_tiles()).collect();
    assert_eq!(tiles.len(), SHIPS_SIZES.iter().sum::<usize>());
    let (last, rest) = tiles.split_last().unwrap();
    for tile in rest {
        assert!(sea.receive_shot(*tile));
        assert!(!sea.are_ships_all_dead());
    }
    assert!(sea.receive_shot(*last));
    assert!(sea.are_ships_all_dead());
    assert!(sea.ships().iter().all(|s| s.is_dead()));
}

#[test]
fn test_not_dead_while_placing() {
    let mut sea = Sea::new();
    sea.put_next_ship_to_place();
    sea.position_ship_on_placing(Position::new(0, 0), Orientation::Horizontal)
        .unwrap();
    sea.validate_ship_placement();
    for x in 0..5 {
        assert!(sea.receive_shot(Position::new(x, 0)));
    }
    assert!(sea.ships()[0].is_dead());
    assert!(!sea.are_ships_all_dead());
}

#[test]
fn test_observer_sees_updated_sea() {
    let mut sea = sea_with_fleet_on_even_rows();
    let last_state = Rc::new(Cell::new(None));
    let seen = Rc::clone(&last_state);
    sea.subscribe(move |sea: &Sea| seen.set(sea.tile_state(Position::new(3, 0))));
    sea.receive_shot(Position::new(3, 0));
    assert_eq!(last_state.get(), Some(TileState::Touched));
}

#[test]
fn test_display_shows_only_shots() {
    let mut sea = sea_with_fleet_on_even_rows();
    sea.receive_shot(Position::new(0, 0));
    sea.receive_shot(Position::new(1, 1));
    let text = sea.to_string();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), GRID_HEIGHT + 1);
    assert_eq!(rows[1], " 0 X . . . . . . . . .");
    assert_eq!(rows[2], " 1 . o . . . . . . . .");
    assert_eq!(rows[3], " 2 . . . . . . . . . .");
}
