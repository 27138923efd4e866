use crate::ship::ShipType;

/// Number of columns of a sea.
pub const GRID_WIDTH: usize = 10;
/// Number of rows of a sea.
pub const GRID_HEIGHT: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Fleet in placement order, largest first.
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Lengths of the fleet ships, in placement order.
pub const SHIPS_SIZES: [usize; NUM_SHIPS] = [5, 4, 3, 3, 2];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = sum(&SHIPS_SIZES);

const fn sum(sizes: &[usize]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < sizes.len() {
        total += sizes[i];
        i += 1;
    }
    total
}

