//! A player's sea: fleet placement, cell states and incoming shots.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::{fmt, mem};

use log::{debug, trace};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{SeaError, ShotResult, TileState};
use crate::config::{GRID_HEIGHT, GRID_WIDTH, NUM_SHIPS, SHIPS, SHIPS_SIZES};
use crate::position::Position;
use crate::ship::{Orientation, Ship};

type BB = BitBoard<u128, GRID_WIDTH, GRID_HEIGHT>;

const _: () = assert!(GRID_WIDTH * GRID_HEIGHT <= u128::BITS as usize);

/// Attempts per ship before random placement gives up.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Listener told about every observable change of a sea.
///
/// Called synchronously after the mutation, so `sea` is the updated state.
pub trait SeaObserver {
    fn sea_changed(&mut self, sea: &Sea);
}

impl<F> SeaObserver for F
where
    F: FnMut(&Sea),
{
    fn sea_changed(&mut self, sea: &Sea) {
        self(sea)
    }
}

/// Grid of one player: ships still to place, the ship being placed, placed
/// ships, and the state of every cell.
pub struct Sea {
    shots: BB,
    touched: BB,
    ships_to_place: VecDeque<Ship>,
    ship_on_placing: Option<Ship>,
    ships: Vec<Ship>,
    observers: Vec<Box<dyn SeaObserver>>,
}

impl Sea {
    /// Empty sea with the whole fleet waiting to be placed.
    pub fn new() -> Self {
        Sea {
            shots: BB::new(),
            touched: BB::new(),
            ships_to_place: SHIPS.iter().copied().map(Ship::new).collect(),
            ship_on_placing: None,
            ships: Vec::with_capacity(NUM_SHIPS),
            observers: Vec::new(),
        }
    }

    pub fn grid_width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn grid_height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Lengths of the fleet ships.
    pub fn ships_sizes() -> &'static [usize] {
        &SHIPS_SIZES
    }

    /// State of the cell at `pos`, `None` off the sea.
    pub fn tile_state(&self, pos: Position) -> Option<TileState> {
        if self.is_out_of_bounds(pos) {
            None
        } else if self.touched.contains(pos) {
            Some(TileState::Touched)
        } else if self.shots.contains(pos) {
            Some(TileState::Shot)
        } else {
            Some(TileState::Normal)
        }
    }

    /// Placed ships.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ships waiting to be placed, in placement order.
    pub fn ships_to_place(&self) -> impl ExactSizeIterator<Item = &Ship> + '_ {
        self.ships_to_place.iter()
    }

    pub fn ship_on_placing(&self) -> Option<&Ship> {
        self.ship_on_placing.as_ref()
    }

    pub fn are_ships_all_placed(&self) -> bool {
        self.ships_to_place.is_empty() && self.ship_on_placing.is_none()
    }

    /// `false` while placement is incomplete.
    pub fn are_ships_all_dead(&self) -> bool {
        self.are_ships_all_placed() && self.ships.iter().all(Ship::is_dead)
    }

    /// `true` if `pos` is on the sea and no placed ship occupies it. The ship
    /// being placed is not taken into account.
    pub fn is_sea_tile_free(&self, pos: Position) -> bool {
        !self.is_out_of_bounds(pos) && !self.ships.iter().any(|ship| ship.occupies(pos))
    }

    pub fn is_ship_on_placing_in_valid_position(&self) -> bool {
        let Some(ship) = &self.ship_on_placing else {
            return false;
        };
        match ship.origin() {
            Some(origin) if !self.is_out_of_bounds(origin) => {
                ship.occupied_tiles().all(|tile| self.is_sea_tile_free(tile))
            }
            _ => false,
        }
    }

    /// Every never-shot position, row by row.
    pub fn all_normal_positions(&self) -> Vec<Position> {
        (!self.shots).iter().collect()
    }

    /// Moves the next queued ship into the placing slot, unless one is
    /// already there.
    pub fn put_next_ship_to_place(&mut self) {
        if self.ship_on_placing.is_none() {
            self.ship_on_placing = self.ships_to_place.pop_front();
        }
    }

    /// Positions the ship being placed. Validity is not checked here.
    pub fn position_ship_on_placing(
        &mut self,
        origin: Position,
        orientation: Orientation,
    ) -> Result<(), SeaError> {
        let ship = self
            .ship_on_placing
            .as_mut()
            .ok_or(SeaError::NoShipOnPlacing)?;
        ship.set_position(origin, orientation);
        Ok(())
    }

    pub fn rotate_ship_on_placing(&mut self) -> Result<(), SeaError> {
        let ship = self
            .ship_on_placing
            .as_mut()
            .ok_or(SeaError::NoShipOnPlacing)?;
        ship.rotate();
        Ok(())
    }

    /// Adds the ship being placed to the fleet and moves on to the next one.
    ///
    /// Placement validity is the caller's responsibility. With no ship being
    /// placed this only advances the queue; observers are notified either way.
    pub fn validate_ship_placement(&mut self) {
        if let Some(ship) = self.ship_on_placing.take() {
            debug!("placed {:?}", ship);
            self.ships.push(ship);
        }
        self.put_next_ship_to_place();
        self.notify_observers();
    }

    /// Checked variant of [`Sea::validate_ship_placement`].
    pub fn commit_ship_on_placing(&mut self) -> Result<(), SeaError> {
        if self.ship_on_placing.is_none() {
            return Err(SeaError::NoShipOnPlacing);
        }
        if !self.is_ship_on_placing_in_valid_position() {
            return Err(SeaError::InvalidPlacement);
        }
        self.validate_ship_placement();
        Ok(())
    }

    /// Places every remaining ship at a random valid spot.
    pub fn place_fleet_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), SeaError> {
        self.put_next_ship_to_place();
        while let Some((name, length)) = self.ship_on_placing.as_ref().map(|s| (s.name(), s.length())) {
            let mut placed = false;
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let (max_x, max_y) = match orientation {
                    Orientation::Horizontal => (GRID_WIDTH - length, GRID_HEIGHT - 1),
                    Orientation::Vertical => (GRID_WIDTH - 1, GRID_HEIGHT - length),
                };
                let origin = Position::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
                self.position_ship_on_placing(origin, orientation)?;
                if self.is_ship_on_placing_in_valid_position() {
                    self.validate_ship_placement();
                    placed = true;
                    break;
                }
            }
            if !placed {
                return Err(SeaError::UnableToPlaceShip(name));
            }
        }
        Ok(())
    }

    /// Applies a shot. Returns `false`, without any change, when `pos` is off
    /// the sea or was already shot; `true` otherwise, hit or miss.
    pub fn receive_shot(&mut self, pos: Position) -> bool {
        self.fire_at(pos).is_ok()
    }

    /// Applies a shot and reports what it did.
    pub fn fire_at(&mut self, pos: Position) -> Result<ShotResult, SeaError> {
        if self.is_out_of_bounds(pos) {
            return Err(SeaError::OutOfBounds(pos));
        }
        if self.shots.contains(pos) {
            return Err(SeaError::AlreadyShot(pos));
        }

        let mut result = ShotResult::Miss;
        for ship in self.ships.iter_mut() {
            if ship.check_shot(pos) {
                result = if ship.is_dead() {
                    ShotResult::Sink(ship.name())
                } else {
                    ShotResult::Hit
                };
                break;
            }
        }
        self.shots.insert(pos)?;
        if result.is_hit() {
            self.touched.insert(pos)?;
        }
        trace!("shot at {} -> {:?}", pos, result);
        self.notify_observers();
        Ok(result)
    }

    /// `true` if `pos` is a touched tile of a ship that is now dead. Tiles
    /// that were never hit always report `false`.
    pub fn is_ship_sunk_at(&self, pos: Position) -> bool {
        self.touched.contains(pos)
            && self
                .ships
                .iter()
                .any(|ship| ship.is_hit_at(pos) && ship.is_dead())
    }

    pub fn shots_fired(&self) -> usize {
        self.shots.count_ones()
    }

    pub fn hits_landed(&self) -> usize {
        self.touched.count_ones()
    }

    /// Registers an observer, called after each placement validation and
    /// each legal shot.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: SeaObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify_observers(&mut self) {
        let mut observers = mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer.sea_changed(self);
        }
        self.observers = observers;
    }

    fn is_out_of_bounds(&self, pos: Position) -> bool {
        pos.is_out_of_bounds(0, GRID_WIDTH - 1, 0, GRID_HEIGHT - 1)
    }
}

impl Default for Sea {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sea")
            .field("ships", &self.ships)
            .field("ship_on_placing", &self.ship_on_placing)
            .field("ships_to_place", &self.ships_to_place)
            .field("shots", &self.shots)
            .field("touched", &self.touched)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Observable grid: `.` never shot, `o` missed, `X` hit.
impl fmt::Display for Sea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..GRID_WIDTH {
            write!(f, " {}", x)?;
        }
        for y in 0..GRID_HEIGHT {
            write!(f, "\n{:2}", y)?;
            for x in 0..GRID_WIDTH {
                let cell = match self.tile_state(Position::new(x, y)) {
                    Some(TileState::Touched) => 'X',
                    Some(TileState::Shot) => 'o',
                    _ => '.',
                };
                write!(f, " {}", cell)?;
            }
        }
        Ok(())
    }
}
