//! Ship definitions, positioning and hit tracking.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::position::Position;

type BB = BitBoard<u128, GRID_WIDTH, GRID_HEIGHT>;

/// Orientation of a ship on the sea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Tiles grow along `x`.
    #[default]
    Horizontal,
    /// Tiles grow along `y`.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A fleet ship. Unplaced until given an origin; struck tiles are tracked in
/// a `BitBoard`.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    origin: Option<Position>,
    orientation: Orientation,
    hits: BB,
}

impl Ship {
    /// A ship with no origin yet.
    pub fn new(ship_type: ShipType) -> Self {
        Ship {
            ship_type,
            origin: None,
            orientation: Orientation::default(),
            hits: BB::new(),
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    /// First tile of the ship, `None` while it has not been positioned.
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn set_position(&mut self, origin: Position, orientation: Orientation) {
        self.origin = Some(origin);
        self.orientation = orientation;
    }

    pub(crate) fn rotate(&mut self) {
        self.orientation = self.orientation.rotated();
    }

    /// The `length` consecutive tiles starting at the origin. Empty while the
    /// ship has no origin. Tiles may lie off the sea for a ship being placed.
    pub fn occupied_tiles(&self) -> impl Iterator<Item = Position> {
        let origin = self.origin;
        let orientation = self.orientation;
        let len = if origin.is_some() { self.length() } else { 0 };
        (0..len).filter_map(move |i| {
            let o = origin?;
            Some(match orientation {
                Orientation::Horizontal => Position::new(o.x() + i, o.y()),
                Orientation::Vertical => Position::new(o.x(), o.y() + i),
            })
        })
    }

    /// Returns `true` if `pos` is one of the occupied tiles.
    pub fn occupies(&self, pos: Position) -> bool {
        let Some(o) = self.origin else {
            return false;
        };
        let len = self.length();
        match self.orientation {
            Orientation::Horizontal => pos.y() == o.y() && pos.x() >= o.x() && pos.x() < o.x() + len,
            Orientation::Vertical => pos.x() == o.x() && pos.y() >= o.y() && pos.y() < o.y() + len,
        }
    }

    /// Records a hit at `pos`. Returns `true` only for an occupied tile that
    /// had not been struck yet.
    pub fn check_shot(&mut self, pos: Position) -> bool {
        if !self.occupies(pos) || self.hits.contains(pos) {
            return false;
        }
        self.hits.insert(pos).is_ok()
    }

    /// Number of struck tiles.
    pub fn hits_taken(&self) -> usize {
        self.hits.count_ones()
    }

    /// Whether `pos` is an already struck tile of this ship.
    pub fn is_hit_at(&self, pos: Position) -> bool {
        self.hits.contains(pos)
    }

    /// Every occupied tile has been struck.
    pub fn is_dead(&self) -> bool {
        self.origin.is_some() && self.hits.count_ones() == self.length()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: {:?}, orientation: {:?}, hits: {}/{} }}",
            self.name(),
            self.origin,
            self.orientation,
            self.hits.count_ones(),
            self.length(),
        )
    }
}
