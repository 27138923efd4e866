//! A fixed-size set of grid cells packed into an unsigned integer.
//!
//! The sea tracks shot and touched cells, and ships track their struck tiles,
//! with one `W×H` bitboard each. The type is `no_std` friendly and avoids
//! heap allocations.

use core::ops::Not;
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};
use thiserror::Error;

use crate::position::Position;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitBoardError {
    /// `W * H` cells do not fit in the bits of the backing integer.
    #[error("{cells} cells exceed the {capacity} bits of the backing integer")]
    SizeTooLarge { cells: usize, capacity: usize },
    /// Position lies outside `[0..W) × [0..H)`.
    #[error("position {0} is out of bounds")]
    OutOfBounds(Position),
}

/// A `W×H` bitboard stored in the unsigned integer `T`, indexed row-major.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const W: usize, const H: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const W: usize, const H: usize> BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of usable bits in the board (`W * H`).
    const BOARD_BITS: usize = W * H;
    const CAPACITY: usize = mem::size_of::<T>() * 8;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS >= Self::CAPACITY {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    /// Create a new empty bitboard without size check. On an oversized board
    /// every insertion fails with [`BitBoardError::SizeTooLarge`].
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Fallible constructor: `Err(SizeTooLarge)` if `W * H` exceeds the bits
    /// of `T`.
    pub fn try_new() -> Result<Self, BitBoardError> {
        Self::check_size()?;
        Ok(Self::new())
    }

    fn check_size() -> Result<(), BitBoardError> {
        if Self::BOARD_BITS > Self::CAPACITY {
            Err(BitBoardError::SizeTooLarge {
                cells: Self::BOARD_BITS,
                capacity: Self::CAPACITY,
            })
        } else {
            Ok(())
        }
    }

    /// Number of cells in the set.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Membership test. Out-of-bounds positions are never members.
    pub fn contains(&self, pos: Position) -> bool {
        match Self::index(pos) {
            Ok(idx) => ((self.bits >> idx) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    /// Adds `pos` to the set.
    pub fn insert(&mut self, pos: Position) -> Result<(), BitBoardError> {
        let idx = Self::index(pos)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Iterator over the members, in row-major order.
    pub fn iter(&self) -> Positions<T, W, H> {
        Positions {
            bits: self.bits,
            idx: 0,
        }
    }

    #[inline]
    fn index(pos: Position) -> Result<usize, BitBoardError> {
        Self::check_size()?;
        if pos.x() >= W || pos.y() >= H {
            Err(BitBoardError::OutOfBounds(pos))
        } else {
            Ok(pos.y() * W + pos.x())
        }
    }
}

impl<T, const W: usize, const H: usize> Default for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const W: usize, const H: usize> fmt::Debug for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", W, H)?;
        for y in 0..H {
            for x in 0..W {
                let cell = if self.contains(Position::new(x, y)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the members of a bitboard.
#[derive(Clone, Copy)]
pub struct Positions<T, const W: usize, const H: usize> {
    bits: T,
    idx: usize,
}

impl<T, const W: usize, const H: usize> Iterator for Positions<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let end = (W * H).min(mem::size_of::<T>() * 8);
        while self.idx < end {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some(Position::new(idx % W, idx / W));
            }
        }
        None
    }
}

/// Complement within the board bounds.
impl<T, const W: usize, const H: usize> Not for BitBoard<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & Self::mask(),
        }
    }
}
