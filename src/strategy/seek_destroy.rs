//! Seek-then-destroy targeting.
//!
//! While seeking, shots come from a seek-phase strategy (random by default).
//! A hit that does not sink switches to destroying: the four neighbours of
//! the hit are tried, and once a second hit gives the ship's axis only the
//! two cells extending the hit run along that axis are tried. Sinking the
//! ship goes back to seeking.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::{debug, trace};
use rand::rngs::SmallRng;

use crate::common::{StrategyError, TileState};
use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::position::Position;
use crate::sea::Sea;
use crate::ship::Orientation;

use super::{RandomShooting, ShootingStrategy, ShootingStrategyName};

/// Phase of a [`SeekThenDestroyShooting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HuntState {
    /// Looking for a ship.
    #[default]
    Seek,
    /// Finishing off a ship that was hit.
    Destroy,
}

/// Two-phase strategy: seek with `S`, then destroy around hits.
#[derive(Debug, Clone)]
pub struct SeekThenDestroyShooting<S = RandomShooting> {
    seeker: S,
    hunt_state: HuntState,
    /// Hit the current destruction is anchored on.
    first_hit: Option<Position>,
    /// Axis of the attacked ship once two adjacent hits give it.
    axis: Option<Orientation>,
    pending: VecDeque<Position>,
    /// Hits of the current hunt on ships that are still afloat.
    open_hits: Vec<Position>,
    /// Whether the candidates were already widened to every open hit.
    widened: bool,
    last_shot: Option<Position>,
}

impl SeekThenDestroyShooting<RandomShooting> {
    pub fn new() -> Self {
        Self::with_seeker(RandomShooting::new())
    }
}

impl Default for SeekThenDestroyShooting<RandomShooting> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ShootingStrategy> SeekThenDestroyShooting<S> {
    /// Strategy seeking with `seeker`.
    pub fn with_seeker(seeker: S) -> Self {
        Self {
            seeker,
            hunt_state: HuntState::Seek,
            first_hit: None,
            axis: None,
            pending: VecDeque::new(),
            open_hits: Vec::new(),
            widened: false,
            last_shot: None,
        }
    }

    pub fn hunt_state(&self) -> HuntState {
        self.hunt_state
    }

    /// Axis of the ship being destroyed, once known.
    pub fn axis(&self) -> Option<Orientation> {
        self.axis
    }

    /// Reads back the outcome of the previous shot.
    fn absorb(&mut self, sea: &Sea, shot: Position) {
        match sea.tile_state(shot) {
            Some(TileState::Touched) => self.on_hit(sea, shot),
            Some(TileState::Shot) => trace!("miss at {}", shot),
            // the caller did not apply the shot; offer it again
            Some(TileState::Normal) if self.hunt_state == HuntState::Destroy => {
                self.pending.push_front(shot)
            }
            _ => {}
        }
    }

    fn on_hit(&mut self, sea: &Sea, hit: Position) {
        self.open_hits.push(hit);

        if sea.is_ship_sunk_at(hit) {
            self.open_hits.retain(|p| !sea.is_ship_sunk_at(*p));
            match self.open_hits.first().copied() {
                Some(anchor) => {
                    debug!("ship sunk at {}, resuming on open hit {}", hit, anchor);
                    self.start_destroy(anchor);
                }
                None => {
                    debug!("ship sunk at {}, back to seeking", hit);
                    self.reset();
                }
            }
            return;
        }

        match self.hunt_state {
            HuntState::Seek => {
                debug!("hit at {}, destroying", hit);
                self.start_destroy(hit);
            }
            HuntState::Destroy => {
                if self.axis.is_none() {
                    self.confirm_axis(hit);
                }
                let axis = self.axis;
                match axis {
                    Some(axis) => self.pending = self.run_ends(axis),
                    None => self.pending.extend(hit.neighbours()),
                }
            }
        }
    }

    /// Anchors destruction on `anchor`, trying the neighbours of every open hit.
    fn start_destroy(&mut self, anchor: Position) {
        self.hunt_state = HuntState::Destroy;
        self.first_hit = Some(anchor);
        self.axis = None;
        self.widened = false;
        self.pending = self.open_neighbours();
    }

    /// Infers the axis from `hit` and an adjacent open hit, preferring the
    /// current anchor.
    fn confirm_axis(&mut self, hit: Position) {
        let adjacent = |p: &Position| hit.neighbours().any(|n| n == *p);
        let anchor = self
            .first_hit
            .filter(|p| adjacent(p))
            .or_else(|| self.open_hits.iter().copied().find(|p| *p != hit && adjacent(p)));
        if let Some(anchor) = anchor {
            let axis = if anchor.y() == hit.y() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            debug!("axis {:?} from {} and {}", axis, anchor, hit);
            self.first_hit = Some(anchor);
            self.axis = Some(axis);
        }
    }

    /// The cells one past each end of the hit run through the anchor.
    fn run_ends(&self, axis: Orientation) -> VecDeque<Position> {
        let step = |p: Position, d: isize| match axis {
            Orientation::Horizontal => p.offset(d, 0),
            Orientation::Vertical => p.offset(0, d),
        };
        let Some(anchor) = self.first_hit else {
            return VecDeque::new();
        };
        let walk = |d: isize| {
            let mut end = anchor;
            while let Some(next) = step(end, d).filter(|p| self.open_hits.contains(p)) {
                end = next;
            }
            end
        };
        [step(walk(1), 1), step(walk(-1), -1)]
            .into_iter()
            .flatten()
            .collect()
    }

    fn open_neighbours(&self) -> VecDeque<Position> {
        let mut candidates = VecDeque::new();
        for hit in &self.open_hits {
            for n in hit.neighbours() {
                if !candidates.contains(&n) {
                    candidates.push_back(n);
                }
            }
        }
        candidates
    }

    /// Next playable candidate of the destroy phase. Falls back to seeking
    /// once every candidate is used up.
    fn next_destroy_shot(&mut self, sea: &Sea) -> Option<Position> {
        while self.hunt_state == HuntState::Destroy {
            while let Some(candidate) = self.pending.pop_front() {
                if sea.tile_state(candidate) == Some(TileState::Normal) {
                    return Some(candidate);
                }
            }
            if self.widened || self.open_hits.is_empty() {
                debug!("no candidate left around {:?}, back to seeking", self.first_hit);
                self.reset();
            } else {
                self.widened = true;
                self.axis = None;
                self.pending = self.open_neighbours();
            }
        }
        None
    }

    fn reset(&mut self) {
        self.hunt_state = HuntState::Seek;
        self.first_hit = None;
        self.axis = None;
        self.pending.clear();
        self.open_hits.clear();
        self.widened = false;
    }
}

impl<S: ShootingStrategy> ShootingStrategy for SeekThenDestroyShooting<S> {
    fn name(&self) -> ShootingStrategyName {
        ShootingStrategyName::SeekThenDestroyRandom
    }

    fn play_shoot(&mut self, rng: &mut SmallRng, sea: &Sea) -> Result<Position, StrategyError> {
        if let Some(last) = self.last_shot.take() {
            self.absorb(sea, last);
        }
        if sea.shots_fired() >= GRID_WIDTH * GRID_HEIGHT {
            return Err(StrategyError::NoTargetLeft);
        }

        let shot = match self.next_destroy_shot(sea) {
            Some(candidate) => candidate,
            None => self.seeker.play_shoot(rng, sea)?,
        };
        trace!("{:?} shoots at {}", self.hunt_state, shot);
        self.last_shot = Some(shot);
        Ok(shot)
    }
}
