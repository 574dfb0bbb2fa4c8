//! Dense battlefield board storing obstacle flags and occupant slots.

use gridflow_core::{ConfigError, ParticleId, Position};
use rand::Rng;

/// Obstacle and occupancy store for the battlefield.
///
/// Dimensions are fixed at construction. Each cell holds an obstacle flag
/// and at most one occupant slot; both stores are row-major. Out-of-bounds
/// queries answer with sentinels (obstacle, no occupant) so callers never
/// need to bounds-guard a lookup.
#[derive(Clone, Debug)]
pub struct Board {
    width: i32,
    height: i32,
    obstacles: Vec<bool>,
    occupants: Vec<Option<ParticleId>>,
}

impl Board {
    /// Creates an empty board, rejecting non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimensions);
        }
        Ok(Self::with_valid_dimensions(width, height))
    }

    /// Builds a board from dimensions already known to be positive.
    pub(crate) fn with_valid_dimensions(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions must be validated");
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            obstacles: vec![false; cells],
            occupants: vec![None; cells],
        }
    }

    /// Number of cell columns in the board.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of cell rows in the board.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the position lies inside the board.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        position.in_bounds(self.width, self.height)
    }

    /// Reports whether the cell holds an obstacle; out of bounds counts as one.
    #[must_use]
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.index(position)
            .map_or(true, |index| self.obstacles[index])
    }

    /// Marks the cell as an obstacle; requests outside the board are ignored.
    pub fn place_obstacle(&mut self, position: Position) {
        if let Some(index) = self.index(position) {
            self.obstacles[index] = true;
        }
    }

    /// Clears the obstacle flag; requests outside the board are ignored.
    pub fn remove_obstacle(&mut self, position: Position) {
        if let Some(index) = self.index(position) {
            self.obstacles[index] = false;
        }
    }

    /// Returns the particle occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<ParticleId> {
        self.index(position).and_then(|index| self.occupants[index])
    }

    /// Unconditionally overwrites the cell's occupant slot; `None` clears it.
    ///
    /// Position synchronization with the particle's own record is the
    /// caller's responsibility.
    pub fn set_occupant(&mut self, position: Position, occupant: Option<ParticleId>) {
        if let Some(index) = self.index(position) {
            self.occupants[index] = occupant;
        }
    }

    /// Moves an occupant between two cells.
    ///
    /// Succeeds only if `from` holds an occupant and `to` is in bounds and
    /// not an obstacle; on success `from` is cleared and `to` filled in one
    /// step. The destination's occupancy is deliberately NOT re-checked here;
    /// decision resolution free-checks the destination before calling, and
    /// that check is only sound while decisions are applied serially.
    pub fn move_occupant(&mut self, from: Position, to: Position) -> bool {
        let Some(from_index) = self.index(from) else {
            return false;
        };
        let Some(to_index) = self.index(to) else {
            return false;
        };
        if self.obstacles[to_index] {
            return false;
        }
        let Some(occupant) = self.occupants[from_index] else {
            return false;
        };
        self.occupants[from_index] = None;
        self.occupants[to_index] = Some(occupant);
        true
    }

    /// Reports whether the cell is in bounds, unobstructed, and unoccupied.
    #[must_use]
    pub fn is_free(&self, position: Position) -> bool {
        self.index(position)
            .map_or(false, |index| !self.obstacles[index] && self.occupants[index].is_none())
    }

    /// Identifiers of every occupant in row-major scan order.
    ///
    /// This is the scan order the tick driver processes particles in; it is
    /// not insertion order and is not stable across ticks.
    #[must_use]
    pub fn occupant_ids_row_major(&self) -> Vec<ParticleId> {
        self.occupants.iter().copied().flatten().collect()
    }

    /// Surrounds the board with a single ring of obstacle cells.
    pub fn add_border_walls(&mut self) {
        for x in 0..self.width {
            self.place_obstacle(Position::new(x, 0));
            self.place_obstacle(Position::new(x, self.height - 1));
        }
        for y in 0..self.height {
            self.place_obstacle(Position::new(0, y));
            self.place_obstacle(Position::new(self.width - 1, y));
        }
    }

    /// Scatters obstacles over the board interior with one draw per cell.
    ///
    /// The border ring is left untouched. Densities outside `0.0..=1.0` are
    /// rejected before any cell is written.
    pub fn add_random_obstacles(
        &mut self,
        density: f64,
        rng: &mut impl Rng,
    ) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(ConfigError::DensityOutOfRange);
        }
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                if rng.gen_bool(density) {
                    self.place_obstacle(Position::new(x, y));
                }
            }
        }
        Ok(())
    }

    /// Dense obstacle flags in row-major order, for view construction.
    pub(crate) fn obstacles(&self) -> &[bool] {
        &self.obstacles
    }

    /// Dense occupant slots in row-major order, for view construction.
    pub(crate) fn occupants(&self) -> &[Option<ParticleId>] {
        &self.occupants
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.in_bounds(self.width, self.height) {
            Some(position.y() as usize * self.width as usize + position.x() as usize)
        } else {
            None
        }
    }
}
