//! Per-team distance field and the flow-field solver that rebuilds it.

use std::collections::VecDeque;

use gridflow_core::{ConfigError, Direction, GradientView, Position, UNREACHABLE};

use crate::board::Board;

/// Accumulated cost of a horizontal or vertical step.
pub const CARDINAL_STEP_COST: u32 = 10;
/// Accumulated cost of a diagonal step, a fixed-point sqrt(2) scaled by 10.
pub const DIAGONAL_STEP_COST: u32 = 14;

/// Cost model applied to each step during a field rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepCosts {
    /// Cardinal steps cost 10 and diagonal steps 14, so accumulated
    /// distances approximate Euclidean path length without floating point.
    Weighted,
    /// Every step costs 1; used for reachability-only queries where
    /// corner-cutting weighting is unnecessary.
    Uniform,
}

impl StepCosts {
    /// Cost of stepping in the provided direction under this model.
    #[must_use]
    pub const fn for_direction(self, direction: Direction) -> u32 {
        match self {
            StepCosts::Weighted => {
                if direction.is_diagonal() {
                    DIAGONAL_STEP_COST
                } else {
                    CARDINAL_STEP_COST
                }
            }
            StepCosts::Uniform => 1,
        }
    }
}

/// Dense per-team distance field seeded from the team's cursor.
///
/// The buffer is allocated once and reset on every rebuild rather than
/// reallocated. Distances default to [`UNREACHABLE`] so callers can
/// distinguish obstacles and enclosed pockets from traversable cells.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: i32,
    height: i32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Creates a field with every cell unreachable, rejecting non-positive
    /// dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimensions);
        }
        Ok(Self::with_valid_dimensions(width, height))
    }

    /// Builds a field from dimensions already known to be positive.
    pub(crate) fn with_valid_dimensions(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions must be validated");
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            distances: vec![UNREACHABLE; cells],
        }
    }

    /// Number of cell columns in the field.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of cell rows in the field.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Distance stored for the cell; [`UNREACHABLE`] out of bounds.
    #[must_use]
    pub fn distance(&self, position: Position) -> u32 {
        self.index(position)
            .map_or(UNREACHABLE, |index| self.distances[index])
    }

    /// Reports whether the cell was reached by the last rebuild.
    #[must_use]
    pub fn is_reachable(&self, position: Position) -> bool {
        self.distance(position) != UNREACHABLE
    }

    /// Resets every cell to [`UNREACHABLE`] without reallocating.
    pub fn reset(&mut self) {
        self.distances.fill(UNREACHABLE);
    }

    /// Copies distances from another field of identical dimensions.
    pub fn copy_from(&mut self, other: &DistanceField) -> Result<(), ConfigError> {
        if self.width != other.width || self.height != other.height {
            return Err(ConfigError::MismatchedDimensions);
        }
        self.distances.copy_from_slice(&other.distances);
        Ok(())
    }

    /// Captures a read-only view over the field.
    #[must_use]
    pub fn view(&self) -> GradientView<'_> {
        GradientView::new(&self.distances, self.width, self.height)
    }

    /// Rebuilds the field from the team's cursor over the provided board.
    ///
    /// The field is reset first; there is no incremental repair for a moved
    /// cursor. A cursor that is out of bounds or sits on an obstacle leaves
    /// the entire field unreachable. The search is a FIFO with relaxation:
    /// a cell is re-enqueued whenever a shorter path reaches it, which the
    /// weighted model requires because a late diagonal can beat an earlier
    /// cardinal-only route.
    pub fn rebuild(&mut self, board: &Board, target: Position, costs: StepCosts) {
        if self.width != board.width() || self.height != board.height() {
            let cells = board.width() as usize * board.height() as usize;
            self.width = board.width();
            self.height = board.height();
            self.distances = vec![UNREACHABLE; cells];
        } else {
            self.reset();
        }

        if !board.in_bounds(target) || board.is_obstacle(target) {
            return;
        }

        let Some(target_index) = self.index(target) else {
            return;
        };
        self.distances[target_index] = 0;

        let mut frontier = VecDeque::new();
        frontier.push_back(target);

        while let Some(cell) = frontier.pop_front() {
            let Some(cell_index) = self.index(cell) else {
                continue;
            };
            let current = self.distances[cell_index];

            for direction in Direction::ALL {
                let neighbor = direction.apply(cell);
                if !board.in_bounds(neighbor) || board.is_obstacle(neighbor) {
                    continue;
                }
                let Some(next) = current.checked_add(costs.for_direction(direction)) else {
                    continue;
                };
                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };
                if next < self.distances[neighbor_index] {
                    self.distances[neighbor_index] = next;
                    frontier.push_back(neighbor);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_distance(&mut self, position: Position, distance: u32) {
        if let Some(index) = self.index(position) {
            self.distances[index] = distance;
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.in_bounds(self.width, self.height) {
            Some(position.y() as usize * self.width as usize + position.x() as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridflow_core::ConfigError;

    fn open_board(width: i32, height: i32) -> Board {
        Board::with_valid_dimensions(width, height)
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            DistanceField::new(0, 4).err(),
            Some(ConfigError::NonPositiveDimensions)
        );
        assert_eq!(
            DistanceField::new(4, -1).err(),
            Some(ConfigError::NonPositiveDimensions)
        );
    }

    #[test]
    fn cursor_cell_ends_at_zero() {
        let board = open_board(7, 7);
        let mut field = DistanceField::with_valid_dimensions(7, 7);
        field.rebuild(&board, Position::new(3, 3), StepCosts::Weighted);
        assert_eq!(field.distance(Position::new(3, 3)), 0);
    }

    #[test]
    fn weighted_neighbors_cost_ten_and_fourteen() {
        let board = open_board(7, 7);
        let mut field = DistanceField::with_valid_dimensions(7, 7);
        field.rebuild(&board, Position::new(3, 3), StepCosts::Weighted);

        assert_eq!(field.distance(Position::new(3, 2)), 10);
        assert_eq!(field.distance(Position::new(4, 3)), 10);
        assert_eq!(field.distance(Position::new(3, 4)), 10);
        assert_eq!(field.distance(Position::new(2, 3)), 10);
        assert_eq!(field.distance(Position::new(4, 2)), 14);
        assert_eq!(field.distance(Position::new(4, 4)), 14);
        assert_eq!(field.distance(Position::new(2, 4)), 14);
        assert_eq!(field.distance(Position::new(2, 2)), 14);
    }

    #[test]
    fn uniform_neighbors_cost_one() {
        let board = open_board(7, 7);
        let mut field = DistanceField::with_valid_dimensions(7, 7);
        field.rebuild(&board, Position::new(3, 3), StepCosts::Uniform);

        assert_eq!(field.distance(Position::new(4, 3)), 1);
        assert_eq!(field.distance(Position::new(4, 4)), 1);
        assert_eq!(field.distance(Position::new(5, 5)), 2);
    }

    #[test]
    fn diagonal_shortcut_relaxes_earlier_cardinal_route() {
        let board = open_board(9, 9);
        let mut field = DistanceField::with_valid_dimensions(9, 9);
        field.rebuild(&board, Position::new(4, 4), StepCosts::Weighted);

        // A two-cardinal route (20) must have been relaxed to one diagonal (14).
        assert_eq!(field.distance(Position::new(5, 5)), 14);
        assert_eq!(field.distance(Position::new(6, 6)), 28);
        // A knight-like offset mixes one diagonal and one cardinal step.
        assert_eq!(field.distance(Position::new(6, 5)), 24);
    }

    #[test]
    fn distances_grow_monotonically_along_a_row() {
        let board = open_board(12, 5);
        let mut field = DistanceField::with_valid_dimensions(12, 5);
        field.rebuild(&board, Position::new(1, 2), StepCosts::Weighted);

        let mut previous = field.distance(Position::new(1, 2));
        for x in 2..12 {
            let next = field.distance(Position::new(x, 2));
            assert!(next > previous, "distance must grow away from the cursor");
            previous = next;
        }
    }

    #[test]
    fn obstacle_cursor_poisons_the_whole_field() {
        let mut board = open_board(5, 5);
        board.place_obstacle(Position::new(2, 2));
        let mut field = DistanceField::with_valid_dimensions(5, 5);
        field.rebuild(&board, Position::new(2, 2), StepCosts::Weighted);

        for y in 0..5 {
            for x in 0..5 {
                assert!(!field.is_reachable(Position::new(x, y)));
            }
        }
    }

    #[test]
    fn out_of_bounds_cursor_poisons_the_whole_field() {
        let board = open_board(5, 5);
        let mut field = DistanceField::with_valid_dimensions(5, 5);
        field.rebuild(&board, Position::new(-1, 2), StepCosts::Weighted);

        for y in 0..5 {
            for x in 0..5 {
                assert!(!field.is_reachable(Position::new(x, y)));
            }
        }
    }

    #[test]
    fn obstacles_never_receive_a_finite_distance() {
        let mut board = open_board(6, 6);
        board.place_obstacle(Position::new(2, 2));
        board.place_obstacle(Position::new(3, 2));
        let mut field = DistanceField::with_valid_dimensions(6, 6);
        field.rebuild(&board, Position::new(0, 0), StepCosts::Weighted);

        assert!(!field.is_reachable(Position::new(2, 2)));
        assert!(!field.is_reachable(Position::new(3, 2)));
    }

    #[test]
    fn full_height_wall_leaves_the_far_side_unreachable() {
        let mut board = open_board(7, 4);
        for y in 0..4 {
            board.place_obstacle(Position::new(3, y));
        }
        let mut field = DistanceField::with_valid_dimensions(7, 4);
        field.rebuild(&board, Position::new(1, 1), StepCosts::Weighted);

        assert!(field.is_reachable(Position::new(2, 3)));
        for y in 0..4 {
            for x in 4..7 {
                assert!(!field.is_reachable(Position::new(x, y)));
            }
        }
    }

    #[test]
    fn rebuild_is_idempotent_for_unchanged_inputs() {
        let mut board = open_board(8, 8);
        board.place_obstacle(Position::new(4, 4));
        board.place_obstacle(Position::new(4, 5));

        let mut first = DistanceField::with_valid_dimensions(8, 8);
        first.rebuild(&board, Position::new(6, 6), StepCosts::Weighted);
        let mut second = DistanceField::with_valid_dimensions(8, 8);
        second.rebuild(&board, Position::new(6, 6), StepCosts::Weighted);
        assert_eq!(first.view().cells(), second.view().cells());

        // A second rebuild over the same field must also reproduce itself.
        let snapshot: Vec<u32> = first.view().cells().to_vec();
        first.rebuild(&board, Position::new(6, 6), StepCosts::Weighted);
        assert_eq!(first.view().cells(), snapshot.as_slice());
    }

    #[test]
    fn moved_cursor_requires_no_stale_distances() {
        let board = open_board(6, 6);
        let mut field = DistanceField::with_valid_dimensions(6, 6);
        field.rebuild(&board, Position::new(0, 0), StepCosts::Weighted);
        field.rebuild(&board, Position::new(5, 5), StepCosts::Weighted);

        assert_eq!(field.distance(Position::new(5, 5)), 0);
        assert!(field.distance(Position::new(0, 0)) > 0);
    }

    #[test]
    fn copy_from_rejects_mismatched_dimensions() {
        let mut destination = DistanceField::with_valid_dimensions(4, 4);
        let source = DistanceField::with_valid_dimensions(5, 4);
        assert_eq!(
            destination.copy_from(&source).err(),
            Some(ConfigError::MismatchedDimensions)
        );

        let board = open_board(4, 4);
        let mut matching = DistanceField::with_valid_dimensions(4, 4);
        matching.rebuild(&board, Position::new(1, 1), StepCosts::Weighted);
        destination
            .copy_from(&matching)
            .expect("matching dimensions copy");
        assert_eq!(destination.view().cells(), matching.view().cells());
    }
}
