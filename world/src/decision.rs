//! Per-tick action selection for a single particle.
//!
//! The policy is deliberately greedy and local: a particle only ever looks
//! at its eight neighbors and its team's distance field, and emergent flow
//! toward the cursor arises purely from the precomputed field.

use gridflow_core::{Direction, ParticleId, Position, UNREACHABLE};

use crate::{
    board::Board,
    gradient::DistanceField,
    particles::{ParticleRegistry, ParticleState},
};

/// A neighbor must beat the running best by more than this margin to
/// restart the main tier on its own.
const MAIN_TIER_MARGIN: u32 = 5;

/// Single action a particle takes during its turn of the tick scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Step into an adjacent free cell.
    Move {
        /// Destination cell, already confirmed free at decision time.
        to: Position,
    },
    /// Drain vitality from an adjacent enemy.
    Attack {
        /// Particle to drain.
        target: ParticleId,
    },
    /// Transfer vitality to an adjacent ally.
    Heal {
        /// Particle to support.
        ally: ParticleId,
    },
}

/// Fixed-capacity direction list; the neighborhood never exceeds 8 entries.
#[derive(Clone, Copy, Debug, Default)]
struct DirectionSet {
    directions: [Option<Direction>; 8],
    len: usize,
}

impl DirectionSet {
    fn push(&mut self, direction: Direction) {
        if self.len < self.directions.len() {
            self.directions[self.len] = Some(direction);
            self.len += 1;
        }
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.directions.iter().take(self.len).flatten().copied()
    }
}

/// Directions bucketed by how much closer they bring a particle to its
/// team's cursor.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DirectionTiers {
    main: DirectionSet,
    good: DirectionSet,
    acceptable: DirectionSet,
}

/// Buckets the eight directions against the particle's current distance.
///
/// Returns `None` when the particle already stands on the cursor cell
/// (`d0 == 0`) or its cell is unreachable; no action is taken either way.
/// Classification reads only the field, never occupancy, so a tier can
/// nominate occupied cells; the resolution ladder sorts those out.
pub(crate) fn classify(gradient: &DistanceField, position: Position) -> Option<DirectionTiers> {
    let current = gradient.distance(position);
    if current == 0 || current == UNREACHABLE {
        return None;
    }

    let mut tiers = DirectionTiers::default();
    let mut best = current;

    for direction in Direction::ALL {
        // Out-of-bounds and obstacle neighbors read as UNREACHABLE and fall
        // through every bucket below.
        let neighbor = gradient.distance(direction.apply(position));

        if neighbor < best {
            if neighbor.saturating_add(MAIN_TIER_MARGIN) < best {
                // Significantly steeper descent: restart the main set.
                tiers.main.clear();
                tiers.main.push(direction);
                best = neighbor;
            } else {
                // Close to the best so far: co-qualify without lowering it.
                tiers.main.push(direction);
            }
        } else if neighbor < current {
            tiers.good.push(direction);
        } else if neighbor == current {
            tiers.acceptable.push(direction);
        }
    }

    Some(tiers)
}

/// Resolves the movement/combat ladder for one particle against live state.
///
/// Priority: free main cell, free good cell, free acceptable cell, enemy in
/// a main cell, enemy in a good cell, ally in a main cell, idle. The heal
/// rung commits to the first ally encountered even if the transfer then
/// turns out to move nothing.
pub(crate) fn decide(
    board: &Board,
    registry: &ParticleRegistry,
    gradient: &DistanceField,
    actor: &ParticleState,
) -> Option<Action> {
    let tiers = classify(gradient, actor.position)?;

    for tier in [&tiers.main, &tiers.good, &tiers.acceptable] {
        if let Some(to) = first_free(board, actor.position, tier) {
            return Some(Action::Move { to });
        }
    }

    for tier in [&tiers.main, &tiers.good] {
        if let Some(target) = first_enemy(board, registry, actor, tier) {
            return Some(Action::Attack { target });
        }
    }

    if let Some(ally) = first_ally(board, registry, actor, &tiers.main) {
        return Some(Action::Heal { ally });
    }

    None
}

fn first_free(board: &Board, from: Position, tier: &DirectionSet) -> Option<Position> {
    tier.iter()
        .map(|direction| direction.apply(from))
        .find(|cell| board.is_free(*cell))
}

fn first_enemy(
    board: &Board,
    registry: &ParticleRegistry,
    actor: &ParticleState,
    tier: &DirectionSet,
) -> Option<ParticleId> {
    for direction in tier.iter() {
        let Some(occupant) = board.occupant(direction.apply(actor.position)) else {
            continue;
        };
        let Some(state) = registry.get(occupant) else {
            continue;
        };
        if state.team != actor.team {
            return Some(occupant);
        }
    }
    None
}

fn first_ally(
    board: &Board,
    registry: &ParticleRegistry,
    actor: &ParticleState,
    tier: &DirectionSet,
) -> Option<ParticleId> {
    for direction in tier.iter() {
        let Some(occupant) = board.occupant(direction.apply(actor.position)) else {
            continue;
        };
        let Some(state) = registry.get(occupant) else {
            continue;
        };
        if state.team == actor.team {
            return Some(occupant);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::StepCosts;
    use gridflow_core::TeamId;

    const RED: TeamId = TeamId::new(1);
    const BLUE: TeamId = TeamId::new(2);

    fn field_with(width: i32, height: i32, cells: &[(i32, i32, u32)]) -> DistanceField {
        let mut field = DistanceField::with_valid_dimensions(width, height);
        for (x, y, distance) in cells {
            field.set_distance(Position::new(*x, *y), *distance);
        }
        field
    }

    fn main_directions(tiers: &DirectionTiers) -> Vec<Direction> {
        tiers.main.iter().collect()
    }

    #[test]
    fn no_tiers_at_the_cursor_or_off_the_field() {
        let field = field_with(3, 3, &[(1, 1, 0)]);
        assert!(classify(&field, Position::new(1, 1)).is_none());

        let unreachable = DistanceField::with_valid_dimensions(3, 3);
        assert!(classify(&unreachable, Position::new(1, 1)).is_none());
    }

    #[test]
    fn steep_descent_restarts_the_main_tier() {
        // North qualifies first, then east arrives 20 units better: the
        // restart discards north entirely rather than demoting it to good.
        let mut field = field_with(3, 3, &[(1, 1, 50)]);
        field.set_distance(Position::new(1, 0), 48);
        field.set_distance(Position::new(2, 1), 30);

        let tiers = classify(&field, Position::new(1, 1)).expect("tiers available");
        assert_eq!(main_directions(&tiers), vec![Direction::East]);
        assert_eq!(tiers.good.iter().collect::<Vec<_>>(), Vec::<Direction>::new());
    }

    #[test]
    fn close_descents_co_qualify_as_main() {
        // Northeast arrives first at 44; east at 40 is within the margin of
        // 5, so both stay in the main set and the running best keeps 44.
        let mut field = field_with(3, 3, &[(1, 1, 50)]);
        field.set_distance(Position::new(2, 0), 44);
        field.set_distance(Position::new(2, 1), 40);

        let tiers = classify(&field, Position::new(1, 1)).expect("tiers available");
        assert_eq!(
            main_directions(&tiers),
            vec![Direction::NorthEast, Direction::East]
        );
    }

    #[test]
    fn lateral_neighbors_are_acceptable_and_worse_ones_ignored() {
        let mut field = field_with(3, 3, &[(1, 1, 50)]);
        field.set_distance(Position::new(1, 0), 50);
        field.set_distance(Position::new(1, 2), 60);
        field.set_distance(Position::new(0, 1), 46);

        let tiers = classify(&field, Position::new(1, 1)).expect("tiers available");
        assert_eq!(main_directions(&tiers), vec![Direction::West]);
        assert_eq!(
            tiers.acceptable.iter().collect::<Vec<_>>(),
            vec![Direction::North]
        );
        assert_eq!(tiers.good.iter().collect::<Vec<_>>(), Vec::<Direction>::new());
    }

    fn arena() -> (Board, ParticleRegistry, DistanceField) {
        // Cursor in the east at (4, 1) on a 5x3 board; middle row is the
        // only open corridor.
        let mut board = Board::with_valid_dimensions(5, 3);
        for x in 0..5 {
            board.place_obstacle(Position::new(x, 0));
            board.place_obstacle(Position::new(x, 2));
        }
        let mut field = DistanceField::with_valid_dimensions(5, 3);
        field.rebuild(&board, Position::new(4, 1), StepCosts::Weighted);
        (board, ParticleRegistry::new(), field)
    }

    fn put(board: &mut Board, registry: &mut ParticleRegistry, team: TeamId, x: i32) -> ParticleId {
        let position = Position::new(x, 1);
        let id = registry.allocate(team, position);
        board.set_occupant(position, Some(id));
        id
    }

    #[test]
    fn free_main_cell_wins_over_everything() {
        let (mut board, mut registry, field) = arena();
        let actor = put(&mut board, &mut registry, RED, 1);

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, Some(Action::Move { to: Position::new(2, 1) }));
    }

    #[test]
    fn blocked_main_cell_with_enemy_resolves_to_attack() {
        let (mut board, mut registry, field) = arena();
        let actor = put(&mut board, &mut registry, RED, 1);
        let enemy = put(&mut board, &mut registry, BLUE, 2);

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, Some(Action::Attack { target: enemy }));
    }

    #[test]
    fn blocked_main_cell_with_ally_resolves_to_heal() {
        let (mut board, mut registry, field) = arena();
        let actor = put(&mut board, &mut registry, RED, 1);
        let ally = put(&mut board, &mut registry, RED, 2);

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, Some(Action::Heal { ally }));
    }

    #[test]
    fn heal_commits_even_when_the_transfer_would_move_nothing() {
        let (mut board, mut registry, field) = arena();
        let actor = put(&mut board, &mut registry, RED, 1);
        let ally = put(&mut board, &mut registry, RED, 2);
        registry
            .get_mut(ally)
            .expect("ally state")
            .vitality = gridflow_core::MAX_VITALITY;

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, Some(Action::Heal { ally }));
    }

    #[test]
    fn particle_at_the_cursor_idles() {
        let (mut board, mut registry, field) = arena();
        let actor = put(&mut board, &mut registry, RED, 4);

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn walled_in_particle_idles() {
        let mut board = Board::with_valid_dimensions(5, 5);
        // Box the actor in at (1, 1); cursor field is rebuilt afterwards so
        // the pocket reads unreachable.
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
            board.place_obstacle(Position::new(x, y));
        }
        let mut field = DistanceField::with_valid_dimensions(5, 5);
        field.rebuild(&board, Position::new(4, 4), StepCosts::Weighted);

        let mut registry = ParticleRegistry::new();
        let actor = registry.allocate(RED, Position::new(1, 1));
        board.set_occupant(Position::new(1, 1), Some(actor));

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn lateral_slide_beats_attacking() {
        // From (3, 3) toward a cursor at (4, 1): main cells are (3, 2) and
        // (4, 2), the good cell is (4, 3), and (2, 2) is the lateral
        // equal-distance cell. With enemies filling main and good, the free
        // lateral cell still outranks any attack.
        let mut board = Board::with_valid_dimensions(6, 5);
        let mut field = DistanceField::with_valid_dimensions(6, 5);
        field.rebuild(&board, Position::new(4, 1), StepCosts::Weighted);

        let mut registry = ParticleRegistry::new();
        let actor = registry.allocate(RED, Position::new(3, 3));
        board.set_occupant(Position::new(3, 3), Some(actor));
        for position in [Position::new(3, 2), Position::new(4, 2), Position::new(4, 3)] {
            let enemy = registry.allocate(BLUE, position);
            board.set_occupant(position, Some(enemy));
        }

        let action = decide(
            &board,
            &registry,
            &field,
            registry.get(actor).expect("actor state"),
        );
        assert_eq!(action, Some(Action::Move { to: Position::new(2, 2) }));
    }
}
