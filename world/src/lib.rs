#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative battlefield state management for Gridflow.
//!
//! The world owns the board, every particle, every team, and one reusable
//! distance field per team. Adapters mutate it exclusively through
//! [`apply`]; each tick rebuilds all team fields first and then resolves
//! particle decisions serially in row-major scan order, so later particles
//! observe the moves, drains, and conversions of earlier ones.

use gridflow_core::{
    BoardView, Command, Event, GradientView, ParticleId, ParticleSnapshot, ParticleView, Position,
    RegistrationError, SpawnError, StandingsReport, TeamColor, TeamId, TeamSnapshot, TeamView,
    Vitality,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod board;
mod decision;
mod gradient;
mod particles;
mod standings;

pub use board::Board;
pub use gradient::{DistanceField, StepCosts, CARDINAL_STEP_COST, DIAGONAL_STEP_COST};

use decision::Action;
use particles::ParticleRegistry;

const DEFAULT_BOARD_WIDTH: i32 = 64;
const DEFAULT_BOARD_HEIGHT: i32 = 48;

/// Represents the authoritative Gridflow battlefield state.
#[derive(Debug)]
pub struct World {
    pub(crate) board: Board,
    pub(crate) particles: ParticleRegistry,
    pub(crate) teams: Vec<TeamState>,
    pub(crate) gradients: Vec<DistanceField>,
    pub(crate) tick_index: u64,
}

/// Authoritative state of a registered team.
#[derive(Clone, Debug)]
pub(crate) struct TeamState {
    pub(crate) id: TeamId,
    pub(crate) color: TeamColor,
    pub(crate) cursor: Position,
    pub(crate) members: Vec<ParticleId>,
    pub(crate) active: bool,
}

impl World {
    /// Creates a new battlefield with default dimensions and no teams.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::with_valid_dimensions(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT),
            particles: ParticleRegistry::new(),
            teams: Vec::new(),
            gradients: Vec::new(),
            tick_index: 0,
        }
    }

    pub(crate) fn team_index(&self, team: TeamId) -> Option<usize> {
        self.teams.iter().position(|state| state.id == team)
    }

    fn transfer_member(&mut self, particle: ParticleId, from: TeamId, to: TeamId) {
        if let Some(index) = self.team_index(from) {
            let team = &mut self.teams[index];
            team.members.retain(|member| *member != particle);
            if team.members.is_empty() {
                team.active = false;
            }
        }
        if let Some(index) = self.team_index(to) {
            let team = &mut self.teams[index];
            team.members.push(particle);
            team.active = true;
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard { width, height } => match Board::new(width, height) {
            Ok(board) => {
                world.board = board;
                world.particles = ParticleRegistry::new();
                world.teams.clear();
                world.gradients.clear();
                world.tick_index = 0;
                out_events.push(Event::BoardConfigured { width, height });
            }
            Err(reason) => out_events.push(Event::ConfigurationRejected {
                width,
                height,
                reason,
            }),
        },
        Command::BuildBorderWalls => {
            world.board.add_border_walls();
            out_events.push(Event::BorderWallsBuilt);
        }
        Command::ScatterObstacles { density, seed } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            match world.board.add_random_obstacles(density, &mut rng) {
                Ok(()) => out_events.push(Event::ObstaclesScattered { density, seed }),
                Err(reason) => out_events.push(Event::ObstacleScatterRejected { reason }),
            }
        }
        Command::PlaceObstacle { position } => {
            if world.board.in_bounds(position) {
                world.board.place_obstacle(position);
                out_events.push(Event::ObstaclePlaced { position });
            }
        }
        Command::RemoveObstacle { position } => {
            if world.board.in_bounds(position) {
                world.board.remove_obstacle(position);
                out_events.push(Event::ObstacleRemoved { position });
            }
        }
        Command::RegisterTeam {
            team,
            color,
            cursor,
        } => {
            if world.team_index(team).is_some() {
                out_events.push(Event::TeamRegistrationRejected {
                    team,
                    reason: RegistrationError::DuplicateTeam,
                });
            } else {
                world.teams.push(TeamState {
                    id: team,
                    color,
                    cursor,
                    members: Vec::new(),
                    active: true,
                });
                world.gradients.push(DistanceField::with_valid_dimensions(
                    world.board.width(),
                    world.board.height(),
                ));
                out_events.push(Event::TeamRegistered { team, cursor });
            }
        }
        Command::SpawnParticle { team, position } => {
            let Some(team_index) = world.team_index(team) else {
                out_events.push(Event::SpawnRejected {
                    team,
                    position,
                    reason: SpawnError::UnknownTeam,
                });
                return;
            };
            if !world.board.is_free(position) {
                out_events.push(Event::SpawnRejected {
                    team,
                    position,
                    reason: SpawnError::Blocked,
                });
                return;
            }
            let particle = world.particles.allocate(team, position);
            world.board.set_occupant(position, Some(particle));
            let state = &mut world.teams[team_index];
            state.members.push(particle);
            state.active = true;
            out_events.push(Event::ParticleSpawned {
                particle,
                team,
                position,
            });
        }
        Command::MoveCursor { team, position } => {
            if let Some(index) = world.team_index(team) {
                world.teams[index].cursor = position;
                out_events.push(Event::CursorMoved { team, position });
            }
        }
        Command::RequestStandingsRefresh => {
            // Consumed by the analytics system; the world itself has
            // nothing to recompute eagerly.
        }
        Command::Tick => run_tick(world, out_events),
    }
}

/// Advances the battlefield by one tick.
///
/// Every team's field is fully rebuilt before the first decision, then the
/// occupant list captured in row-major order is resolved one particle at a
/// time. Each particle's team is looked up live at its turn, so a particle
/// converted earlier in the same tick immediately routes and fights for its
/// new team. `Board::move_occupant` skipping its own occupancy re-check is
/// sound only under this serialization.
fn run_tick(world: &mut World, out_events: &mut Vec<Event>) {
    world.tick_index = world.tick_index.saturating_add(1);

    for index in 0..world.teams.len() {
        let cursor = world.teams[index].cursor;
        world.gradients[index].rebuild(&world.board, cursor, StepCosts::Weighted);
    }

    let active_before: Vec<(TeamId, bool)> = world
        .teams
        .iter()
        .map(|team| (team.id, team.active))
        .collect();

    let scan = world.board.occupant_ids_row_major();
    for particle in scan {
        let Some(actor) = world.particles.get(particle) else {
            continue;
        };
        let Some(team_index) = world.team_index(actor.team) else {
            continue;
        };
        let origin = actor.position;
        let Some(action) = decision::decide(
            &world.board,
            &world.particles,
            &world.gradients[team_index],
            actor,
        ) else {
            continue;
        };

        match action {
            Action::Move { to } => {
                if world.board.move_occupant(origin, to) {
                    if let Some(state) = world.particles.get_mut(particle) {
                        state.position = to;
                    }
                    out_events.push(Event::ParticleMoved {
                        particle,
                        from: origin,
                        to,
                    });
                }
            }
            Action::Attack { target } => {
                if let Some(outcome) = particles::attack(&mut world.particles, particle, target) {
                    out_events.push(Event::ParticleAttacked {
                        attacker: particle,
                        target,
                        drained: outcome.drained,
                        converted: outcome.conversion.is_some(),
                    });
                    if let Some((from, to)) = outcome.conversion {
                        world.transfer_member(target, from, to);
                        out_events.push(Event::ParticleConverted {
                            particle: target,
                            from,
                            to,
                        });
                    }
                }
            }
            Action::Heal { ally } => {
                if let Some(amount) = particles::heal(&mut world.particles, particle, ally) {
                    out_events.push(Event::ParticleHealed {
                        healer: particle,
                        ally,
                        amount,
                    });
                }
            }
        }
    }

    for (team, was_active) in active_before {
        if let Some(index) = world.team_index(team) {
            if was_active && !world.teams[index].active {
                out_events.push(Event::TeamEliminated { team });
            }
        }
    }

    out_events.push(Event::TickCompleted {
        tick: world.tick_index,
    });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{
        standings, BoardView, DistanceField, GradientView, ParticleId, ParticleSnapshot,
        ParticleView, Position, StandingsReport, StepCosts, TeamId, TeamSnapshot, TeamView,
        Vitality, World,
    };
    use gridflow_core::UNREACHABLE;

    /// Width and height of the battlefield board in cells.
    #[must_use]
    pub fn dimensions(world: &World) -> (i32, i32) {
        (world.board.width(), world.board.height())
    }

    /// Exposes a read-only view of the board's obstacle and occupant stores.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        BoardView::new(
            world.board.obstacles(),
            world.board.occupants(),
            world.board.width(),
            world.board.height(),
        )
    }

    /// Reports whether the cell holds an obstacle; out of bounds counts as one.
    #[must_use]
    pub fn is_obstacle(world: &World, position: Position) -> bool {
        world.board.is_obstacle(position)
    }

    /// Returns the particle occupying the provided cell, if any.
    #[must_use]
    pub fn occupant_at(world: &World, position: Position) -> Option<ParticleId> {
        world.board.occupant(position)
    }

    /// Current cursor cell of the provided team, if it is registered.
    #[must_use]
    pub fn cursor(world: &World, team: TeamId) -> Option<Position> {
        world
            .team_index(team)
            .map(|index| world.teams[index].cursor)
    }

    /// Read-only view of the team's distance field from the last tick.
    #[must_use]
    pub fn gradient(world: &World, team: TeamId) -> Option<GradientView<'_>> {
        world
            .team_index(team)
            .map(|index| world.gradients[index].view())
    }

    /// Captures every particle in the board's row-major scan order.
    #[must_use]
    pub fn particles(world: &World) -> ParticleView {
        let snapshots: Vec<ParticleSnapshot> = world
            .board
            .occupant_ids_row_major()
            .into_iter()
            .filter_map(|id| {
                world.particles.get(id).map(|state| ParticleSnapshot {
                    id: state.id,
                    position: state.position,
                    team: state.team,
                    vitality: Vitality::new(state.vitality),
                })
            })
            .collect();
        ParticleView::from_snapshots(snapshots)
    }

    /// Captures per-team statistics in deterministic identifier order.
    #[must_use]
    pub fn team_view(world: &World) -> TeamView {
        let snapshots: Vec<TeamSnapshot> = world
            .teams
            .iter()
            .map(|team| TeamSnapshot {
                id: team.id,
                color: team.color,
                cursor: team.cursor,
                population: team.members.len() as u32,
                total_vitality: standings::total_vitality(world, &team.members),
                active: team.active,
            })
            .collect();
        TeamView::from_snapshots(snapshots)
    }

    /// Normalized vitality of the particle for presentation mapping.
    #[must_use]
    pub fn vitality_ratio(world: &World, particle: ParticleId) -> Option<f64> {
        world
            .particles
            .get(particle)
            .map(|state| Vitality::new(state.vitality).ratio())
    }

    /// Aggregated standings as of the last completed tick.
    #[must_use]
    pub fn standings(world: &World) -> StandingsReport {
        standings::standings_report(world)
    }

    /// Uniform-cost distance from the cell to the team's cursor.
    ///
    /// Recomputed on demand with every step costing 1; intended for
    /// reachability-style queries where corner-cutting weights do not
    /// matter.
    #[must_use]
    pub fn cursor_distance(world: &World, team: TeamId, position: Position) -> u32 {
        let Some(index) = world.team_index(team) else {
            return UNREACHABLE;
        };
        let mut field =
            DistanceField::with_valid_dimensions(world.board.width(), world.board.height());
        field.rebuild(&world.board, world.teams[index].cursor, StepCosts::Uniform);
        field.distance(position)
    }

    /// Reports whether the cell can reach the team's cursor at all.
    #[must_use]
    pub fn is_reachable(world: &World, team: TeamId, position: Position) -> bool {
        cursor_distance(world, team, position) != UNREACHABLE
    }
}
