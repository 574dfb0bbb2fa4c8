#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Gridflow battlefield.
//!
//! The system turns a validated [`Config`] into deterministic command
//! batches: first the board layout (dimensions, border walls, seeded
//! obstacle scatter), then team registration and seeded particle deployment
//! into each team's spawn zone. Identical configurations always emit
//! identical batches.

use gridflow_core::{Command, Position, TeamColor, TeamId};
use gridflow_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Default color rotation for teams that do not pick their own.
pub const TEAM_COLORS: [TeamColor; 4] = [
    TeamColor::from_rgb(0xc8, 0x2a, 0x36),
    TeamColor::from_rgb(0x1f, 0x6f, 0xc2),
    TeamColor::from_rgb(0x2f, 0x95, 0x32),
    TeamColor::from_rgb(0xff, 0xc1, 0x07),
];

/// Random placement attempts per requested particle before the
/// deterministic sweep takes over.
const PLACEMENT_ATTEMPT_FACTOR: usize = 16;

/// Errors reported when a bootstrap configuration is rejected.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Board dimensions must both be positive.
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveBoard {
        /// Requested column count.
        width: i32,
        /// Requested row count.
        height: i32,
    },
    /// Obstacle density must lie in `0.0..=1.0`.
    #[error("obstacle density must lie within 0.0..=1.0, got {density}")]
    DensityOutOfRange {
        /// Density supplied in the configuration.
        density: f64,
    },
    /// At least one team plan is required.
    #[error("at least one team plan is required")]
    NoTeams,
    /// Every team plan must use a distinct identifier.
    #[error("duplicate plan for team {0}")]
    DuplicateTeam(u32),
    /// A spawn zone must describe a non-empty rectangle.
    #[error("spawn zone for team {0} is empty")]
    EmptyZone(u32),
    /// A spawn zone must fit inside the board interior.
    #[error("spawn zone for team {0} leaves the board interior")]
    ZoneOutOfBounds(u32),
}

/// Inclusive rectangular region particles are deployed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnZone {
    min: Position,
    max: Position,
}

impl SpawnZone {
    /// Creates a zone spanning both corner cells inclusively.
    #[must_use]
    pub const fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// Lower-left corner of the zone.
    #[must_use]
    pub const fn min(&self) -> Position {
        self.min
    }

    /// Upper-right corner of the zone.
    #[must_use]
    pub const fn max(&self) -> Position {
        self.max
    }

    fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y()
    }

    fn sample(&self, rng: &mut ChaCha8Rng) -> Position {
        Position::new(
            rng.gen_range(self.min.x()..=self.max.x()),
            rng.gen_range(self.min.y()..=self.max.y()),
        )
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let min = self.min;
        let max = self.max;
        (min.y()..=max.y())
            .flat_map(move |y| (min.x()..=max.x()).map(move |x| Position::new(x, y)))
    }
}

/// Deployment plan for a single team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamPlan {
    /// Identifier the team registers under.
    pub team: TeamId,
    /// Presentation color attached to the team.
    pub color: TeamColor,
    /// Initial cursor cell the team flows toward.
    pub cursor: Position,
    /// Region the team's particles are deployed into.
    pub zone: SpawnZone,
    /// Number of particles requested for the team.
    pub particles: u32,
}

/// Validated bootstrap configuration.
#[derive(Clone, Debug)]
pub struct Config {
    board_width: i32,
    board_height: i32,
    obstacle_density: f64,
    obstacle_seed: u64,
    deployment_seed: u64,
    teams: Vec<TeamPlan>,
}

impl Config {
    /// Validates and captures a bootstrap configuration.
    ///
    /// Validation is strict and fails fast: non-positive board dimensions,
    /// an out-of-range density, duplicate team identifiers, and empty or
    /// out-of-interior spawn zones are all rejected before any command is
    /// emitted.
    pub fn new(
        board_width: i32,
        board_height: i32,
        obstacle_density: f64,
        obstacle_seed: u64,
        deployment_seed: u64,
        teams: Vec<TeamPlan>,
    ) -> Result<Self, BootstrapError> {
        if board_width <= 0 || board_height <= 0 {
            return Err(BootstrapError::NonPositiveBoard {
                width: board_width,
                height: board_height,
            });
        }
        if !(0.0..=1.0).contains(&obstacle_density) {
            return Err(BootstrapError::DensityOutOfRange {
                density: obstacle_density,
            });
        }
        if teams.is_empty() {
            return Err(BootstrapError::NoTeams);
        }
        for (index, plan) in teams.iter().enumerate() {
            if teams[..index].iter().any(|other| other.team == plan.team) {
                return Err(BootstrapError::DuplicateTeam(plan.team.get()));
            }
            if plan.zone.is_empty() {
                return Err(BootstrapError::EmptyZone(plan.team.get()));
            }
            let interior_min = Position::new(1, 1);
            let interior_max = Position::new(board_width - 2, board_height - 2);
            if plan.zone.min().x() < interior_min.x()
                || plan.zone.min().y() < interior_min.y()
                || plan.zone.max().x() > interior_max.x()
                || plan.zone.max().y() > interior_max.y()
            {
                return Err(BootstrapError::ZoneOutOfBounds(plan.team.get()));
            }
        }
        Ok(Self {
            board_width,
            board_height,
            obstacle_density,
            obstacle_seed,
            deployment_seed,
            teams,
        })
    }

    /// Builds the classic two-team duel: mirrored spawn zones on the west
    /// and east flanks, cursors at the quarter points of the center row.
    pub fn standard_duel(
        board_width: i32,
        board_height: i32,
        obstacle_density: f64,
        particles_per_team: u32,
        seed: u64,
    ) -> Result<Self, BootstrapError> {
        let mid_y = board_height / 2;
        let zone_top = (board_height / 4).max(1);
        let zone_bottom = (board_height * 3 / 4).min(board_height - 2);
        let west_zone = SpawnZone::new(
            Position::new(1, zone_top),
            Position::new(board_width / 4, zone_bottom),
        );
        let east_zone = SpawnZone::new(
            Position::new(board_width * 3 / 4, zone_top),
            Position::new(board_width - 2, zone_bottom),
        );
        Self::new(
            board_width,
            board_height,
            obstacle_density,
            seed,
            seed.wrapping_add(1),
            vec![
                TeamPlan {
                    team: TeamId::new(1),
                    color: TEAM_COLORS[0],
                    cursor: Position::new(board_width / 4, mid_y),
                    zone: west_zone,
                    particles: particles_per_team,
                },
                TeamPlan {
                    team: TeamId::new(2),
                    color: TEAM_COLORS[1],
                    cursor: Position::new(board_width * 3 / 4, mid_y),
                    zone: east_zone,
                    particles: particles_per_team,
                },
            ],
        )
    }

    /// Planned teams in registration order.
    #[must_use]
    pub fn teams(&self) -> &[TeamPlan] {
        &self.teams
    }

    /// Commands that shape the board before any team exists.
    #[must_use]
    pub fn layout_commands(&self) -> Vec<Command> {
        vec![
            Command::ConfigureBoard {
                width: self.board_width,
                height: self.board_height,
            },
            Command::BuildBorderWalls,
            Command::ScatterObstacles {
                density: self.obstacle_density,
                seed: self.obstacle_seed,
            },
        ]
    }

    /// Commands that register every team and deploy its particles.
    ///
    /// Free cells are picked with a seeded draw inside each zone; when a
    /// zone is too crowded for random placement to finish, a deterministic
    /// sweep fills the remainder, so a saturated zone yields fewer spawns
    /// instead of an unbounded retry loop.
    #[must_use]
    pub fn deployment_commands(&self, world: &World) -> Vec<Command> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.deployment_seed);
        let board = query::board_view(world);
        let mut claimed: Vec<Position> = Vec::new();
        let mut commands = Vec::new();

        for plan in &self.teams {
            commands.push(Command::RegisterTeam {
                team: plan.team,
                color: plan.color,
                cursor: plan.cursor,
            });

            let requested = plan.particles as usize;
            let mut placed = 0;
            let mut attempts = 0;
            let attempt_budget = requested.saturating_mul(PLACEMENT_ATTEMPT_FACTOR);
            while placed < requested && attempts < attempt_budget {
                attempts += 1;
                let position = plan.zone.sample(&mut rng);
                if !board.is_free(position) || claimed.contains(&position) {
                    continue;
                }
                claimed.push(position);
                commands.push(Command::SpawnParticle {
                    team: plan.team,
                    position,
                });
                placed += 1;
            }

            if placed < requested {
                for position in plan.zone.cells() {
                    if placed >= requested {
                        break;
                    }
                    if !board.is_free(position) || claimed.contains(&position) {
                        continue;
                    }
                    claimed.push(position);
                    commands.push(Command::SpawnParticle {
                        team: plan.team,
                        position,
                    });
                    placed += 1;
                }
            }
        }

        commands
    }
}
