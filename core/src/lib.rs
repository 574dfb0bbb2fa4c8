#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridflow engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Smallest vitality a particle can hold while remaining clamped alive.
pub const MIN_VITALITY: i32 = 1;
/// Largest vitality a particle can accumulate.
pub const MAX_VITALITY: i32 = 100;
/// Vitality assigned to freshly spawned and freshly converted particles.
pub const DEFAULT_VITALITY: i32 = 50;
/// Vitality moved per attack drain or heal transfer.
pub const VITALITY_TRANSFER: i32 = 10;

/// Sentinel distance marking cells the field solver never reached.
///
/// Never add to a distance without confirming it is below this sentinel;
/// the solver guards every accumulation with `checked_add`.
pub const UNREACHABLE: u32 = u32::MAX;

/// Location of a single battlefield cell expressed as signed coordinates.
///
/// Coordinates are signed so the eight-way neighbor probe can step off any
/// board edge and be answered by the usual out-of-bounds sentinels instead
/// of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new cell position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns a new position displaced by the provided offsets.
    #[must_use]
    pub const fn offset_by(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Reports whether the position lies within `[0, width) x [0, height)`.
    #[must_use]
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// The eight neighbor directions of a cell, in fixed scan order.
///
/// Every per-tick neighborhood scan iterates [`Direction::ALL`] in this
/// exact order; changing it changes tie-breaking and therefore replay
/// output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Diagonal toward increasing columns and decreasing rows.
    NorthEast,
    /// Toward increasing column indices.
    East,
    /// Diagonal toward increasing columns and increasing rows.
    SouthEast,
    /// Toward increasing row indices.
    South,
    /// Diagonal toward decreasing columns and increasing rows.
    SouthWest,
    /// Toward decreasing column indices.
    West,
    /// Diagonal toward decreasing columns and decreasing rows.
    NorthWest,
}

impl Direction {
    /// All eight directions in scan order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Horizontal displacement of this direction.
    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Direction::North | Direction::South => 0,
            Direction::NorthEast | Direction::East | Direction::SouthEast => 1,
            Direction::SouthWest | Direction::West | Direction::NorthWest => -1,
        }
    }

    /// Vertical displacement of this direction.
    #[must_use]
    pub const fn dy(self) -> i32 {
        match self {
            Direction::East | Direction::West => 0,
            Direction::SouthEast | Direction::South | Direction::SouthWest => 1,
            Direction::North | Direction::NorthEast | Direction::NorthWest => -1,
        }
    }

    /// Applies this direction to a position, yielding the neighbor cell.
    #[must_use]
    pub const fn apply(self, position: Position) -> Position {
        position.offset_by(self.dx(), self.dy())
    }

    /// Reports whether the direction moves along both axes at once.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.dx() != 0 && self.dy() != 0
    }

    /// Reports whether the direction moves along a single axis.
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        !self.is_diagonal()
    }

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Unique identifier assigned to a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(u32);

impl TeamId {
    /// Creates a new team identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a particle by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(u32);

impl ParticleId {
    /// Creates a new particle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Vitality counter carried by a particle.
///
/// The raw value may transiently sit at or below zero between an attack
/// drain and the conversion check; a particle standing on the board always
/// reports at least [`MIN_VITALITY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vitality(i32);

impl Vitality {
    /// Wraps a raw vitality value without clamping.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the raw vitality value.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Normalized vitality in `0.0..=1.0` for presentation mapping.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        (f64::from(self.0) / f64::from(MAX_VITALITY)).clamp(0.0, 1.0)
    }
}

/// Presentation color attached to a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TeamColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TeamColor {
    /// Creates a new team color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Reasons a construction-time configuration value is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigError {
    /// A board or field dimension was zero or negative.
    NonPositiveDimensions,
    /// An obstacle density fell outside `0.0..=1.0`.
    DensityOutOfRange,
    /// A field copy was attempted between differently sized fields.
    MismatchedDimensions,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimensions => write!(f, "dimensions must be positive"),
            Self::DensityOutOfRange => {
                write!(f, "obstacle density must lie within 0.0..=1.0")
            }
            Self::MismatchedDimensions => {
                write!(f, "field dimensions do not match")
            }
        }
    }
}

impl Error for ConfigError {}

/// Reasons a team registration request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationError {
    /// A team with the same identifier is already registered.
    DuplicateTeam,
}

/// Reasons a particle spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnError {
    /// The owning team has not been registered.
    UnknownTeam,
    /// The requested cell is out of bounds, an obstacle, or occupied.
    Blocked,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Configures the battlefield board, resetting teams and particles.
    ConfigureBoard {
        /// Number of cell columns in the board.
        width: i32,
        /// Number of cell rows in the board.
        height: i32,
    },
    /// Surrounds the board with a single ring of obstacle cells.
    BuildBorderWalls,
    /// Scatters obstacles over the board interior with a seeded draw.
    ScatterObstacles {
        /// Probability in `0.0..=1.0` that an interior cell becomes an obstacle.
        density: f64,
        /// Seed for the deterministic obstacle draw.
        seed: u64,
    },
    /// Marks a single cell as an obstacle.
    PlaceObstacle {
        /// Cell to mark; out-of-bounds requests are ignored.
        position: Position,
    },
    /// Clears the obstacle flag from a single cell.
    RemoveObstacle {
        /// Cell to clear; out-of-bounds requests are ignored.
        position: Position,
    },
    /// Registers a new team with its presentation color and initial cursor.
    RegisterTeam {
        /// Identifier of the team to register.
        team: TeamId,
        /// Presentation color attached to the team.
        color: TeamColor,
        /// Initial cursor cell the team's particles flow toward.
        cursor: Position,
    },
    /// Spawns a particle for a registered team on a free cell.
    SpawnParticle {
        /// Team that will own the particle.
        team: TeamId,
        /// Cell the particle should occupy.
        position: Position,
    },
    /// Moves a team's cursor to a new cell.
    MoveCursor {
        /// Team whose cursor moves.
        team: TeamId,
        /// New cursor cell; any position is accepted, an obstacle or
        /// out-of-bounds cursor leaves the team's field unreachable.
        position: Position,
    },
    /// Asks the analytics system to republish standings after the next tick.
    RequestStandingsRefresh,
    /// Advances the simulation by one tick.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms the board was rebuilt with new dimensions.
    BoardConfigured {
        /// Number of cell columns in the new board.
        width: i32,
        /// Number of cell rows in the new board.
        height: i32,
    },
    /// Reports that a board configuration request was rejected.
    ConfigurationRejected {
        /// Requested column count.
        width: i32,
        /// Requested row count.
        height: i32,
        /// Specific reason the configuration failed.
        reason: ConfigError,
    },
    /// Confirms the border wall ring was written to the board.
    BorderWallsBuilt,
    /// Confirms a seeded obstacle scatter was applied.
    ObstaclesScattered {
        /// Density used for the scatter.
        density: f64,
        /// Seed used for the scatter.
        seed: u64,
    },
    /// Reports that an obstacle scatter request was rejected.
    ObstacleScatterRejected {
        /// Specific reason the scatter failed.
        reason: ConfigError,
    },
    /// Confirms an obstacle was placed on a cell.
    ObstaclePlaced {
        /// Cell that now holds an obstacle.
        position: Position,
    },
    /// Confirms an obstacle was removed from a cell.
    ObstacleRemoved {
        /// Cell that no longer holds an obstacle.
        position: Position,
    },
    /// Confirms a team was registered.
    TeamRegistered {
        /// Identifier of the registered team.
        team: TeamId,
        /// Initial cursor cell of the team.
        cursor: Position,
    },
    /// Reports that a team registration request was rejected.
    TeamRegistrationRejected {
        /// Identifier supplied in the request.
        team: TeamId,
        /// Specific reason the registration failed.
        reason: RegistrationError,
    },
    /// Confirms a particle was spawned.
    ParticleSpawned {
        /// Identifier assigned to the particle by the world.
        particle: ParticleId,
        /// Team that owns the particle.
        team: TeamId,
        /// Cell the particle occupies.
        position: Position,
    },
    /// Reports that a particle spawn request was rejected.
    SpawnRejected {
        /// Team supplied in the request.
        team: TeamId,
        /// Cell supplied in the request.
        position: Position,
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
    /// Confirms a team's cursor moved.
    CursorMoved {
        /// Team whose cursor moved.
        team: TeamId,
        /// New cursor cell.
        position: Position,
    },
    /// Confirms a particle stepped between two cells.
    ParticleMoved {
        /// Particle that moved.
        particle: ParticleId,
        /// Cell the particle occupied before moving.
        from: Position,
        /// Cell the particle occupies after moving.
        to: Position,
    },
    /// Confirms a particle drained vitality from an adjacent enemy.
    ParticleAttacked {
        /// Particle that performed the attack.
        attacker: ParticleId,
        /// Particle that was drained.
        target: ParticleId,
        /// Vitality moved from target to attacker.
        drained: i32,
        /// Whether the target's vitality reached zero and it changed team.
        converted: bool,
    },
    /// Confirms a particle changed team after its vitality was exhausted.
    ParticleConverted {
        /// Particle that changed allegiance.
        particle: ParticleId,
        /// Team the particle previously belonged to.
        from: TeamId,
        /// Team that now owns the particle.
        to: TeamId,
    },
    /// Confirms a particle transferred vitality to an adjacent ally.
    ParticleHealed {
        /// Particle that gave vitality.
        healer: ParticleId,
        /// Particle that received vitality.
        ally: ParticleId,
        /// Vitality moved from healer to ally.
        amount: i32,
    },
    /// Announces that a team's roster emptied during the tick.
    TeamEliminated {
        /// Team that no longer owns any particles.
        team: TeamId,
    },
    /// Indicates that the simulation advanced by one tick.
    TickCompleted {
        /// Index of the completed tick, starting at 1.
        tick: u64,
    },
    /// Publishes a freshly recomputed standings report.
    StandingsUpdated {
        /// The recomputed standings.
        report: StandingsReport,
    },
}

/// Aggregated per-team statistics published by the analytics system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsReport {
    /// Tick index the report was computed at.
    pub tick: u64,
    /// Per-team standings ordered by team identifier.
    pub standings: Vec<TeamStanding>,
}

/// Statistics captured for a single team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// Team the statistics describe.
    pub team: TeamId,
    /// Number of particles the team currently owns.
    pub population: u32,
    /// Sum of the vitality of every owned particle.
    pub total_vitality: i64,
    /// Whether the team still participates in the battle.
    pub active: bool,
}

/// Immutable representation of a single particle's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticleSnapshot {
    /// Unique identifier assigned to the particle.
    pub id: ParticleId,
    /// Cell currently occupied by the particle.
    pub position: Position,
    /// Team that owns the particle.
    pub team: TeamId,
    /// Current vitality of the particle.
    pub vitality: Vitality,
}

/// Read-only snapshot describing all particles on the battlefield.
///
/// Snapshots are ordered by the board's row-major occupancy scan, not by
/// insertion or identifier; consumers must not assume the order is stable
/// across ticks.
#[derive(Clone, Debug, Default)]
pub struct ParticleView {
    snapshots: Vec<ParticleSnapshot>,
}

impl ParticleView {
    /// Creates a new particle view preserving the provided scan order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<ParticleSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured particle snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &ParticleSnapshot> {
        self.snapshots.iter()
    }

    /// Number of particles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParticleSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single team's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeamSnapshot {
    /// Identifier of the team.
    pub id: TeamId,
    /// Presentation color attached to the team.
    pub color: TeamColor,
    /// Cell the team's particles currently flow toward.
    pub cursor: Position,
    /// Number of particles the team currently owns.
    pub population: u32,
    /// Sum of the vitality of every owned particle.
    pub total_vitality: i64,
    /// Whether the team still participates in the battle.
    pub active: bool,
}

/// Read-only snapshot describing all registered teams.
#[derive(Clone, Debug, Default)]
pub struct TeamView {
    snapshots: Vec<TeamSnapshot>,
}

impl TeamView {
    /// Creates a new team view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TeamSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured team snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TeamSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TeamSnapshot> {
        self.snapshots
    }
}

/// Read-only view into the dense board: obstacle flags and occupant slots.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    obstacles: &'a [bool],
    occupants: &'a [Option<ParticleId>],
    width: i32,
    height: i32,
}

impl<'a> BoardView<'a> {
    /// Captures a new board view backed by the provided cell slices.
    #[must_use]
    pub fn new(
        obstacles: &'a [bool],
        occupants: &'a [Option<ParticleId>],
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            obstacles,
            occupants,
            width,
            height,
        }
    }

    /// Provides the dimensions of the underlying board.
    #[must_use]
    pub const fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
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
            .map_or(true, |index| self.obstacles.get(index).copied().unwrap_or(true))
    }

    /// Returns the particle occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<ParticleId> {
        self.index(position)
            .and_then(|index| self.occupants.get(index).copied().flatten())
    }

    /// Reports whether the cell is in bounds, unobstructed, and unoccupied.
    #[must_use]
    pub fn is_free(&self, position: Position) -> bool {
        !self.is_obstacle(position) && self.occupant(position).is_none()
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.in_bounds(self.width, self.height) {
            let row = usize::try_from(position.y()).ok()?;
            let column = usize::try_from(position.x()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Read-only view into a team's dense distance field.
#[derive(Clone, Copy, Debug)]
pub struct GradientView<'a> {
    distances: &'a [u32],
    width: i32,
    height: i32,
}

impl<'a> GradientView<'a> {
    /// Captures a new gradient view backed by the provided distance slice.
    #[must_use]
    pub fn new(distances: &'a [u32], width: i32, height: i32) -> Self {
        Self {
            distances,
            width,
            height,
        }
    }

    /// Provides the dimensions of the underlying field.
    #[must_use]
    pub const fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Distance stored for the cell; [`UNREACHABLE`] out of bounds.
    #[must_use]
    pub fn distance(&self, position: Position) -> u32 {
        self.index(position)
            .and_then(|index| self.distances.get(index).copied())
            .unwrap_or(UNREACHABLE)
    }

    /// Reports whether the cell was reached by the field solver.
    #[must_use]
    pub fn is_reachable(&self, position: Position) -> bool {
        self.distance(position) != UNREACHABLE
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &'a [u32] {
        self.distances
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.in_bounds(self.width, self.height) {
            let row = usize::try_from(position.y()).ok()?;
            let column = usize::try_from(position.x()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, Direction, GradientView, ParticleId, Position, StandingsReport, TeamId,
        TeamStanding, Vitality, UNREACHABLE,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Position::new(1, 1);
        let destination = Position::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn directions_enumerate_in_scan_order() {
        let offsets: Vec<(i32, i32)> = Direction::ALL
            .iter()
            .map(|direction| (direction.dx(), direction.dy()))
            .collect();
        assert_eq!(
            offsets,
            vec![
                (0, -1),
                (1, -1),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
            ]
        );
    }

    #[test]
    fn diagonal_classification_matches_offsets() {
        for direction in Direction::ALL {
            let diagonal = direction.dx() != 0 && direction.dy() != 0;
            assert_eq!(direction.is_diagonal(), diagonal);
            assert_eq!(direction.is_cardinal(), !diagonal);
        }
    }

    #[test]
    fn opposite_directions_cancel_out() {
        let origin = Position::new(3, 3);
        for direction in Direction::ALL {
            let there = direction.apply(origin);
            let back = direction.opposite().apply(there);
            assert_eq!(back, origin);
        }
    }

    #[test]
    fn vitality_ratio_is_clamped() {
        assert_eq!(Vitality::new(50).ratio(), 0.5);
        assert_eq!(Vitality::new(100).ratio(), 1.0);
        assert_eq!(Vitality::new(250).ratio(), 1.0);
        assert_eq!(Vitality::new(-10).ratio(), 0.0);
    }

    #[test]
    fn gradient_view_answers_unreachable_out_of_bounds() {
        let distances = vec![0, 10, 10, 14];
        let view = GradientView::new(&distances, 2, 2);
        assert_eq!(view.distance(Position::new(0, 0)), 0);
        assert_eq!(view.distance(Position::new(1, 1)), 14);
        assert_eq!(view.distance(Position::new(-1, 0)), UNREACHABLE);
        assert_eq!(view.distance(Position::new(2, 0)), UNREACHABLE);
        assert!(!view.is_reachable(Position::new(0, 2)));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&TeamId::new(3));
        assert_round_trip(&ParticleId::new(42));
        assert_round_trip(&Position::new(-2, 7));
        assert_round_trip(&Vitality::new(50));
    }

    #[test]
    fn config_error_round_trips_through_bincode() {
        assert_round_trip(&ConfigError::DensityOutOfRange);
    }

    #[test]
    fn standings_report_round_trips_through_bincode() {
        let report = StandingsReport {
            tick: 12,
            standings: vec![
                TeamStanding {
                    team: TeamId::new(1),
                    population: 8,
                    total_vitality: 400,
                    active: true,
                },
                TeamStanding {
                    team: TeamId::new(2),
                    population: 0,
                    total_vitality: 0,
                    active: false,
                },
            ],
        };
        assert_round_trip(&report);
    }
}
