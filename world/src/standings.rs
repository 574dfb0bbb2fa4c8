//! Immutable standings snapshots sourced from the authoritative world state.

use gridflow_core::{ParticleId, StandingsReport, TeamStanding};

use crate::World;

/// Captures per-team standings ordered by team identifier.
pub(crate) fn standings_report(world: &World) -> StandingsReport {
    let mut standings: Vec<TeamStanding> = world
        .teams
        .iter()
        .map(|team| TeamStanding {
            team: team.id,
            population: team.members.len() as u32,
            total_vitality: total_vitality(world, &team.members),
            active: team.active,
        })
        .collect();
    standings.sort_by_key(|standing| standing.team);
    StandingsReport {
        tick: world.tick_index,
        standings,
    }
}

/// Sums the vitality of the provided roster without mutating anything.
pub(crate) fn total_vitality(world: &World, members: &[ParticleId]) -> i64 {
    members
        .iter()
        .filter_map(|member| world.particles.get(*member))
        .map(|state| i64::from(state.vitality))
        .sum()
}
