//! Authoritative particle storage and the vitality transfer operations.

use std::collections::BTreeMap;

use gridflow_core::{
    ParticleId, Position, TeamId, DEFAULT_VITALITY, MAX_VITALITY, MIN_VITALITY, VITALITY_TRANSFER,
};

/// State of a single particle stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct ParticleState {
    /// Identifier allocated by the world for the particle.
    pub(crate) id: ParticleId,
    /// Cell the particle occupies, kept in sync with the board slot.
    pub(crate) position: Position,
    /// Team that currently owns the particle.
    pub(crate) team: TeamId,
    /// Raw vitality; see [`gridflow_core::Vitality`] for the transient-range
    /// caveat.
    pub(crate) vitality: i32,
}

impl ParticleState {
    /// Death is exhaustion at or below zero, NOT reaching [`MIN_VITALITY`];
    /// a particle resting at the minimum is alive.
    pub(crate) fn is_dead(&self) -> bool {
        self.vitality <= 0
    }
}

/// Registry that stores particles and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct ParticleRegistry {
    entries: BTreeMap<ParticleId, ParticleState>,
    next_id: ParticleId,
}

impl ParticleRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: ParticleId::new(0),
        }
    }

    /// Allocates a fresh particle owned by `team` at `position`.
    pub(crate) fn allocate(&mut self, team: TeamId, position: Position) -> ParticleId {
        let id = self.next_id;
        self.next_id = ParticleId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            ParticleState {
                id,
                position,
                team,
                vitality: DEFAULT_VITALITY,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: ParticleId) -> Option<&ParticleState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ParticleId) -> Option<&mut ParticleState> {
        self.entries.get_mut(&id)
    }
}

/// Result of a successful attack drain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct AttackOutcome {
    /// Vitality moved from the target to the attacker.
    pub(crate) drained: i32,
    /// `(previous_team, new_team)` when the target was converted.
    pub(crate) conversion: Option<(TeamId, TeamId)>,
}

/// Drains vitality from an adjacent enemy, converting it on exhaustion.
///
/// Returns `None` when either id is unknown or the particles share a team.
/// The drained amount is `min(VITALITY_TRANSFER, target vitality)`; the
/// attacker is capped at [`MAX_VITALITY`]. A target left at or below zero
/// switches to the attacker's team with [`DEFAULT_VITALITY`] restored; the
/// caller keeps team rosters in sync from the reported conversion pair.
pub(crate) fn attack(
    registry: &mut ParticleRegistry,
    attacker: ParticleId,
    target: ParticleId,
) -> Option<AttackOutcome> {
    let attacker_team = registry.get(attacker)?.team;
    let target_state = registry.get(target)?;
    if target_state.team == attacker_team {
        return None;
    }

    let drained = VITALITY_TRANSFER.min(target_state.vitality);
    {
        let state = registry.get_mut(target)?;
        state.vitality -= drained;
    }
    {
        let state = registry.get_mut(attacker)?;
        state.vitality = MAX_VITALITY.min(state.vitality + drained);
    }

    let conversion = {
        let state = registry.get_mut(target)?;
        if state.is_dead() {
            let previous = state.team;
            state.team = attacker_team;
            state.vitality = DEFAULT_VITALITY;
            Some((previous, attacker_team))
        } else {
            None
        }
    };

    Some(AttackOutcome { drained, conversion })
}

/// Transfers vitality to an adjacent ally.
///
/// Returns the transferred amount, or `None` when either id is unknown, the
/// particles are not allied, the healer sits at [`MIN_VITALITY`], or the
/// ally is already full. The transfer never pushes either party outside
/// `[MIN_VITALITY, MAX_VITALITY]`.
pub(crate) fn heal(
    registry: &mut ParticleRegistry,
    healer: ParticleId,
    ally: ParticleId,
) -> Option<i32> {
    if healer == ally {
        return None;
    }
    let healer_state = registry.get(healer)?;
    let ally_state = registry.get(ally)?;
    if healer_state.team != ally_state.team {
        return None;
    }
    if healer_state.vitality <= MIN_VITALITY || ally_state.vitality >= MAX_VITALITY {
        return None;
    }

    let amount = VITALITY_TRANSFER
        .min(healer_state.vitality - MIN_VITALITY)
        .min(MAX_VITALITY - ally_state.vitality);
    {
        let state = registry.get_mut(healer)?;
        state.vitality -= amount;
    }
    {
        let state = registry.get_mut(ally)?;
        state.vitality += amount;
    }
    Some(amount)
}
