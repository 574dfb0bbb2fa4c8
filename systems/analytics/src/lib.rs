#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that republishes team standings.

use gridflow_core::{Command, Event, StandingsReport};

/// Pure system that tracks roster changes and publishes standings reports.
///
/// Roster-changing events (or an explicit refresh command) mark the system
/// dirty; the next observed tick triggers the caller-provided recompute
/// closure exactly once and broadcasts the result.
#[derive(Debug, Default)]
pub struct Analytics {
    last_report: Option<StandingsReport>,
    dirty: bool,
}

impl Analytics {
    /// Creates a new analytics system with no cached report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last standings report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&StandingsReport> {
        self.last_report.as_ref()
    }

    /// Consumes world events and applied commands to publish standings.
    ///
    /// The provided `recompute` closure is invoked at most once per call and
    /// only when a recompute is pending *and* a tick
    /// ([`Event::TickCompleted`]) has been observed in the same batch.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        commands: &[Command],
        mut recompute: F,
        out: &mut Vec<Event>,
    ) where
        F: FnMut() -> Option<StandingsReport>,
    {
        let mut tick_observed = false;

        for event in events {
            match event {
                Event::ParticleSpawned { .. }
                | Event::ParticleConverted { .. }
                | Event::TeamRegistered { .. }
                | Event::TeamEliminated { .. }
                | Event::BoardConfigured { .. } => self.dirty = true,
                Event::TickCompleted { .. } => tick_observed = true,
                _ => {}
            }
        }

        for command in commands {
            if matches!(command, Command::RequestStandingsRefresh) {
                self.dirty = true;
            }
        }

        if !tick_observed || !self.dirty {
            return;
        }
        self.dirty = false;

        if let Some(report) = recompute() {
            self.last_report = Some(report.clone());
            out.push(Event::StandingsUpdated { report });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridflow_core::{TeamId, TeamStanding};

    fn report(tick: u64) -> StandingsReport {
        StandingsReport {
            tick,
            standings: vec![TeamStanding {
                team: TeamId::new(1),
                population: 3,
                total_vitality: 150,
                active: true,
            }],
        }
    }

    #[test]
    fn publishes_only_after_a_dirty_tick() {
        let mut analytics = Analytics::new();
        let mut out = Vec::new();

        // A tick with no roster change publishes nothing.
        analytics.handle(
            &[Event::TickCompleted { tick: 1 }],
            &[],
            || Some(report(1)),
            &mut out,
        );
        assert!(out.is_empty());
        assert!(analytics.last_report().is_none());

        // A roster change without a tick also publishes nothing.
        analytics.handle(
            &[Event::TeamRegistered {
                team: TeamId::new(1),
                cursor: gridflow_core::Position::new(2, 2),
            }],
            &[],
            || Some(report(1)),
            &mut out,
        );
        assert!(out.is_empty());

        // The pending change publishes on the next tick.
        analytics.handle(
            &[Event::TickCompleted { tick: 2 }],
            &[],
            || Some(report(2)),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Event::StandingsUpdated { report: report(2) }]
        );
        assert_eq!(analytics.last_report(), Some(&report(2)));
    }

    #[test]
    fn refresh_command_marks_the_system_dirty() {
        let mut analytics = Analytics::new();
        let mut out = Vec::new();

        analytics.handle(
            &[Event::TickCompleted { tick: 4 }],
            &[Command::RequestStandingsRefresh],
            || Some(report(4)),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Event::StandingsUpdated { report: report(4) }]
        );
    }

    #[test]
    fn recompute_returning_none_keeps_the_cache() {
        let mut analytics = Analytics::new();
        let mut out = Vec::new();

        analytics.handle(
            &[
                Event::TeamEliminated {
                    team: TeamId::new(2),
                },
                Event::TickCompleted { tick: 9 },
            ],
            &[],
            || None,
            &mut out,
        );
        assert!(out.is_empty());
        assert!(analytics.last_report().is_none());
    }
}
