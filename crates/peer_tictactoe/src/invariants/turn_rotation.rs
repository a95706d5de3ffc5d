//! Turn rotation invariant: markers follow the configured cycle.

use super::Invariant;
use crate::GameEngine;

/// Invariant: the k-th placement was made by the k-th marker of the cycle,
/// counted from the first marker, and the current marker is next in line.
pub struct TurnRotationInvariant;

impl Invariant<GameEngine> for TurnRotationInvariant {
    fn holds(game: &GameEngine) -> bool {
        let cycle = game.marker_cycle();
        let Some(start) = cycle.iter().position(|m| *m == game.first_marker()) else {
            return false;
        };
        let expected = |k: usize| cycle[(start + k) % cycle.len()];

        game.history()
            .iter()
            .enumerate()
            .all(|(k, placement)| placement.marker == expected(k))
            && game.current_marker() == expected(game.history().len())
    }

    fn description() -> &'static str {
        "Players take turns in marker-cycle order"
    }
}
