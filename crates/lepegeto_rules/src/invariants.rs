//! Structural invariants of a game state.
//!
//! A freshly started game satisfies all of them. The commit step does not
//! enforce them, so they are checked where state enters from outside, such
//! as restoring a saved snapshot.

use super::board::{BOARD_SIZE, is_forbidden};
use super::player::Player;
use super::state::GameState;
use std::collections::HashSet;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked as one.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, in declaration order.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A: Invariant<S>, B: Invariant<S>> InvariantSet<S> for (A, B) {
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks = [
            (A::holds(state), A::description()),
            (B::holds(state), B::description()),
        ];
        let violations: Vec<InvariantViolation> = checks
            .into_iter()
            .filter(|(held, _)| !held)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            return Ok(());
        }
        warn!(broken = ?violations, "Game state breaks rule invariants");
        Err(violations)
    }
}

/// Invariant: blue pieces, red pieces, and blocked cells never share a cell.
pub struct DisjointCells;

impl Invariant<GameState> for DisjointCells {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        Player::ALL
            .iter()
            .flat_map(|player| state.positions_of(*player))
            .all(|p| !is_forbidden(*p) && seen.insert(*p))
    }

    fn description() -> &'static str {
        "Blue, red, and blocked cells are pairwise disjoint"
    }
}

/// Invariant: each side has exactly five pieces.
pub struct FivePiecesEach;

impl Invariant<GameState> for FivePiecesEach {
    fn holds(state: &GameState) -> bool {
        Player::ALL
            .iter()
            .all(|player| state.positions_of(*player).len() == BOARD_SIZE as usize)
    }

    fn description() -> &'static str {
        "Each side has five pieces"
    }
}

/// All structural invariants of a game state.
pub type RuleInvariants = (DisjointCells, FivePiecesEach);
