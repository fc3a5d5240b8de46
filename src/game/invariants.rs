//! World invariants - sanity checks that detect bugs.
//!
//! These must hold between ticks for every world produced by
//! `World::initialize` followed by any number of `World::tick` calls.
//! Dead snakes are frozen where they died and only need to stay in bounds.
//! Freshly spawned snakes may share a cell, so head overlap is only checked
//! once a tick has been resolved.

use std::collections::HashSet;

use crate::game::World;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all world invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = world.grid();

    if !grid.contains(world.food().position()) {
        violations.push(InvariantViolation {
            message: format!("Food at {:?} is off the grid", world.food().position()),
        });
    }

    let mut ids = HashSet::new();
    for snake in world.snakes() {
        if !ids.insert(snake.id()) {
            violations.push(InvariantViolation {
                message: format!("Snake id {} is used twice", snake.id()),
            });
        }

        if let Some(pos) = snake.body().find(|&pos| !grid.contains(pos)) {
            violations.push(InvariantViolation {
                message: format!("Snake {} has segment {:?} off the grid", snake.id(), pos),
            });
        }

        if !snake.is_alive() {
            continue;
        }

        // Living bodies never overlap themselves
        let mut seen = HashSet::with_capacity(snake.length());
        if let Some(pos) = snake.body().find(|&pos| !seen.insert(pos)) {
            violations.push(InvariantViolation {
                message: format!("Snake {} covers {:?} twice", snake.id(), pos),
            });
        }

        // Consecutive segments are grid neighbors
        let segments: Vec<_> = snake.body().collect();
        for pair in segments.windows(2) {
            if !grid.neighbors(pair[0]).contains(&pair[1]) {
                violations.push(InvariantViolation {
                    message: format!(
                        "Snake {} has disjoint segments {:?} and {:?}",
                        snake.id(),
                        pair[0],
                        pair[1]
                    ),
                });
                break;
            }
        }

        let head = snake.head();
        if world.tick_count() == 0 {
            continue;
        }
        if let Some(other) = world
            .snakes()
            .iter()
            .find(|other| other.id() != snake.id() && other.occupies(head))
        {
            violations.push(InvariantViolation {
                message: format!(
                    "Living snake {} has its head inside snake {}",
                    snake.id(),
                    other.id()
                ),
            });
        }
    }

    violations
}
