//! Transition selection
//!
//! Pure classification of the animation for a navigation change. Crossing
//! top-level graphs (a tab change) cross-fades; staying within one graph
//! slides with the direction of travel. No rendering here, only the
//! decision.

use serde::{Deserialize, Serialize};

use crate::stack::StackEntry;

/// Direction of a navigation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A push: moving deeper.
    Forward,
    /// A pop: moving back up.
    Back,
}

/// Animation style applied to a navigation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Fade between screens; used whenever the navigation crosses graphs.
    CrossFade,
    /// Slide in from the end; in-graph forward navigation.
    SlideForward,
    /// Slide out towards the end; in-graph back navigation.
    SlideBackward,
}

/// Classify the animation for a `previous` → `next` change.
///
/// Entries carry their owning graph, resolved when they were pushed, so the
/// cross-graph check is a direct comparison. Deterministic and
/// side-effect-free.
pub fn select_transition(
    previous: &StackEntry,
    next: &StackEntry,
    direction: Direction,
) -> Transition {
    if previous.graph != next.graph {
        return Transition::CrossFade;
    }
    match direction {
        Direction::Forward => Transition::SlideForward,
        Direction::Back => Transition::SlideBackward,
    }
}
