//! Navigation errors.

use thiserror::Error;

/// Errors surfaced by the navigation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The destination is not part of the target graph's route mapping.
    ///
    /// Navigating to a screen a graph does not contain is a programming
    /// error; the call fails immediately and the back stack is unchanged.
    #[error("destination `{route}` is not part of graph `{graph}`")]
    NotFound {
        /// Route of the graph that was asked to host the destination.
        graph: &'static str,
        /// Route of the missing destination.
        route: &'static str,
    },

    /// No top-level graph owns the given namespaced route.
    ///
    /// This indicates a destination registered outside every top-level
    /// graph, which registry construction rejects. It can only be observed
    /// for routes forged outside the registry.
    #[error("no top-level graph owns destination `{0}`")]
    UnknownGraph(String),

    /// The back stack was observed empty.
    ///
    /// The stack is seeded with the default graph's start screen and the
    /// root entry is never popped, so this is an invariant violation.
    #[error("back stack is empty")]
    EmptyStack,
}

/// Result type for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;
