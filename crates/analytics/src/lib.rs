//! Screen-view analytics for Episodic
//!
//! The navigator reports every completed navigation here. Reporting is
//! fire-and-forget: trackers take `&self`, return nothing, and must not
//! block, so a slow or broken sink can never fail a navigation.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Receiver for screen-view events emitted on every completed navigation.
#[cfg_attr(test, mockall::automock)]
pub trait ScreenViewTracker: Send + Sync {
    /// Record that `route` became the visible screen.
    ///
    /// `label` is the screen's human-readable name and `params` the
    /// arguments bound for this visit (e.g. a show id).
    fn on_screen_viewed(&self, label: &str, route: &str, params: &[(&'static str, String)]);
}

/// Tracker that logs screen views through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracker;

impl ScreenViewTracker for TracingTracker {
    fn on_screen_viewed(&self, label: &str, route: &str, params: &[(&'static str, String)]) {
        tracing::info!(label, route, ?params, "screen viewed");
    }
}

/// Tracker that drops every event. Useful in tests and headless builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl ScreenViewTracker for NoopTracker {
    fn on_screen_viewed(&self, _label: &str, _route: &str, _params: &[(&'static str, String)]) {}
}
