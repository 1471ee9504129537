//! The navigator
//!
//! Stateful coordinator translating screen intents into back-stack
//! mutations. Screens never see the whole navigator; each depends on the
//! capability trait covering just the intents it needs.
//!
//! All mutation goes through `&mut self`, so intents are serialized by
//! construction: one completes its back-stack change, tracker update and
//! notification before the next can start. Nothing here blocks or
//! suspends. Callers fanning in intents from several producers must funnel
//! them through one owner (a single-consumer queue in front of the
//! navigator).

use std::sync::Arc;

use analytics::ScreenViewTracker;
use tokio::sync::watch;

use crate::error::Result;
use crate::graph::{GraphId, NavGraphs};
use crate::screen::Screen;
use crate::stack::{BackStack, StackEntry, StateBundle};

type SettingsHandler = Box<dyn Fn() + Send + Sync>;

/// The router. Owns the back stack and is its sole mutation surface.
pub struct Navigator {
    graphs: Arc<NavGraphs>,
    stack: BackStack,
    current_graph: GraphId,
    tracker: Arc<dyn ScreenViewTracker>,
    changes: watch::Sender<StackEntry>,
    settings_handler: Option<SettingsHandler>,
}

impl Navigator {
    /// Create a navigator seeded with the default graph's start screen.
    ///
    /// The initial screen is reported to `tracker` like any other
    /// navigation.
    pub fn new(graphs: Arc<NavGraphs>, tracker: Arc<dyn ScreenViewTracker>) -> Self {
        let default_graph = graphs.default_graph();
        let root = StackEntry::new(default_graph, graphs.graph(default_graph).start().clone());
        let (changes, _) = watch::channel(root.clone());

        let mut navigator = Self {
            graphs,
            stack: BackStack::new(root),
            current_graph: default_graph,
            tracker,
            changes,
            settings_handler: None,
        };
        navigator.after_change("init");
        navigator
    }

    /// Install the handler invoked by [`AccountNavigator::open_settings`].
    ///
    /// Settings live outside the navigation graphs (a platform surface in
    /// the real app), so opening them is a hand-off, not a stack change.
    pub fn with_settings_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.settings_handler = Some(Box::new(handler));
        self
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// The entry at the top of the back stack.
    pub fn current(&self) -> &StackEntry {
        self.stack
            .current()
            .expect("Back stack should never be empty")
    }

    /// Retained UI state of the current entry, for the rendering layer to
    /// write scroll positions into.
    pub fn current_state_mut(&mut self) -> &mut StateBundle {
        &mut self
            .stack
            .current_mut()
            .expect("Back stack should never be empty")
            .state
    }

    /// The top-level graph owning the current screen. Recomputed
    /// synchronously with every mutation; drives tab highlighting.
    pub fn current_graph(&self) -> GraphId {
        self.current_graph
    }

    /// Subscribe to back-stack changes. The receiver always holds the
    /// current entry; a new value is published within the mutating call.
    pub fn subscribe(&self) -> watch::Receiver<StackEntry> {
        self.changes.subscribe()
    }

    /// The immutable graph registry this navigator routes against.
    pub fn graphs(&self) -> &NavGraphs {
        &self.graphs
    }

    /// All back-stack entries, bottom to top.
    pub fn entries(&self) -> &[StackEntry] {
        self.stack.entries()
    }

    /// Back-stack depth.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Whether "up" would change anything.
    pub fn can_navigate_up(&self) -> bool {
        self.stack.can_go_back()
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Push `screen` within the active graph.
    ///
    /// Fails with [`crate::NavError::NotFound`] when the active graph does
    /// not contain the screen; the stack is left untouched.
    pub fn open(&mut self, screen: Screen) -> Result<()> {
        self.push_into(self.current_graph, screen, false)
    }

    /// Like [`Navigator::open`], but idempotent when the screen is already
    /// on top: its arguments are updated in place and no entry is added.
    pub fn open_single_top(&mut self, screen: Screen) -> Result<()> {
        self.push_into(self.current_graph, screen, true)
    }

    /// Pop the current screen. At the root this is a no-op, never an
    /// error: the root screen cannot be dismissed.
    pub fn navigate_up(&mut self) {
        if self.stack.pop() {
            self.after_change("navigate_up");
        }
    }

    /// Select a tab.
    ///
    /// Pops to the stack root saving the outgoing subtree, then enters
    /// `graph`, reattaching its previously saved subtree if one exists.
    /// Re-selecting the active tab therefore keeps its depth and state, and
    /// tab roots are never duplicated on the stack.
    pub fn switch_tab(&mut self, graph: GraphId) -> Result<()> {
        let default_graph = self.graphs.default_graph();
        let default_start = self.graphs.graph(default_graph).start().route();
        self.stack.pop_up_to(default_graph, default_start, false, true);

        if !self.stack.restore(graph) {
            let start = self.graphs.graph(graph).start().clone();
            self.stack.push(StackEntry::new(graph, start), true);
        }

        self.after_change("switch_tab");
        Ok(())
    }

    /// Push a primary screen and any present secondaries in one user
    /// action.
    ///
    /// Absent secondaries are skipped; present ones push in caller order,
    /// so the last one pushed is the visible screen and the intermediate
    /// entries remain for "up". Each secondary is independent of the
    /// others.
    pub fn open_chain(
        &mut self,
        primary: Screen,
        secondaries: impl IntoIterator<Item = Option<Screen>>,
    ) -> Result<()> {
        self.open(primary)?;
        for screen in secondaries.into_iter().flatten() {
            self.open(screen)?;
        }
        Ok(())
    }

    /// Open a show, optionally drilling straight into a season and an
    /// episode in one user action.
    ///
    /// An episode id without a season id still pushes the episode directly
    /// above the show.
    pub fn open_show_details(
        &mut self,
        show_id: u64,
        season_id: Option<u64>,
        episode_id: Option<u64>,
    ) -> Result<()> {
        self.open_chain(
            Screen::ShowDetails { show_id },
            [
                season_id.map(|season_id| Screen::ShowSeasons { show_id, season_id }),
                episode_id.map(|episode_id| Screen::EpisodeDetails { episode_id }),
            ],
        )
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn push_into(&mut self, graph: GraphId, screen: Screen, single_top: bool) -> Result<()> {
        self.graphs.resolve(graph, &screen)?;
        self.stack.push(StackEntry::new(graph, screen), single_top);
        self.after_change("open");
        Ok(())
    }

    /// Runs after every back-stack mutation, before the mutating call
    /// returns: recompute the selected graph, publish the new top entry,
    /// and report the screen view.
    fn after_change(&mut self, intent: &'static str) {
        let entry = self.current().clone();
        let route = entry.route();

        self.current_graph = self
            .graphs
            .owner_of(&route)
            .expect("Every stacked entry should resolve to a top-level graph");

        tracing::debug!(intent, stack = ?self.stack.routes(), "back stack changed");

        self.changes.send_replace(entry.clone());
        self.tracker
            .on_screen_viewed(entry.screen.label(), &route, &entry.screen.params());
    }
}

// =============================================================================
// Capability traits
// =============================================================================

/// Intents available to the Discover tab root.
pub trait DiscoverNavigator {
    /// Open the trending-shows grid.
    fn open_trending_shows(&mut self) -> Result<()>;
    /// Open the popular-shows grid.
    fn open_popular_shows(&mut self) -> Result<()>;
    /// Open the recommended-shows grid.
    fn open_recommended_shows(&mut self) -> Result<()>;
    /// Open a show, optionally landing on a season or episode.
    fn open_show_details(
        &mut self,
        show_id: u64,
        season_id: Option<u64>,
        episode_id: Option<u64>,
    ) -> Result<()>;
    /// Open the account sheet.
    fn open_account(&mut self) -> Result<()>;
}

/// Intents available to show-list screens (following, watched, search,
/// trending/popular/recommended grids).
pub trait ShowListNavigator {
    /// Open a show's details.
    fn open_show_details(&mut self, show_id: u64) -> Result<()>;
    /// Open the account sheet.
    fn open_account(&mut self) -> Result<()>;
    /// Leave the screen.
    fn navigate_up(&mut self);
}

/// Intents available to the show-details screen.
pub trait ShowDetailsNavigator {
    /// Open the season list focused on one season.
    fn open_seasons(&mut self, show_id: u64, season_id: u64) -> Result<()>;
    /// Open one episode's details.
    fn open_episode_details(&mut self, episode_id: u64) -> Result<()>;
    /// Leave the screen.
    fn navigate_up(&mut self);
}

/// Intents available to the episode-details screen.
pub trait EpisodeDetailsNavigator {
    /// Leave the screen.
    fn navigate_up(&mut self);
}

/// Intents available to the account sheet.
pub trait AccountNavigator {
    /// Hand off to the platform settings surface.
    fn open_settings(&self);
    /// Dismiss the sheet.
    fn navigate_up(&mut self);
}

impl DiscoverNavigator for Navigator {
    fn open_trending_shows(&mut self) -> Result<()> {
        self.open(Screen::TrendingShows)
    }

    fn open_popular_shows(&mut self) -> Result<()> {
        self.open(Screen::PopularShows)
    }

    fn open_recommended_shows(&mut self) -> Result<()> {
        self.open(Screen::RecommendedShows)
    }

    fn open_show_details(
        &mut self,
        show_id: u64,
        season_id: Option<u64>,
        episode_id: Option<u64>,
    ) -> Result<()> {
        Navigator::open_show_details(self, show_id, season_id, episode_id)
    }

    fn open_account(&mut self) -> Result<()> {
        self.open(Screen::Account)
    }
}

impl ShowListNavigator for Navigator {
    fn open_show_details(&mut self, show_id: u64) -> Result<()> {
        Navigator::open_show_details(self, show_id, None, None)
    }

    fn open_account(&mut self) -> Result<()> {
        self.open(Screen::Account)
    }

    fn navigate_up(&mut self) {
        Navigator::navigate_up(self);
    }
}

impl ShowDetailsNavigator for Navigator {
    fn open_seasons(&mut self, show_id: u64, season_id: u64) -> Result<()> {
        self.open(Screen::ShowSeasons { show_id, season_id })
    }

    fn open_episode_details(&mut self, episode_id: u64) -> Result<()> {
        self.open(Screen::EpisodeDetails { episode_id })
    }

    fn navigate_up(&mut self) {
        Navigator::navigate_up(self);
    }
}

impl EpisodeDetailsNavigator for Navigator {
    fn navigate_up(&mut self) {
        Navigator::navigate_up(self);
    }
}

impl AccountNavigator for Navigator {
    fn open_settings(&self) {
        match &self.settings_handler {
            Some(handler) => handler(),
            None => tracing::warn!("no settings handler installed"),
        }
    }

    fn navigate_up(&mut self) {
        Navigator::navigate_up(self);
    }
}
