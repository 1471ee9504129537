//! Navigation graphs
//!
//! The app's screens are grouped into four top-level graphs, one per tab.
//! Shared screens (show details, seasons, episodes, account) are members of
//! several graphs and are routed within the namespace of whichever graph the
//! user was in, so "up" stays inside the current tab.
//!
//! Graphs are built once at startup and immutable afterwards. Construction
//! also precomputes a namespaced-route → owning-graph table so owner
//! resolution is a single lookup instead of a hierarchy walk.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::screen::Screen;

// =============================================================================
// Top-level graphs
// =============================================================================

/// Identifier of a top-level navigation graph. One per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphId {
    /// Discover tab
    Discover,
    /// Following tab
    Following,
    /// Watched tab
    Watched,
    /// Search tab
    Search,
}

impl GraphId {
    /// The graph's route string. Distinct from every destination route.
    pub fn route(&self) -> &'static str {
        match self {
            GraphId::Discover => "discover_root",
            GraphId::Following => "following_root",
            GraphId::Watched => "watched_root",
            GraphId::Search => "search_root",
        }
    }

    /// Display label for tab bars and rails.
    pub fn label(&self) -> &'static str {
        match self {
            GraphId::Discover => "Discover",
            GraphId::Following => "Following",
            GraphId::Watched => "Watched",
            GraphId::Search => "Search",
        }
    }

    /// All top-level graphs in tab-bar order.
    pub fn all() -> [GraphId; 4] {
        [
            GraphId::Discover,
            GraphId::Following,
            GraphId::Watched,
            GraphId::Search,
        ]
    }
}

/// One tab-bar/rail item, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabItem {
    /// The graph this tab selects.
    pub graph: GraphId,
    /// Display label.
    pub label: &'static str,
    /// Icon name when unselected.
    pub icon: &'static str,
    /// Icon name when selected.
    pub selected_icon: &'static str,
}

/// Tab items in the root graph's nested order.
pub fn tab_items() -> [TabItem; 4] {
    [
        TabItem {
            graph: GraphId::Discover,
            label: GraphId::Discover.label(),
            icon: "weekend-outline",
            selected_icon: "weekend",
        },
        TabItem {
            graph: GraphId::Following,
            label: GraphId::Following.label(),
            icon: "favorite-outline",
            selected_icon: "favorite",
        },
        TabItem {
            graph: GraphId::Watched,
            label: GraphId::Watched.label(),
            icon: "visibility-outline",
            selected_icon: "visibility",
        },
        TabItem {
            graph: GraphId::Search,
            label: GraphId::Search.label(),
            icon: "search",
            selected_icon: "search",
        },
    ]
}

// =============================================================================
// Graph definitions
// =============================================================================

/// A top-level navigation graph: a start screen and a flat set of member
/// destination routes.
#[derive(Debug, Clone)]
pub struct NavGraph {
    id: GraphId,
    start: Screen,
    destinations: Vec<&'static str>,
}

impl NavGraph {
    /// Define a graph. `start` must be listed in `destinations`; this is
    /// checked when the registry is built.
    pub fn new(id: GraphId, start: Screen, destinations: Vec<&'static str>) -> Self {
        Self {
            id,
            start,
            destinations,
        }
    }

    /// The graph's identifier.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// The screen entered when this graph becomes active with no deeper
    /// target.
    pub fn start(&self) -> &Screen {
        &self.start
    }

    /// Member destination routes, in declaration order.
    pub fn destinations(&self) -> &[&'static str] {
        &self.destinations
    }

    /// Whether `route` is a member destination of this graph.
    pub fn contains(&self, route: &str) -> bool {
        self.destinations.iter().any(|r| *r == route)
    }
}

// =============================================================================
// Root registry
// =============================================================================

/// The root graph: the ordered set of top-level graphs, the default graph,
/// and the precomputed owner table.
#[derive(Debug, Clone)]
pub struct NavGraphs {
    graphs: Vec<NavGraph>,
    default_graph: GraphId,
    owners: HashMap<String, GraphId>,
}

impl NavGraphs {
    /// Build a registry from top-level graph definitions.
    ///
    /// Fails if the default graph is not among `graphs` or if any graph's
    /// start screen is not one of its own destinations. Both are
    /// construction bugs; initialization must abort rather than let them
    /// surface at navigation time.
    pub fn build(graphs: Vec<NavGraph>, default_graph: GraphId) -> Result<Self> {
        if !graphs.iter().any(|g| g.id == default_graph) {
            return Err(NavError::UnknownGraph(default_graph.route().to_string()));
        }

        let mut owners = HashMap::new();
        for graph in &graphs {
            if !graph.contains(graph.start.route()) {
                return Err(NavError::NotFound {
                    graph: graph.id.route(),
                    route: graph.start.route(),
                });
            }
            for route in &graph.destinations {
                owners.insert(namespaced_route(graph.id, route), graph.id);
            }
        }

        Ok(Self {
            graphs,
            default_graph,
            owners,
        })
    }

    /// The app's graph registry: one graph per tab, sharing the show,
    /// season, episode and account screens; Discover additionally hosts
    /// its trending/popular/recommended sub-screens.
    pub fn for_app() -> Result<Self> {
        Self::build(
            vec![
                NavGraph::new(
                    GraphId::Discover,
                    Screen::Discover,
                    vec![
                        "discover",
                        "account",
                        "show_details",
                        "show_seasons",
                        "episode_details",
                        "recommended_shows",
                        "trending_shows",
                        "popular_shows",
                    ],
                ),
                NavGraph::new(
                    GraphId::Following,
                    Screen::Following,
                    vec![
                        "following",
                        "account",
                        "show_details",
                        "show_seasons",
                        "episode_details",
                    ],
                ),
                NavGraph::new(
                    GraphId::Watched,
                    Screen::Watched,
                    vec![
                        "watched",
                        "account",
                        "show_details",
                        "show_seasons",
                        "episode_details",
                    ],
                ),
                NavGraph::new(
                    GraphId::Search,
                    Screen::Search,
                    vec![
                        "search",
                        "account",
                        "show_details",
                        "show_seasons",
                        "episode_details",
                    ],
                ),
            ],
            GraphId::Discover,
        )
    }

    /// The graph selected at startup, before any navigation.
    pub fn default_graph(&self) -> GraphId {
        self.default_graph
    }

    /// All top-level graphs, in tab order.
    pub fn graphs(&self) -> &[NavGraph] {
        &self.graphs
    }

    /// Look up a top-level graph's definition.
    pub fn graph(&self, id: GraphId) -> &NavGraph {
        self.graphs
            .iter()
            .find(|g| g.id == id)
            .expect("All top-level graphs should be registered")
    }

    /// Check that `screen` is a member of `graph`, returning the graph's
    /// definition.
    pub fn resolve(&self, graph: GraphId, screen: &Screen) -> Result<&NavGraph> {
        let graph = self.graph(graph);
        if graph.contains(screen.route()) {
            Ok(graph)
        } else {
            Err(NavError::NotFound {
                graph: graph.id.route(),
                route: screen.route(),
            })
        }
    }

    /// The top-level graph owning a namespaced destination route.
    ///
    /// O(1) against the table precomputed at construction. Total for every
    /// route the registry produced; `UnknownGraph` can only be observed for
    /// routes forged outside it.
    pub fn owner_of(&self, route: &str) -> Result<GraphId> {
        self.owners
            .get(route)
            .copied()
            .ok_or_else(|| NavError::UnknownGraph(route.to_string()))
    }
}

/// The back-stack route of `screen_route` when hosted by `graph`.
///
/// Shared screens appear once per hosting graph, each reference routed in
/// its own graph's namespace.
pub fn namespaced_route(graph: GraphId, screen_route: &str) -> String {
    format!("{}/{}", graph.route(), screen_route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graph_must_be_nested() {
        let result = NavGraphs::build(
            vec![NavGraph::new(
                GraphId::Watched,
                Screen::Watched,
                vec!["watched"],
            )],
            GraphId::Discover,
        );
        assert_eq!(
            result.unwrap_err(),
            NavError::UnknownGraph("discover_root".to_string()),
        );
    }

    #[test]
    fn test_start_must_be_a_member() {
        let result = NavGraphs::build(
            vec![NavGraph::new(
                GraphId::Search,
                Screen::Search,
                vec!["account"],
            )],
            GraphId::Search,
        );
        assert_eq!(
            result.unwrap_err(),
            NavError::NotFound {
                graph: "search_root",
                route: "search",
            },
        );
    }

    #[test]
    fn test_owner_resolution_is_total_over_the_registry() {
        let graphs = NavGraphs::for_app().unwrap();
        for graph in graphs.graphs() {
            for route in graph.destinations() {
                let owner = graphs.owner_of(&namespaced_route(graph.id(), route)).unwrap();
                assert_eq!(owner, graph.id());
            }
        }
    }

    #[test]
    fn test_owner_of_unregistered_route_fails() {
        let graphs = NavGraphs::for_app().unwrap();
        let err = graphs.owner_of("settings_root/settings").unwrap_err();
        assert_eq!(
            err,
            NavError::UnknownGraph("settings_root/settings".to_string()),
        );
    }

    #[test]
    fn test_shared_screens_are_routed_per_graph() {
        let graphs = NavGraphs::for_app().unwrap();
        assert_eq!(
            graphs.owner_of("discover_root/show_details").unwrap(),
            GraphId::Discover,
        );
        assert_eq!(
            graphs.owner_of("watched_root/show_details").unwrap(),
            GraphId::Watched,
        );
    }

    #[test]
    fn test_discover_sub_screens_are_discover_only() {
        let graphs = NavGraphs::for_app().unwrap();
        assert!(graphs
            .resolve(GraphId::Discover, &Screen::TrendingShows)
            .is_ok());
        assert_eq!(
            graphs
                .resolve(GraphId::Search, &Screen::TrendingShows)
                .unwrap_err(),
            NavError::NotFound {
                graph: "search_root",
                route: "trending_shows",
            },
        );
    }

    #[test]
    fn test_tab_items_follow_nested_order() {
        let items = tab_items();
        let order: Vec<_> = items.iter().map(|i| i.graph).collect();
        assert_eq!(order, GraphId::all());
    }
}
