//! Screen definitions
//!
//! Every navigable screen in the app, with the arguments bound for a
//! particular visit. The set is fixed at compile time; which graphs may
//! host each screen is declared in [`crate::graph`].

use serde::{Deserialize, Serialize};

/// A navigable screen with its bound arguments.
///
/// The variant identifies the destination; payload fields are the argument
/// values bound for one navigation call, not part of the destination
/// definition itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "args")]
pub enum Screen {
    /// Discover tab root
    Discover,
    /// Following tab root
    Following,
    /// Watched tab root
    Watched,
    /// Search tab root
    Search,
    /// Account sheet, reachable from every tab
    Account,
    /// Details for one show
    ShowDetails {
        /// Trakt id of the show
        show_id: u64,
    },
    /// Season list for one show
    ShowSeasons {
        /// Trakt id of the show
        show_id: u64,
        /// Season to focus
        season_id: u64,
    },
    /// Details for one episode
    EpisodeDetails {
        /// Trakt id of the episode
        episode_id: u64,
    },
    /// Trending shows grid (Discover only)
    TrendingShows,
    /// Popular shows grid (Discover only)
    PopularShows,
    /// Recommended shows grid (Discover only)
    RecommendedShows,
}

impl Screen {
    /// The stable route identifier for this screen.
    ///
    /// Routes are unique per destination; the same route hosted by two
    /// graphs is the same shared screen, namespaced per graph on the back
    /// stack.
    pub fn route(&self) -> &'static str {
        match self {
            Screen::Discover => "discover",
            Screen::Following => "following",
            Screen::Watched => "watched",
            Screen::Search => "search",
            Screen::Account => "account",
            Screen::ShowDetails { .. } => "show_details",
            Screen::ShowSeasons { .. } => "show_seasons",
            Screen::EpisodeDetails { .. } => "episode_details",
            Screen::TrendingShows => "trending_shows",
            Screen::PopularShows => "popular_shows",
            Screen::RecommendedShows => "recommended_shows",
        }
    }

    /// Human-readable label, used as the analytics screen-view label.
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Discover => "Discover",
            Screen::Following => "Following",
            Screen::Watched => "Watched",
            Screen::Search => "Search",
            Screen::Account => "Account",
            Screen::ShowDetails { .. } => "Show Details",
            Screen::ShowSeasons { .. } => "Show Seasons",
            Screen::EpisodeDetails { .. } => "Episode Details",
            Screen::TrendingShows => "Trending Shows",
            Screen::PopularShows => "Popular Shows",
            Screen::RecommendedShows => "Recommended Shows",
        }
    }

    /// The arguments bound for this visit, as key/value pairs for reporting.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Screen::ShowDetails { show_id } => vec![("show_id", show_id.to_string())],
            Screen::ShowSeasons { show_id, season_id } => vec![
                ("show_id", show_id.to_string()),
                ("season_id", season_id.to_string()),
            ],
            Screen::EpisodeDetails { episode_id } => {
                vec![("episode_id", episode_id.to_string())]
            }
            _ => Vec::new(),
        }
    }
}
