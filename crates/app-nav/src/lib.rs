//! Navigation core for Episodic
//!
//! This crate provides the hierarchical navigation model for the app
//! shell: screens grouped into per-tab graphs, a back stack with
//! save/restore tab state, a navigator exposing intent-level capabilities
//! to screens, and pure transition selection for the rendering layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod graph;
pub mod navigator;
pub mod screen;
pub mod stack;
pub mod transition;

pub use error::{NavError, Result};
pub use graph::{namespaced_route, tab_items, GraphId, NavGraph, NavGraphs, TabItem};
pub use navigator::{
    AccountNavigator, DiscoverNavigator, EpisodeDetailsNavigator, Navigator, ShowDetailsNavigator,
    ShowListNavigator,
};
pub use screen::Screen;
pub use stack::{BackStack, StackEntry, StateBundle};
pub use transition::{select_transition, Direction, Transition};
