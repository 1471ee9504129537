//! Back-stack state
//!
//! The ordered history of visited screens, plus the saved-subtree table
//! that lets a tab keep its depth and scroll state while another tab is
//! active. The stack is owned by the navigator; nothing else mutates it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NavError, Result};
use crate::graph::{namespaced_route, GraphId};
use crate::screen::Screen;

// =============================================================================
// Entry state
// =============================================================================

/// Opaque per-entry UI state retained across save/restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateBundle {
    values: HashMap<String, Value>,
}

impl StateBundle {
    /// Whether anything has been stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Read back a stored value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store the screen's scroll offset.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.insert("scroll_offset", Value::from(offset));
    }

    /// Scroll offset to restore, defaulting to the top.
    pub fn scroll_offset(&self) -> f64 {
        self.get("scroll_offset")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// Entries
// =============================================================================

/// One visited screen on the back stack: the hosting graph, the screen with
/// its bound arguments, and the entry's retained UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Top-level graph this visit was routed in.
    pub graph: GraphId,
    /// The screen and its bound arguments.
    pub screen: Screen,
    /// Unique key for this entry.
    pub key: String,
    /// Retained UI state (scroll position and the like).
    #[serde(default)]
    pub state: StateBundle,
}

impl StackEntry {
    /// Create a fresh entry with empty retained state.
    pub fn new(graph: GraphId, screen: Screen) -> Self {
        Self {
            graph,
            screen,
            key: uuid::Uuid::new_v4().to_string(),
            state: StateBundle::default(),
        }
    }

    /// The entry's namespaced route, e.g. `discover_root/show_details`.
    pub fn route(&self) -> String {
        namespaced_route(self.graph, self.screen.route())
    }
}

// =============================================================================
// Back stack
// =============================================================================

/// Ordered history of visited screens (bottom to top).
///
/// The stack always holds at least one entry once constructed; the root
/// entry is never popped. Subtrees removed with state saving are parked in
/// a side table keyed by graph and reattached on the next entry into that
/// graph.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackStack {
    entries: Vec<StackEntry>,
    saved: HashMap<GraphId, Vec<StackEntry>>,
}

impl BackStack {
    /// Create a stack seeded with its root entry.
    pub fn new(root: StackEntry) -> Self {
        Self {
            entries: vec![root],
            saved: HashMap::new(),
        }
    }

    /// The entry at the top of the stack.
    pub fn current(&self) -> Result<&StackEntry> {
        self.entries.last().ok_or(NavError::EmptyStack)
    }

    /// Mutable access to the top entry, for retained-state updates.
    pub fn current_mut(&mut self) -> Result<&mut StackEntry> {
        self.entries.last_mut().ok_or(NavError::EmptyStack)
    }

    /// All entries, bottom to top.
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Number of entries on the stack.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether a pop would change the stack.
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Namespaced routes bottom to top, for debug logging.
    pub fn routes(&self) -> Vec<String> {
        self.entries.iter().map(StackEntry::route).collect()
    }

    /// Append `entry`.
    ///
    /// With `single_top`, pushing the (graph, destination) pair already on
    /// top updates the top entry's arguments in place instead, keeping its
    /// key and retained state. Returns whether a new entry was appended.
    pub fn push(&mut self, entry: StackEntry, single_top: bool) -> bool {
        if single_top {
            if let Some(top) = self.entries.last_mut() {
                if top.graph == entry.graph && top.screen.route() == entry.screen.route() {
                    top.screen = entry.screen;
                    return false;
                }
            }
        }
        self.entries.push(entry);
        true
    }

    /// Pop the top entry. No-op at the root; returns whether anything was
    /// popped.
    pub fn pop(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Remove every entry above the first occurrence of `graph`'s start
    /// destination, identified by `start_route`.
    ///
    /// With `inclusive`, the matching entry itself is removed too, except
    /// the stack root, which is never popped. With `save_state`, removed
    /// entries are parked in the saved-subtree table keyed by their graph,
    /// in stack order. No-op if no entry matches.
    pub fn pop_up_to(
        &mut self,
        graph: GraphId,
        start_route: &str,
        inclusive: bool,
        save_state: bool,
    ) {
        let target = self
            .entries
            .iter()
            .position(|e| e.graph == graph && e.screen.route() == start_route);
        let Some(index) = target else {
            tracing::debug!(
                graph = graph.route(),
                start_route,
                "pop_up_to target not on the stack"
            );
            return;
        };

        let cut = if inclusive { index.max(1) } else { index + 1 };
        if cut >= self.entries.len() {
            return;
        }

        let removed = self.entries.split_off(cut);
        if save_state {
            // Entries above a tab root all belong to one graph at a time,
            // but group defensively so a mixed run cannot cross-pollinate.
            let mut runs: HashMap<GraphId, Vec<StackEntry>> = HashMap::new();
            for entry in removed {
                runs.entry(entry.graph).or_default().push(entry);
            }
            for (graph, run) in runs {
                self.saved.insert(graph, run);
            }
        }
    }

    /// Reattach the saved subtree for `graph`, if one exists. Returns
    /// whether anything was restored.
    pub fn restore(&mut self, graph: GraphId) -> bool {
        match self.saved.remove(&graph) {
            Some(run) => {
                self.entries.extend(run);
                true
            }
            None => false,
        }
    }

    /// Whether a saved subtree is parked for `graph`.
    pub fn has_saved(&self, graph: GraphId) -> bool {
        self.saved.contains_key(&graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> BackStack {
        BackStack::new(StackEntry::new(GraphId::Discover, Screen::Discover))
    }

    #[test]
    fn test_push_pop() {
        let mut stack = stack();
        assert_eq!(stack.depth(), 1);
        assert!(!stack.can_go_back());

        stack.push(
            StackEntry::new(GraphId::Discover, Screen::ShowDetails { show_id: 1 }),
            false,
        );
        assert_eq!(stack.depth(), 2);
        assert!(stack.can_go_back());

        assert!(stack.pop());
        assert_eq!(stack.depth(), 1);

        // The root entry is never popped.
        assert!(!stack.pop());
        assert_eq!(stack.current().unwrap().screen, Screen::Discover);
    }

    #[test]
    fn test_single_top_updates_arguments_in_place() {
        let mut stack = stack();
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::ShowDetails { show_id: 1 }),
            false,
        );
        let key = stack.current().unwrap().key.clone();

        let pushed = stack.push(
            StackEntry::new(GraphId::Discover, Screen::ShowDetails { show_id: 2 }),
            true,
        );
        assert!(!pushed);
        assert_eq!(stack.depth(), 2);

        let top = stack.current().unwrap();
        assert_eq!(top.screen, Screen::ShowDetails { show_id: 2 });
        assert_eq!(top.key, key);
    }

    #[test]
    fn test_single_top_does_not_merge_across_graphs() {
        let mut stack = stack();
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::ShowDetails { show_id: 1 }),
            false,
        );
        let pushed = stack.push(
            StackEntry::new(GraphId::Watched, Screen::ShowDetails { show_id: 1 }),
            true,
        );
        assert!(pushed);
        assert_eq!(stack.depth(), 3);
    }

    #[test]
    fn test_pop_up_to_saves_and_restores_subtree() {
        let mut stack = stack();
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::ShowDetails { show_id: 1 }),
            false,
        );
        stack
            .current_mut()
            .unwrap()
            .state
            .set_scroll_offset(640.0);
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::ShowSeasons { show_id: 1, season_id: 2 }),
            false,
        );

        stack.pop_up_to(GraphId::Discover, "discover", false, true);
        assert_eq!(stack.depth(), 1);
        assert!(stack.has_saved(GraphId::Discover));

        assert!(stack.restore(GraphId::Discover));
        assert_eq!(stack.depth(), 3);
        assert_eq!(
            stack.entries()[1].state.scroll_offset(),
            640.0,
            "retained state survives the round trip"
        );
        assert!(!stack.has_saved(GraphId::Discover));
    }

    #[test]
    fn test_pop_up_to_without_save_discards() {
        let mut stack = stack();
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::TrendingShows),
            false,
        );
        stack.pop_up_to(GraphId::Discover, "discover", false, false);
        assert_eq!(stack.depth(), 1);
        assert!(!stack.has_saved(GraphId::Discover));
    }

    #[test]
    fn test_pop_up_to_inclusive_keeps_the_root() {
        let mut stack = stack();
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::TrendingShows),
            false,
        );
        stack.pop_up_to(GraphId::Discover, "discover", true, false);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_pop_up_to_missing_target_is_a_no_op() {
        let mut stack = stack();
        stack.push(
            StackEntry::new(GraphId::Discover, Screen::TrendingShows),
            false,
        );
        stack.pop_up_to(GraphId::Search, "search", false, true);
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_restore_without_saved_state() {
        let mut stack = stack();
        assert!(!stack.restore(GraphId::Watched));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_entry_serialization() {
        let mut entry = StackEntry::new(GraphId::Search, Screen::ShowDetails { show_id: 7 });
        entry.state.set_scroll_offset(12.5);
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: StackEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
