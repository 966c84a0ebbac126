//! State of the header search box and its suggestion panel.
//!
//! Typing is debounced; submitting is not. Every input bumps a generation
//! counter, and a debounced result is committed only if its generation is
//! still the latest, so a match that finishes after newer input never
//! reaches the panel.

use crate::debounce::Debouncer;
use crate::matcher::{QueryMatcher, Suggestions};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Navigation to the full search results view, issued on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNavigation {
    pub query: String,
}

/// Point-in-time copy of the panel for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSnapshot {
    /// Raw text in the input, untrimmed
    pub query: String,
    pub open: bool,
    pub suggestions: Suggestions,
    /// How many debounced matches have been committed
    pub executions: u64,
}

#[derive(Debug, Default)]
struct PanelState {
    snapshot: PanelSnapshot,
    generation: u64,
}

/// The search box: raw query, suggestion panel and its debouncer.
///
/// Must be created inside a tokio runtime.
pub struct SearchPanel {
    state: Arc<Mutex<PanelState>>,
    debouncer: Debouncer<(u64, String)>,
}

impl SearchPanel {
    pub fn new(matcher: Arc<QueryMatcher>, debounce: Duration) -> Self {
        let state = Arc::new(Mutex::new(PanelState::default()));
        let shared = state.clone();

        let debouncer = Debouncer::spawn(debounce, move |(generation, query): (u64, String)| {
            if lock(&shared).generation != generation {
                debug!("Skipping superseded query {:?}", query);
                return;
            }
            let suggestions = matcher.suggest(&query);

            let mut panel = lock(&shared);
            if panel.generation != generation {
                debug!("Discarding results for superseded query {:?}", query);
                return;
            }
            panel.snapshot.suggestions = suggestions;
            panel.snapshot.open = true;
            panel.snapshot.executions += 1;
        });

        Self { state, debouncer }
    }

    /// The input text changed.
    ///
    /// Blank text clears the results and closes the panel at once; anything
    /// else is matched once typing pauses.
    pub fn input(&self, text: &str) {
        let mut panel = lock(&self.state);
        panel.generation += 1;
        panel.snapshot.query = text.to_string();

        if text.trim().is_empty() {
            panel.snapshot.suggestions = Suggestions::default();
            panel.snapshot.open = false;
            drop(panel);
            self.debouncer.cancel();
            return;
        }

        let generation = panel.generation;
        drop(panel);
        self.debouncer.push((generation, text.to_string()));
    }

    /// The form was submitted (Enter).
    ///
    /// Skips the debounce, drops any pending match and closes the panel.
    /// Returns `None` when there is nothing to search for.
    pub fn submit(&self) -> Option<SearchNavigation> {
        let mut panel = lock(&self.state);
        panel.generation += 1;
        panel.snapshot.open = false;
        let query = panel.snapshot.query.trim().to_string();
        drop(panel);
        self.debouncer.cancel();

        if query.is_empty() {
            None
        } else {
            Some(SearchNavigation { query })
        }
    }

    /// A click landed outside the input and the panel. The query stays.
    pub fn click_outside(&self) {
        lock(&self.state).snapshot.open = false;
    }

    /// The input regained focus; reopen the panel if it has anything to show.
    pub fn focus(&self) {
        let mut panel = lock(&self.state);
        panel.snapshot.open = !panel.snapshot.suggestions.is_empty();
    }

    pub fn query(&self) -> String {
        lock(&self.state).snapshot.query.clone()
    }

    pub fn is_open(&self) -> bool {
        lock(&self.state).snapshot.open
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        lock(&self.state).snapshot.clone()
    }
}

fn lock(state: &Mutex<PanelState>) -> MutexGuard<'_, PanelState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
