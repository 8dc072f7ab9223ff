//! Voice search on the shop screen.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use smartcart_core::Product;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::catalog::CatalogProvider;
use crate::scheduler::{ScheduledTask, Scheduler};

/// The phrase the simulated recogniser always hears.
pub const RECOGNISED_PHRASE: &str = "Find organic bananas";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct VoiceState {
    pub query: String,
    pub listening: bool,
    pub closed: bool,
}

/// Search box with a microphone toggle.
#[derive(Debug)]
pub struct VoiceSearch {
    state: Arc<watch::Sender<VoiceState>>,
    scheduler: Scheduler,
    pending: Option<ScheduledTask>,
    voice_delay: Duration,
}

impl VoiceSearch {
    #[must_use]
    pub fn new(voice_delay: Duration) -> Self {
        let (state, _) = watch::channel(VoiceState::default());
        Self {
            state: Arc::new(state),
            scheduler: Scheduler::new(),
            pending: None,
            voice_delay,
        }
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state.borrow().listening
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<VoiceState> {
        self.state.subscribe()
    }

    /// Replace the typed query.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_if_modified(|state| {
            if state.closed || state.query == query {
                return false;
            }
            state.query = query;
            true
        });
    }

    /// Start listening, or stop and discard the pending recognition.
    ///
    /// Returns whether the microphone is now listening. Starting requires a
    /// tokio runtime.
    pub fn toggle(&mut self) -> bool {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }

        let mut listening = false;
        self.state.send_if_modified(|state| {
            if state.closed {
                return false;
            }
            state.listening = !state.listening;
            listening = state.listening;
            true
        });
        if !listening {
            debug!("Voice search stopped");
            return false;
        }

        debug!(delay_ms = self.voice_delay.as_millis(), "Listening");
        let state = Arc::clone(&self.state);
        self.pending = Some(self.scheduler.schedule(self.voice_delay, move || {
            let heard = state.send_if_modified(|state| {
                if state.closed || !state.listening {
                    return false;
                }
                state.listening = false;
                RECOGNISED_PHRASE.clone_into(&mut state.query);
                true
            });
            if heard {
                info!(query = RECOGNISED_PHRASE, "Voice query recognised");
            }
        }));
        true
    }

    /// Stop listening and discard the pending recognition. No-op when idle.
    pub fn stop_listening(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
        let stopped = self.state.send_if_modified(|state| {
            if state.closed || !state.listening {
                return false;
            }
            state.listening = false;
            true
        });
        if stopped {
            debug!("Voice search stopped");
        }
    }

    /// Catalog products matching the current query.
    ///
    /// A spoken "find ..." prefix is not part of the search terms.
    #[must_use]
    pub fn results(&self, catalog: &dyn CatalogProvider) -> Vec<Product> {
        let query = self.query();
        catalog.search(search_terms(&query))
    }

    /// Cancel recognition and freeze the state.
    pub fn dispose(&mut self) {
        self.pending = None;
        self.scheduler.dispose();
        self.state.send_if_modified(|state| {
            let changed = !state.closed;
            state.closed = true;
            changed
        });
    }
}

fn search_terms(query: &str) -> &str {
    let query = query.trim();
    match query.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("find ") => query.get(5..).unwrap_or_default(),
        _ => query,
    }
}

impl Drop for VoiceSearch {
    fn drop(&mut self) {
        self.dispose();
    }
}
