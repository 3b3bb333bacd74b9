//! # Runtime
//!
//! Executes the `Effect`s returned by `core::action::update` on tokio and feeds
//! completions back in as `Action`s.
//!
//! ```text
//!  dispatch(action) ──▶ update(app) ──▶ Effect ──▶ tokio::spawn(service call)
//!        ▲                                                 │
//!        └──────────── Action channel ◀────────────────────┘
//! ```
//!
//! Every fetch runs to completion on its own task. Superseded fetches are not
//! cancelled; their results are dropped by the staleness guard when they
//! arrive. All state mutation happens on the thread that owns the `Runtime`.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::action::{Action, Effect, update};
use crate::core::error::{CatalogFetchError, TimetableFetchError};
use crate::core::guard::RequestToken;
use crate::core::state::App;
use crate::service::TimetableService;

pub struct Runtime {
    app: App,
    service: Arc<dyn TimetableService>,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
}

impl Runtime {
    pub fn new(service: Arc<dyn TimetableService>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            app: App::new(),
            service,
            tx,
            rx,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Applies `action` and starts whatever work it asks for.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch: {:?}", action);
        let effect = update(&mut self.app, action);
        match &effect {
            Effect::FetchCatalog => {
                spawn_catalog_fetch(self.service.clone(), self.tx.clone());
            }
            Effect::FetchTimetables { token, codes } => {
                spawn_timetable_fetch(self.service.clone(), *token, codes.clone(), self.tx.clone());
            }
            Effect::None | Effect::Quit => {}
        }
        effect
    }

    /// Applies every completion that has already arrived, without waiting.
    ///
    /// Returns how many actions were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next completion and applies it.
    pub async fn next(&mut self) -> Option<Effect> {
        let action = self.rx.recv().await?;
        Some(self.dispatch(action))
    }

    /// Waits until the catalog is loaded and no timetable fetch is in flight.
    pub async fn settle(&mut self) {
        while self.app.is_loading() {
            if self.next().await.is_none() {
                warn!("Action channel closed before settling");
                return;
            }
        }
    }
}

fn spawn_catalog_fetch(service: Arc<dyn TimetableService>, tx: UnboundedSender<Action>) {
    info!("Spawning catalog fetch via {}", service.name());
    tokio::spawn(async move {
        let action = match service.fetch_catalog().await {
            Ok(entries) => Action::CatalogLoaded(entries),
            Err(e) => Action::CatalogFailed(CatalogFetchError(e.to_string())),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver catalog result: receiver dropped");
        }
    });
}

fn spawn_timetable_fetch(
    service: Arc<dyn TimetableService>,
    token: RequestToken,
    codes: Vec<String>,
    tx: UnboundedSender<Action>,
) {
    info!("Spawning timetable fetch {} for {} modules", token, codes.len());
    tokio::spawn(async move {
        let action = match service.fetch_timetables(&codes).await {
            Ok(timetable) => Action::TimetablesLoaded { token, timetable },
            Err(e) => Action::TimetablesFailed {
                token,
                error: TimetableFetchError(e.to_string()),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver timetable result {}: receiver dropped", token);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::CatalogStatus;
    use crate::test_support::{ACCT, MATH, StaticService};

    #[tokio::test]
    async fn test_catalog_load_settles_ready() {
        let mut runtime = Runtime::new(Arc::new(StaticService::new()));
        assert_eq!(runtime.dispatch(Action::LoadCatalog), Effect::FetchCatalog);
        runtime.settle().await;

        assert_eq!(runtime.app().catalog_status, CatalogStatus::Ready);
        assert!(runtime.app().catalog.contains(ACCT));
    }

    #[tokio::test]
    async fn test_add_fetches_and_aggregates() {
        let mut runtime = Runtime::new(Arc::new(StaticService::new()));
        runtime.dispatch(Action::LoadCatalog);
        runtime.settle().await;

        runtime.dispatch(Action::AddModule(ACCT.to_string()));
        runtime.dispatch(Action::AddModule(MATH.to_string()));
        runtime.settle().await;

        let timetable = runtime.app().timetable.current();
        assert_eq!(timetable.len(), 2);
        assert!(timetable.contains_key("ACCT0001"));
        assert!(timetable.contains_key("MATH1061"));
    }

    #[tokio::test]
    async fn test_failing_service_surfaces_catalog_error() {
        let mut runtime = Runtime::new(Arc::new(StaticService::failing()));
        runtime.dispatch(Action::LoadCatalog);
        runtime.settle().await;

        assert_eq!(runtime.app().catalog_status, CatalogStatus::Failed);
        assert!(runtime.app().error.is_some());
        assert_eq!(runtime.dispatch(Action::AddModule(ACCT.to_string())), Effect::None);
    }

    #[tokio::test]
    async fn test_drain_applies_ready_completions() {
        let mut runtime = Runtime::new(Arc::new(StaticService::new()));
        runtime.dispatch(Action::LoadCatalog);
        // Give the spawned task a chance to post its result.
        while runtime.app().catalog_status == CatalogStatus::Loading {
            tokio::task::yield_now().await;
            runtime.drain();
        }
        assert_eq!(runtime.app().catalog_status, CatalogStatus::Ready);
        assert_eq!(runtime.drain(), 0);
    }
}
