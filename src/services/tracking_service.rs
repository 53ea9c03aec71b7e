// src/services/tracking_service.rs
//
// Tracking Service - owns the live tracking state
//
// ARCHITECTURE:
// - One TrackingState behind a mutex; the lock is never held across .await
// - Every change is saved synchronously before the call returns
// - A failed save is reported, never fatal: the change stays in memory
// - Discovery runs are numbered (epochs); a run that finishes after a newer
//   one started is discarded instead of overwriting fresher candidates

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, info, warn};
use serde::Serialize;

use crate::domain::{
    Decade, TitleKey, TrackingCommand, TrackingList, TrackingState, TrackingView, YearBatch,
};
use crate::error::{AppError, AppResult};
use crate::repositories::TrackingStore;
use crate::services::DiscoveryService;

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    /// State differs from before the command
    pub changed: bool,
    /// The change reached the store
    pub persisted: bool,
    /// Set when the change could not be saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Accepted discovery results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub epoch: u64,
    pub years: Vec<YearBatch>,
}

pub struct TrackingService {
    state: Mutex<TrackingState>,
    store: TrackingStore,
    discovery: Arc<DiscoveryService>,
    epoch: AtomicU64,
}

impl TrackingService {
    /// Load persisted state; an unreadable store starts an empty session
    pub fn open(store: TrackingStore, discovery: Arc<DiscoveryService>) -> Self {
        let state = match store.load() {
            Ok(state) => {
                info!(
                    "Loaded tracking state: {} caught-up, {} completed",
                    state.caught_up().len(),
                    state.completed().len()
                );
                state
            }
            Err(e) => {
                error!("Failed to load tracking state, starting empty: {}", e);
                TrackingState::new()
            }
        };

        Self {
            state: Mutex::new(state),
            store,
            discovery,
            epoch: AtomicU64::new(0),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppResult<TrackingState> {
        Ok(self.lock()?.clone())
    }

    /// Both tracked lists with derived presentation
    pub fn view(&self) -> AppResult<TrackingView> {
        Ok(TrackingView::of(&*self.lock()?))
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Start a new discovery generation, superseding any run in flight
    pub fn begin_discovery(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fetch a decade and make it the current candidates
    pub async fn discover(&self, decade: Decade) -> AppResult<Discovery> {
        let epoch = self.begin_discovery();
        let tracked = self.lock()?.tracked_keys();

        let batches = self.discovery.fetch_decade(decade, &tracked).await?;

        self.accept_discovery(epoch, batches)
    }

    /// Install `batches` as candidates if `epoch` is still the latest
    pub fn accept_discovery(&self, epoch: u64, batches: Vec<YearBatch>) -> AppResult<Discovery> {
        let mut state = self.lock()?;

        if self.current_epoch() != epoch {
            warn!(
                "Discarding discovery {} (current is {})",
                epoch,
                self.current_epoch()
            );
            return Err(AppError::Superseded { epoch });
        }

        // Tracking may have changed while the catalog was queried
        state.replace_candidates(batches);

        Ok(Discovery {
            epoch,
            years: state.candidates().to_vec(),
        })
    }

    /// Apply one validated command, saving if anything changed
    pub fn apply(&self, command: TrackingCommand) -> AppResult<CommandOutcome> {
        let mut state = self.lock()?;

        let changed = match &command {
            TrackingCommand::MarkCaughtUp(key) => {
                Self::mark(&mut state, key, TrackingList::CaughtUp)?
            }
            TrackingCommand::MarkCompleted(key) => {
                Self::mark(&mut state, key, TrackingList::Completed)?
            }
            TrackingCommand::ResumeCaughtUp(key) => state.resume_caught_up(key),
            TrackingCommand::DropTracking(key) => state.drop_tracking(key),
            TrackingCommand::SetRating(key, rating) => state.set_rating(key, *rating)?,
            TrackingCommand::SetCoverOverride(key, url) => state.set_cover_override(key, url)?,
        };

        if !changed {
            return Ok(CommandOutcome {
                changed: false,
                persisted: false,
                warning: None,
            });
        }

        info!("{:?} applied to {}", command.action(), command.title_key());

        match self.store.save(&state) {
            Ok(()) => Ok(CommandOutcome {
                changed: true,
                persisted: true,
                warning: None,
            }),
            Err(e) => {
                error!("Failed to save tracking state: {}", e);
                Ok(CommandOutcome {
                    changed: true,
                    persisted: false,
                    warning: Some(format!("Change kept for this session but not saved: {}", e)),
                })
            }
        }
    }

    /// Track from the current candidates, or move an already tracked item
    fn mark(state: &mut TrackingState, key: &TitleKey, target: TrackingList) -> AppResult<bool> {
        if let Some(summary) = state.candidate(key).cloned() {
            let changed = match target {
                TrackingList::CaughtUp => state.mark_caught_up(&summary)?,
                TrackingList::Completed => state.mark_completed(&summary)?,
            };
            return Ok(changed);
        }

        if state.list_of(key).is_some() {
            return Ok(state.move_to(key, target)?);
        }

        Err(AppError::NotFound)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, TrackingState>> {
        self.state
            .lock()
            .map_err(|_| AppError::Other("Tracking state lock poisoned".to_string()))
    }
}
