//! Background Sync
//!
//! Time-gated push-then-pull round trip with at most one in flight.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use crate::api::{ApiError, TaskRemote};
use crate::config::SYNC_TIMER;
use crate::models::TaskItem;
use crate::store::AppState;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("push failed: {0}")]
    Push(#[source] ApiError),
    #[error("pull failed: {0}")]
    Pull(#[source] ApiError),
}

/// Shown by the sync indicator
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Synced { at: i64 },
    Failed(String),
}

/// Logged in and the last sync is older than `SYNC_TIMER`
pub fn should_sync(state: &AppState, now: i64) -> bool {
    !state.auth_token.is_empty() && now - state.last_sync > SYNC_TIMER
}

/// Single-slot in-flight flag
#[derive(Clone, Debug, Default)]
pub struct SyncGate {
    in_flight: Rc<Cell<bool>>,
}

/// Held for the duration of one round trip; releases the gate on drop
#[derive(Debug)]
pub struct SyncPermit {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for SyncPermit {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

impl SyncGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another round trip holds the gate
    pub fn try_acquire(&self) -> Option<SyncPermit> {
        if self.in_flight.replace(true) {
            return None;
        }
        Some(SyncPermit { in_flight: Rc::clone(&self.in_flight) })
    }
}

/// What a round trip needs, captured when it starts
#[derive(Clone, Debug, PartialEq)]
pub struct SyncRequest {
    pub tasks: Vec<TaskItem>,
    pub server_url: String,
    pub token: String,
}

/// Decide whether a state change starts a sync. Triggers arriving while
/// one is in flight are dropped.
pub fn begin_sync(gate: &SyncGate, state: &AppState, now: i64) -> Option<(SyncPermit, SyncRequest)> {
    if !should_sync(state, now) {
        return None;
    }
    let Some(permit) = gate.try_acquire() else {
        tracing::debug!("sync already in flight, skipping");
        return None;
    };
    let request = SyncRequest {
        tasks: state.tasks.clone(),
        server_url: state.server_url.clone(),
        token: state.auth_token.clone(),
    };
    Some((permit, request))
}

/// Push local tasks, then pull the authoritative list
pub async fn sync_tasks<R>(remote: &R, request: &SyncRequest) -> Result<Vec<TaskItem>, SyncError>
where
    R: TaskRemote + ?Sized,
{
    remote
        .push(&request.tasks, &request.server_url, &request.token)
        .await
        .map_err(SyncError::Push)?;
    remote
        .pull(&request.server_url, &request.token)
        .await
        .map_err(SyncError::Pull)
}
