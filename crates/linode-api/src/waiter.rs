//! Completion poller for asynchronous operations.
//!
//! Mutating Linode operations return before they finish; completion is reported through the
//! account event log. [`LinodeClient::wait_for_event_finished`] watches the newest unseen
//! events until the one matching an [`EventWait`] reaches a terminal status, the timeout
//! elapses, or the wait is cancelled.
//!
//! Each tick fetches the first page of unseen events, newest first. Matching is re-checked
//! client-side: action, entity type, canonical entity ID and `created >= min_start`. Between
//! ticks the poller sleeps for [`EVENT_POLL_INTERVAL`]; the timeout is checked after each
//! sleep, so a wait always performs at least one fetch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use linode_core::list::{Filter, ListOptions, SortOrder};
use linode_core::types::{EntityId, EntityType, Event, EventAction, EventStatus};
use linode_core::Error;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::client::LinodeClient;
use crate::Result;

/// Pause between two event fetches.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Create a linked cancellation pair.
///
/// Calling [`CancelHandle::cancel`] wakes every [`CancelToken`] cloned from the pair.
#[must_use]
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle { sender }, CancelToken { receiver })
}

/// Requests cancellation of the waits holding the paired [`CancelToken`].
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel every wait observing this handle's tokens.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Observes a [`CancelHandle`].
///
/// Dropping the handle without cancelling never cancels the token.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Description of the event a poll waits for.
#[derive(Debug, Clone)]
pub struct EventWait {
    entity_id: EntityId,
    entity_type: EntityType,
    action: EventAction,
    min_start: DateTime<Utc>,
    timeout_secs: u64,
    cancel: Option<CancelToken>,
}

impl EventWait {
    /// Wait for `action` on the given entity, ignoring events created before `min_start`.
    #[must_use]
    pub fn new(
        entity_id: impl Into<EntityId>,
        entity_type: EntityType,
        action: EventAction,
        min_start: DateTime<Utc>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type,
            action,
            min_start,
            timeout_secs,
            cancel: None,
        }
    }

    /// Allow the wait to be cancelled through `token`.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Entity being watched.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Entity type being watched.
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Action being watched.
    #[must_use]
    pub const fn action(&self) -> EventAction {
        self.action
    }

    /// Maximum time to wait.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns true if `event` is the one being waited for.
    ///
    /// Events without a parsed creation time never match. A wait whose action or entity type
    /// is `Unknown` matches nothing, since unrecognized wire values all decode to `Unknown`.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.action != EventAction::Unknown
            && self.entity_type != EntityType::Unknown
            && event.action == self.action
            && event.entity_type() == Some(self.entity_type)
            && event.entity_id() == Some(&self.entity_id)
            && event
                .created
                .is_some_and(|created| created >= self.min_start)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    fn inspect(&self, events: Vec<Event>) -> PollOutcome {
        for event in events {
            if !self.matches(&event) {
                continue;
            }

            match event.status {
                EventStatus::Failed => return PollOutcome::Failed(event),
                EventStatus::Finished => return PollOutcome::Finished(event),
                status => debug!(
                    event_id = %event.id,
                    status = %status,
                    percent_complete = ?event.percent_complete,
                    "awaited event still in progress"
                ),
            }
        }
        PollOutcome::Pending
    }

    fn timeout_error(&self) -> Error {
        Error::PollTimeout {
            expected: EventStatus::Finished,
            entity_type: self.entity_type,
            entity_id: self.entity_id.clone(),
            action: self.action,
            timeout_secs: self.timeout_secs,
        }
    }

    fn failed_error(&self, event: Event) -> Error {
        Error::PollFailed {
            entity_type: self.entity_type,
            entity_id: self.entity_id.clone(),
            action: self.action,
            event: Box::new(event),
        }
    }

    fn cancelled_error(&self) -> Error {
        Error::Cancelled {
            entity_type: self.entity_type,
            entity_id: self.entity_id.clone(),
            action: self.action,
        }
    }
}

enum PollOutcome {
    Finished(Event),
    Failed(Event),
    Pending,
}

fn unseen_events_options() -> ListOptions {
    let filter = Filter::new()
        .eq("seen", false)
        .order_by("created", SortOrder::Desc);
    ListOptions::new().with_page(1).with_filter(&filter)
}

impl LinodeClient {
    /// Wait until the event described by `wait` finishes.
    ///
    /// # Errors
    ///
    /// - [`Error::PollFailed`] if the event reports the `failed` status
    /// - [`Error::PollTimeout`] if no finished event is seen within the timeout
    /// - [`Error::Cancelled`] if the wait's [`CancelToken`] is cancelled
    /// - any transport, API, decode or timestamp error raised while fetching events
    pub async fn wait_for_event_finished(&self, wait: &EventWait) -> Result<Event> {
        let start = Instant::now();
        let options = unseen_events_options();

        loop {
            if wait.is_cancelled() {
                return Err(wait.cancelled_error());
            }

            let page = self.list_events_page(&options).await?;
            debug!(
                entity_type = %wait.entity_type,
                entity_id = %wait.entity_id,
                action = %wait.action,
                events = page.data.len(),
                "checking Linode events"
            );

            match wait.inspect(page.data) {
                PollOutcome::Finished(event) => {
                    info!(
                        entity_type = %wait.entity_type,
                        entity_id = %wait.entity_id,
                        action = %wait.action,
                        event_id = %event.id,
                        "Linode event finished"
                    );
                    return Ok(event);
                }
                PollOutcome::Failed(event) => {
                    warn!(
                        entity_type = %wait.entity_type,
                        entity_id = %wait.entity_id,
                        action = %wait.action,
                        event_id = %event.id,
                        "Linode event failed"
                    );
                    return Err(wait.failed_error(event));
                }
                PollOutcome::Pending => {}
            }

            match &wait.cancel {
                Some(token) => {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => return Err(wait.cancelled_error()),
                        () = sleep(EVENT_POLL_INTERVAL) => {}
                    }
                }
                None => sleep(EVENT_POLL_INTERVAL).await,
            }

            if start.elapsed() >= wait.timeout() {
                return Err(wait.timeout_error());
            }
        }
    }
}
