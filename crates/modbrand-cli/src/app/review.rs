//! Moderation queue: list pending submissions, accept or reject them, and
//! verify their submitters.

use modbrand_client::ApiError;
use modbrand_core::{Logger, PendingImage};
use tracing::{debug, info, warn};

use super::effects::{Request, failure_text};
use super::inflight::InFlight;
use super::notice::Notice;

/// A reviewer's decision on one pending image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Accept,
    Reject,
}

impl Decision {
    const fn verb(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }

    const fn past(self) -> &'static str {
        match self {
            Self::Accept => "accepted",
            Self::Reject => "rejected",
        }
    }

    fn request(self, id: &str) -> Request {
        match self {
            Self::Accept => Request::Accept(id.to_string()),
            Self::Reject => Request::Reject(id.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct ReviewWorkflow {
    items: Vec<PendingImage>,
    loading: bool,
    selected: usize,
    /// Image ids with an accept or reject outstanding.
    deciding: InFlight,
    /// User ids with a verification outstanding.
    verifying: InFlight,
    log: Logger,
}

impl ReviewWorkflow {
    pub fn new(log: Logger) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            selected: 0,
            deciding: InFlight::default(),
            verifying: InFlight::default(),
            log,
        }
    }

    pub fn items(&self) -> &[PendingImage] {
        &self.items
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&PendingImage> {
        self.items.get(self.selected)
    }

    /// Whether an accept or reject for `id` is still outstanding.
    pub fn is_deciding(&self, id: &str) -> bool {
        self.deciding.contains(id)
    }

    pub fn is_verifying(&self, user_id: &str) -> bool {
        self.verifying.contains(user_id)
    }

    pub const fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub const fn refresh(&mut self) -> Request {
        self.loading = true;
        Request::FetchPending
    }

    /// Replace the list with a fresh fetch. A failed fetch keeps the old
    /// list and reports the failure.
    pub fn on_list(&mut self, result: Result<Vec<PendingImage>, ApiError>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(items) => {
                debug!(parent: self.log.span(), count = items.len(), "Pending list loaded");
                self.items = items;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
                None
            }
            Err(err) => {
                warn!(parent: self.log.span(), error = %err, "Failed to load pending list");
                Some(Notice::error(format!(
                    "Failed to load pending images: {}",
                    failure_text(&err)
                )))
            }
        }
    }

    /// Request acceptance of `id`. `None` while an accept or reject for the
    /// same id is outstanding.
    pub fn accept(&mut self, id: &str) -> Option<Request> {
        self.decide(Decision::Accept, id)
    }

    /// Request deletion of the pending image `id`. Shares the accept guard,
    /// so one image never has two decisions in flight.
    pub fn reject(&mut self, id: &str) -> Option<Request> {
        self.decide(Decision::Reject, id)
    }

    /// Apply an accept outcome. Success yields exactly one list refresh;
    /// failure leaves the list untouched.
    pub fn on_accepted(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
    ) -> (Notice, Option<Request>) {
        self.on_decided(Decision::Accept, id, result)
    }

    /// Same contract as [`Self::on_accepted`].
    pub fn on_rejected(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
    ) -> (Notice, Option<Request>) {
        self.on_decided(Decision::Reject, id, result)
    }

    fn decide(&mut self, decision: Decision, id: &str) -> Option<Request> {
        let action = decision.verb();
        if !self.deciding.try_begin(id) {
            debug!(parent: self.log.span(), id, action, "Decision already in flight");
            return None;
        }
        info!(parent: self.log.span(), id, action, "Reviewing image");
        Some(decision.request(id))
    }

    fn on_decided(
        &mut self,
        decision: Decision,
        id: &str,
        result: Result<(), ApiError>,
    ) -> (Notice, Option<Request>) {
        self.deciding.finish(id);
        let action = decision.verb();
        match result {
            Ok(()) => {
                info!(parent: self.log.span(), id, action, "Review applied");
                let notice = Notice::success(format!("Image {id} {}", decision.past()));
                (notice, Some(self.refresh()))
            }
            Err(err) => {
                warn!(parent: self.log.span(), id, action, error = %err, "Review failed");
                let notice = Notice::error(format!("Failed to {action}: {}", failure_text(&err)));
                (notice, None)
            }
        }
    }

    /// Request verification of the submitter `user_id`. `None` while one for
    /// the same user is outstanding.
    pub fn verify(&mut self, user_id: &str) -> Option<Request> {
        if !self.verifying.try_begin(user_id) {
            debug!(parent: self.log.span(), user_id, "Verification already in flight");
            return None;
        }
        info!(parent: self.log.span(), user_id, "Verifying user");
        Some(Request::Verify(user_id.to_string()))
    }

    /// Verification does not change the queue, so nothing is refetched.
    pub fn on_verified(&mut self, user_id: &str, result: Result<(), ApiError>) -> Notice {
        self.verifying.finish(user_id);
        match result {
            Ok(()) => {
                info!(parent: self.log.span(), user_id, "User verified");
                Notice::success(format!("User {user_id} verified"))
            }
            Err(err) => {
                warn!(parent: self.log.span(), user_id, error = %err, "Verification failed");
                Notice::error(format!("Failed to verify: {}", failure_text(&err)))
            }
        }
    }
}
