//! The caller's own submissions.

use modbrand_client::ApiError;
use modbrand_core::{BrandImage, Logger};
use tracing::{debug, info, warn};

use super::effects::{Request, failure_text};
use super::inflight::InFlight;
use super::notice::Notice;

#[derive(Debug)]
pub struct ImageList {
    items: Vec<BrandImage>,
    loading: bool,
    selected: usize,
    deleting: InFlight,
    log: Logger,
}

impl ImageList {
    pub fn new(log: Logger) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            selected: 0,
            deleting: InFlight::default(),
            log,
        }
    }

    pub fn items(&self) -> &[BrandImage] {
        &self.items
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&BrandImage> {
        self.items.get(self.selected)
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
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
        Request::FetchImages
    }

    pub fn on_list(&mut self, result: Result<Vec<BrandImage>, ApiError>) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(items) => {
                debug!(parent: self.log.span(), count = items.len(), "Images loaded");
                self.items = items;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
                None
            }
            Err(err) => {
                warn!(parent: self.log.span(), error = %err, "Failed to load images");
                Some(Notice::error(format!(
                    "Failed to load images: {}",
                    failure_text(&err)
                )))
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> Option<Request> {
        if !self.deleting.try_begin(id) {
            debug!(parent: self.log.span(), id, "Delete already in flight");
            return None;
        }
        info!(parent: self.log.span(), id, "Deleting image");
        Some(Request::Delete(id.to_string()))
    }

    /// Success refetches the list; failure leaves it as it was.
    pub fn on_deleted(
        &mut self,
        id: &str,
        result: Result<(), ApiError>,
    ) -> (Notice, Option<Request>) {
        self.deleting.finish(id);
        match result {
            Ok(()) => {
                info!(parent: self.log.span(), id, "Image deleted");
                (
                    Notice::success(format!("Image {id} deleted")),
                    Some(self.refresh()),
                )
            }
            Err(err) => {
                warn!(parent: self.log.span(), id, error = %err, "Delete failed");
                (
                    Notice::error(format!("Failed to delete: {}", failure_text(&err))),
                    None,
                )
            }
        }
    }
}
