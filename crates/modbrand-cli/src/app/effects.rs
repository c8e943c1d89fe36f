//! Effects requested by the state machines and the completions fed back.
//!
//! State transitions never perform I/O. They return [`Effect`]s; the runtime
//! executes them and hands the matching [`Completion`] back to
//! [`App::handle_completion`](super::App::handle_completion).

use std::path::PathBuf;

use modbrand_client::{ApiError, Upload};
use modbrand_core::{BrandImage, PendingImage, User};

/// Identifies one mounted view. Every navigation mounts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct MountId(u64);

impl MountId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Why the session is being probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Dashboard mount: failure redirects away.
    Dashboard,
    /// Landing page mount: failure is the expected default and ignored.
    LandingAuto,
    /// Landing page login action: failure hands off to `/login`.
    LandingLogin,
}

/// A single I/O operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ProbeSession(ProbeKind),
    FetchImages,
    FetchPending,
    LoadFile(PathBuf),
    Submit(Upload),
    Accept(String),
    /// Delete a pending submission from the review queue.
    Reject(String),
    Delete(String),
    /// Mark the user with this id verified.
    Verify(String),
    Logout,
}

/// A request tagged with the view that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub mount: MountId,
    pub request: Request,
}

/// Outcome of a [`Request`].
#[derive(Debug)]
pub enum Response {
    Session(ProbeKind, Result<Option<User>, ApiError>),
    Images(Result<Vec<BrandImage>, ApiError>),
    Pending(Result<Vec<PendingImage>, ApiError>),
    FileLoaded(Result<Upload, String>),
    Submitted(Result<(), ApiError>),
    Accepted(String, Result<(), ApiError>),
    Rejected(String, Result<(), ApiError>),
    Deleted(String, Result<(), ApiError>),
    Verified(String, Result<(), ApiError>),
    LoggedOut(Result<(), ApiError>),
}

/// A response tagged with the view that asked for it.
#[derive(Debug)]
pub struct Completion {
    pub mount: MountId,
    pub response: Response,
}

/// Text to show for a failed call: the service's message when it sent one.
pub fn failure_text(err: &ApiError) -> String {
    err.server_text()
        .map_or_else(|| err.to_string(), str::to_string)
}
