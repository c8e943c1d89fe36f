//! Dashboard state machines.

pub mod effects;
pub mod inflight;
pub mod notice;
pub mod overview;
pub mod review;
pub mod route;
pub mod state;
pub mod submission;
pub mod tabs;

pub use effects::{Completion, Effect, MountId, ProbeKind, Request, Response};
pub use notice::{Notice, NoticeBoard, Severity};
pub use route::Route;
pub use state::{App, AppMode, Dashboard};
pub use tabs::{Tab, visible_tabs};
