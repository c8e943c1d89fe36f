//! `modbrand` Core Library
//!
//! Shared functionality for `modbrand` components:
//! - Domain records returned by the branding service (users, images)
//! - Client-side role classification for UI gating
//! - Configuration resolution and hierarchy
//! - Tracing initialisation and the injectable [`Logger`]
//! - Common error types

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod role;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::Logger;
pub use model::{BrandImage, PendingImage, User};
pub use role::{Role, classify, classify_session, show_pending};
