//! Mod Developer Branding service client.
//!
//! [`BrandApi`] is the async seam the dashboard talks through;
//! [`BrandClient`] implements it over reqwest against the real service.

mod api;
mod client;

pub use api::{ApiError, BrandApi, Upload};
pub use client::{BrandClient, BrandClientConfig, IMAGE_FIELD};
