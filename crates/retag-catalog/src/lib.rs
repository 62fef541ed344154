// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP client for the remote music catalog.
//!
//! Covers the three collaborator calls the pipeline needs: a one-time
//! client-credentials token exchange producing an explicit [`Session`],
//! single-page track search, and cover image download. Requests are
//! rate-limited per client instance.

pub mod client;
pub mod error;
pub mod models;
pub mod rate_limiter;
pub mod session;

pub use client::{CatalogClient, CatalogClientBuilder};
pub use error::{CatalogError, Result};
pub use session::Session;
