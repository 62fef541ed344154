// SPDX-License-Identifier: GPL-3.0-or-later

//! Authenticated catalog session.
//!
//! The session is a plain value handed back by
//! [`CatalogClient::authenticate`](crate::CatalogClient::authenticate) and
//! passed explicitly into every search call. Nothing here is process-global;
//! tests construct sessions directly with [`Session::new`].

use std::time::Duration;

/// Capability to perform authenticated catalog calls.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: String,
    token_type: String,
    lifetime: Duration,
}

impl Session {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
            lifetime: Duration::ZERO,
        }
    }

    pub(crate) fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Value for the `Authorization` request header.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Token lifetime as reported by the catalog at exchange time.
    ///
    /// The pipeline is short-lived and does not refresh; a run longer than
    /// this will start seeing `Unauthorized` errors.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
