//! Installed-application catalog and the capability check contract.
//!
//! Both are narrow interfaces over external collaborators: the catalog mirrors
//! the platform's installed-app store, and [`PermissionLookup`] mirrors its
//! permission settings. Only an explicit allow permits remote-window opening.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Permission name gating `window.open(..., "remote=true")`.
pub const OPEN_REMOTE_WINDOW: &str = "open-remote-window";

/// An installed application, keyed by its manifest URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    pub origin: String,
    pub manifest_url: String,
}

/// Lookup table of installed applications.
#[derive(Debug, Default)]
pub struct AppCatalog {
    apps: HashMap<String, InstalledApp>,
}

impl AppCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, app: InstalledApp) {
        self.apps.insert(app.manifest_url.clone(), app);
    }

    pub fn by_manifest_url(&self, manifest_url: &str) -> Option<&InstalledApp> {
        self.apps.get(manifest_url)
    }
}

/// Outcome of a capability lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Allow,
    Deny,
    Prompt,
    Unknown,
}

/// Capability check keyed by `(permission, manifest URL, origin)`.
pub trait PermissionLookup {
    fn query(&self, permission: &str, manifest_url: &str, origin: &str) -> PermissionState;
}

/// In-memory permission table; anything not granted reads as `Unknown`.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    grants: HashSet<(String, String)>,
}

impl StaticPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, permission: &str, manifest_url: &str) {
        self.grants
            .insert((permission.to_string(), manifest_url.to_string()));
    }
}

impl PermissionLookup for StaticPermissions {
    fn query(&self, permission: &str, manifest_url: &str, _origin: &str) -> PermissionState {
        if self
            .grants
            .contains(&(permission.to_string(), manifest_url.to_string()))
        {
            PermissionState::Allow
        } else {
            PermissionState::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_granted_pairs_read_allow() {
        let mut permissions = StaticPermissions::new();
        permissions.grant(OPEN_REMOTE_WINDOW, "https://home/manifest.webapp");

        assert_eq!(
            permissions.query(
                OPEN_REMOTE_WINDOW,
                "https://home/manifest.webapp",
                "https://home"
            ),
            PermissionState::Allow
        );
        assert_eq!(
            permissions.query(
                OPEN_REMOTE_WINDOW,
                "https://other/manifest.webapp",
                "https://other"
            ),
            PermissionState::Unknown
        );
    }
}
