//! Remote-window open handling.
//!
//! Intercepts `window.open` requests coming out of a browsing context,
//! recognizes the ones that ask for an isolated remote window, deduplicates
//! them against the registry and drives window construction or reuse. Every
//! rejection is silent: the request falls through to the platform's default
//! window-open handling, which is the deliberate defense against treating
//! arbitrary `window.open` calls as remote-window requests.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::shell::applications::{AppCatalog, PermissionLookup, PermissionState, OPEN_REMOTE_WINDOW};
use crate::shell::config::{parse_features, WindowConfig};
use crate::shell::events::{EventBus, SystemEvent};
use crate::shell::registry::WindowRegistry;
use crate::shell::scheduler::Scheduler;
use crate::shell::window::AppWindow;

/// Boundary input: an open request emitted by a browsing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub name: String,
    pub url: String,
    /// `window.open` feature string; `None` for a plain open request.
    pub features: Option<String>,
}

/// The context the request came from, identified by its declared manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceContext {
    pub manifest_url: Option<String>,
}

/// Whether the factory claimed the request or left it to default handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Not a remote-window request (or not permitted); the platform's own
    /// window-open path takes over.
    DefaultHandling,
    /// The factory handled the request; `origin` is the dedup key of the
    /// resulting window.
    Handled { origin: String },
}

pub struct WrapperFactory<'a> {
    catalog: &'a AppCatalog,
    permissions: &'a dyn PermissionLookup,
}

impl<'a> WrapperFactory<'a> {
    pub fn new(catalog: &'a AppCatalog, permissions: &'a dyn PermissionLookup) -> Self {
        Self {
            catalog,
            permissions,
        }
    }

    pub fn handle_open_request(
        &self,
        source: &SourceContext,
        request: &OpenWindowRequest,
        registry: &mut WindowRegistry,
        scheduler: &mut Scheduler,
        bus: &mut EventBus,
    ) -> OpenOutcome {
        // A request without a feature string is a normal window.open.
        let Some(raw_features) = request.features.as_deref() else {
            return OpenOutcome::DefaultHandling;
        };

        let features = parse_features(raw_features);
        if features.get("remote").map(String::as_str) != Some("true") {
            return OpenOutcome::DefaultHandling;
        }

        // Fail closed: the caller must be an installed app holding the
        // open-remote-window grant.
        let Some(caller) = source
            .manifest_url
            .as_deref()
            .and_then(|manifest_url| self.catalog.by_manifest_url(manifest_url))
        else {
            debug!("remote-window request from unknown caller ignored");
            return OpenOutcome::DefaultHandling;
        };
        if self
            .permissions
            .query(OPEN_REMOTE_WINDOW, &caller.manifest_url, &caller.origin)
            != PermissionState::Allow
        {
            debug!(
                "remote-window request from {} without permission ignored",
                caller.origin
            );
            return OpenOutcome::DefaultHandling;
        }

        // From here on the factory owns the request; default handling is
        // suppressed even if the dedup path ends up reusing a window.

        // Named windows get a synthetic origin so they can be reused;
        // anonymous windows are keyed by their target URL.
        let origin = if request.name == "_blank" {
            request.url.clone()
        } else {
            format!("window:{},source:{}", request.name, caller.origin)
        };

        if request.name != "_blank" {
            if let Some(existing) = registry.get(&origin) {
                if existing.config.window_name.as_deref() == Some(request.name.as_str()) {
                    let live_url = existing
                        .frame()
                        .map(|frame| frame.src.as_str())
                        .unwrap_or(existing.config.url.as_str());
                    if live_url == request.url {
                        // Already loaded; just bring it to the foreground.
                        bus.publish(SystemEvent::DisplayApp {
                            origin: origin.clone(),
                        });
                        return OpenOutcome::Handled { origin };
                    }
                    // A wrapper context must not be shared between two URLs.
                    bus.publish(SystemEvent::KillApp {
                        origin: origin.clone(),
                    });
                    if let Some(mut doomed) = registry.remove(&origin) {
                        doomed.kill(scheduler, bus);
                    }
                }
            }
        }

        let mut config = WindowConfig::from_features(&features);
        config.url = request.url.clone();
        config.origin = origin.clone();
        config.window_name = Some(request.name.clone());
        if config.title.is_empty() {
            config.title = request.url.clone();
        }

        self.launch_wrapper(config, registry, bus);
        OpenOutcome::Handled { origin }
    }

    /// Construct a brand-new window under the config's key, or retitle the
    /// one already there, then request display.
    fn launch_wrapper(
        &self,
        config: WindowConfig,
        registry: &mut WindowRegistry,
        bus: &mut EventBus,
    ) {
        let origin = config.origin.clone();
        if let Some(existing) = registry.get_mut(&origin) {
            existing.set_title(config.title.clone());
            existing.config.title = config.title;
        } else {
            registry.insert(AppWindow::new(config));
            bus.publish(SystemEvent::Created {
                origin: origin.clone(),
            });
        }
        bus.publish(SystemEvent::DisplayApp { origin });
    }
}
