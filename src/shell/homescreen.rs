//! The always-present home surface and its crash/restart policy.
//!
//! The homescreen is an ordinary [`AppWindow`] tagged
//! [`WindowKind::Homescreen`] with one special transition: after a fatal
//! content-process fault it is killed and — only if it was the displayed
//! window at the moment of the fault — queued for recreation on the next
//! scheduler tick. A backgrounded homescreen stays dead until the next
//! display request calls [`AppWindow::ensure`].

use anyhow::{Context, Result};
use log::debug;

use crate::shell::applications::AppCatalog;
use crate::shell::config::WindowConfig;
use crate::shell::events::{EventBus, SystemEvent};
use crate::shell::registry::WindowRegistry;
use crate::shell::scheduler::{Scheduler, TaskKind};
use crate::shell::window::{AppWindow, WindowKind, WindowState};

/// Fixed instance id of the homescreen singleton.
pub const HOMESCREEN_INSTANCE_ID: &str = "homescreen";

impl AppWindow {
    /// Construct the homescreen singleton from its installed app entry.
    ///
    /// The frame is rendered immediately and `Created` is published, matching
    /// the bootstrap path of ordinary windows.
    pub fn new_homescreen(
        catalog: &AppCatalog,
        manifest_url: &str,
        bus: &mut EventBus,
    ) -> Result<Self> {
        let app = catalog
            .by_manifest_url(manifest_url)
            .context("homescreen app is not installed")?;

        let config = WindowConfig {
            url: format!("{}/index.html#root", app.origin),
            origin: app.origin.clone(),
            manifest_url: Some(app.manifest_url.clone()),
            is_homescreen: true,
            ..WindowConfig::default()
        };

        let mut window = AppWindow::with_kind(config, WindowKind::Homescreen);
        window.set_instance_id(HOMESCREEN_INSTANCE_ID);
        window.ensure(false);
        bus.publish(SystemEvent::Created {
            origin: window.origin().to_string(),
        });
        Ok(window)
    }

    /// Crash policy: kill now; recreate on the next tick only when displayed.
    ///
    /// Recreation is never done inside the faulting callback's stack. When
    /// the homescreen is not displayed, the next display request is
    /// responsible for calling `ensure` before showing it.
    pub fn restart(&mut self, scheduler: &mut Scheduler, bus: &mut EventBus) {
        if *self.kind() != WindowKind::Homescreen {
            debug!("{}: restart on non-homescreen window ignored", self.instance_id());
            return;
        }
        let was_displayed = self.is_active();
        // kill() cancels pending tasks for this origin, so schedule after it.
        self.kill(scheduler, bus);
        if was_displayed {
            scheduler.schedule(self.origin().to_string(), TaskKind::RestartHomescreen);
        }
    }

    /// Display-path entry: make sure the frame is alive, then set visibility.
    pub fn toggle(&mut self, visible: bool) {
        self.ensure(false);
        self.set_visible(visible);
    }
}

/// Execute everything due on this tick.
///
/// Task executors re-check window state before acting: a resurrection queued
/// before a fully synchronous `kill()` has been cancelled, but a task may
/// still find its window replaced or already revived, and must tolerate that.
pub fn run_scheduled_tasks(
    registry: &mut WindowRegistry,
    scheduler: &mut Scheduler,
    bus: &mut EventBus,
) {
    for task in scheduler.take_due() {
        match task.kind {
            TaskKind::RestartHomescreen => {
                let Some(window) = registry.get_mut(&task.origin) else {
                    debug!("restart task for missing window {}", task.origin);
                    continue;
                };
                if window.state() == WindowState::Killed && window.frame().is_none() {
                    window.ensure(false);
                    bus.publish(SystemEvent::Created {
                        origin: task.origin.clone(),
                    });
                }
            }
        }
    }
}
