//! The application window state machine.
//!
//! An [`AppWindow`] owns exactly one browsing-context frame (or none, once
//! killed), its immutable configuration and its lifecycle state, and forwards
//! platform events to its attached sub-controllers before acting on them
//! itself. Specializations (homescreen, activity) are tagged variants sharing
//! this one state machine rather than separate types.

use log::{debug, warn};
use uuid::Uuid;

use crate::shell::browser::{BrowserEvent, BrowserFrame};
use crate::shell::components::{self, WindowComponent};
use crate::shell::config::WindowConfig;
use crate::shell::events::{EventBus, SystemEvent};
use crate::shell::scheduler::Scheduler;

/// Lifecycle states of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Instantiated,
    Opening,
    Active,
    Background,
    Closing,
    Killed,
}

/// Closed set of window specializations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowKind {
    App,
    Homescreen,
    /// A transient surface spawned for cross-app activity delegation.
    /// `caller` is the origin of the window that spawned it; the reference is
    /// weak — the caller outlives the activity.
    Activity { caller: String },
}

pub struct AppWindow {
    instance_id: String,
    kind: WindowKind,
    pub config: WindowConfig,
    state: WindowState,
    frame: Option<BrowserFrame>,
    title: String,
    orientation: Option<String>,
    last_size: Option<(u32, u32)>,
    resize_count: u32,
    /// Origin of the activity this window spawned, if any (caller → callee).
    callee: Option<String>,
    components: Vec<Box<dyn WindowComponent>>,
}

impl AppWindow {
    pub fn new(config: WindowConfig) -> Self {
        Self::with_kind(config, WindowKind::App)
    }

    pub fn with_kind(config: WindowConfig, kind: WindowKind) -> Self {
        let title = config.title.clone();
        Self {
            instance_id: format!("appwindow-{}", Uuid::new_v4()),
            kind,
            config,
            state: WindowState::Instantiated,
            frame: None,
            title,
            orientation: None,
            last_size: None,
            resize_count: 0,
            callee: None,
            components: components::default_components(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub(crate) fn set_instance_id(&mut self, id: impl Into<String>) {
        self.instance_id = id.into();
    }

    pub fn kind(&self) -> &WindowKind {
        &self.kind
    }

    pub fn origin(&self) -> &str {
        &self.config.origin
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn frame(&self) -> Option<&BrowserFrame> {
        self.frame.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn orientation(&self) -> Option<&str> {
        self.orientation.as_deref()
    }

    pub fn last_size(&self) -> Option<(u32, u32)> {
        self.last_size
    }

    /// How many resize calls have reached this window.
    pub fn resize_count(&self) -> u32 {
        self.resize_count
    }

    pub fn callee(&self) -> Option<&str> {
        self.callee.as_deref()
    }

    pub(crate) fn set_callee(&mut self, callee: Option<String>) {
        self.callee = callee;
    }

    pub fn is_active(&self) -> bool {
        self.state == WindowState::Active
    }

    fn set_state(&mut self, state: WindowState) {
        if self.state == state {
            return;
        }
        debug!(
            "{}: {:?} -> {:?}",
            self.instance_id, self.state, state
        );
        self.state = state;
        for component in &mut self.components {
            component.handle_state(state);
        }
    }

    /// Make sure the browsing context exists, resurrecting a killed window.
    ///
    /// With `reset`, an existing frame is reloaded by assigning a
    /// cache-busted URL instead of being recreated.
    pub fn ensure(&mut self, reset: bool) {
        if self.frame.is_none() {
            self.frame = Some(BrowserFrame::new(self.config.url.clone()));
            if matches!(self.state, WindowState::Instantiated | WindowState::Killed) {
                self.set_state(WindowState::Opening);
            }
        } else if reset {
            let busted = format!(
                "{}{}",
                self.config.url,
                chrono::Utc::now().timestamp_millis()
            );
            if let Some(frame) = self.frame.as_mut() {
                frame.src = busted;
            }
        }
    }

    /// Begin opening this window. Idempotent: a second request while already
    /// opening must not create a second frame.
    pub fn request_open(&mut self) {
        match self.state {
            WindowState::Instantiated | WindowState::Killed => self.ensure(false),
            WindowState::Opening | WindowState::Active | WindowState::Background => {}
            WindowState::Closing => {
                // A display request raced a teardown; the teardown wins.
                debug!("{}: open requested while closing, ignored", self.instance_id);
            }
        }
    }

    /// Foreground/background toggle, driven by composition decisions.
    pub fn set_visible(&mut self, visible: bool) {
        if self.state == WindowState::Killed {
            return;
        }
        if let Some(frame) = self.frame.as_mut() {
            frame.visible = visible;
        }
        match (self.state, visible) {
            (WindowState::Background, true) => self.set_state(WindowState::Active),
            (WindowState::Active, false) => self.set_state(WindowState::Background),
            _ => {}
        }
    }

    /// Route a platform event through the sub-controllers and the state
    /// machine.
    pub fn handle_event(
        &mut self,
        event: &BrowserEvent,
        scheduler: &mut Scheduler,
        bus: &mut EventBus,
    ) {
        for component in &mut self.components {
            component.handle_event(event);
        }

        if self.state == WindowState::Killed {
            debug!("{}: event for killed window ignored", self.instance_id);
            return;
        }

        match event {
            BrowserEvent::LoadEnd => {
                if self.state == WindowState::Opening {
                    self.set_state(WindowState::Active);
                }
            }
            BrowserEvent::VisibilityChange { visible } => self.set_visible(*visible),
            BrowserEvent::TitleChange { title } => {
                self.title = title.clone();
                bus.publish(SystemEvent::TitleChanged {
                    origin: self.config.origin.clone(),
                    title: title.clone(),
                });
            }
            BrowserEvent::Error { fatal: true } => {
                if self.kind == WindowKind::Homescreen {
                    self.restart(scheduler, bus);
                } else {
                    // Fatal faults bypass `Closing`.
                    self.kill(scheduler, bus);
                }
            }
            BrowserEvent::Error { fatal: false } => {
                warn!("{}: non-fatal content error", self.instance_id);
            }
            BrowserEvent::Close => {
                if self.kind == WindowKind::Homescreen {
                    self.restart(scheduler, bus);
                } else {
                    self.close(scheduler, bus);
                }
            }
            // Consumed by the modal/auth sub-controllers above.
            BrowserEvent::ModalPrompt { .. } | BrowserEvent::AuthRequired { .. } => {}
        }
    }

    /// Normal teardown: `closing` then `killed`.
    pub fn close(&mut self, scheduler: &mut Scheduler, bus: &mut EventBus) {
        if self.state == WindowState::Killed {
            return;
        }
        self.set_state(WindowState::Closing);
        self.kill(scheduler, bus);
    }

    /// Release the browsing context and publish `Terminated`. Idempotent.
    ///
    /// Cancels any task still scheduled under this window's origin — even
    /// when the window is already killed, so a kill that lands after a crash
    /// still supersedes the queued resurrection.
    pub fn kill(&mut self, scheduler: &mut Scheduler, bus: &mut EventBus) {
        scheduler.cancel_for(&self.config.origin);
        if self.state == WindowState::Killed {
            return;
        }
        self.frame = None;
        self.set_state(WindowState::Killed);
        for component in &mut self.components {
            component.on_kill();
        }
        bus.publish(SystemEvent::Terminated {
            origin: self.config.origin.clone(),
        });
    }

    /// Apply a resize to this window. No-op (not an error) once killed.
    ///
    /// Chain-aware routing — forwarding to the terminal activity of a caller
    /// chain — lives in [`crate::shell::activity`]; this applies locally.
    pub fn apply_resize(&mut self, width: u32, height: u32) {
        if self.state == WindowState::Killed {
            return;
        }
        self.last_size = Some((width, height));
        self.resize_count += 1;
    }

    /// Apply an orientation change to this window. No-op once killed.
    pub fn apply_orientation(&mut self, orientation: &str) {
        if self.state == WindowState::Killed {
            return;
        }
        self.orientation = Some(orientation.to_string());
    }
}
