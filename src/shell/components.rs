//! Pluggable per-window sub-controllers.
//!
//! Every window carries a set of components attached at construction and
//! scoped to its lifetime. They observe the window's platform events and
//! state changes before the window's own handling runs.

use crate::shell::browser::BrowserEvent;
use crate::shell::window::WindowState;

pub trait WindowComponent {
    fn name(&self) -> &'static str;

    fn handle_event(&mut self, _event: &BrowserEvent) {}

    fn handle_state(&mut self, _state: WindowState) {}

    /// The owning window is releasing its resources.
    fn on_kill(&mut self) {}
}

/// Tracks whether the window is inside an open/close transition.
#[derive(Debug, Default)]
pub struct TransitionController {
    transitioning: bool,
}

impl TransitionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }
}

impl WindowComponent for TransitionController {
    fn name(&self) -> &'static str {
        "transition"
    }

    fn handle_state(&mut self, state: WindowState) {
        self.transitioning = matches!(state, WindowState::Opening | WindowState::Closing);
    }

    fn on_kill(&mut self) {
        self.transitioning = false;
    }
}

/// Holds the content's pending modal prompt, if any.
#[derive(Debug, Default)]
pub struct ModalDialogController {
    pending: Option<String>,
}

impl ModalDialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn dismiss(&mut self) -> Option<String> {
        self.pending.take()
    }
}

impl WindowComponent for ModalDialogController {
    fn name(&self) -> &'static str {
        "modal-dialog"
    }

    fn handle_event(&mut self, event: &BrowserEvent) {
        if let BrowserEvent::ModalPrompt { message } = event {
            self.pending = Some(message.clone());
        }
    }

    fn on_kill(&mut self) {
        self.pending = None;
    }
}

/// Holds the content's pending HTTP authentication challenge, if any.
#[derive(Debug, Default)]
pub struct AuthDialogController {
    pending_host: Option<String>,
}

impl AuthDialogController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_host(&self) -> Option<&str> {
        self.pending_host.as_deref()
    }

    pub fn dismiss(&mut self) -> Option<String> {
        self.pending_host.take()
    }
}

impl WindowComponent for AuthDialogController {
    fn name(&self) -> &'static str {
        "auth-dialog"
    }

    fn handle_event(&mut self, event: &BrowserEvent) {
        if let BrowserEvent::AuthRequired { host } = event {
            self.pending_host = Some(host.clone());
        }
    }

    fn on_kill(&mut self) {
        self.pending_host = None;
    }
}

/// Default component set attached to every window.
pub fn default_components() -> Vec<Box<dyn WindowComponent>> {
    vec![
        Box::new(TransitionController::new()),
        Box::new(ModalDialogController::new()),
        Box::new(AuthDialogController::new()),
    ]
}
