//! The browsing-context resource and the platform events it produces.

use uuid::Uuid;

/// An isolated, sandboxed content frame.
///
/// Each [`AppWindow`](crate::shell::AppWindow) owns at most one frame and is
/// the only component allowed to create, reparent or destroy it. A killed
/// window holds no frame at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserFrame {
    pub id: Uuid,
    /// URL currently assigned to the frame.
    pub src: String,
    pub visible: bool,
}

impl BrowserFrame {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            src: src.into(),
            visible: false,
        }
    }
}

/// Events the platform delivers for a browsing context.
///
/// These arrive asynchronously on the single event loop, strictly in arrival
/// order; the window state machine makes all of its progress from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// The content finished its first load.
    LoadEnd,
    /// The content requested to close itself.
    Close,
    /// A content-process error. `fatal` means the process is gone.
    Error { fatal: bool },
    VisibilityChange { visible: bool },
    TitleChange { title: String },
    /// The content opened a modal prompt (alert/confirm/prompt).
    ModalPrompt { message: String },
    /// The content hit an HTTP authentication challenge.
    AuthRequired { host: String },
}
