//! Viewport geometry oracle.
//!
//! Pure computed properties over a metrics provider; nothing is cached across
//! the signals that invalidate it. Consumers never receive sizes inline —
//! every signal produces a single `SystemResize` broadcast, after which
//! windows re-query the computed heights.

use crate::shell::events::{EventBus, SystemEvent};

/// Geometry inputs owned by external collaborators (keyboard, status bar,
/// software buttons).
pub trait ViewportMetrics {
    fn inner_width(&self) -> i32;
    fn inner_height(&self) -> i32;
    fn client_width(&self) -> i32 {
        self.inner_width()
    }
    fn keyboard_height(&self) -> i32;
    fn status_bar_height(&self) -> i32;
    fn software_button_height(&self) -> i32;
}

/// The fixed set of signals that invalidate layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSignal {
    Resize,
    StatusBarExpand,
    StatusBarCollapse,
    KeyboardShow,
    KeyboardHide,
    AttentionScreenHide,
    FullscreenChange,
    SoftwareButtonShow,
    SoftwareButtonHide,
}

#[derive(Debug, Default)]
pub struct LayoutManager {
    keyboard_enabled: bool,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyboard_enabled(&self) -> bool {
        self.keyboard_enabled
    }

    /// Fold a signal into keyboard state and broadcast one `SystemResize`.
    pub fn handle_signal(&mut self, signal: LayoutSignal, bus: &mut EventBus) {
        match signal {
            LayoutSignal::KeyboardShow => self.keyboard_enabled = true,
            LayoutSignal::KeyboardHide => self.keyboard_enabled = false,
            _ => {}
        }
        bus.publish(SystemEvent::SystemResize);
    }

    fn keyboard_height(&self, metrics: &dyn ViewportMetrics) -> i32 {
        if self.keyboard_enabled {
            metrics.keyboard_height()
        } else {
            0
        }
    }

    /// Height available to an ordinary (chrome-visible) window.
    pub fn usual_height(&self, metrics: &dyn ViewportMetrics) -> i32 {
        metrics.inner_height()
            - self.keyboard_height(metrics)
            - metrics.software_button_height()
            - metrics.status_bar_height()
    }

    /// Height available to a fullscreen window.
    pub fn fullscreen_height(&self, metrics: &dyn ViewportMetrics) -> i32 {
        metrics.inner_height() - self.keyboard_height(metrics)
    }

    pub fn width(&self, metrics: &dyn ViewportMetrics) -> i32 {
        metrics.inner_width()
    }

    pub fn client_width(&self, metrics: &dyn ViewportMetrics) -> i32 {
        metrics.client_width()
    }

    /// Whether `height` is exactly what this layout would hand the window.
    pub fn matches(
        &self,
        metrics: &dyn ViewportMetrics,
        _width: i32,
        height: i32,
        fullscreen: bool,
    ) -> bool {
        if fullscreen {
            self.fullscreen_height(metrics) == height
        } else {
            self.usual_height(metrics) == height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Metrics {
        keyboard: i32,
    }

    impl ViewportMetrics for Metrics {
        fn inner_width(&self) -> i32 {
            320
        }
        fn inner_height(&self) -> i32 {
            480
        }
        fn keyboard_height(&self) -> i32 {
            self.keyboard
        }
        fn status_bar_height(&self) -> i32 {
            20
        }
        fn software_button_height(&self) -> i32 {
            40
        }
    }

    #[test]
    fn heights_subtract_keyboard_only_while_enabled() {
        let metrics = Metrics { keyboard: 200 };
        let mut layout = LayoutManager::new();
        let mut bus = EventBus::new();

        assert_eq!(layout.usual_height(&metrics), 480 - 40 - 20);
        assert_eq!(layout.fullscreen_height(&metrics), 480);

        layout.handle_signal(LayoutSignal::KeyboardShow, &mut bus);
        assert!(layout.keyboard_enabled());
        assert_eq!(layout.usual_height(&metrics), 480 - 200 - 40 - 20);
        assert_eq!(layout.fullscreen_height(&metrics), 480 - 200);

        layout.handle_signal(LayoutSignal::KeyboardHide, &mut bus);
        assert_eq!(layout.usual_height(&metrics), 480 - 40 - 20);
    }

    #[test]
    fn every_signal_broadcasts_exactly_one_resize() {
        let mut layout = LayoutManager::new();
        let mut bus = EventBus::new();
        let signals = [
            LayoutSignal::Resize,
            LayoutSignal::StatusBarExpand,
            LayoutSignal::StatusBarCollapse,
            LayoutSignal::KeyboardShow,
            LayoutSignal::KeyboardHide,
            LayoutSignal::AttentionScreenHide,
            LayoutSignal::FullscreenChange,
            LayoutSignal::SoftwareButtonShow,
            LayoutSignal::SoftwareButtonHide,
        ];
        for signal in signals {
            layout.handle_signal(signal, &mut bus);
        }
        let events = bus.drain();
        assert_eq!(events.len(), signals.len());
        assert!(events.iter().all(|e| *e == SystemEvent::SystemResize));
    }

    #[test]
    fn matches_compares_against_the_right_height() {
        let metrics = Metrics { keyboard: 0 };
        let layout = LayoutManager::new();
        assert!(layout.matches(&metrics, 320, 420, false));
        assert!(layout.matches(&metrics, 320, 480, true));
        assert!(!layout.matches(&metrics, 320, 480, false));
    }
}
