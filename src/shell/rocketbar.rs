//! System search bar: the port channel's client.
//!
//! Owns the search input value and the channel to the separate
//! search-provider context. Inbound `{ action }` events dispatch to the
//! same-named local handler; inbound `{ input }` events update the local
//! field and echo a `change` back to the provider.

use log::warn;

use crate::shell::events::{EventBus, SystemEvent};
use crate::shell::port::{InboundEvent, OutboundMessage, PortChannel};
use crate::shell::registry::WindowRegistry;

#[derive(Debug, Default)]
pub struct Rocketbar {
    enabled: bool,
    shown: bool,
    results_shown: bool,
    input: String,
    search_app_url: Option<String>,
    search_manifest_url: Option<String>,
    port: PortChannel,
    screen_height: i32,
}

impl Rocketbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn shown(&self) -> bool {
        self.shown
    }

    pub fn results_shown(&self) -> bool {
        self.results_shown
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn port(&self) -> &PortChannel {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut PortChannel {
        &mut self.port
    }

    pub fn search_app_url(&self) -> Option<&str> {
        self.search_app_url.as_deref()
    }

    pub fn search_manifest_url(&self) -> Option<&str> {
        self.search_manifest_url.as_deref()
    }

    /// Screen height recorded on the last [`Rocketbar::show`].
    pub fn screen_height(&self) -> i32 {
        self.screen_height
    }

    /// Point the bar at a search provider. The provider's manifest lives at
    /// the root of its origin.
    pub fn set_search_app_url(&mut self, url: &str) {
        self.search_app_url = Some(url.to_string());
        self.search_manifest_url = origin_root(url).map(|root| format!("{root}manifest.webapp"));
        if self.search_manifest_url.is_none() {
            warn!("rocketbar: cannot derive manifest from search app url {url}");
        }
    }

    /// Show the bar. Tells a connected provider to clear stale results.
    pub fn show(&mut self, screen_height: i32, bus: &mut EventBus) {
        self.screen_height = screen_height;
        if self.shown {
            return;
        }
        if self.port.is_connected() {
            self.port.post(OutboundMessage::clear());
        }
        self.shown = true;
        bus.publish(SystemEvent::RocketbarShown);
    }

    pub fn hide(&mut self, bus: &mut EventBus) {
        if !self.shown {
            return;
        }
        self.shown = false;
        bus.publish(SystemEvent::RocketbarHidden);
    }

    /// Status bar expanded: warm up the provider connection, start fresh.
    pub fn handle_statusbar_expand(&mut self) {
        self.port.ensure_connection();
        self.input.clear();
    }

    /// User edited the search field.
    pub fn handle_input(&mut self, value: &str) {
        self.input = value.to_string();
        self.port.post(OutboundMessage::change(value));
    }

    /// User submitted the search field.
    pub fn handle_submit(&mut self) {
        self.port.post(OutboundMessage::submit(self.input.clone()));
    }

    pub fn handle_cancel(&mut self) {
        self.input.clear();
        self.results_shown = false;
    }

    /// The window manager switched to the homescreen.
    pub fn handle_home(&mut self) {
        self.input.clear();
        self.results_shown = false;
    }

    /// Inbound event from the provider. Buffered (latest wins) when the
    /// channel is not ready; the buffered event replays through
    /// [`Rocketbar::on_connection_accepted`].
    pub fn on_search_message(&mut self, event: InboundEvent) {
        if !self.port.is_connected() {
            self.port.buffer(event);
            return;
        }
        self.dispatch(event);
    }

    pub fn on_connection_accepted(&mut self) {
        if let Some(event) = self.port.connection_established() {
            self.dispatch(event);
        }
    }

    pub fn on_connection_rejected(&mut self, reason: &str) {
        self.port.connection_failed(reason);
    }

    fn dispatch(&mut self, event: InboundEvent) {
        if let Some(action) = event.action.as_deref() {
            match action {
                "showResults" => self.results_shown = true,
                "hideResults" => self.results_shown = false,
                "clear" => self.input.clear(),
                other => warn!("rocketbar: unknown action {other}"),
            }
        } else if let Some(input) = event.input {
            self.input = input;
            self.port
                .post(OutboundMessage::change(self.input.clone()));
        }
    }

    /// Mirror the active window's title into the search field.
    pub fn handle_system_event(&mut self, event: &SystemEvent, registry: &WindowRegistry) {
        if let SystemEvent::TitleChanged { origin, title } = event {
            let active = registry
                .get(origin)
                .map(|window| window.is_active())
                .unwrap_or(false);
            if active {
                self.input = title.clone();
            }
        }
    }
}

/// `https://search.example/app/index.html` → `https://search.example/`.
fn origin_root(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")? + 3;
    let path_start = url[scheme_end..].find('/')? + scheme_end;
    Some(&url[..path_start + 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_manifest_from_search_app_url() {
        let mut bar = Rocketbar::new();
        bar.set_search_app_url("https://search.example/app/index.html");
        assert_eq!(
            bar.search_manifest_url(),
            Some("https://search.example/manifest.webapp")
        );

        bar.set_search_app_url("not-a-url");
        assert_eq!(bar.search_manifest_url(), None);
    }

    #[test]
    fn inbound_input_echoes_a_change() {
        let mut bar = Rocketbar::new();
        bar.port_mut().ensure_connection();
        bar.on_connection_accepted();

        bar.on_search_message(InboundEvent {
            input: Some("maps".into()),
            ..InboundEvent::default()
        });
        assert_eq!(bar.input(), "maps");
        assert_eq!(
            bar.port_mut().take_outbox(),
            vec![OutboundMessage::change("maps")]
        );
    }

    #[test]
    fn inbound_actions_drive_local_handlers() {
        let mut bar = Rocketbar::new();
        bar.port_mut().ensure_connection();
        bar.on_connection_accepted();

        bar.on_search_message(InboundEvent {
            action: Some("showResults".into()),
            ..InboundEvent::default()
        });
        assert!(bar.results_shown());
        bar.on_search_message(InboundEvent {
            action: Some("hideResults".into()),
            ..InboundEvent::default()
        });
        assert!(!bar.results_shown());
    }

    #[test]
    fn show_clears_a_connected_provider() {
        let mut bar = Rocketbar::new();
        let mut bus = EventBus::new();
        bar.port_mut().ensure_connection();
        bar.on_connection_accepted();

        bar.show(480, &mut bus);
        assert!(bar.shown());
        assert_eq!(bar.port_mut().take_outbox(), vec![OutboundMessage::clear()]);
        assert_eq!(bus.drain(), vec![SystemEvent::RocketbarShown]);

        // Idempotent while shown
        bar.show(480, &mut bus);
        assert!(bus.is_empty());
    }
}
