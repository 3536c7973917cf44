//! Activity windows and caller-chain routing.
//!
//! An activity is a transient window spawned by another window for cross-app
//! delegation. Each activity keeps the origin of its caller; the caller keeps
//! a forward pointer to its callee. Geometry calls made anywhere on a chain
//! are routed caller → callee to the terminal live node and applied there
//! exactly once.

use anyhow::{bail, Result};
use log::warn;

use crate::shell::config::WindowConfig;
use crate::shell::events::{EventBus, SystemEvent};
use crate::shell::registry::WindowRegistry;
use crate::shell::scheduler::Scheduler;
use crate::shell::window::{AppWindow, WindowKind, WindowState};

/// Upper bound on chain traversal. Chains are acyclic by construction; the
/// bound only caps the damage of a corrupted registry.
const MAX_CHAIN_DEPTH: usize = 64;

/// Spawn an activity window on behalf of `caller_origin`.
///
/// Rejects an unknown caller, an origin already registered, and any request
/// whose caller chain already contains the new origin (acyclicity is asserted
/// at construction, not during traversal).
pub fn open_activity(
    registry: &mut WindowRegistry,
    caller_origin: &str,
    mut config: WindowConfig,
    bus: &mut EventBus,
) -> Result<String> {
    if !registry.contains(caller_origin) {
        bail!("activity caller {caller_origin} is not a running window");
    }
    if registry.contains(&config.origin) {
        bail!("window {} already exists", config.origin);
    }
    if chain_contains(registry, caller_origin, &config.origin) {
        bail!(
            "activity {} would create a caller cycle through {caller_origin}",
            config.origin
        );
    }

    config.title = if config.title.is_empty() {
        config.url.clone()
    } else {
        config.title
    };
    let origin = config.origin.clone();
    let window = AppWindow::with_kind(
        config,
        WindowKind::Activity {
            caller: caller_origin.to_string(),
        },
    );
    registry.insert(window);
    if let Some(caller) = registry.get_mut(caller_origin) {
        caller.set_callee(Some(origin.clone()));
    }
    bus.publish(SystemEvent::Created {
        origin: origin.clone(),
    });
    Ok(origin)
}

/// Tear down an activity and unhook it from its caller.
pub fn close_activity(
    registry: &mut WindowRegistry,
    origin: &str,
    scheduler: &mut Scheduler,
    bus: &mut EventBus,
) {
    let caller = match registry.get(origin).map(AppWindow::kind) {
        Some(WindowKind::Activity { caller }) => Some(caller.clone()),
        _ => None,
    };
    if let Some(mut window) = registry.remove(origin) {
        window.close(scheduler, bus);
    }
    if let Some(caller_origin) = caller {
        if let Some(caller) = registry.get_mut(&caller_origin) {
            if caller.callee() == Some(origin) {
                caller.set_callee(None);
            }
        }
    }
}

/// Walk caller pointers upward from `start`, checking for `needle`.
fn chain_contains(registry: &WindowRegistry, start: &str, needle: &str) -> bool {
    let mut current = start.to_string();
    for _ in 0..MAX_CHAIN_DEPTH {
        if current == needle {
            return true;
        }
        match registry.get(&current).map(AppWindow::kind) {
            Some(WindowKind::Activity { caller }) => current = caller.clone(),
            _ => return false,
        }
    }
    warn!("caller chain from {start} exceeded {MAX_CHAIN_DEPTH} nodes");
    true
}

/// Follow callee pointers from `origin` to the currently displayed terminal
/// node of its chain.
pub fn terminal_origin(registry: &WindowRegistry, origin: &str) -> Option<String> {
    if !registry.contains(origin) {
        return None;
    }
    let mut current = origin.to_string();
    for _ in 0..MAX_CHAIN_DEPTH {
        let next = registry
            .get(&current)
            .and_then(|window| window.callee())
            .and_then(|callee| {
                registry
                    .get(callee)
                    .filter(|window| window.state() != WindowState::Killed)
                    .map(|window| window.origin().to_string())
            });
        match next {
            Some(next) => current = next,
            None => return Some(current),
        }
    }
    warn!("callee chain from {origin} exceeded {MAX_CHAIN_DEPTH} nodes");
    Some(current)
}

/// Resize the chain containing `origin`: exactly one application, on the
/// terminal node.
pub fn resize(registry: &mut WindowRegistry, origin: &str, width: u32, height: u32) {
    if let Some(terminal) = terminal_origin(registry, origin) {
        if let Some(window) = registry.get_mut(&terminal) {
            window.apply_resize(width, height);
        }
    }
}

/// Orientation counterpart of [`resize`].
pub fn set_orientation(registry: &mut WindowRegistry, origin: &str, orientation: &str) {
    if let Some(terminal) = terminal_origin(registry, origin) {
        if let Some(window) = registry.get_mut(&terminal) {
            window.apply_orientation(orientation);
        }
    }
}
