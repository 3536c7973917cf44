//! Application window lifecycle and inter-app composition core.

pub mod activity;
pub mod applications;
pub mod browser;
pub mod components;
pub mod config;
pub mod events;
pub mod homescreen;
pub mod layout;
pub mod port;
pub mod registry;
pub mod rocketbar;
pub mod scheduler;
pub mod window;
pub mod wrapper_factory;

pub use applications::{AppCatalog, InstalledApp, PermissionLookup, PermissionState, StaticPermissions, OPEN_REMOTE_WINDOW};
pub use browser::{BrowserEvent, BrowserFrame};
pub use config::{parse_features, ChromeConfig, WindowConfig};
pub use events::{EventBus, SystemEvent};
pub use homescreen::{run_scheduled_tasks, HOMESCREEN_INSTANCE_ID};
pub use layout::{LayoutManager, LayoutSignal, ViewportMetrics};
pub use port::{InboundEvent, OutboundAction, OutboundMessage, PortChannel, PortState};
pub use registry::WindowRegistry;
pub use rocketbar::Rocketbar;
pub use scheduler::{ScheduledTask, Scheduler, TaskKind};
pub use window::{AppWindow, WindowKind, WindowState};
pub use wrapper_factory::{OpenOutcome, OpenWindowRequest, SourceContext, WrapperFactory};
