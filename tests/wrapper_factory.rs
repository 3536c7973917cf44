//! Remote-window open handling: gating, dedup and chrome configuration.

use system_shell::shell::{
    AppCatalog, EventBus, InstalledApp, OpenOutcome, OpenWindowRequest, Scheduler, SourceContext,
    StaticPermissions, SystemEvent, WindowRegistry, WrapperFactory, OPEN_REMOTE_WINDOW,
};

const CALLER_MANIFEST: &str = "https://home.gaiamobile.org/manifest.webapp";
const CALLER_ORIGIN: &str = "https://home.gaiamobile.org";

struct Fixture {
    catalog: AppCatalog,
    permissions: StaticPermissions,
    registry: WindowRegistry,
    scheduler: Scheduler,
    bus: EventBus,
    source: SourceContext,
}

impl Fixture {
    fn new() -> Self {
        let mut catalog = AppCatalog::new();
        catalog.install(InstalledApp {
            origin: CALLER_ORIGIN.into(),
            manifest_url: CALLER_MANIFEST.into(),
        });
        let mut permissions = StaticPermissions::new();
        permissions.grant(OPEN_REMOTE_WINDOW, CALLER_MANIFEST);
        Self {
            catalog,
            permissions,
            registry: WindowRegistry::new(),
            scheduler: Scheduler::new(),
            bus: EventBus::new(),
            source: SourceContext {
                manifest_url: Some(CALLER_MANIFEST.into()),
            },
        }
    }

    fn open(&mut self, name: &str, url: &str, features: Option<&str>) -> OpenOutcome {
        let factory = WrapperFactory::new(&self.catalog, &self.permissions);
        factory.handle_open_request(
            &self.source,
            &OpenWindowRequest {
                name: name.into(),
                url: url.into(),
                features: features.map(String::from),
            },
            &mut self.registry,
            &mut self.scheduler,
            &mut self.bus,
        )
    }
}

#[test]
fn requests_without_remote_true_fall_through() {
    let mut fx = Fixture::new();

    for features in [None, Some(""), Some("toolbar=no"), Some("remote=false"), Some("remote")] {
        let outcome = fx.open("_blank", "https://a/", features);
        assert_eq!(outcome, OpenOutcome::DefaultHandling, "features: {features:?}");
    }
    assert!(fx.registry.is_empty());
    assert!(fx.bus.is_empty());
}

#[test]
fn unknown_caller_is_ignored() {
    let mut fx = Fixture::new();
    fx.source.manifest_url = Some("https://stranger/manifest.webapp".into());

    let outcome = fx.open("_blank", "https://a/", Some("remote=true"));
    assert_eq!(outcome, OpenOutcome::DefaultHandling);
    assert!(fx.registry.is_empty());
}

#[test]
fn missing_permission_fails_closed() {
    let mut fx = Fixture::new();
    fx.permissions = StaticPermissions::new();

    let outcome = fx.open("_blank", "https://a/", Some("remote=true"));
    assert_eq!(outcome, OpenOutcome::DefaultHandling);
    assert!(fx.registry.is_empty());
    assert!(fx.bus.is_empty());
}

#[test]
fn anonymous_request_twice_creates_once_then_redisplays() {
    let mut fx = Fixture::new();

    let outcome = fx.open("_blank", "https://a/", Some("remote=true"));
    assert_eq!(
        outcome,
        OpenOutcome::Handled {
            origin: "https://a/".into()
        }
    );
    assert_eq!(fx.registry.len(), 1);
    assert_eq!(
        fx.bus.drain(),
        vec![
            SystemEvent::Created {
                origin: "https://a/".into()
            },
            SystemEvent::DisplayApp {
                origin: "https://a/".into()
            },
        ]
    );

    fx.open("_blank", "https://a/", Some("remote=true"));
    assert_eq!(fx.registry.len(), 1);
    assert_eq!(
        fx.bus.drain(),
        vec![SystemEvent::DisplayApp {
            origin: "https://a/".into()
        }]
    );
}

#[test]
fn named_window_key_includes_caller_origin() {
    let mut fx = Fixture::new();
    let outcome = fx.open("shop", "https://shop/", Some("remote=true,name=Shop"));
    let expected = format!("window:shop,source:{CALLER_ORIGIN}");
    assert_eq!(outcome, OpenOutcome::Handled { origin: expected.clone() });
    assert!(fx.registry.contains(&expected));
}

#[test]
fn named_window_same_url_redisplays_without_creating() {
    let mut fx = Fixture::new();
    fx.open("shop", "https://shop/", Some("remote=true,name=Shop"));
    fx.bus.drain();

    fx.open("shop", "https://shop/", Some("remote=true,name=Shop"));
    assert_eq!(fx.registry.len(), 1);
    let key = format!("window:shop,source:{CALLER_ORIGIN}");
    assert_eq!(fx.bus.drain(), vec![SystemEvent::DisplayApp { origin: key }]);
}

#[test]
fn named_window_different_url_kills_before_recreating() {
    let mut fx = Fixture::new();
    fx.open("shop", "https://shop/v1", Some("remote=true,name=Shop"));
    fx.bus.drain();
    let key = format!("window:shop,source:{CALLER_ORIGIN}");
    let first_instance = fx.registry.get(&key).unwrap().instance_id().to_string();

    fx.open("shop", "https://shop/v2", Some("remote=true,name=Shop"));

    assert_eq!(fx.registry.len(), 1);
    let window = fx.registry.get(&key).unwrap();
    assert_eq!(window.config.url, "https://shop/v2");
    assert_ne!(window.instance_id(), first_instance);

    // No silent URL swap: the old wrapper dies before the new one exists.
    let events = fx.bus.drain();
    let kill_at = events
        .iter()
        .position(|e| matches!(e, SystemEvent::KillApp { origin } if *origin == key))
        .expect("killapp published");
    let created_at = events
        .iter()
        .position(|e| matches!(e, SystemEvent::Created { origin } if *origin == key))
        .expect("created published");
    assert!(kill_at < created_at);
    assert!(events
        .iter()
        .any(|e| matches!(e, SystemEvent::Terminated { origin } if *origin == key)));
}

#[test]
fn feature_flags_configure_chrome_and_panzoom() {
    let mut fx = Fixture::new();
    fx.open(
        "_blank",
        "https://a/",
        Some("remote=true,toolbar=no,location=yes,useAsyncPanZoom=true"),
    );

    let window = fx.registry.get("https://a/").unwrap();
    assert!(!window.config.chrome.toolbar);
    assert!(window.config.chrome.rocketbar);
    assert!(window.config.use_async_pan_zoom);
}

#[test]
fn title_defaults_to_url_and_updates_on_reuse() {
    let mut fx = Fixture::new();
    fx.open("_blank", "https://a/", Some("remote=true"));
    assert_eq!(fx.registry.get("https://a/").unwrap().title(), "https://a/");

    fx.open("_blank", "https://a/", Some("remote=true,name=News%20Reader"));
    let window = fx.registry.get("https://a/").unwrap();
    assert_eq!(window.title(), "News Reader");
    assert_eq!(fx.registry.len(), 1);
}
