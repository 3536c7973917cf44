//! Window configuration and open-request feature-string parsing.
//!
//! A remote-window open request carries a `window.open`-style feature string
//! (`key=value` pairs, comma separated, percent-encoded). Parsing is
//! deliberately lenient: pairs that do not split into exactly one key and one
//! value are dropped, never surfaced as errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Chrome flags for a wrapper window.
///
/// The navigation toolbar is displayed by default; the rocketbar is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromeConfig {
    #[serde(default = "default_toolbar")]
    pub toolbar: bool,
    #[serde(default)]
    pub rocketbar: bool,
}

fn default_toolbar() -> bool {
    true
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            toolbar: default_toolbar(),
            rocketbar: false,
        }
    }
}

/// Immutable-at-construction configuration of an application window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Target URL of the browsing context.
    pub url: String,
    /// Registry key. Real app origin, target URL for anonymous wrappers, or a
    /// synthetic `window:{name},source:{origin}` key for named wrappers.
    pub origin: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    pub manifest_url: Option<String>,
    /// Name the opener gave the window, used for named-window dedup.
    pub window_name: Option<String>,
    pub origin_name: Option<String>,
    pub origin_url: Option<String>,
    pub search_name: Option<String>,
    pub search_url: Option<String>,
    #[serde(default)]
    pub use_async_pan_zoom: bool,
    #[serde(default)]
    pub is_homescreen: bool,
    #[serde(default)]
    pub chrome: ChromeConfig,
}

/// Parse a feature string into a key/value map.
///
/// Both halves of each pair are trimmed and percent-decoded. Malformed pairs
/// (not exactly one `=`, or undecodable) are dropped.
pub fn parse_features(features: &str) -> HashMap<String, String> {
    features
        .split(',')
        .filter_map(|pair| {
            let parts: Vec<&str> = pair.split('=').collect();
            if parts.len() != 2 {
                return None;
            }
            let key = urlencoding::decode(parts[0].trim()).ok()?;
            let value = urlencoding::decode(parts[1].trim()).ok()?;
            Some((key.into_owned(), value.into_owned()))
        })
        .collect()
}

impl WindowConfig {
    /// Build a wrapper-window configuration from decoded feature pairs.
    ///
    /// The target URL, origin key and window name are attached by the caller;
    /// this covers only what the feature string itself carries.
    pub fn from_features(features: &HashMap<String, String>) -> Self {
        let mut config = WindowConfig {
            title: features.get("name").cloned().unwrap_or_default(),
            icon: features.get("icon").cloned().unwrap_or_default(),
            ..WindowConfig::default()
        };

        if features.contains_key("originName") {
            config.origin_name = features.get("originName").cloned();
            config.origin_url = features.get("originUrl").cloned();
        }

        if features.contains_key("searchName") {
            config.search_name = features.get("searchName").cloned();
            config.search_url = features.get("searchUrl").cloned();
        }

        config.use_async_pan_zoom =
            features.get("useAsyncPanZoom").map(String::as_str) == Some("true");

        config.chrome.rocketbar = matches!(
            features.get("location").map(String::as_str),
            Some("yes") | Some("1")
        );

        config.chrome.toolbar = !matches!(
            features.get("toolbar").map(String::as_str),
            Some("no") | Some("0")
        );

        config
    }
}
