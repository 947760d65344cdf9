//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

/// How enemies touching the player in the same tick are penalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollisionPolicy {
    /// Enemies are tested in roster order against the player's current
    /// position. A hit resets the player, so later enemies test against the
    /// start cell.
    #[default]
    Sequential,
    /// Every enemy overlapping the pre-collision position costs a life.
    PerEnemy,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::Sequential => "Sequential",
            CollisionPolicy::PerEnemy => "PerEnemy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Some(CollisionPolicy::Sequential),
            "perenemy" | "per-enemy" | "per_enemy" => Some(CollisionPolicy::PerEnemy),
            _ => None,
        }
    }

    /// The other policy
    pub fn toggled(self) -> Self {
        match self {
            CollisionPolicy::Sequential => CollisionPolicy::PerEnemy,
            CollisionPolicy::PerEnemy => CollisionPolicy::Sequential,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Multi-hit penalty rule
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
    /// Show FPS counter in the HUD
    #[serde(default)]
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::Sequential,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bug_crossing_settings";

    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self)
            .map_err(|e| log::warn!("Failed to serialize settings: {}", e))
            .ok()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Some(json) = self.to_json() {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Saved {}", json),
                    Err(_) => log::warn!("LocalStorage rejected settings"),
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Not persisting settings on native: {:?}", self.to_json());
    }
}
