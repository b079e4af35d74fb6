use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for a viewing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub sync: SyncConfig,
    pub navigation: NavigationConfig,
}

impl ViewerConfig {
    /// Cross-fade layers on click, secondary layer silent.
    pub fn crossfade() -> Self {
        Self::default()
    }

    /// Split-screen halves switched by dedicated controls, click toggles
    /// playback and the secondary layer mirrors the primary's audio settings.
    pub fn instant_split() -> Self {
        Self {
            sync: SyncConfig {
                transition_mode: TransitionMode::Instant,
                secondary_audible: true,
                ..SyncConfig::default()
            },
            navigation: NavigationConfig::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// How the two layers are exposed to the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// Left/right partition toggled without animation.
    Instant,
    /// Timed opacity hand-over between the layers.
    #[default]
    Crossfade,
}

/// Configuration specific to the dual-layer sync engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Secondary is re-seeked once it drifts further than this from primary.
    pub drift_threshold_secs: f64,
    pub transition_mode: TransitionMode,
    /// Mirror primary mute/volume onto secondary instead of silencing it.
    pub secondary_audible: bool,
    pub crossfade_ms: u64,
}

impl SyncConfig {
    pub fn crossfade_duration(&self) -> Duration {
        Duration::from_millis(self.crossfade_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            drift_threshold_secs: 0.08,
            transition_mode: TransitionMode::Crossfade,
            secondary_audible: false,
            crossfade_ms: 400,
        }
    }
}

/// Gesture interpretation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub wheel_cooldown_ms: u64,
    pub swipe_threshold_px: f32,
}

impl NavigationConfig {
    pub fn wheel_cooldown(&self) -> Duration {
        Duration::from_millis(self.wheel_cooldown_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wheel_cooldown_ms: 300,
            swipe_threshold_px: 60.0,
        }
    }
}
