//! Animation preferences
//!
//! Persisted in LocalStorage; everything else on the page is static.

use serde::{Deserialize, Serialize};

use crate::consts::{LINK_DISTANCE, PARTICLE_COUNT, SCROLL_SPY_OFFSET};
use crate::engine::FieldConfig;

/// Background quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Particles in the background field for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => PARTICLE_COUNT,
            QualityPreset::High => 160,
        }
    }
}

/// Page preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background quality preset
    pub quality: QualityPreset,
    /// Animated particle background
    pub particles: bool,
    /// Reduced motion (no particle animation)
    pub reduced_motion: bool,
    /// Scroll spy look-ahead (px)
    pub scroll_offset: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,
            scroll_offset: SCROLL_SPY_OFFSET,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count (0 disables the field)
    pub fn particle_count(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.particle_count()
        }
    }

    /// Field configuration for a given RNG seed
    pub fn field_config(&self, seed: u64) -> FieldConfig {
        FieldConfig {
            count: self.particle_count(),
            link_distance: LINK_DISTANCE,
            seed,
        }
    }

    /// Adopt the system reduced-motion preference. A system that asks for
    /// reduced motion overrides the stored flag; one that doesn't leaves it
    /// alone. Returns true if the settings changed.
    pub fn sync_reduced_motion(&mut self, system_prefers_reduced: bool) -> bool {
        if system_prefers_reduced && !self.reduced_motion {
            log::info!("System prefers reduced motion, disabling particle background");
            self.reduced_motion = true;
            return true;
        }
        false
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "neon_folio_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} outside the browser, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_engine_constants() {
        let s = Settings::default();
        assert_eq!(s.particle_count(), PARTICLE_COUNT);
        assert_eq!(s.scroll_offset, SCROLL_SPY_OFFSET);
        assert_eq!(s.field_config(5), FieldConfig::with_seed(5));
    }

    #[test]
    fn test_reduced_motion_disables_field() {
        let s = Settings {
            reduced_motion: true,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(s.particle_count(), 0);

        let s = Settings {
            particles: false,
            ..Settings::default()
        };
        assert_eq!(s.field_config(0).count, 0);
    }

    #[test]
    fn test_preset_particle_counts() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).particle_count(), 40);
        assert_eq!(Settings::from_preset(QualityPreset::Medium).particle_count(), 100);
        assert_eq!(Settings::from_preset(QualityPreset::High).particle_count(), 160);
    }

    #[test]
    fn test_system_reduced_motion_overrides_stored() {
        let mut s = Settings::default();
        assert!(!s.sync_reduced_motion(false));
        assert!(!s.reduced_motion);

        assert!(s.sync_reduced_motion(true));
        assert_eq!(s.particle_count(), 0);

        // Already reduced, nothing to persist
        assert!(!s.sync_reduced_motion(true));
        // A system without the preference does not undo a stored choice
        assert!(!s.sync_reduced_motion(false));
        assert!(s.reduced_motion);
    }

    #[test]
    fn test_synced_settings_survive_storage_roundtrip() {
        let mut s = Settings::from_preset(QualityPreset::Low);
        s.sync_reduced_motion(true);
        let json = serde_json::to_string(&s).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, s);
        assert_eq!(loaded.particle_count(), 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"quality":"High"}"#).unwrap();
        assert_eq!(s.quality, QualityPreset::High);
        assert!(s.particles);
        assert_eq!(s.particle_count(), 160);
    }
}
