use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating an [`AimviewConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Options the overlay reads every frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimviewConfig {
    pub ui: UiConfig,
    pub widget: WidgetConfig,
    pub loot: LootConfig,
    pub projection: ProjectionConfig,
}

/// Application-wide UI options shared with the other radar widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Multiplier applied to marker radii.
    pub ui_scale: f32,
    /// Player render cutoff in meters. Zero or negative means unlimited.
    pub max_distance: f32,
    /// Base label font size before LOD scaling.
    pub font_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            max_distance: 0.0,
            font_size: 12.0,
        }
    }
}

/// Per-category toggles and cutoffs for the aimview widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub show_ai: bool,
    pub show_enemy_players: bool,
    pub show_loot: bool,
    pub show_quest_items: bool,
    pub loot_max_distance: f32,
    pub hazard_max_distance: f32,
    pub exit_max_distance: f32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            show_ai: true,
            show_enemy_players: true,
            show_loot: true,
            show_quest_items: true,
            loot_max_distance: 25.0,
            hazard_max_distance: 25.0,
            exit_max_distance: 25.0,
        }
    }
}

/// Global loot switch, owned by the loot filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    pub enabled: bool,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Tuning for the self-derived projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Pseudo field-of-view divisor applied after the perspective divide.
    pub fov_divisor: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { fov_divisor: 1.0 }
    }
}

impl AimviewConfig {
    /// Load from a `.json` file, or YAML for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded aimview config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would turn LOD clamps into NaN or divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("ui.ui_scale", self.ui.ui_scale)?;
        positive("ui.font_size", self.ui.font_size)?;
        positive("projection.fov_divisor", self.projection.fov_divisor)?;
        finite("ui.max_distance", self.ui.max_distance)?;
        finite("widget.loot_max_distance", self.widget.loot_max_distance)?;
        finite("widget.hazard_max_distance", self.widget.hazard_max_distance)?;
        finite("widget.exit_max_distance", self.widget.exit_max_distance)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite number, got {value}"),
        })
    }
}
