use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::device::{Breakpoints, ScreenSize};

/// Fallback used wherever a configured animation duration is zero
pub const FALLBACK_ANIMATION_MS: u64 = 200;

/// Article-level slider settings, keyed the way the course content stores them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderSettings {
    #[serde(rename = "_isEnabled", default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(
        rename = "_isDisabledWhenAccessibilityActive",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disabled_when_accessibility_active: Option<bool>,
    #[serde(rename = "_slideAnimationDuration", default, skip_serializing_if = "Option::is_none")]
    pub slide_animation_duration: Option<u64>,
    #[serde(rename = "_heightAnimationDuration", default, skip_serializing_if = "Option::is_none")]
    pub height_animation_duration: Option<u64>,
    #[serde(rename = "_isEnabledOnScreenSizes", default, skip_serializing_if = "Option::is_none")]
    pub enabled_on_screen_sizes: Option<String>,
    #[serde(rename = "_hasTabs", default, skip_serializing_if = "Option::is_none")]
    pub has_tabs: Option<bool>,
    #[serde(rename = "_hasArrows", default, skip_serializing_if = "Option::is_none")]
    pub has_arrows: Option<bool>,
    #[serde(rename = "_startIndex", default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    #[serde(rename = "_hasUniformHeight", default, skip_serializing_if = "Option::is_none")]
    pub has_uniform_height: Option<bool>,
    #[serde(rename = "_minHeight", default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(rename = "_enableTouchSwipe", default, skip_serializing_if = "Option::is_none")]
    pub enable_touch_swipe: Option<bool>,
    #[serde(rename = "_swipeSensitivity", default, skip_serializing_if = "Option::is_none")]
    pub swipe_sensitivity: Option<f64>,
}

/// Course-wide defaults applied beneath every article's own settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderDefaults {
    #[serde(rename = "_slideAnimationDuration", default, skip_serializing_if = "Option::is_none")]
    pub slide_animation_duration: Option<u64>,
    #[serde(rename = "_heightAnimationDuration", default, skip_serializing_if = "Option::is_none")]
    pub height_animation_duration: Option<u64>,
    #[serde(rename = "_isEnabledOnScreenSizes", default, skip_serializing_if = "Option::is_none")]
    pub enabled_on_screen_sizes: Option<String>,
    #[serde(rename = "_hasTabs", default, skip_serializing_if = "Option::is_none")]
    pub has_tabs: Option<bool>,
    #[serde(rename = "_hasArrows", default, skip_serializing_if = "Option::is_none")]
    pub has_arrows: Option<bool>,
    #[serde(rename = "_hasUniformHeight", default, skip_serializing_if = "Option::is_none")]
    pub has_uniform_height: Option<bool>,
    #[serde(rename = "_enableTouchSwipe", default, skip_serializing_if = "Option::is_none")]
    pub enable_touch_swipe: Option<bool>,
    #[serde(rename = "_swipeSensitivity", default, skip_serializing_if = "Option::is_none")]
    pub swipe_sensitivity: Option<f64>,
}

/// Course-level slider block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSliderConfig {
    /// Global kill switch; `Some(false)` disables every article slider
    #[serde(rename = "_isEnabled", default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(rename = "_defaults", default)]
    pub defaults: SliderDefaults,
}

/// Fully resolved slider configuration, immutable for the life of a render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderConfig {
    pub is_enabled: bool,
    pub disable_when_accessibility_active: bool,
    pub slide_animation_ms: u64,
    pub height_animation_ms: u64,
    pub enabled_screen_sizes: BTreeSet<ScreenSize>,
    pub has_tabs: bool,
    pub has_arrows: bool,
    pub start_index: usize,
    pub has_uniform_height: bool,
    pub min_height_px: Option<f64>,
    pub touch_swipe_enabled: bool,
    pub swipe_sensitivity_px: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::resolve(None, &SliderSettings::default())
    }
}

impl SliderConfig {
    /// Merge article settings over course defaults
    ///
    /// Zero durations and sensitivities at course level count as unset,
    /// as do a zero start index and minimum height at article level.
    pub fn resolve(course: Option<&CourseSliderConfig>, article: &SliderSettings) -> Self {
        let defaults = course.map(|c| c.defaults.clone()).unwrap_or_default();

        let screen_sizes = article
            .enabled_on_screen_sizes
            .clone()
            .or(defaults.enabled_on_screen_sizes)
            .unwrap_or_else(default_screen_sizes);

        Self {
            is_enabled: article.is_enabled.unwrap_or(true),
            disable_when_accessibility_active: article
                .disabled_when_accessibility_active
                .unwrap_or(false),
            slide_animation_ms: article.slide_animation_duration.unwrap_or_else(|| {
                non_zero(defaults.slide_animation_duration).unwrap_or(default_slide_ms())
            }),
            height_animation_ms: article.height_animation_duration.unwrap_or_else(|| {
                non_zero(defaults.height_animation_duration).unwrap_or(default_height_ms())
            }),
            enabled_screen_sizes: parse_screen_sizes(&screen_sizes),
            has_tabs: article.has_tabs.or(defaults.has_tabs).unwrap_or(false),
            has_arrows: article.has_arrows.or(defaults.has_arrows).unwrap_or(true),
            start_index: article.start_index.unwrap_or(0),
            has_uniform_height: article
                .has_uniform_height
                .or(defaults.has_uniform_height)
                .unwrap_or(true),
            min_height_px: article.min_height.filter(|h| *h > 0.0),
            touch_swipe_enabled: article
                .enable_touch_swipe
                .or(defaults.enable_touch_swipe)
                .unwrap_or(true),
            swipe_sensitivity_px: article
                .swipe_sensitivity
                .filter(|s| *s > 0.0)
                .or(defaults.swipe_sensitivity.filter(|s| *s > 0.0))
                .unwrap_or_else(default_swipe_sensitivity),
        }
    }

    #[inline]
    pub fn is_enabled_on(&self, size: ScreenSize) -> bool {
        self.enabled_screen_sizes.contains(&size)
    }

    /// Slide animation length, never zero
    #[inline]
    pub fn slide_duration_ms(&self) -> u64 {
        if self.slide_animation_ms == 0 {
            FALLBACK_ANIMATION_MS
        } else {
            self.slide_animation_ms
        }
    }

    /// Height transition length: twice the configured height animation
    #[inline]
    pub fn height_transition_ms(&self) -> u64 {
        let base = if self.height_animation_ms == 0 {
            FALLBACK_ANIMATION_MS
        } else {
            self.height_animation_ms
        };
        base * 2
    }
}

/// Whether an article gets slider behaviour at all
pub fn is_slider_enabled(
    course: Option<&CourseSliderConfig>,
    article: Option<&SliderSettings>,
    accessibility_active: bool,
) -> bool {
    if course.and_then(|c| c.is_enabled) == Some(false) {
        return false;
    }

    let Some(article) = article else {
        return false;
    };

    if article.is_enabled != Some(true) {
        return false;
    }

    if article.disabled_when_accessibility_active == Some(true) && accessibility_active {
        return false;
    }

    true
}

/// Parse a space separated list of screen-size names, skipping unknown ones
pub fn parse_screen_sizes(list: &str) -> BTreeSet<ScreenSize> {
    list.split_whitespace()
        .filter_map(|name| match name.parse::<ScreenSize>() {
            Ok(size) => Some(size),
            Err(e) => {
                warn!("Ignoring screen size in slider config: {}", e);
                None
            }
        })
        .collect()
}

fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v > 0)
}

fn default_slide_ms() -> u64 {
    600
}

fn default_height_ms() -> u64 {
    300
}

fn default_screen_sizes() -> String {
    "large medium".to_string()
}

fn default_swipe_sensitivity() -> f64 {
    50.0
}

/// Settings for the terminal viewer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub breakpoints: Breakpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while an animation or timer is pending
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Easing curve for slide motion
    #[serde(default)]
    pub easing: EasingType,
    /// Pixel width of one terminal cell, used to scale drag gestures
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
    /// Pixel height of one terminal cell
    #[serde(default = "default_cell_height")]
    pub cell_height_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
        }
    }
}

/// Easing curve applied to animated strip motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// No animation (instant jump)
    None,
    /// Linear interpolation
    Linear,
    /// Half-cosine ease-in-out
    #[default]
    Swing,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blockslider")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/blockslider/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("blockslider")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("blockslider.log")
    }
}
